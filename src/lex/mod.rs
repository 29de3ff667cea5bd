#![allow(dead_code)]
/*!

  The engine: character ranges, the regex scanner and parser, direct DFA construction, the packed
  binary image, and the runtime matcher that drives an image over a stream.

*/

#[macro_use]
pub mod debug;
pub(crate) mod limits;
pub mod character;
pub mod range;
pub mod ranges;
pub mod scanner;
pub mod expression;
pub mod position;
pub mod dfa;
pub mod image;
pub mod stream;
pub mod matcher;
pub mod regex;
pub mod error;

use std::collections::BTreeSet;

use defaultmap::DefaultHashMap;


// We alias types to enforce size restrictions on their values.
pub type ActionId   = u32;   //< Which definition a transition accepts; 0 is "no match"
pub type StateId    = u32;   //< A DFA state, numbered in discovery order
pub type Column     = u16;   //< An index into the alphabet partition
pub type PositionId = usize; //< A leaf of the expression tree, numbered in post-order
pub type NodeId     = usize; //< An index into an expression arena

// Containers of the above.
pub type PositionSet = BTreeSet<PositionId>;                   //< Ordered so it can key a state
type FollowMap       = DefaultHashMap<PositionId, PositionSet>; //< followpos(p) for each position p
