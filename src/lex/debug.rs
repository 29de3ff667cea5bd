#![allow(dead_code)]
/*!
  Trace logging for the compiler pipeline. The macros forward to the `log` facade at trace level and
  compile to nothing when the `DEBUG` feature is off.
*/

use super::{FollowMap, PositionId, PositionSet};

#[doc(hidden)]
pub use log;

#[macro_export]
macro_rules! debug_log {
    ($($args:tt)*) => {{
        #[cfg(feature = "DEBUG")]
        {
            $crate::lex::debug::log::trace!($($args)*);
        }
    }}
}

/// Like `debug_log!`, but marks the beginning or end of a compiler phase.
#[macro_export]
macro_rules! debug_logln {
    ($($args:tt)*) => {{
        #[cfg(feature = "DEBUG")]
        {
            $crate::lex::debug::log::debug!($($args)*);
        }
    }}
}


pub fn format_position_set(positions: &PositionSet) -> String {
  positions.iter().map(|x| x.to_string()).collect::<Vec<String>>().join(", ")
}


/// Logs followpos(p) for every position, in position order.
pub fn debug_log_follow_map(follow_map: &FollowMap, position_count: usize) {
  for position in 0..position_count as PositionId {
    debug_log!("  followpos({}) = {{ {} }}", position, format_position_set(&follow_map[position]));
  }
}
