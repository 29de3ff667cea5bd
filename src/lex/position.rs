#![allow(dead_code)]
/*!

  Positions are the leaves of an expression tree, numbered in post-order, which is left to right.
  One depth first pass computes `nullable`, `firstpos` and `lastpos` of every node and fills the
  followpos table:

  | Node          | nullable      | firstpos                       | lastpos                        |
  |:--------------|:--------------|:-------------------------------|:-------------------------------|
  | leaf `p`      | false         | {p}                            | {p}                            |
  | `And(l, r)`   | `l.n && r.n`  | `l.n ? l.f ∪ r.f : l.f`        | `r.n ? l.l ∪ r.l : r.l`        |
  | `Or(l, r)`    | `l.n \|\| r.n`| `l.f ∪ r.f`                    | `l.l ∪ r.l`                    |
  | `c?`, `c*`    | true          | `c.f`                          | `c.l`                          |
  | `c+`          | `c.n`         | `c.f`                          | `c.l`                          |

  For `And(l, r)` every position of `l.lastpos` is followed by `r.firstpos`. For `c+` and `c*`
  every position of `c.lastpos` is followed by `c.firstpos`. A node carrying an action assigns it to
  every position of its lastpos.

*/

use std::mem;

use defaultmap::DefaultHashMap;

use super::character::LexChar;
use super::debug::{debug_log_follow_map, format_position_set};
use super::expression::{ExpressionTree, NodeKind};
use super::range::Range;
use super::{ActionId, FollowMap, PositionId, PositionSet};


#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PositionInfo<C: LexChar> {
  pub range  : Range<C>,
  pub action : ActionId, //< The definition that may end after this position, or 0
}


#[derive(Clone, Debug, Default)]
struct Attributes {
  nullable : bool,
  firstpos : PositionSet,
  lastpos  : PositionSet,
}


#[derive(Clone, Debug)]
pub struct Positions<C: LexChar> {
  pub table  : Vec<PositionInfo<C>>,
  pub follow : FollowMap,
  /// firstpos of the root, the positions of the start state.
  pub start  : PositionSet,
}

impl<C: LexChar> Positions<C> {

  pub fn compute(tree: &ExpressionTree<C>) -> Self {
    let mut table: Vec<PositionInfo<C>> = Vec::new();
    let mut follow: FollowMap = DefaultHashMap::default();
    // Attributes of finished nodes that have not yet been consumed by their parent.
    let mut attributes: Vec<Attributes> = vec![Attributes::default(); tree.len()];

    for id in tree.depth_first() {
      let node = tree.node(id);

      let computed = match node.kind {

        NodeKind::Range(range) => {
          let position = table.len() as PositionId;
          table.push(PositionInfo{ range, action: 0 });
          let singleton: PositionSet = Some(position).into_iter().collect();
          Attributes{ nullable: false, firstpos: singleton.clone(), lastpos: singleton }
        }

        NodeKind::And(left, right) => {
          let left  = mem::take(&mut attributes[left]);
          let right = mem::take(&mut attributes[right]);

          for position in left.lastpos.iter() {
            follow.get_mut(*position).extend(right.firstpos.iter().copied());
          }

          let firstpos = match left.nullable {
            true  => left.firstpos.union(&right.firstpos).copied().collect(),
            false => left.firstpos
          };
          let lastpos = match right.nullable {
            true  => left.lastpos.union(&right.lastpos).copied().collect(),
            false => right.lastpos
          };
          Attributes{ nullable: left.nullable && right.nullable, firstpos, lastpos }
        }

        NodeKind::Or(left, right) => {
          let mut left  = mem::take(&mut attributes[left]);
          let right     = mem::take(&mut attributes[right]);
          left.firstpos.extend(right.firstpos);
          left.lastpos.extend(right.lastpos);
          Attributes{ nullable: left.nullable || right.nullable, ..left }
        }

        NodeKind::Question(child) => {
          let child = mem::take(&mut attributes[child]);
          Attributes{ nullable: true, ..child }
        }

        NodeKind::Plus(child) | NodeKind::Closure(child) => {
          let child = mem::take(&mut attributes[child]);
          for position in child.lastpos.iter() {
            follow.get_mut(*position).extend(child.firstpos.iter().copied());
          }
          let nullable = matches!(node.kind, NodeKind::Closure(_)) || child.nullable;
          Attributes{ nullable, ..child }
        }

      };

      if node.action != 0 {
        for position in computed.lastpos.iter() {
          table[*position].action = node.action;
        }
      }
      attributes[id] = computed;
    }

    let start = match tree.root() {
      Some(root) => mem::take(&mut attributes[root].firstpos),
      None       => PositionSet::new()
    };

    Positions{ table, follow, start }
  }


  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }

  pub fn followpos(&self, position: PositionId) -> &PositionSet {
    &self.follow[position]
  }


  /// Logs the position table and followpos at trace level.
  pub fn debug_log(&self) {
    debug_log!("Positions, start = {{ {} }}", format_position_set(&self.start));
    for (position, info) in self.table.iter().enumerate() {
      debug_log!("  {:4} {:>12} action {}", position, info.range.to_string(), info.action);
    }
    debug_log_follow_map(&self.follow, self.table.len());
  }

}
