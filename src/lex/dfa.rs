#![allow(dead_code)]
/*!

  Direct construction of a DFA from an expression tree.

  The tree is concatenated with a terminating leaf whose range is empty, so the only way to reach
  the terminator is to have matched a whole definition. After the position pass the ranges of all
  other leaves are split into disjoint columns. Subset construction then starts from the root's
  firstpos: for every state and column, the followpos sets of the positions of the state whose
  range covers the column are united into the target state. A state is accepting iff it holds the
  terminator.

  When positions of several definitions contribute to one transition, the action of the lowest
  numbered contributing position wins. Positions are numbered left to right, so the definition that
  comes first in the source wins.

*/

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::time::Duration;

use quanta::Clock;

use super::character::LexChar;
use super::error::ExpressionError;
use super::expression::{ExpressionTree, JoinKind};
use super::limits::MAX_COLUMNS;
use super::position::Positions;
use super::range::Range;
use super::ranges::split_range;
use super::{ActionId, Column, PositionId, PositionSet, StateId};


#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Transition {
  pub to     : StateId,
  pub action : ActionId, //< First nonzero action among the contributing positions
}


#[derive(Clone, Debug)]
pub struct Dfa<C: LexChar> {
  pub state_count : usize,
  pub range_map   : Vec<Range<C>>,                         //< One column per entry, plus "anything else"
  pub transitions : BTreeMap<(StateId, Column), Transition>, //< Absent entries are dead
  pub accepting   : BTreeSet<StateId>,
  pub positions   : Positions<C>,
  pub build_time  : Duration,
}

impl<C: LexChar> Dfa<C> {

  pub fn build(tree: ExpressionTree<C>) -> Result<Dfa<C>, ExpressionError> {
    debug_logln!("BEGIN Dfa::build()");
    let timer: Clock = Clock::new();
    let start_time = timer.start();

    if tree.is_empty() {
      return Err(ExpressionError::EmptyTree);
    }

    let augmented = ExpressionTree::join(tree, ExpressionTree::leaf(Range::empty()), JoinKind::And);
    let positions = Positions::compute(&augmented);
    // The terminator is the rightmost leaf.
    let terminator: PositionId = positions.len() - 1;

    let leaf_ranges: Vec<Range<C>> = positions.table[..terminator].iter().map(|p| p.range).collect();
    let range_map = split_range(&leaf_ranges);
    if range_map.len() > MAX_COLUMNS {
      return Err(ExpressionError::TooManyColumns{ count: range_map.len() });
    }

    let mut states      : BTreeMap<PositionSet, StateId> = BTreeMap::new();
    let mut unmarked    : BTreeSet<PositionSet>          = BTreeSet::new();
    let mut transitions : BTreeMap<(StateId, Column), Transition> = BTreeMap::new();
    let mut accepting   : BTreeSet<StateId>              = BTreeSet::new();

    states.insert(positions.start.clone(), 0);
    unmarked.insert(positions.start.clone());

    // The smallest unmarked position set is processed next.
    while let Some(current) = unmarked.iter().next().cloned() {
      unmarked.remove(&current);
      let from = states[&current];

      if current.contains(&terminator) {
        accepting.insert(from);
      }

      for (column, column_range) in range_map.iter().enumerate() {
        let mut target = PositionSet::new();
        let mut action: ActionId = 0;

        for &position in current.iter() {
          let info = &positions.table[position];
          if info.range.is_related(column_range) {
            target.extend(positions.followpos(position).iter().copied());
            if action == 0 {
              action = info.action;
            }
          }
        }

        if target.is_empty() {
          continue;
        }

        let to = match states.get(&target) {
          Some(to) => *to,
          None     => {
            let to = states.len() as StateId;
            states.insert(target.clone(), to);
            unmarked.insert(target);
            to
          }
        };
        transitions.insert((from, column as Column), Transition{ to, action });
      }
    }

    let build_time = timer.delta(start_time, timer.end());
    let dfa = Dfa{ state_count: states.len(), range_map, transitions, accepting, positions, build_time };

    debug_logln!(
      "END Dfa::build(): {} states, {} columns, {} transitions, {}μs",
      dfa.state_count,
      dfa.range_map.len() + 1,
      dfa.transitions.len(),
      dfa.build_time.as_micros()
    );
    Ok(dfa)
  }


  /// The column of `c`, or the "anything else" column `range_map.len()`.
  pub fn column_of(&self, c: C) -> Column {
    let index = self.range_map.partition_point(|range| range.max() < c);
    match self.range_map.get(index) {
      Some(range) if range.contains(c) => index as Column,
      _                                => self.range_map.len() as Column
    }
  }

  pub fn transition(&self, state: StateId, c: C) -> Option<&Transition> {
    self.transitions.get(&(state, self.column_of(c)))
  }

  pub fn is_accepting(&self, state: StateId) -> bool {
    self.accepting.contains(&state)
  }


  /// True if the whole of `input` is matched by some definition.
  pub fn accepts(&self, input: &[C]) -> bool {
    self.match_action(input).is_some()
  }


  /// The action that accepts the whole of `input`, if any.
  pub fn match_action(&self, input: &[C]) -> Option<ActionId> {
    let mut state: StateId = 0;
    let mut action: ActionId = 0;
    for c in input.iter() {
      let transition = self.transition(state, *c)?;
      state = transition.to;
      action = transition.action;
    }
    match self.is_accepting(state) && !input.is_empty() {
      true  => Some(action),
      false => None
    }
  }

}


impl<C: LexChar> Display for Dfa<C> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    for state in 0..self.state_count as StateId {
      let marker = if self.is_accepting(state) { "*" } else { " " };
      write!(f, "{}{:4}:", marker, state)?;
      for ((_, column), transition) in self.transitions.range((state, 0)..=(state, Column::MAX)) {
        let label = match self.range_map.get(*column as usize) {
          Some(range) => range.to_string(),
          None        => "else".to_string()
        };
        write!(f, " {}->{}", label, transition.to)?;
        if transition.action != 0 {
          write!(f, "({})", transition.action)?;
        }
      }
      writeln!(f)?;
    }
    Ok(())
  }
}
