#![allow(dead_code)]
/*!

  Settings for compiling a definition file. They do not change the image that is produced, only
  how the resulting lexicon behaves by default and what the compiler logs along the way.

*/

use std::fmt::{Display, Formatter, Result as FmtResult};


#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Options {
  // Matching

  /// Matchers created from the lexicon emit a single unit for unmatched input instead of
  /// absorbing the whole unmatched run
  pub best_match: bool,

  // Debugging

  /// Log the position table and followpos sets while building the DFA
  pub log_positions: bool,
}

impl Options {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_best_match(mut self, best_match: bool) -> Self {
    self.best_match = best_match;
    self
  }

  pub fn with_log_positions(mut self, log_positions: bool) -> Self {
    self.log_positions = log_positions;
    self
  }
}

impl Display for Options {
  fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
    writeln!(fmt, "Options {{")?;
    writeln!(fmt, "  best_match    : {}", self.best_match)?;
    writeln!(fmt, "  log_positions : {}", self.log_positions)?;
    write!(fmt, "}}")
  }
}
