#![allow(dead_code)]
/*!

  The expression scanner turns a pattern into a stream of value tokens (character ranges) and
  operator tokens. It is driven by a state transition table: each character of the pattern is
  classified into one of 16 classes, the table gives the next state, and the routine of that state
  consumes characters and possibly emits a token.

  Concatenation is implicit in a pattern, so the scanner emits an explicit `And` operator between
  two adjacent operands. A bracket expression `[...]` is accumulated into a `RangeSet` and re-emitted
  as the token sequence `( r1 | r2 | ... )`, so the parser never sees brackets.

  Escapes: `\n \t \r \s \v \f \b \a`, `\xH` and `\xHH`, `\d`, `\dd` and `\ddd` (decimal), and any
  other escaped character stands for itself. `\x` not followed by a hex digit is a literal `x`.

*/

use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

use phf::phf_map;

use super::character::LexChar;
use super::limits::{MAX_DECIMAL_ESCAPE_DIGITS, MAX_HEX_ESCAPE_DIGITS};
use super::range::Range;
use super::ranges::RangeSet;


// region Constants

/// The states of the scanner. The routine of a state runs on entering it.
#[allow(non_snake_case)]
pub mod State {
  #![allow(non_upper_case_globals)]

  pub const Err              : u8 = 0;
  pub const Begin            : u8 = 1;
  pub const Character        : u8 = 2;
  pub const CharacterDot     : u8 = 3;
  pub const OpAnd            : u8 = 4;
  pub const OpOr             : u8 = 5;
  pub const OpPlus           : u8 = 6;
  pub const OpQuestion       : u8 = 7;
  pub const OpClosure        : u8 = 8;
  pub const LRound           : u8 = 9;
  pub const RRound           : u8 = 10;
  pub const LSquare          : u8 = 11;
  pub const RSquare          : u8 = 12;
  pub const Esc              : u8 = 13;
  pub const EscX             : u8 = 14;
  pub const EscX0            : u8 = 15;
  pub const EscX00           : u8 = 16;
  pub const EscCharacter     : u8 = 17;
  pub const SetNegator       : u8 = 18; //< `^` opening a bracket expression
  pub const SetStart         : u8 = 19; //< A character, or the start of a sub-range
  pub const SetEnd           : u8 = 20; //< The end of a sub-range
  pub const SetStartEsc      : u8 = 21;
  pub const SetStartEscX     : u8 = 22;
  pub const SetStartEscX0    : u8 = 23;
  pub const SetStartEscX00   : u8 = 24;
  pub const SetStartEscChar  : u8 = 25;
  pub const SetEndEsc        : u8 = 26;
  pub const SetEndEscX       : u8 = 27;
  pub const SetEndEscX0      : u8 = 28;
  pub const SetEndEscX00     : u8 = 29;
  pub const SetEndEscChar    : u8 = 30;
  pub const SetConnector     : u8 = 31; //< The `-` of a sub-range
  pub const End              : u8 = 32;
}

/// The character classes of the scanner, which index the columns of `STATE_MATRIX`.
#[allow(non_snake_case)]
pub mod Class {
  #![allow(non_upper_case_globals)]

  pub const Dot          : usize = 0;  //< `.`
  pub const Or           : usize = 1;  //< `|`
  pub const Plus         : usize = 2;  //< `+`
  pub const Minus        : usize = 3;  //< `-`
  pub const Question     : usize = 4;  //< `?`
  pub const Asterisk     : usize = 5;  //< `*`
  pub const Caret        : usize = 6;  //< `^`
  pub const Backslash    : usize = 7;  //< `\`
  pub const LRound       : usize = 8;  //< `(`
  pub const RRound       : usize = 9;  //< `)`
  pub const LSquare      : usize = 10; //< `[`
  pub const RSquare      : usize = 11; //< `]`
  pub const Hex          : usize = 12; //< `[0-9a-fA-F]`
  pub const Other        : usize = 13;
  pub const X            : usize = 14; //< `x`
  pub const Eof          : usize = 15; //< End of pattern, or NUL
}

/// Class of each ASCII character. Everything above ASCII is `Class::Other`.
static CHARACTER_MAP: [u8; 128] = [
  15, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13,
  13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13,
  13, 13, 13, 13, 13, 13, 13, 13,  8,  9,  5,  2, 13,  3,  0, 13,
  12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 13, 13, 13, 13, 13,  4,
  13, 12, 12, 12, 12, 12, 12, 13, 13, 13, 13, 13, 13, 13, 13, 13,
  13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 13, 10,  7, 11,  6, 13,
  13, 12, 12, 12, 12, 12, 12, 13, 13, 13, 13, 13, 13, 13, 13, 13,
  13, 13, 13, 13, 13, 13, 13, 13, 14, 13, 13, 13,  1, 13, 13, 13
];

/// `STATE_MATRIX[state][class]` is the state entered on reading a character of `class` in `state`.
static STATE_MATRIX: [[u8; 16]; 33] = [
  //  .   |   +   -   ?   *   ^   \   (   )   [   ]  hex oth  x  eof
  [  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0 ], // Err
  [  3,  0,  0,  2,  0,  0,  2, 13,  9,  0, 11,  0,  2,  2,  2, 32 ], // Begin
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0,  4,  4,  4, 32 ], // Character
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0,  4,  4,  4, 32 ], // CharacterDot
  [  3,  0,  0,  2,  0,  0,  2, 13,  9,  0, 11,  0,  2,  2,  2,  0 ], // OpAnd
  [  3,  0,  0,  2,  0,  0,  2, 13,  9,  0, 11,  0,  2,  2,  2,  0 ], // OpOr
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0,  4,  4,  4, 32 ], // OpPlus
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0,  4,  4,  4, 32 ], // OpQuestion
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0,  4,  4,  4, 32 ], // OpClosure
  [  3,  0,  0,  2,  0,  0,  2, 13,  9, 10, 11,  0,  2,  2,  2,  0 ], // LRound
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0,  4,  4,  4, 32 ], // RRound
  [  0,  0,  0,  0,  0,  0, 18, 21,  0,  0,  0,  0, 19, 19, 19,  0 ], // LSquare
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0,  4,  4,  4, 32 ], // RSquare
  [ 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 14,  0 ], // Esc
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0, 15,  4,  4, 32 ], // EscX
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0, 16,  4,  4, 32 ], // EscX0
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0,  4,  4,  4, 32 ], // EscX00
  [  4,  5,  6,  4,  7,  8,  4,  4,  4, 10,  4,  0,  4,  4,  4, 32 ], // EscCharacter
  [  0,  0,  0,  0,  0,  0,  0, 21,  0,  0,  0,  0, 19, 19, 19,  0 ], // SetNegator
  [  0,  0,  0, 31,  0,  0,  0, 21,  0,  0,  0, 12, 19, 19, 19,  0 ], // SetStart
  [  0,  0,  0,  0,  0,  0,  0, 21,  0,  0,  0, 12, 19, 19, 19,  0 ], // SetEnd
  [ 25, 25, 25, 25, 25, 25, 25, 25, 25, 25, 25, 25, 25, 25, 22,  0 ], // SetStartEsc
  [  0,  0,  0, 31,  0,  0,  0, 21,  0,  0,  0, 12, 23, 19, 19,  0 ], // SetStartEscX
  [  0,  0,  0, 31,  0,  0,  0, 21,  0,  0,  0, 12, 24, 19, 19,  0 ], // SetStartEscX0
  [  0,  0,  0, 31,  0,  0,  0, 21,  0,  0,  0, 12, 19, 19, 19,  0 ], // SetStartEscX00
  [  0,  0,  0, 31,  0,  0,  0, 21,  0,  0,  0, 12, 19, 19, 19,  0 ], // SetStartEscChar
  [ 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 27,  0 ], // SetEndEsc
  [  0,  0,  0,  0,  0,  0,  0, 21,  0,  0,  0, 12, 28, 19, 19,  0 ], // SetEndEscX
  [  0,  0,  0,  0,  0,  0,  0, 21,  0,  0,  0, 12, 29, 19, 19,  0 ], // SetEndEscX0
  [  0,  0,  0,  0,  0,  0,  0, 21,  0,  0,  0, 12, 19, 19, 19,  0 ], // SetEndEscX00
  [  0,  0,  0,  0,  0,  0,  0, 21,  0,  0,  0, 12, 19, 19, 19,  0 ], // SetEndEscChar
  [  0,  0,  0,  0,  0,  0,  0, 26,  0,  0,  0,  0, 20, 20, 20,  0 ], // SetConnector
  [  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0,  0 ], // End
];

/// Named escapes. Decimal escapes, including `\0`, are decoded separately.
static NAMED_ESCAPES: phf::Map<char, u32> = phf_map! {
  'n' => 0x0A,
  't' => 0x09,
  'r' => 0x0D,
  's' => 0x20,
  'v' => 0x0B,
  'f' => 0x0C,
  'b' => 0x08,
  'a' => 0x07,
};

// endregion


#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Operator {
  And = 0,
  Or,
  Question,
  Plus,
  Closure,
  LBracket,
  RBracket,
  Eof,
}

impl Operator {
  /// Index of the operator into the parser's priority table.
  pub fn index(&self) -> usize {
    *self as usize
  }

  pub fn is_unary(&self) -> bool {
    matches!(self, Operator::Question | Operator::Plus | Operator::Closure)
  }
}

impl Display for Operator {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let symbol = match self {
      Operator::And      => "&",
      Operator::Or       => "|",
      Operator::Question => "?",
      Operator::Plus     => "+",
      Operator::Closure  => "*",
      Operator::LBracket => "(",
      Operator::RBracket => ")",
      Operator::Eof      => "#",
    };
    write!(f, "{}", symbol)
  }
}


#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScanToken<C: LexChar> {
  Value(Range<C>),
  Op(Operator),
  /// The pattern has no valid continuation at this character index.
  Error(usize),
}


pub struct Scanner<'p, C: LexChar> {
  pattern : &'p [C],
  index   : usize,                 //< The character the current state routine looks at
  state   : u8,
  queue   : VecDeque<ScanToken<C>>, //< Tokens of a finished bracket expression
  ranges  : RangeSet<C>,           //< The bracket expression being scanned
  negated : bool,                  //< The bracket expression began with `^`
  first   : C,                     //< Start of the sub-range being scanned
}

impl<'p, C: LexChar> Scanner<'p, C> {

  pub fn new(pattern: &'p [C]) -> Self {
    Self {
      pattern,
      index   : 0,
      state   : State::Begin,
      queue   : VecDeque::new(),
      ranges  : RangeSet::new(),
      negated : false,
      first   : C::MIN,
    }
  }

  /// The index of the character the scanner stopped on.
  pub fn index(&self) -> usize {
    self.index
  }

  /// Produces the next token. Once the pattern is exhausted or an error was reported, every further
  /// call yields an error token.
  pub fn next_token(&mut self) -> ScanToken<C> {
    if let Some(token) = self.queue.pop_front() {
      return token;
    }
    if self.state == State::Err || self.state == State::End {
      return ScanToken::Error(self.index);
    }

    loop {
      self.state = STATE_MATRIX[self.state as usize][self.class_at(0)];
      if let Some(token) = self.run_state_routine() {
        return token;
      }
    }
  }


  fn run_state_routine(&mut self) -> Option<ScanToken<C>> {
    match self.state {

      State::Err          => self.fail(),

      State::Character    => {
        let c = self.c();
        self.advance();
        Some(ScanToken::Value(Range::single(c)))
      }

      State::CharacterDot => self.emit_value(Range::full()),

      State::OpAnd        => Some(ScanToken::Op(Operator::And)), // Consumes nothing
      State::OpOr         => self.emit_operator(Operator::Or),
      State::OpPlus       => self.emit_operator(Operator::Plus),
      State::OpQuestion   => self.emit_operator(Operator::Question),
      State::OpClosure    => self.emit_operator(Operator::Closure),
      State::LRound       => self.emit_operator(Operator::LBracket),
      State::RRound       => self.emit_operator(Operator::RBracket),

      State::LSquare      => {
        self.queue.push_back(ScanToken::Op(Operator::LBracket));
        self.ranges.clear();
        self.negated = false;
        self.advance();
        None
      }

      State::RSquare      => {
        if self.ranges.is_empty() {
          return self.fail();
        }
        for (i, range) in self.ranges.ranges().iter().enumerate() {
          if i > 0 {
            self.queue.push_back(ScanToken::Op(Operator::Or));
          }
          self.queue.push_back(ScanToken::Value(*range));
        }
        self.queue.push_back(ScanToken::Op(Operator::RBracket));
        self.advance();
        self.queue.pop_front()
      }

      State::Esc
      | State::SetStartEsc
      | State::SetEndEsc
      | State::SetConnector => {
        self.advance();
        None
      }

      State::EscX         => {
        if self.class_at(1) != Class::Hex {
          return self.emit_value(Range::single(C::from_ascii(b'x')));
        }
        self.advance();
        None
      }

      State::EscX0        => {
        if self.class_at(1) != Class::Hex {
          return match self.hex_escape(1) {
            Some(c) => self.emit_value(Range::single(c)),
            None    => self.fail()
          };
        }
        self.advance();
        None
      }

      State::EscX00       => {
        match self.hex_escape(MAX_HEX_ESCAPE_DIGITS) {
          Some(c) => self.emit_value(Range::single(c)),
          None    => self.fail()
        }
      }

      State::EscCharacter => {
        match self.escape_value() {
          Some(c) => self.emit_value(Range::single(c)),
          None    => self.fail()
        }
      }

      State::SetNegator   => {
        self.negated = true;
        self.ranges += Range::full();
        self.advance();
        None
      }

      State::SetStart     => {
        let c = self.c();
        self.start_or_apply(c);
        None
      }

      State::SetEnd       => {
        let c = self.c();
        self.apply(Range::new(self.first, c));
        self.advance();
        None
      }

      State::SetStartEscX => {
        if self.class_at(1) != Class::Hex {
          self.start_or_apply(C::from_ascii(b'x'));
        } else {
          self.advance();
        }
        None
      }

      State::SetStartEscX0 => {
        if self.class_at(1) != Class::Hex {
          match self.hex_escape(1) {
            Some(c) => self.start_or_apply(c),
            None    => return self.fail()
          }
        } else {
          self.advance();
        }
        None
      }

      State::SetStartEscX00 => {
        match self.hex_escape(MAX_HEX_ESCAPE_DIGITS) {
          Some(c) => {
            self.start_or_apply(c);
            None
          }
          None => self.fail()
        }
      }

      State::SetStartEscChar => {
        match self.escape_value() {
          Some(c) => {
            self.start_or_apply(c);
            None
          }
          None => self.fail()
        }
      }

      State::SetEndEscX   => {
        if self.class_at(1) != Class::Hex {
          self.apply(Range::new(self.first, C::from_ascii(b'x')));
        }
        self.advance();
        None
      }

      State::SetEndEscX0  => {
        if self.class_at(1) != Class::Hex {
          match self.hex_escape(1) {
            Some(c) => self.apply(Range::new(self.first, c)),
            None    => return self.fail()
          }
        }
        self.advance();
        None
      }

      State::SetEndEscX00 => {
        match self.hex_escape(MAX_HEX_ESCAPE_DIGITS) {
          Some(c) => {
            self.apply(Range::new(self.first, c));
            self.advance();
            None
          }
          None => self.fail()
        }
      }

      State::SetEndEscChar => {
        match self.escape_value() {
          Some(c) => {
            self.apply(Range::new(self.first, c));
            self.advance();
            None
          }
          None => self.fail()
        }
      }

      State::End          => Some(ScanToken::Op(Operator::Eof)),

      // `Begin` is never entered from the table.
      _                   => self.fail()
    }
  }


  // region Routine helpers

  /// The character at the cursor. Only called in states entered on a real character.
  fn c(&self) -> C {
    self.pattern[self.index]
  }

  fn at(&self, offset: usize) -> Option<C> {
    self.pattern.get(self.index + offset).copied()
  }

  fn class_at(&self, offset: usize) -> usize {
    match self.at(offset) {
      None    => Class::Eof,
      Some(c) => match c.ascii_value() {
        Some(ascii) => CHARACTER_MAP[ascii as usize] as usize,
        None        => Class::Other
      }
    }
  }

  fn advance(&mut self) {
    self.index += 1;
  }

  fn fail(&mut self) -> Option<ScanToken<C>> {
    self.state = State::Err;
    self.queue.clear();
    Some(ScanToken::Error(self.index))
  }

  fn emit_value(&mut self, range: Range<C>) -> Option<ScanToken<C>> {
    self.advance();
    Some(ScanToken::Value(range))
  }

  fn emit_operator(&mut self, op: Operator) -> Option<ScanToken<C>> {
    self.advance();
    Some(ScanToken::Op(op))
  }

  /// Adds `range` to the bracket expression, or removes it if the expression is negated.
  fn apply(&mut self, range: Range<C>) {
    if self.negated {
      self.ranges -= range;
    } else {
      self.ranges += range;
    }
  }

  /// Either `c` stands alone, or it starts a sub-range if the next character is `-`. Advances.
  fn start_or_apply(&mut self, c: C) {
    match self.at(1).map_or(false, |next| next.is(b'-')) {
      true  => self.first = c,
      false => self.apply(Range::single(c))
    }
    self.advance();
  }

  /// Decodes the hex escape whose last digit is at the cursor and which has `digits` digits.
  fn hex_escape(&self, digits: usize) -> Option<C> {
    let mut value: u32 = 0;
    for i in (self.index + 1 - digits)..=self.index {
      let digit = self.pattern[i].ascii_value().and_then(|a| (a as char).to_digit(16))?;
      value = (value << 4) | digit;
    }
    C::from_u32(value)
  }

  /// Decodes the escaped character at the cursor. A decimal escape leaves the cursor on its last
  /// digit. `None` when a decimal escape is outside the alphabet.
  fn escape_value(&mut self) -> Option<C> {
    let c = self.c();
    let ascii = match c.ascii_value() {
      Some(ascii) => ascii,
      None        => return Some(c)
    };

    if ascii.is_ascii_digit() {
      let mut value: u32 = (ascii - b'0') as u32;
      let mut digits = 1;
      while digits < MAX_DECIMAL_ESCAPE_DIGITS {
        match self.at(1).and_then(|d| d.ascii_value()).filter(|d| d.is_ascii_digit()) {
          Some(d) => {
            value = value * 10 + (d - b'0') as u32;
            digits += 1;
            self.advance();
          }
          None => break
        }
      }
      return C::from_u32(value);
    }

    match NAMED_ESCAPES.get(&(ascii as char)) {
      Some(value) => C::from_u32(*value),
      None        => Some(c)
    }
  }

  // endregion

}


impl<'p, C: LexChar> Iterator for Scanner<'p, C> {
  type Item = ScanToken<C>;

  /// Yields tokens up to and including `Eof` or the first error.
  fn next(&mut self) -> Option<Self::Item> {
    if self.state == State::Err || (self.state == State::End && self.queue.is_empty()) {
      return None;
    }
    Some(self.next_token())
  }
}




#[cfg(test)]
mod test {
  use super::*;
  use pretty_assertions::assert_eq;

  use ScanToken::{Error, Op, Value};

  fn scan(pattern: &str) -> Vec<ScanToken<u8>> {
    Scanner::new(pattern.as_bytes()).collect()
  }

  fn v(c: u8) -> ScanToken<u8> {
    Value(Range::single(c))
  }

  fn vr(a: u8, b: u8) -> ScanToken<u8> {
    Value(Range::new(a, b))
  }

  #[test]
  fn implicit_concatenation() {
    assert_eq!(scan("ab"), vec![v(b'a'), Op(Operator::And), v(b'b'), Op(Operator::Eof)]);
  }

  #[test]
  fn operators() {
    assert_eq!(
      scan("(a|b)*c+d?"),
      vec![
        Op(Operator::LBracket), v(b'a'), Op(Operator::Or), v(b'b'), Op(Operator::RBracket),
        Op(Operator::Closure), Op(Operator::And), v(b'c'), Op(Operator::Plus), Op(Operator::And),
        v(b'd'), Op(Operator::Question), Op(Operator::Eof)
      ]
    );
  }

  #[test]
  fn dot_is_full_range() {
    assert_eq!(scan("."), vec![Value(Range::full()), Op(Operator::Eof)]);
  }

  #[test]
  fn bracket_expression() {
    assert_eq!(
      scan("[a-c_]"),
      vec![Op(Operator::LBracket), vr(b'_', b'_'), Op(Operator::Or), vr(b'a', b'c'), Op(Operator::RBracket), Op(Operator::Eof)]
    );
  }

  #[test]
  fn negated_bracket_expression() {
    assert_eq!(
      scan("[^a-c]"),
      vec![
        Op(Operator::LBracket), vr(0, b'a' - 1), Op(Operator::Or), vr(b'c' + 1, 0xFF),
        Op(Operator::RBracket), Op(Operator::Eof)
      ]
    );
  }

  #[test]
  fn hex_escapes() {
    assert_eq!(scan("\\x41"), vec![v(b'A'), Op(Operator::Eof)]);
    assert_eq!(scan("\\x4"), vec![v(4), Op(Operator::Eof)]);
    assert_eq!(scan("\\x41f"), vec![v(b'A'), Op(Operator::And), v(b'f'), Op(Operator::Eof)]);
    assert_eq!(scan("\\xz"), vec![v(b'x'), Op(Operator::And), v(b'z'), Op(Operator::Eof)]);
  }

  #[test]
  fn decimal_and_named_escapes() {
    assert_eq!(scan("\\101"), vec![v(101), Op(Operator::Eof)]);
    assert_eq!(scan("\\0"), vec![v(0), Op(Operator::Eof)]);
    assert_eq!(scan("\\9a"), vec![v(9), Op(Operator::And), v(b'a'), Op(Operator::Eof)]);
    assert_eq!(scan("\\n\\s"), vec![v(b'\n'), Op(Operator::And), v(b' '), Op(Operator::Eof)]);
    assert_eq!(scan("\\*"), vec![v(b'*'), Op(Operator::Eof)]);
  }

  #[test]
  fn escapes_in_brackets() {
    assert_eq!(
      scan("[\\x30-\\x39\\n]"),
      vec![Op(Operator::LBracket), vr(b'\n', b'\n'), Op(Operator::Or), vr(b'0', b'9'), Op(Operator::RBracket), Op(Operator::Eof)]
    );
    assert_eq!(
      scan("[\\065-\\067]"),
      vec![Op(Operator::LBracket), vr(b'A', b'C'), Op(Operator::RBracket), Op(Operator::Eof)]
    );
  }

  #[test]
  fn wide_characters_are_literals() {
    let pattern: Vec<u16> = "é+".encode_utf16().collect();
    let tokens: Vec<ScanToken<u16>> = Scanner::new(&pattern).collect();
    assert_eq!(tokens, vec![Value(Range::single(0xE9)), Op(Operator::Plus), Op(Operator::Eof)]);
  }

  #[test]
  fn errors() {
    assert_eq!(scan("a]"), vec![v(b'a'), Error(1)]);
    assert_eq!(scan("[]"), vec![Error(1)]);
    assert_eq!(scan("\\300"), vec![Error(3)]);
    assert_eq!(scan("[^\\0-\\255]"), vec![Error(9)]);
    assert_eq!(scan("|a"), vec![Error(0)]);
  }

  #[test]
  fn exhausted_scanner_reports_errors() {
    let mut scanner = Scanner::new(b"a");
    assert_eq!(scanner.next_token(), v(b'a'));
    assert_eq!(scanner.next_token(), Op(Operator::Eof));
    assert_eq!(scanner.next_token(), Error(1));
  }
}
