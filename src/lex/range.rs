#![allow(dead_code)]
/*!

  A `Range` is a closed interval of characters `[min, max]`, or the empty range. Ranges are the
  leaves of an expression tree and the columns of a DFA.

*/

use std::fmt::{Display, Formatter};

use super::character::{escaped, LexChar};


/// How one range sits relative to another. Read `a.relation(&b)` as "a is ... b".
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Relation {
  Unrelated, //< Disjoint, or either range is empty
  Inside,    //< Every character of `a` is in `b`, and `b` is larger
  Outside,   //< Every character of `b` is in `a`, and `a` is larger
  Overlap,   //< The ranges are equal
  Intersect, //< The ranges share some characters, and each has characters the other lacks
}

impl Relation {
  /// True for `Inside` and `Overlap`, the relations in which `a` is covered by `b`.
  pub fn is_covered(&self) -> bool {
    matches!(self, Relation::Inside | Relation::Overlap)
  }
}


#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Range<C: LexChar> {
  min   : C,
  max   : C,
  empty : bool
}

impl<C: LexChar> Default for Range<C> {
  fn default() -> Self {
    Self::empty()
  }
}

impl<C: LexChar> Range<C> {

  /// The range `[a, b]`, with the ends swapped if `a > b`.
  pub fn new(a: C, b: C) -> Self {
    match a <= b {
      true  => Range{ min: a, max: b, empty: false },
      false => Range{ min: b, max: a, empty: false }
    }
  }

  pub fn single(c: C) -> Self {
    Range{ min: c, max: c, empty: false }
  }

  pub fn empty() -> Self {
    Range{ min: C::MIN, max: C::MIN, empty: true }
  }

  /// Every character of the alphabet.
  pub fn full() -> Self {
    Range{ min: C::MIN, max: C::MAX, empty: false }
  }

  pub fn min(&self) -> C {
    self.min
  }

  pub fn max(&self) -> C {
    self.max
  }

  pub fn is_empty(&self) -> bool {
    self.empty
  }

  pub fn is_full(&self) -> bool {
    !self.empty && self.min == C::MIN && self.max == C::MAX
  }

  pub fn contains(&self, c: C) -> bool {
    !self.empty && self.min <= c && c <= self.max
  }

  /// The number of characters in the range.
  pub fn len(&self) -> u32 {
    match self.empty {
      true  => 0,
      false => self.max.to_u32() - self.min.to_u32() + 1
    }
  }


  pub fn relation(&self, other: &Range<C>) -> Relation {
    if self.empty || other.empty {
      Relation::Unrelated
    } else if self.min > other.max || other.min > self.max {
      Relation::Unrelated
    } else if self.min == other.min && self.max == other.max {
      Relation::Overlap
    } else if self.min <= other.min && self.max >= other.max {
      Relation::Outside
    } else if other.min <= self.min && other.max >= self.max {
      Relation::Inside
    } else {
      Relation::Intersect
    }
  }


  pub fn is_related(&self, other: &Range<C>) -> bool {
    self.relation(other) != Relation::Unrelated
  }


  pub fn intersection(&self, other: &Range<C>) -> Range<C> {
    if !self.is_related(other) {
      return Range::empty();
    }
    Range::new(self.min.max(other.min), self.max.min(other.max))
  }

}


impl<C: LexChar> Display for Range<C> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if self.empty {
      write!(f, "[]")
    } else if self.is_full() {
      write!(f, ".")
    } else if self.min == self.max {
      write!(f, "{}", escaped(self.min))
    } else {
      write!(f, "[{}-{}]", escaped(self.min), escaped(self.max))
    }
  }
}
