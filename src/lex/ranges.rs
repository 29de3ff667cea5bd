#![allow(dead_code)]
/*!

  A `RangeSet` is a union of pairwise disjoint ranges, kept sorted by their lower bound. Adding a
  range merges it with every member it shares a character with; ranges that merely touch stay
  separate members. Character classes `[...]` are accumulated in a `RangeSet`.

  `split_range` partitions an arbitrary collection of possibly overlapping ranges into disjoint
  pieces such that each input range is exactly a union of pieces. The pieces are the columns of the
  DFA.

*/

use std::fmt::{Display, Formatter};
use std::ops::{AddAssign, SubAssign};

use super::character::LexChar;
use super::range::{Range, Relation};


#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RangeSet<C: LexChar> {
  ranges: Vec<Range<C>>
}

impl<C: LexChar> Default for RangeSet<C> {
  fn default() -> Self {
    Self{ ranges: Vec::new() }
  }
}

impl<C: LexChar> From<Range<C>> for RangeSet<C> {
  fn from(range: Range<C>) -> Self {
    let mut set = RangeSet::new();
    set.add(range);
    set
  }
}

impl<C: LexChar> RangeSet<C> {

  pub fn new() -> Self {
    Self::default()
  }

  /// The set covering the whole alphabet.
  pub fn full() -> Self {
    Range::full().into()
  }

  pub fn ranges(&self) -> &[Range<C>] {
    &self.ranges
  }

  pub fn len(&self) -> usize {
    self.ranges.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ranges.is_empty()
  }

  pub fn clear(&mut self) {
    self.ranges.clear();
  }

  pub fn contains(&self, c: C) -> bool {
    self.ranges.iter().any(|r| r.contains(c))
  }


  /// Union with `range`. Every member sharing a character with `range` is absorbed into it.
  pub fn add(&mut self, range: Range<C>) {
    if range.is_empty() {
      return;
    }

    let mut min = range.min();
    let mut max = range.max();
    self.ranges.retain(
      |member| {
        if member.is_related(&range) {
          min = min.min(member.min());
          max = max.max(member.max());
          false
        } else {
          true
        }
      }
    );

    let merged = Range::new(min, max);
    let at = self.ranges.iter().position(|member| member.min() > min).unwrap_or(self.ranges.len());
    self.ranges.insert(at, merged);
  }


  /// Difference with `range`: covered members are removed, larger members are split, and
  /// partially overlapping members are trimmed.
  pub fn subtract(&mut self, range: Range<C>) {
    if range.is_empty() {
      return;
    }

    let mut result: Vec<Range<C>> = Vec::with_capacity(self.ranges.len() + 1);
    for member in self.ranges.drain(..) {
      match member.relation(&range) {

        Relation::Inside | Relation::Overlap => { /* removed */ }

        Relation::Outside => {
          if member.min() < range.min() {
            if let Some(below) = range.min().pred() {
              result.push(Range::new(member.min(), below));
            }
          }
          if member.max() > range.max() {
            if let Some(above) = range.max().succ() {
              result.push(Range::new(above, member.max()));
            }
          }
        }

        Relation::Intersect => {
          if member.min() < range.min() {
            if let Some(below) = range.min().pred() {
              result.push(Range::new(member.min(), below));
            }
          } else if let Some(above) = range.max().succ() {
            result.push(Range::new(above, member.max()));
          }
        }

        Relation::Unrelated => result.push(member)

      }
    }
    self.ranges = result;
  }


  /// Union with every member of `other`.
  pub fn add_set(&mut self, other: &RangeSet<C>) {
    for range in other.ranges.iter() {
      self.add(*range);
    }
  }


  /// Difference with every member of `other`.
  pub fn subtract_set(&mut self, other: &RangeSet<C>) {
    for range in other.ranges.iter() {
      self.subtract(*range);
    }
  }


  /// The characters of the alphabet not in `self`.
  pub fn complement(&self) -> RangeSet<C> {
    let mut result = RangeSet::full();
    result.subtract_set(self);
    result
  }

}


impl<C: LexChar> AddAssign<Range<C>> for RangeSet<C> {
  fn add_assign(&mut self, range: Range<C>) {
    self.add(range);
  }
}

impl<C: LexChar> SubAssign<Range<C>> for RangeSet<C> {
  fn sub_assign(&mut self, range: Range<C>) {
    self.subtract(range);
  }
}

impl<C: LexChar> AddAssign<&RangeSet<C>> for RangeSet<C> {
  fn add_assign(&mut self, other: &RangeSet<C>) {
    self.add_set(other);
  }
}

impl<C: LexChar> SubAssign<&RangeSet<C>> for RangeSet<C> {
  fn sub_assign(&mut self, other: &RangeSet<C>) {
    self.subtract_set(other);
  }
}

impl<C: LexChar> Display for RangeSet<C> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{")?;
    for (i, range) in self.ranges.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", range)?;
    }
    write!(f, "}}")
  }
}


/**
  Partitions the union of `ranges` into disjoint, non-empty ranges, sorted, such that every input
  range is a union of output ranges.

  Each input `[a, b]` contributes a `+1` event at `a` and a `-1` event at `b + 1`. Sweeping the
  sorted event points with a running coverage count, every gap between consecutive points that has
  positive coverage becomes one output range.
*/
pub fn split_range<C: LexChar>(ranges: &[Range<C>]) -> Vec<Range<C>> {
  // Event points are kept as `u32` so that `max + 1` never overflows the character type.
  let mut events: Vec<(u32, i32)> = Vec::with_capacity(ranges.len() * 2);
  for range in ranges.iter().filter(|r| !r.is_empty()) {
    events.push((range.min().to_u32(), 1));
    events.push((range.max().to_u32() + 1, -1));
  }
  events.sort_unstable();

  let mut result: Vec<Range<C>> = Vec::new();
  let mut coverage: i32 = 0;
  let mut i = 0;
  while i < events.len() {
    let point = events[i].0;
    while i < events.len() && events[i].0 == point {
      coverage += events[i].1;
      i += 1;
    }

    if coverage > 0 && i < events.len() {
      let next = events[i].0;
      // Both ends lie inside the alphabet because some input range covers them.
      if let (Some(min), Some(max)) = (C::from_u32(point), C::from_u32(next - 1)) {
        result.push(Range::new(min, max));
      }
    }
  }

  result
}




#[cfg(test)]
mod test {
  use super::*;
  use std::collections::BTreeSet;

  fn r(a: u8, b: u8) -> Range<u8> {
    Range::new(a, b)
  }

  fn points(set: &[Range<u8>]) -> BTreeSet<u8> {
    set.iter().flat_map(|r| r.min()..=r.max()).collect()
  }

  fn assert_disjoint(ranges: &[Range<u8>]) {
    for (i, a) in ranges.iter().enumerate() {
      assert!(!a.is_empty());
      for b in ranges[i + 1..].iter() {
        assert_eq!(a.relation(b), Relation::Unrelated, "{} and {} overlap", a, b);
      }
    }
  }

  #[test]
  fn add_merges_overlapping() {
    let mut set = RangeSet::new();
    set += r(b'a', b'f');
    set += r(b'x', b'z');
    set += r(b'd', b'k');
    assert_eq!(set.ranges(), &[r(b'a', b'k'), r(b'x', b'z')]);
  }

  #[test]
  fn add_keeps_adjacent_separate() {
    let mut set = RangeSet::new();
    set += r(b'a', b'c');
    set += r(b'd', b'f');
    assert_eq!(set.len(), 2);
    assert!(set.contains(b'd'));
  }

  #[test]
  fn subtract_splits_and_trims() {
    let mut set: RangeSet<u8> = r(b'a', b'z').into();
    set -= r(b'm', b'n');
    assert_eq!(set.ranges(), &[r(b'a', b'l'), r(b'o', b'z')]);

    set -= r(b'x', 0xFF);
    assert_eq!(set.ranges(), &[r(b'a', b'l'), r(b'o', b'w')]);

    set -= r(b'o', b'w');
    assert_eq!(set.ranges(), &[r(b'a', b'l')]);
  }

  #[test]
  fn subtract_at_alphabet_ends() {
    let mut set = RangeSet::<u8>::full();
    set -= Range::single(0);
    set -= Range::single(0xFF);
    assert_eq!(set.ranges(), &[r(1, 0xFE)]);
  }

  #[test]
  fn complement() {
    let set: RangeSet<u8> = r(b'0', b'9').into();
    let comp = set.complement();
    assert_eq!(comp.ranges(), &[r(0, b'0' - 1), r(b'9' + 1, 0xFF)]);
    assert!(RangeSet::<u8>::full().complement().is_empty());
  }

  #[test]
  fn operations_match_point_sets() {
    // A fixed pseudo random walk of unions and differences, checked against plain point sets.
    let mut seed: u32 = 0x2545_F491;
    let mut next = move || {
      seed ^= seed << 13;
      seed ^= seed >> 17;
      seed ^= seed << 5;
      seed
    };

    let mut set: RangeSet<u8> = RangeSet::new();
    let mut expected: BTreeSet<u8> = BTreeSet::new();
    for _ in 0..500 {
      let a = (next() % 256) as u8;
      let b = (next() % 256) as u8;
      let range = r(a, b);
      if next() % 3 == 0 {
        set -= range;
        for c in range.min()..=range.max() {
          expected.remove(&c);
        }
      } else {
        set += range;
        expected.extend(range.min()..=range.max());
      }
      assert_disjoint(set.ranges());
      assert_eq!(points(set.ranges()), expected);
    }
  }

  #[test]
  fn split_range_partitions() {
    let input = vec![r(b'a', b'z'), r(b'0', b'9'), r(b'e', b'e'), r(b'x', 0xFF), r(b'5', b'b')];
    let columns = split_range(&input);

    assert_disjoint(&columns);
    assert_eq!(points(&columns), points(&input));
    for range in input.iter() {
      let covering: Vec<_> = columns.iter().filter(|c| c.is_related(range)).collect();
      assert!(covering.iter().all(|c| c.relation(range).is_covered()));
    }
    // Sorted ascending.
    assert!(columns.windows(2).all(|w| w[0].max() < w[1].min()));
  }

  #[test]
  fn split_range_full_and_duplicates() {
    let columns = split_range(&[Range::<u8>::full(), Range::full(), Range::single(0xFF)]);
    assert_eq!(columns, vec![r(0, 0xFE), r(0xFF, 0xFF)]);
    assert!(split_range::<u8>(&[]).is_empty());
    assert_eq!(split_range(&[Range::<u16>::full()]), vec![Range::<u16>::full()]);
  }
}
