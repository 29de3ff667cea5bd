#![allow(dead_code)]
/*!

  Search and replace with a single pattern. A `Regex` is a lexicon with one anonymous definition in
  best-match mode, so scanning a source splits it into matches (action 1) and unmatched single
  units (action 0).

*/

use super::character::LexChar;
use super::matcher::{Matcher, Token};
use super::stream::SliceStream;
use super::ActionId;
use crate::lexicon::Lexicon;
use crate::spec::CompileError;

const MATCH: ActionId = 1;


pub struct Regex<'a, C: LexChar> {
  lexicon: Lexicon<'a, C>,
}

impl<C: LexChar> Regex<'static, C> {
  pub fn new(pattern: &[C]) -> Result<Self, CompileError> {
    let mut definition = vec![C::from_ascii(b':')];
    definition.extend_from_slice(pattern);
    Ok(Regex::from_lexicon(Lexicon::compile(&definition)?))
  }

  pub fn from_pattern(pattern: &str) -> Result<Self, CompileError> {
    Regex::new(&C::encode(pattern))
  }
}

impl<'a, C: LexChar> Regex<'a, C> {

  /// Wraps a compiled lexicon, typically a loaded image, whose action 1 marks a match.
  pub fn from_lexicon(mut lexicon: Lexicon<'a, C>) -> Self {
    lexicon.set_best_match(true);
    Regex{ lexicon }
  }

  pub fn lexicon(&self) -> &Lexicon<'a, C> {
    &self.lexicon
  }


  /// The raw tokens of `source` in order; their texts concatenate to `source`.
  pub fn tokens<'r, 's>(&'r self, source: &'s [C]) -> Tokens<'r, 'a, 's, C> {
    Tokens{ matcher: self.lexicon.scan(source) }
  }


  /// The index of the first match at or after `start`.
  pub fn find(&self, source: &[C], start: usize) -> Option<usize> {
    self.find_match(source, start).map(|(index, _)| index)
  }

  /// The index and text of the first match at or after `start`.
  pub fn find_match(&self, source: &[C], start: usize) -> Option<(usize, Vec<C>)> {
    if start >= source.len() {
      return None;
    }
    self.tokens(&source[start..])
        .find(|token| token.action == MATCH)
        .map(|token| (start + token.offset as usize, token.text))
  }

  pub fn is_match(&self, source: &[C]) -> bool {
    self.find(source, 0).is_some()
  }


  /// Replaces matches with `replacement`; at most `limit` of them if given.
  pub fn replace(&self, source: &[C], replacement: &[C], limit: Option<usize>) -> Vec<C> {
    self.replace_with(source, |_| replacement.to_vec(), limit)
  }


  /// Replaces each match with `f(matched text)`; at most `limit` of them if given.
  pub fn replace_with<F>(&self, source: &[C], mut f: F, limit: Option<usize>) -> Vec<C>
    where F: FnMut(&[C]) -> Vec<C>
  {
    let mut result: Vec<C> = Vec::with_capacity(source.len());
    let mut replaced = 0;

    for token in self.tokens(source) {
      if token.action != MATCH {
        result.extend_from_slice(&token.text);
      } else if limit.map_or(true, |limit| replaced < limit) {
        result.extend(f(&token.text));
        replaced += 1;
      } else {
        result.extend_from_slice(&source[token.offset as usize..]);
        break;
      }
    }

    result
  }

}




pub struct Tokens<'r, 'a, 's, C: LexChar> {
  matcher: Matcher<'r, 'a, C, SliceStream<'s, C>>,
}

impl<'r, 'a, 's, C: LexChar> Iterator for Tokens<'r, 'a, 's, C> {
  type Item = Token<'r, C>;

  fn next(&mut self) -> Option<Self::Item> {
    // A slice stream cannot fail.
    match self.matcher.next_raw_token() {
      Ok(token) if !token.is_end() => Some(token),
      _                            => None
    }
  }
}
