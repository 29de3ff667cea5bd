#![allow(dead_code)]
/*!

  Macros defined by `#!name: value` lines. A pattern refers to a macro as `{name}`; references are
  replaced by the macro's value, itself expanded, wherever they appear in the pattern. A reference
  to an undefined macro stays in the pattern as written, where the scanner reads its braces as
  ordinary characters.

  References are found with the engine itself: a best-match `Regex` for `\{[_a-zA-Z][_a-zA-Z0-9]*\}`
  splits the pattern into references and the text between them.

*/

use patricia_tree::PatriciaMap;

use crate::lex::character::LexChar;
use crate::lex::regex::Regex;
use crate::lex::ActionId;

use super::definition::is_macro_name;
use super::error::{CompileError, CompileErrorKind};

pub const REFERENCE_PATTERN: &str = r"\{[_a-zA-Z][_a-zA-Z0-9]*\}";
const REFERENCE: ActionId = 1;


pub struct MacroTable<C: LexChar> {
  values: PatriciaMap<Vec<C>>,
}

impl<C: LexChar> Default for MacroTable<C> {
  fn default() -> Self {
    MacroTable{ values: PatriciaMap::new() }
  }
}

impl<C: LexChar> MacroTable<C> {

  pub fn new() -> Self {
    Self::default()
  }

  /// Defines or redefines `name`. Returns false, leaving the table unchanged, if `name` is not a
  /// valid macro name.
  pub fn insert(&mut self, name: &[C], value: Vec<C>) -> bool {
    if !is_macro_name(name) {
      return false;
    }
    self.values.insert(C::decode(name), value);
    true
  }

  pub fn get(&self, name: &[C]) -> Option<&Vec<C>> {
    if !is_macro_name(name) {
      return None;
    }
    self.values.get(C::decode(name))
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }


  /// Compiles the regex that finds references. Only needed when the table is not empty.
  pub fn reference_regex() -> Result<Regex<'static, C>, CompileError> {
    Regex::from_pattern(REFERENCE_PATTERN)
  }


  /// Replaces every reference in `pattern` by its fully expanded value.
  pub fn expand(&self, references: &Regex<C>, pattern: &[C]) -> Result<Vec<C>, CompileErrorKind> {
    let mut active: Vec<Vec<C>> = Vec::new();
    self.expand_in(references, pattern, &mut active)
  }

  fn expand_in(&self, references: &Regex<C>, pattern: &[C], active: &mut Vec<Vec<C>>)
    -> Result<Vec<C>, CompileErrorKind>
  {
    let mut result = Vec::with_capacity(pattern.len());

    for token in references.tokens(pattern) {
      if token.action != REFERENCE {
        result.extend_from_slice(&token.text);
        continue;
      }

      // Strip the braces.
      let name = &token.text[1..token.text.len() - 1];
      if active.iter().any(|outer| outer.as_slice() == name) {
        return Err(CompileErrorKind::RecursiveDefinition(C::decode(name)));
      }

      match self.get(name) {
        Some(value) => {
          active.push(name.to_vec());
          let expanded = self.expand_in(references, value, active)?;
          active.pop();
          debug_log!("expanded {{{}}} to {}", C::decode(name), C::decode(&expanded));
          result.extend(expanded);
        }
        None => result.extend_from_slice(&token.text)
      }
    }

    Ok(result)
  }

}




#[cfg(test)]
mod test {
  use super::*;

  fn define(macros: &[(&str, &str)]) -> MacroTable<u8> {
    let mut table = MacroTable::new();
    for (name, value) in macros {
      assert!(table.insert(name.as_bytes(), value.as_bytes().to_vec()));
    }
    table
  }

  fn expand(table: &MacroTable<u8>, pattern: &str) -> Result<String, CompileErrorKind> {
    let references = MacroTable::<u8>::reference_regex().unwrap();
    table.expand(&references, pattern.as_bytes()).map(|units| u8::decode(&units))
  }

  #[test]
  fn nested_references() {
    let table = define(&[("digit", "[0-9]"), ("number", "{digit}+"), ("pair", "{number},{number}")]);
    assert_eq!(expand(&table, "{pair}").unwrap(), "[0-9]+,[0-9]+");
    assert_eq!(expand(&table, "x{digit}y").unwrap(), "x[0-9]y");
    assert_eq!(expand(&table, "").unwrap(), "");
  }

  #[test]
  fn undefined_references_stay() {
    let table = define(&[("digit", "[0-9]")]);
    assert_eq!(expand(&table, "{digits}{digit}").unwrap(), "{digits}[0-9]");
    assert_eq!(expand(&table, "{9}{ digit}").unwrap(), "{9}{ digit}");
  }

  #[test]
  fn same_macro_twice_is_not_recursion() {
    let table = define(&[("a", "x"), ("b", "{a}{a}")]);
    assert_eq!(expand(&table, "{b}{a}").unwrap(), "xxx");
  }

  #[test]
  fn cycles_are_reported() {
    let table = define(&[("a", "{b}"), ("b", "c{a}")]);
    assert_eq!(expand(&table, "{a}"), Err(CompileErrorKind::RecursiveDefinition("a".to_string())));

    let table = define(&[("self", "({self})")]);
    assert_eq!(expand(&table, "{self}"), Err(CompileErrorKind::RecursiveDefinition("self".to_string())));
  }

  #[test]
  fn invalid_names_are_refused() {
    let mut table = MacroTable::<u8>::new();
    assert!(!table.insert(b"1st", b"x".to_vec()));
    assert!(!table.insert(b"", b"x".to_vec()));
    assert!(table.is_empty());
    assert!(table.insert(b"first", b"x".to_vec()));
    assert!(table.insert(b"first", b"y".to_vec()));
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(b"first"), Some(&b"y".to_vec()));
  }
}
