#![allow(dead_code)]
/*!

  One named pattern of a definition file, and the grammar of the key that precedes the `:` on a
  definition line:

  ```text
  key   := blank* name blank* flags? blank*
  name  := ( [A-Za-z0-9_] [A-Za-z0-9_.-]* )?
  flags := '(' ( 'i' | '-' | 'm' | '<' | blank )* ')'
  ```

  `i` or `-` marks the token as ignored, `m` or `<` asks for a minimum match. Names are compared
  in lower case.

*/

use codespan::Span;
use nom::{
  bytes::complete::take_while,
  character::complete::{char as char1, satisfy, space0},
  combinator::{all_consuming, opt, recognize},
  sequence::{delimited, pair, tuple},
  IResult,
};

use crate::lex::character::LexChar;
use crate::lex::limits::ERROR_NAME;


#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Definition<C: LexChar> {
  pub name    : String,  //< Lower case token name
  pub pattern : Vec<C>,  //< Raw pattern, before macro expansion
  pub ignore  : bool,    //< `next_token` skips tokens of this definition
  pub minimum : bool,    //< The matcher stops at the first accepting state
  pub line    : usize,   //< 1-based line the definition starts on; 0 for the implicit `error`
  pub span    : Span,    //< Byte span of that line
}

impl<C: LexChar> Definition<C> {

  /// The reserved definition at action 0, which names unmatched input.
  pub fn error() -> Self {
    Definition{
      name    : ERROR_NAME.to_string(),
      pattern : Vec::new(),
      ignore  : false,
      minimum : false,
      line    : 0,
      span    : Span::initial(),
    }
  }

  pub fn is_error(&self) -> bool {
    self.name == ERROR_NAME
  }

}


/// The parsed key of a definition line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Key {
  pub name    : String,
  pub ignore  : bool,
  pub minimum : bool,
}

impl Key {

  /// Parses the text before the `:` of a definition line. `None` if it is not a valid key.
  pub fn parse<C: LexChar>(key: &[C]) -> Option<Key> {
    let text = C::decode(key);
    let (_, (_, name, _, flags, _)) = key_parser(&text).ok()?;
    let flags = flags.unwrap_or("");

    Some(Key{
      name    : name.to_ascii_lowercase(),
      ignore  : flags.contains(|c: char| c == 'i' || c == '-'),
      minimum : flags.contains(|c: char| c == 'm' || c == '<'),
    })
  }

}


fn key_parser(input: &str) -> IResult<&str, (&str, &str, &str, Option<&str>, &str)> {
  all_consuming(
    tuple((
      space0,
      name,
      space0,
      opt(delimited(char1('('), take_while(is_flag), char1(')'))),
      space0,
    ))
  )(input)
}

fn name(input: &str) -> IResult<&str, &str> {
  recognize(
    opt(pair(
      satisfy(|c| c.is_ascii_alphanumeric() || c == '_'),
      take_while(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
    ))
  )(input)
}

fn is_flag(c: char) -> bool {
  matches!(c, 'i' | '-' | 'm' | '<' | ' ' | '\t')
}


/// Macro names follow identifier rules: `[_a-zA-Z][_a-zA-Z0-9]*`.
pub fn is_macro_name<C: LexChar>(name: &[C]) -> bool {
  let mut units = name.iter().map(|c| c.ascii_value());
  let first_ok = match units.next() {
    Some(Some(c)) => c == b'_' || c.is_ascii_alphabetic(),
    _             => false
  };
  first_ok && units.all(|c| matches!(c, Some(c) if c == b'_' || c.is_ascii_alphanumeric()))
}




#[cfg(test)]
mod test {
  use super::*;

  fn key(text: &str) -> Option<Key> {
    Key::parse::<u8>(text.as_bytes())
  }

  #[test]
  fn plain_names_are_lowercased() {
    assert_eq!(key("Number"), Some(Key{ name: "number".to_string(), ..Key::default() }));
    assert_eq!(key("  a.b-c_9  "), Some(Key{ name: "a.b-c_9".to_string(), ..Key::default() }));
    assert_eq!(key(""), Some(Key::default()));
  }

  #[test]
  fn flags() {
    assert_eq!(key("space(i)"), Some(Key{ name: "space".to_string(), ignore: true, minimum: false }));
    assert_eq!(key("comment (m -)"), Some(Key{ name: "comment".to_string(), ignore: true, minimum: true }));
    assert_eq!(key("str(<)  "), Some(Key{ name: "str".to_string(), ignore: false, minimum: true }));
    assert_eq!(key("(i)"), Some(Key{ name: String::new(), ignore: true, minimum: false }));
    assert_eq!(key("x()"), Some(Key{ name: "x".to_string(), ..Key::default() }));
  }

  #[test]
  fn invalid_keys() {
    assert_eq!(key("two words"), None);
    assert_eq!(key("-lead"), None);
    assert_eq!(key("bad(x)"), None);
    assert_eq!(key("open(i"), None);
    assert_eq!(key("after(i) junk"), None);
    assert_eq!(key("dollar$"), None);
  }

  #[test]
  fn wide_keys() {
    let wide: Vec<u16> = "Ident (I)".encode_utf16().collect();
    // Flags are case sensitive.
    assert_eq!(Key::parse(&wide), None);
    let wide: Vec<u16> = "Ident (i)".encode_utf16().collect();
    assert_eq!(Key::parse(&wide).map(|k| k.name), Some("ident".to_string()));
  }

  #[test]
  fn macro_names() {
    assert!(is_macro_name(b"digit"));
    assert!(is_macro_name(b"_x9"));
    assert!(!is_macro_name(b"9x"));
    assert!(!is_macro_name(b"a-b"));
    assert!(!is_macro_name::<u8>(b""));
  }
}
