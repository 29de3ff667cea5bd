/*!

  A table driven lexer engine. A lex definition file of named token patterns is compiled into a
  single DFA, packed into a relocatable binary image, and driven over a character stream to produce
  tokens on demand.

  ```ignore
  use lexicon::Lexicon;

  let lexicon = Lexicon::<u8>::compile_str("num: [0-9]+\nid: [a-zA-Z]+\nws(i): [ \\t\\n]+")?;
  let mut matcher = lexicon.scan(b"12 ab3");
  while let Some(token) = matcher.fetch_next()? {
    println!("{}: {}", token.name, token.text_string());
  }
  ```

*/

#[macro_use]
pub mod lex;
pub mod spec;
pub mod lexicon;

pub use lex::{
  character::LexChar,
  error::{Error, ExpressionError, ImageError, Result},
  matcher::{Matcher, Token},
  regex::Regex,
  stream::{CharStream, ReaderStream, SliceStream},
  ActionId,
};
pub use lexicon::Lexicon;
pub use spec::{CompileError, CompileErrorKind, Options, Specification, ToDiagnostic};
