#![allow(dead_code)]
/*!

  Errors of the engine. Expression and image errors are raised by the compiler pipeline and by
  image validation. `Error` is the crate level error returned by the public API.

*/

use std::io;

use thiserror::Error;

use crate::spec::CompileError;


#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum ExpressionError {
  /// The pattern is malformed at or before `index`.
  #[error("expression parse error.")]
  Parse{ index: usize },

  #[error("No define any words.")]
  EmptyTree,

  /// The alphabet partition has more columns than a char map entry can address.
  #[error("too many character columns: {count}")]
  TooManyColumns{ count: usize },
}

impl ExpressionError {
  /// The character index of a parse error.
  pub fn index(&self) -> Option<usize> {
    match self {
      ExpressionError::Parse{ index } => Some(*index),
      _                               => None
    }
  }
}


#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum ImageError {
  #[error("image truncated: expected {expected} bytes, found {found}")]
  Truncated{ expected: usize, found: usize },

  #[error("invalid header size {0}")]
  HeaderSize(u32),

  #[error("data size {0} is smaller than the header")]
  DataSize(u32),

  #[error("char size {found} does not match the expected {expected}")]
  CharSize{ expected: u32, found: u32 },

  #[error("char map has {found} entries, the character type needs {expected}")]
  CharMapCount{ expected: u32, found: u32 },

  #[error("data size {declared} does not match the section sizes, which add up to {computed}")]
  SizeMismatch{ declared: u64, computed: u64 },

  #[error("{0} section lies outside the image")]
  SectionBounds(&'static str),

  #[error("image has no states")]
  NoStates,

  #[error("char map entry {code} names column {column}, but there are only {count}")]
  ColumnRange{ code: u32, column: u32, count: u32 },

  #[error("transition {index} targets state {state}, but there are only {count}")]
  StateRange{ index: usize, state: u32, count: u32 },

  #[error("action {action} has name offset {offset} outside the name pool")]
  NameOffset{ action: u32, offset: u32 },

  #[error("image exceeds the 32 bit offset range")]
  TooLarge,
}


#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Compile(#[from] CompileError),

  #[error(transparent)]
  Expression(#[from] ExpressionError),

  #[error(transparent)]
  Image(#[from] ImageError),

  /// The matcher was used before a stream was bound.
  #[error("No stream.")]
  NoStream,

  #[error(transparent)]
  Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;




#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn messages() {
    assert_eq!(ExpressionError::Parse{ index: 3 }.to_string(), "expression parse error.");
    assert_eq!(ExpressionError::Parse{ index: 3 }.index(), Some(3));
    assert_eq!(ExpressionError::EmptyTree.to_string(), "No define any words.");
    assert_eq!(Error::NoStream.to_string(), "No stream.");
    assert_eq!(
      Error::from(ImageError::HeaderSize(12)).to_string(),
      "invalid header size 12"
    );
  }
}
