#![allow(dead_code)]
/*!

  Errors raised while compiling a definition file. Errors tied to a definition line display as
  `Syntax error: line N: message` and can be rendered as a `codespan_reporting` diagnostic that
  points at the line.

*/

use std::error::Error as StdError;
use std::fmt::{Display, Formatter, Result as FmtResult};

use codespan::{FileId, Span};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

use crate::lex::error::{ExpressionError, ImageError};


/// Converts an error into a diagnostic for the source file `file`.
pub trait ToDiagnostic {
  fn to_diagnostic(&self, file: FileId) -> Diagnostic<FileId>;
}


#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CompileErrorKind {
  #[error("does not yet have any lines can be extended.")]
  NothingToExtend,

  #[error("must in [NAME]<:><VALUE> format")]
  MissingSeparator,

  #[error("invalid token name.")]
  InvalidName,

  #[error("expression can't be empty.")]
  EmptyExpression,

  #[error("Recursive definition: {0}")]
  RecursiveDefinition(String),

  #[error(transparent)]
  Expression(#[from] ExpressionError),

  #[error("No define any words.")]
  NoDefinitions,

  #[error(transparent)]
  Image(#[from] ImageError),
}


#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompileError {
  pub kind : CompileErrorKind,
  pub line : Option<usize>, //< 1-based line of the definition file
  pub span : Option<Span>,  //< Byte span of that line in the decoded source
}

impl CompileError {

  /// An error located on `line`, which occupies `span` of the source.
  pub fn syntax(kind: CompileErrorKind, line: usize, span: Span) -> Self {
    CompileError{ kind, line: Some(line), span: Some(span) }
  }

  /// An error of the whole definition set.
  pub fn global(kind: CompileErrorKind) -> Self {
    CompileError{ kind, line: None, span: None }
  }

}

impl Display for CompileError {
  fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
    match self.line {
      Some(line) => write!(fmt, "Syntax error: line {}: {}", line, self.kind),
      None       => write!(fmt, "{}", self.kind)
    }
  }
}

impl StdError for CompileError {
  fn source(&self) -> Option<&(dyn StdError + 'static)> {
    match &self.kind {
      CompileErrorKind::Expression(error) => Some(error),
      CompileErrorKind::Image(error)      => Some(error),
      _                                   => None
    }
  }
}

impl From<CompileErrorKind> for CompileError {
  fn from(kind: CompileErrorKind) -> Self {
    CompileError::global(kind)
  }
}

impl ToDiagnostic for CompileError {
  fn to_diagnostic(&self, file: FileId) -> Diagnostic<FileId> {
    let labels = match self.span {
      Some(span) => vec![Label::primary(file, span).with_message(self.kind.to_string())],
      None       => vec![]
    };
    let notes = match &self.kind {
      CompileErrorKind::Expression(ExpressionError::Parse{ index }) => {
        vec![format!("the pattern has no valid continuation at character {}", index)]
      }
      CompileErrorKind::MissingSeparator => {
        vec!["definitions have the form `name(flags): pattern`".to_string()]
      }
      _ => vec![]
    };

    Diagnostic::error()
        .with_message(self.to_string())
        .with_labels(labels)
        .with_notes(notes)
  }
}




#[cfg(test)]
mod test {
  use super::*;
  use codespan::Files;

  #[test]
  fn messages_carry_the_line() {
    let error = CompileError::syntax(CompileErrorKind::InvalidName, 3, Span::new(10u32, 14u32));
    assert_eq!(error.to_string(), "Syntax error: line 3: invalid token name.");

    let error = CompileError::syntax(ExpressionError::Parse{ index: 0 }.into(), 1, Span::new(0u32, 4u32));
    assert_eq!(error.to_string(), "Syntax error: line 1: expression parse error.");

    let error: CompileError = CompileErrorKind::NoDefinitions.into();
    assert_eq!(error.to_string(), "No define any words.");
  }

  #[test]
  fn diagnostic_points_at_the_line() {
    let mut files = Files::<String>::new();
    let file = files.add("test.lex", "num: [0-9]+\nbad line\n".to_string());

    let error = CompileError::syntax(CompileErrorKind::MissingSeparator, 2, Span::new(12u32, 20u32));
    let diagnostic = error.to_diagnostic(file);
    assert_eq!(diagnostic.message, "Syntax error: line 2: must in [NAME]<:><VALUE> format");
    assert_eq!(diagnostic.labels.len(), 1);
    assert_eq!(diagnostic.labels[0].range, 12..20);
    assert_eq!(diagnostic.notes.len(), 1);
  }
}
