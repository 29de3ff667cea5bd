/*!

Utilities to parse a definition file and compile it into the binary image of a lexicon.

*/

mod definition;
mod error;
mod macros;
mod options;
mod specification;

pub use definition::{is_macro_name, Definition, Key};
pub use error::{CompileError, CompileErrorKind, ToDiagnostic};
pub use macros::{MacroTable, REFERENCE_PATTERN};
pub use options::Options;
pub use specification::Specification;
