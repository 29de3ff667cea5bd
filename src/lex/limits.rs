/*!
  Constants specifying limits and the fixed sizes of the binary image.

*/


use super::{ActionId, Column};

/// Action of the reserved `error` definition, also "no match".
pub const ERROR_ACTION: ActionId = 0;

/// Name of the reserved definition that controls unmatched input.
pub const ERROR_NAME: &str = "error";

/// The char map stores one `Column` per character, so the partition plus the "anything else" column
/// must fit in a `Column`.
pub const MAX_COLUMNS: usize = Column::MAX as usize;

/// Up to this many decimal digits are read by a `\ddd` escape.
pub const MAX_DECIMAL_ESCAPE_DIGITS: usize = 3;

/// Up to this many hex digits are read by a `\xHH` escape.
pub const MAX_HEX_ESCAPE_DIGITS: usize = 2;


// Image Layout
// Every integer is 32 bits and native endian. Booleans occupy one byte followed by zero padding up
// to the next 4-byte boundary.
pub const HEADER_FIELDS    : usize = 12;
pub const HEADER_SIZE      : usize = HEADER_FIELDS * 4; //< 48 bytes
pub const CHAR_MAP_ENTRY   : usize = 2;                 //< One `u16` column per character
pub const TRANSITION_SIZE  : usize = 12;                //< `{ bool, pad[3], u32, u32 }`
pub const ACTION_INFO_SIZE : usize = 8;                 //< `{ bool, bool, pad[2], u32 }`
