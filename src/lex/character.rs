#![allow(dead_code)]
/*!
  The character types the engine is instantiated over. A `LexChar` is a fixed width code unit:

  | &nbsp;Type | Alphabet | Unit size | Decoded as |
  |------:|:--------|:--------|:--------|
  |  `u8` | 256 codes   | 1 byte  | UTF-8, lossy  |
  | `u16` | 65536 codes | 2 bytes | UTF-16, lossy |

  Every code of the alphabet has an entry in the char map of a compiled image, so the alphabet size
  is part of the image format and is checked when an image is loaded.

  Syntax characters of patterns and definition files are all ASCII, so the scanner and the
  definition parser only ever compare units against ASCII values.
*/

use std::fmt::Debug;
use std::hash::Hash;


pub const ASCII_ESCAPES : &[u8;  7] = b"abtnvfr";


pub trait LexChar: Copy + Ord + Eq + Hash + Debug + Default + Send + Sync + 'static {
  const MIN: Self;
  const MAX: Self;
  /// Number of distinct codes, which is also the number of char map entries.
  const ALPHABET_SIZE: usize;
  /// Width of one unit in the name pool of an image and in byte streams.
  const UNIT_SIZE: usize;

  fn to_u32(self) -> u32;

  /// `None` when `value` is outside the alphabet.
  fn from_u32(value: u32) -> Option<Self>;

  fn from_ascii(c: u8) -> Self;

  fn decode(units: &[Self]) -> String;

  fn encode(text: &str) -> Vec<Self>;

  fn write_ne(self, out: &mut Vec<u8>);

  /// Reads one unit from the first `UNIT_SIZE` bytes of `bytes`.
  fn read_ne(bytes: &[u8]) -> Self;


  fn ascii_value(self) -> Option<u8> {
    let value = self.to_u32();
    match value < 0x80 {
      true  => Some(value as u8),
      false => None
    }
  }

  fn is(self, c: u8) -> bool {
    self.to_u32() == c as u32
  }

  fn succ(self) -> Option<Self> {
    Self::from_u32(self.to_u32().checked_add(1)?)
  }

  fn pred(self) -> Option<Self> {
    Self::from_u32(self.to_u32().checked_sub(1)?)
  }

  /// Space, tab, and the other ASCII whitespace codes.
  fn is_whitespace(self) -> bool {
    matches!(self.ascii_value(), Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(0x0B) | Some(0x0C))
  }
}


impl LexChar for u8 {
  const MIN: Self = u8::MIN;
  const MAX: Self = u8::MAX;
  const ALPHABET_SIZE: usize = 0x100;
  const UNIT_SIZE: usize = 1;

  fn to_u32(self) -> u32 {
    self as u32
  }

  fn from_u32(value: u32) -> Option<Self> {
    match value <= u8::MAX as u32 {
      true  => Some(value as u8),
      false => None
    }
  }

  fn from_ascii(c: u8) -> Self {
    c
  }

  fn decode(units: &[Self]) -> String {
    String::from_utf8_lossy(units).into_owned()
  }

  fn encode(text: &str) -> Vec<Self> {
    text.as_bytes().to_vec()
  }

  fn write_ne(self, out: &mut Vec<u8>) {
    out.push(self);
  }

  fn read_ne(bytes: &[u8]) -> Self {
    bytes[0]
  }
}


impl LexChar for u16 {
  const MIN: Self = u16::MIN;
  const MAX: Self = u16::MAX;
  const ALPHABET_SIZE: usize = 0x10000;
  const UNIT_SIZE: usize = 2;

  fn to_u32(self) -> u32 {
    self as u32
  }

  fn from_u32(value: u32) -> Option<Self> {
    match value <= u16::MAX as u32 {
      true  => Some(value as u16),
      false => None
    }
  }

  fn from_ascii(c: u8) -> Self {
    c as u16
  }

  fn decode(units: &[Self]) -> String {
    String::from_utf16_lossy(units)
  }

  fn encode(text: &str) -> Vec<Self> {
    text.encode_utf16().collect()
  }

  fn write_ne(self, out: &mut Vec<u8>) {
    out.extend_from_slice(&self.to_ne_bytes());
  }

  fn read_ne(bytes: &[u8]) -> Self {
    u16::from_ne_bytes([bytes[0], bytes[1]])
  }
}


/// Gives a printable representation of `c` that reads back as the same character inside a pattern.
pub fn escaped<C: LexChar>(c: C) -> String {
  let value = c.to_u32();

  if value >= 0x07 && value <= 0x0D {
    // '\x07' is '\a'
    format!("\\{}", ASCII_ESCAPES[(value - 0x07) as usize] as char)
  } else if value == 0 {
    "\\0".to_string()
  } else if value == ' ' as u32 {
    "\\s".to_string()
  } else if let Some(ascii) = c.ascii_value().filter(|a| a.is_ascii_graphic()) {
    match ascii {
      b'.' | b'|' | b'+' | b'-' | b'?' | b'*' | b'^' | b'\\'
      | b'(' | b')' | b'[' | b']' => format!("\\{}", ascii as char),
      _                           => format!("{}", ascii as char)
    }
  } else if value <= 0xFF {
    format!("\\x{:02x}", value)
  } else {
    std::char::from_u32(value).map_or_else(|| format!("\\x{:x}", value), |w| w.to_string())
  }
}
