#![allow(dead_code)]
/*!

  The compiled lexicon as a relocatable byte image. All integers are 32 bits and native endian.

  ```text
  Header       12 × u32: header_size, data_size, char_size,
                         char_map_offset, char_map_count,
                         transit_map_offset, transit_map_state_count, transit_map_input_count,
                         action_info_offset, action_info_count,
                         action_names_offset, action_names_size
  CharMap      u16 column per character code
  Transitions  [state][column] of { is_final: u8, pad: [u8; 3], to_state: u32, action: u32 }
  ActionInfo   [action] of { minimum: u8, ignore: u8, pad: [u8; 2], name_offset: u32 }
  ActionNames  NUL terminated names in character units
  ```

  The dead state is `transit_map_state_count`. An `Image` can only be constructed through
  validation, after which every accessor stays inside the buffer.

*/

use std::borrow::Cow;
use std::convert::TryFrom;
use std::io::{self, Read, Write};
use std::marker::PhantomData;

use super::character::LexChar;
use super::dfa::Dfa;
use super::error::{ImageError, Result};
use super::limits::{ACTION_INFO_SIZE, CHAR_MAP_ENTRY, HEADER_FIELDS, HEADER_SIZE, TRANSITION_SIZE};
use super::{ActionId, Column, StateId};


fn read_u32(bytes: &[u8], offset: usize) -> u32 {
  let mut word = [0u8; 4];
  word.copy_from_slice(&bytes[offset..offset + 4]);
  u32::from_ne_bytes(word)
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
  u16::from_ne_bytes([bytes[offset], bytes[offset + 1]])
}

fn to_u32(value: usize) -> std::result::Result<u32, ImageError> {
  u32::try_from(value).map_err(|_| ImageError::TooLarge)
}


#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Header {
  pub header_size             : u32,
  pub data_size               : u32,
  pub char_size               : u32,
  pub char_map_offset         : u32,
  pub char_map_count          : u32,
  pub transit_map_offset      : u32,
  pub transit_map_state_count : u32,
  pub transit_map_input_count : u32,
  pub action_info_offset      : u32,
  pub action_info_count       : u32,
  pub action_names_offset     : u32,
  pub action_names_size       : u32,
}

impl Header {

  pub fn read(bytes: &[u8]) -> std::result::Result<Header, ImageError> {
    if bytes.len() < HEADER_SIZE {
      return Err(ImageError::Truncated{ expected: HEADER_SIZE, found: bytes.len() });
    }
    let field = |i: usize| read_u32(bytes, i * 4);
    Ok(Header {
      header_size             : field(0),
      data_size               : field(1),
      char_size               : field(2),
      char_map_offset         : field(3),
      char_map_count          : field(4),
      transit_map_offset      : field(5),
      transit_map_state_count : field(6),
      transit_map_input_count : field(7),
      action_info_offset      : field(8),
      action_info_count       : field(9),
      action_names_offset     : field(10),
      action_names_size       : field(11),
    })
  }

  pub fn write(&self, out: &mut Vec<u8>) {
    let fields: [u32; HEADER_FIELDS] = [
      self.header_size,
      self.data_size,
      self.char_size,
      self.char_map_offset,
      self.char_map_count,
      self.transit_map_offset,
      self.transit_map_state_count,
      self.transit_map_input_count,
      self.action_info_offset,
      self.action_info_count,
      self.action_names_offset,
      self.action_names_size,
    ];
    for field in fields.iter() {
      out.extend_from_slice(&field.to_ne_bytes());
    }
  }

  /// The checks that need no body: sizes of the header and its entries, the alphabet, and the
  /// declared data size against the sum of the sections.
  pub fn check<C: LexChar>(&self) -> std::result::Result<(), ImageError> {
    if self.header_size as usize != HEADER_SIZE {
      return Err(ImageError::HeaderSize(self.header_size));
    }
    if (self.data_size as usize) < HEADER_SIZE {
      return Err(ImageError::DataSize(self.data_size));
    }
    if self.char_size as usize != CHAR_MAP_ENTRY {
      return Err(ImageError::CharSize{ expected: CHAR_MAP_ENTRY as u32, found: self.char_size });
    }
    if self.char_map_count as usize != C::ALPHABET_SIZE {
      return Err(ImageError::CharMapCount{ expected: C::ALPHABET_SIZE as u32, found: self.char_map_count });
    }

    let computed = HEADER_SIZE as u64
        + self.char_map_size()
        + self.transit_map_size()
        + self.action_info_size()
        + self.action_names_size as u64;
    if computed != self.data_size as u64 {
      return Err(ImageError::SizeMismatch{ declared: self.data_size as u64, computed });
    }
    Ok(())
  }

  fn char_map_size(&self) -> u64 {
    self.char_map_count as u64 * CHAR_MAP_ENTRY as u64
  }

  fn transit_map_size(&self) -> u64 {
    self.transit_map_state_count as u64 * self.transit_map_input_count as u64 * TRANSITION_SIZE as u64
  }

  fn action_info_size(&self) -> u64 {
    self.action_info_count as u64 * ACTION_INFO_SIZE as u64
  }

}


/// A transition as stored in the image.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PackedTransition {
  pub is_final : bool,
  pub to       : StateId,
  pub action   : ActionId,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ActionInfo {
  pub minimum     : bool,
  pub ignore      : bool,
  pub name_offset : u32, //< Absolute offset of the name in the image
}

/// What the packer needs to know about one definition.
#[derive(Copy, Clone, Debug)]
pub struct ActionDescriptor<'d, C: LexChar> {
  pub name    : &'d [C],
  pub minimum : bool,
  pub ignore  : bool,
}


#[derive(Clone, Debug)]
pub struct Image<'a, C: LexChar> {
  data   : Cow<'a, [u8]>,
  header : Header,
  _char  : PhantomData<C>,
}

impl<'a, C: LexChar> Image<'a, C> {

  // region Construction

  /// Validates `data` as an image for the character type `C`. A buffer longer than the declared
  /// data size is truncated to it.
  pub fn validate(data: Cow<'a, [u8]>) -> std::result::Result<Self, ImageError> {
    let header = Header::read(&data)?;
    header.check::<C>()?;

    let data_size = header.data_size as usize;
    if data.len() < data_size {
      return Err(ImageError::Truncated{ expected: data_size, found: data.len() });
    }

    let sections = [
      ("char map", header.char_map_offset, header.char_map_size()),
      ("transition", header.transit_map_offset, header.transit_map_size()),
      ("action info", header.action_info_offset, header.action_info_size()),
      ("action name", header.action_names_offset, header.action_names_size as u64),
    ];
    for (name, offset, size) in sections.iter() {
      if (*offset as u64) < HEADER_SIZE as u64 || *offset as u64 + size > data_size as u64 {
        return Err(ImageError::SectionBounds(*name));
      }
    }
    if header.transit_map_state_count == 0 || header.transit_map_input_count == 0 {
      return Err(ImageError::NoStates);
    }

    let data = match data {
      Cow::Borrowed(bytes)   => Cow::Borrowed(&bytes[..data_size]),
      Cow::Owned(mut bytes)  => {
        bytes.truncate(data_size);
        Cow::Owned(bytes)
      }
    };
    let image = Image{ data, header, _char: PhantomData };
    image.validate_tables()?;
    Ok(image)
  }


  /// Every column, target state, and name offset must be usable without further checks.
  fn validate_tables(&self) -> std::result::Result<(), ImageError> {
    let header = &self.header;

    for code in 0..header.char_map_count {
      let column = read_u16(&self.data, header.char_map_offset as usize + code as usize * CHAR_MAP_ENTRY);
      if column as u32 >= header.transit_map_input_count {
        return Err(ImageError::ColumnRange{ code, column: column as u32, count: header.transit_map_input_count });
      }
    }

    let entries = header.transit_map_state_count as usize * header.transit_map_input_count as usize;
    for index in 0..entries {
      let state = read_u32(&self.data, header.transit_map_offset as usize + index * TRANSITION_SIZE + 4);
      if state > header.transit_map_state_count {
        return Err(ImageError::StateRange{ index, state, count: header.transit_map_state_count });
      }
    }

    let names_start = header.action_names_offset as u64;
    let names_end   = names_start + header.action_names_size as u64;
    for action in 0..header.action_info_count {
      let offset = read_u32(&self.data, header.action_info_offset as usize + action as usize * ACTION_INFO_SIZE + 4);
      if (offset as u64) < names_start || offset as u64 + C::UNIT_SIZE as u64 > names_end {
        return Err(ImageError::NameOffset{ action, offset });
      }
    }

    Ok(())
  }


  pub fn from_vec(bytes: Vec<u8>) -> std::result::Result<Image<'static, C>, ImageError> {
    Image::validate(Cow::Owned(bytes))
  }

  pub fn from_slice(bytes: &'a [u8]) -> std::result::Result<Self, ImageError> {
    Image::validate(Cow::Borrowed(bytes))
  }

  /// Reads and checks the header, then exactly the remaining `data_size - header_size` bytes.
  pub fn read_from<R: Read>(reader: &mut R) -> Result<Image<'static, C>> {
    let mut bytes = vec![0u8; HEADER_SIZE];
    reader.read_exact(&mut bytes)?;

    let header = Header::read(&bytes)?;
    header.check::<C>()?;

    // The body grows as it arrives rather than by the declared size.
    let data_size = header.data_size as usize;
    reader.by_ref().take((data_size - HEADER_SIZE) as u64).read_to_end(&mut bytes)?;
    if bytes.len() < data_size {
      return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "image shorter than its declared size").into());
    }

    Ok(Image::from_vec(bytes)?)
  }

  pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
    writer.write_all(&self.data)?;
    Ok(())
  }

  // endregion


  // region Accessors

  pub fn header(&self) -> &Header {
    &self.header
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }

  pub fn into_owned(self) -> Image<'static, C> {
    Image{ data: Cow::Owned(self.data.into_owned()), header: self.header, _char: PhantomData }
  }

  pub fn is_borrowed(&self) -> bool {
    matches!(self.data, Cow::Borrowed(_))
  }

  pub fn state_count(&self) -> u32 {
    self.header.transit_map_state_count
  }

  /// The state id that stands for "no transition".
  pub fn dead_state(&self) -> StateId {
    self.header.transit_map_state_count
  }

  pub fn column_count(&self) -> u32 {
    self.header.transit_map_input_count
  }

  pub fn action_count(&self) -> u32 {
    self.header.action_info_count
  }

  #[inline]
  pub fn column(&self, c: C) -> Column {
    read_u16(&self.data, self.header.char_map_offset as usize + c.to_u32() as usize * CHAR_MAP_ENTRY)
  }

  #[inline]
  pub fn transition(&self, state: StateId, column: Column) -> PackedTransition {
    let index = state as usize * self.header.transit_map_input_count as usize + column as usize;
    let offset = self.header.transit_map_offset as usize + index * TRANSITION_SIZE;
    PackedTransition {
      is_final : self.data[offset] != 0,
      to       : read_u32(&self.data, offset + 4),
      action   : read_u32(&self.data, offset + 8),
    }
  }

  pub fn action_info(&self, action: ActionId) -> Option<ActionInfo> {
    if action >= self.header.action_info_count {
      return None;
    }
    let offset = self.header.action_info_offset as usize + action as usize * ACTION_INFO_SIZE;
    Some(ActionInfo {
      minimum     : self.data[offset] != 0,
      ignore      : self.data[offset + 1] != 0,
      name_offset : read_u32(&self.data, offset + 4),
    })
  }

  /// The name of `action` in character units, without the terminating NUL.
  pub fn action_name(&self, action: ActionId) -> Option<Vec<C>> {
    let info = self.action_info(action)?;
    let end = self.header.action_names_offset as usize + self.header.action_names_size as usize;
    let units = self.data[info.name_offset as usize..end]
        .chunks_exact(C::UNIT_SIZE)
        .map(C::read_ne)
        .take_while(|c| c.to_u32() != 0)
        .collect();
    Some(units)
  }

  // endregion

}


/**
  Packs `dfa` and the per action metadata into an image. `actions[0]` describes the reserved
  "no match" action.
*/
pub fn pack<C: LexChar>(
  dfa     : &Dfa<C>,
  actions : &[ActionDescriptor<'_, C>]
) -> std::result::Result<Vec<u8>, ImageError>
{
  let state_count = dfa.state_count;
  let input_count = dfa.range_map.len() + 1;

  let char_map_offset    = HEADER_SIZE;
  let transit_map_offset = char_map_offset + C::ALPHABET_SIZE * CHAR_MAP_ENTRY;
  let action_info_offset = transit_map_offset + state_count * input_count * TRANSITION_SIZE;
  let action_names_offset = action_info_offset + actions.len() * ACTION_INFO_SIZE;
  let action_names_size: usize = actions.iter().map(|a| (a.name.len() + 1) * C::UNIT_SIZE).sum();
  let data_size = action_names_offset + action_names_size;

  let header = Header {
    header_size             : HEADER_SIZE as u32,
    data_size               : to_u32(data_size)?,
    char_size               : CHAR_MAP_ENTRY as u32,
    char_map_offset         : char_map_offset as u32,
    char_map_count          : to_u32(C::ALPHABET_SIZE)?,
    transit_map_offset      : to_u32(transit_map_offset)?,
    transit_map_state_count : to_u32(state_count)?,
    transit_map_input_count : to_u32(input_count)?,
    action_info_offset      : to_u32(action_info_offset)?,
    action_info_count       : to_u32(actions.len())?,
    action_names_offset     : to_u32(action_names_offset)?,
    action_names_size       : to_u32(action_names_size)?,
  };

  let mut out: Vec<u8> = Vec::with_capacity(data_size);
  header.write(&mut out);

  // Char map
  let default_column = dfa.range_map.len() as Column;
  let mut columns: Vec<Column> = vec![default_column; C::ALPHABET_SIZE];
  for (column, range) in dfa.range_map.iter().enumerate() {
    for code in range.min().to_u32()..=range.max().to_u32() {
      columns[code as usize] = column as Column;
    }
  }
  for column in columns {
    out.extend_from_slice(&column.to_ne_bytes());
  }

  // Transitions
  let dead = state_count as StateId;
  for state in 0..state_count as StateId {
    for column in 0..input_count {
      let mut packed = PackedTransition{ is_final: false, to: dead, action: 0 };
      if let Some(transition) = dfa.transitions.get(&(state, column as Column)) {
        packed.to = transition.to;
        if dfa.is_accepting(transition.to) {
          packed.is_final = true;
          packed.action = transition.action;
        }
      }
      out.push(packed.is_final as u8);
      out.extend_from_slice(&[0u8; 3]);
      out.extend_from_slice(&packed.to.to_ne_bytes());
      out.extend_from_slice(&packed.action.to_ne_bytes());
    }
  }

  // Action info
  let mut name_offset = action_names_offset;
  for action in actions.iter() {
    out.push(action.minimum as u8);
    out.push(action.ignore as u8);
    out.extend_from_slice(&[0u8; 2]);
    out.extend_from_slice(&(name_offset as u32).to_ne_bytes());
    name_offset += (action.name.len() + 1) * C::UNIT_SIZE;
  }

  // Names
  for action in actions.iter() {
    for c in action.name.iter() {
      c.write_ne(&mut out);
    }
    C::MIN.write_ne(&mut out);
  }

  debug_assert_eq!(out.len(), data_size);
  debug_logln!(
    "Packed image: {} bytes, {} states, {} columns, {} actions",
    data_size, state_count, input_count, actions.len()
  );
  Ok(out)
}




#[cfg(test)]
mod test {
  use super::*;
  use crate::lex::expression::{ExpressionTree, JoinKind};
  use crate::lex::error::Error;

  fn sample() -> Vec<u8> {
    let mut joined = ExpressionTree::new();
    for (i, pattern) in ["[0-9]+", "[a-z]+"].iter().enumerate() {
      let mut tree = ExpressionTree::parse(pattern.as_bytes()).unwrap();
      tree.set_action(i as ActionId + 1);
      joined = ExpressionTree::join(joined, tree, JoinKind::Or);
    }
    let dfa = Dfa::build(joined).unwrap();
    let actions = [
      ActionDescriptor{ name: &b"error"[..], minimum: false, ignore: false },
      ActionDescriptor{ name: &b"num"[..], minimum: false, ignore: false },
      ActionDescriptor{ name: &b"id"[..], minimum: true, ignore: true },
    ];
    pack(&dfa, &actions).unwrap()
  }

  #[test]
  fn layout() {
    let bytes = sample();
    let image = Image::<u8>::from_slice(&bytes).unwrap();
    let header = image.header();

    assert_eq!(header.header_size, 48);
    assert_eq!(header.char_map_offset, 48);
    assert_eq!(header.char_map_count, 256);
    assert_eq!(header.transit_map_offset, 48 + 512);
    assert_eq!(header.transit_map_input_count, 3);
    assert_eq!(header.transit_map_state_count, 3);
    assert_eq!(header.action_info_count, 3);
    assert_eq!(header.action_names_size, 6 + 4 + 3);
    assert_eq!(header.data_size as usize, bytes.len());
  }

  #[test]
  fn accessors() {
    let bytes = sample();
    let image = Image::<u8>::from_slice(&bytes).unwrap();

    assert_eq!(image.column(b'7'), 0);
    assert_eq!(image.column(b'q'), 1);
    assert_eq!(image.column(b' '), 2);

    let digit = image.transition(0, 0);
    assert!(digit.is_final);
    assert_eq!(digit.action, 1);
    assert_eq!(image.transition(0, 2).to, image.dead_state());
    assert!(!image.transition(0, 2).is_final);

    let id = image.action_info(2).unwrap();
    assert!(id.minimum && id.ignore);
    assert!(image.action_info(3).is_none());
    assert_eq!(image.action_name(0).unwrap(), b"error".to_vec());
    assert_eq!(image.action_name(2).unwrap(), b"id".to_vec());
  }

  #[test]
  fn header_round_trip_and_rejections() {
    let bytes = sample();
    let header = Header::read(&bytes).unwrap();
    let mut written = Vec::new();
    header.write(&mut written);
    assert_eq!(&written[..], &bytes[..HEADER_SIZE]);

    assert!(matches!(Image::<u8>::from_slice(&bytes[..20]), Err(ImageError::Truncated{ .. })));
    assert!(matches!(Image::<u8>::from_slice(&bytes[..bytes.len() - 1]), Err(ImageError::Truncated{ .. })));
    assert!(matches!(Image::<u16>::from_slice(&bytes), Err(ImageError::CharMapCount{ .. })));

    let mut bad = bytes.clone();
    bad[4..8].copy_from_slice(&(header.data_size + 4).to_ne_bytes());
    bad.extend_from_slice(&[0; 4]);
    assert!(matches!(Image::<u8>::from_slice(&bad), Err(ImageError::SizeMismatch{ .. })));

    let mut bad = bytes.clone();
    bad[0..4].copy_from_slice(&44u32.to_ne_bytes());
    assert_eq!(Image::<u8>::from_slice(&bad).unwrap_err(), ImageError::HeaderSize(44));

    let mut bad = bytes.clone();
    let first_entry = header.char_map_offset as usize;
    bad[first_entry..first_entry + 2].copy_from_slice(&9u16.to_ne_bytes());
    assert!(matches!(Image::<u8>::from_slice(&bad), Err(ImageError::ColumnRange{ .. })));
  }

  #[test]
  fn longer_buffers_are_truncated() {
    let mut bytes = sample();
    let size = bytes.len();
    bytes.extend_from_slice(b"trailing");
    let image = Image::<u8>::from_vec(bytes).unwrap();
    assert_eq!(image.as_bytes().len(), size);
    assert!(!image.is_borrowed());
  }

  #[test]
  fn read_from_reader() {
    let bytes = sample();
    let image = Image::<u8>::read_from(&mut &bytes[..]).unwrap();
    assert_eq!(image.as_bytes(), &bytes[..]);
  }

  #[test]
  fn read_from_checks_the_header_before_the_body() {
    let bytes = sample();

    // A header alone that declares a body of nearly 4 GiB.
    let mut huge = bytes[..HEADER_SIZE].to_vec();
    huge[4..8].copy_from_slice(&u32::MAX.to_ne_bytes());
    assert!(matches!(
      Image::<u8>::read_from(&mut &huge[..]),
      Err(Error::Image(ImageError::SizeMismatch{ declared, .. })) if declared == u32::MAX as u64
    ));

    let mut wide = bytes[..HEADER_SIZE].to_vec();
    wide[16..20].copy_from_slice(&65536u32.to_ne_bytes());
    assert!(matches!(Image::<u8>::read_from(&mut &wide[..]), Err(Error::Image(ImageError::CharMapCount{ .. }))));

    let short = &bytes[..bytes.len() - 1];
    assert!(matches!(Image::<u8>::read_from(&mut &short[..]), Err(Error::Io(_))));
  }
}
