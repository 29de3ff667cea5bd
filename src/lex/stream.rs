#![allow(dead_code)]
/*!

  Character streams the matcher reads from. The matcher reads one unit at a time and rewinds by
  absolute seek when a token is shorter than what it read, so every stream must support `tell` and
  `seek`. Offsets are in character units, not bytes.

*/

use std::io::{self, Read, Seek, SeekFrom};
use std::marker::PhantomData;

use super::character::LexChar;


pub trait CharStream<C: LexChar> {
  /// The next unit, or `None` at end of stream.
  fn read_char(&mut self) -> io::Result<Option<C>>;

  fn tell(&mut self) -> io::Result<u64>;

  fn seek(&mut self, offset: u64) -> io::Result<()>;
}


/// A stream over a slice of units in memory.
#[derive(Copy, Clone, Debug)]
pub struct SliceStream<'s, C: LexChar> {
  data     : &'s [C],
  position : usize,
}

impl<'s, C: LexChar> SliceStream<'s, C> {
  pub fn new(data: &'s [C]) -> Self {
    SliceStream{ data, position: 0 }
  }

  pub fn remaining(&self) -> &'s [C] {
    &self.data[self.position.min(self.data.len())..]
  }
}

impl<'s, C: LexChar> CharStream<C> for SliceStream<'s, C> {
  #[inline]
  fn read_char(&mut self) -> io::Result<Option<C>> {
    let c = self.data.get(self.position).copied();
    if c.is_some() {
      self.position += 1;
    }
    Ok(c)
  }

  fn tell(&mut self) -> io::Result<u64> {
    Ok(self.position as u64)
  }

  fn seek(&mut self, offset: u64) -> io::Result<()> {
    // Seeking past the end is allowed; reads there report end of stream.
    self.position = offset as usize;
    Ok(())
  }
}


/// A stream of native endian units from any seekable reader. A trailing partial unit is treated as
/// end of stream.
#[derive(Debug)]
pub struct ReaderStream<R: Read + Seek, C: LexChar> {
  reader : R,
  _char  : PhantomData<C>,
}

impl<R: Read + Seek, C: LexChar> ReaderStream<R, C> {
  pub fn new(reader: R) -> Self {
    ReaderStream{ reader, _char: PhantomData }
  }

  pub fn into_inner(self) -> R {
    self.reader
  }
}

impl<R: Read + Seek, C: LexChar> CharStream<C> for ReaderStream<R, C> {
  fn read_char(&mut self) -> io::Result<Option<C>> {
    let mut unit = [0u8; 4];
    let unit = &mut unit[..C::UNIT_SIZE];
    let mut filled = 0;
    while filled < unit.len() {
      match self.reader.read(&mut unit[filled..]) {
        Ok(0)  => return Ok(None),
        Ok(n)  => filled += n,
        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
        Err(e) => return Err(e)
      }
    }
    Ok(Some(C::read_ne(unit)))
  }

  fn tell(&mut self) -> io::Result<u64> {
    Ok(self.reader.seek(SeekFrom::Current(0))? / C::UNIT_SIZE as u64)
  }

  fn seek(&mut self, offset: u64) -> io::Result<()> {
    self.reader.seek(SeekFrom::Start(offset * C::UNIT_SIZE as u64))?;
    Ok(())
  }
}
