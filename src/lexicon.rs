#![allow(dead_code)]
/*!

  A compiled lexicon: a validated image together with the names of its actions. A lexicon is
  immutable once created and can be shared by any number of matchers.

  The image is either owned, when the lexicon was compiled or loaded from a file or a copied
  buffer, or borrowed from a buffer that outlives the lexicon, such as a `static` image.

*/

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use patricia_tree::PatriciaMap;

use crate::lex::character::LexChar;
use crate::lex::error::{ImageError, Result};
use crate::lex::image::Image;
use crate::lex::matcher::Matcher;
use crate::lex::stream::{CharStream, SliceStream};
use crate::lex::ActionId;
use crate::spec::{CompileError, CompileErrorKind, Options, Specification};


pub struct Lexicon<'a, C: LexChar> {
  image      : Image<'a, C>,
  names      : Vec<String>,           //< Action names, indexed by action
  ids        : PatriciaMap<ActionId>, //< The first action with each name
  best_match : bool,                  //< Default mode of new matchers
}

impl<C: LexChar> Lexicon<'static, C> {

  // region Compiling

  pub fn compile(definitions: &[C]) -> std::result::Result<Self, CompileError> {
    Self::compile_with(definitions, &Options::default())
  }

  pub fn compile_with(definitions: &[C], options: &Options) -> std::result::Result<Self, CompileError> {
    let bytes = Specification::parse(definitions)?.compile(options)?;
    let image = Image::from_vec(bytes).map_err(CompileErrorKind::from)?;
    let mut lexicon = Lexicon::from_image(image);
    lexicon.best_match = options.best_match;
    Ok(lexicon)
  }

  pub fn compile_str(definitions: &str) -> std::result::Result<Self, CompileError> {
    Self::compile(&C::encode(definitions))
  }

  /// Compiles a UTF-8 definition file.
  pub fn compile_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let definitions = std::fs::read_to_string(path)?;
    Ok(Self::compile_str(&definitions)?)
  }

  // endregion

  // region Loading

  /// Loads an image written by `save`.
  pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let mut reader = BufReader::new(File::open(path)?);
    Ok(Lexicon::from_image(Image::read_from(&mut reader)?))
  }

  /// Loads an image from a copy of `bytes`.
  pub fn load_buffer(bytes: &[u8]) -> std::result::Result<Self, ImageError> {
    Ok(Lexicon::from_image(Image::from_vec(bytes.to_vec())?))
  }

  // endregion

}

impl<'a, C: LexChar> Lexicon<'a, C> {

  /// Uses `bytes` in place as the image. The lexicon cannot outlive the buffer.
  pub fn borrow_buffer(bytes: &'a [u8]) -> std::result::Result<Self, ImageError> {
    Ok(Lexicon::from_image(Image::from_slice(bytes)?))
  }

  pub fn from_image(image: Image<'a, C>) -> Self {
    let mut names = Vec::with_capacity(image.action_count() as usize);
    let mut ids = PatriciaMap::new();

    for action in 0..image.action_count() {
      let name = C::decode(&image.action_name(action).unwrap_or_default());
      if !ids.contains_key(&name) {
        ids.insert(&name, action);
      }
      names.push(name);
    }

    Lexicon{ image, names, ids, best_match: false }
  }

  /// Detaches the lexicon from a borrowed buffer.
  pub fn into_owned(self) -> Lexicon<'static, C> {
    Lexicon{
      image      : self.image.into_owned(),
      names      : self.names,
      ids        : self.ids,
      best_match : self.best_match,
    }
  }


  // region Persistence

  /// Writes exactly the image's bytes to `path`.
  pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    self.image.write_to(&mut writer)?;
    writer.flush()?;
    Ok(())
  }

  pub fn to_bytes(&self) -> Vec<u8> {
    self.image.as_bytes().to_vec()
  }

  // endregion


  // region Queries

  pub fn image(&self) -> &Image<'a, C> {
    &self.image
  }

  /// The action of the first definition named `name`.
  pub fn action_id(&self, name: &str) -> Option<ActionId> {
    self.ids.get(name).copied()
  }

  pub fn action_name(&self, action: ActionId) -> Option<&str> {
    self.names.get(action as usize).map(String::as_str)
  }

  pub fn is_ignored(&self, action: ActionId) -> bool {
    self.image.action_info(action).map_or(false, |info| info.ignore)
  }

  pub fn is_minimum(&self, action: ActionId) -> bool {
    self.image.action_info(action).map_or(false, |info| info.minimum)
  }

  /// Number of actions, including the reserved action 0.
  pub fn action_count(&self) -> u32 {
    self.image.action_count()
  }

  pub fn state_count(&self) -> u32 {
    self.image.state_count()
  }

  pub fn best_match(&self) -> bool {
    self.best_match
  }

  pub fn set_best_match(&mut self, best_match: bool) {
    self.best_match = best_match;
  }

  // endregion


  // region Matchers

  /// A matcher with no stream bound.
  pub fn matcher<S: CharStream<C>>(&self) -> Matcher<'_, 'a, C, S> {
    Matcher::new(self)
  }

  /// A matcher over `input`.
  pub fn scan<'s>(&self, input: &'s [C]) -> Matcher<'_, 'a, C, SliceStream<'s, C>> {
    Matcher::with_stream(self, SliceStream::new(input), 0)
  }

  // endregion

}
