#![allow(dead_code)]
/*!

  The runtime matcher drives a compiled image over a bound stream and produces tokens on demand.

  Starting from state 0, one unit is read at a time and mapped to a column through the char map.
  While the transition is alive the unit joins the pending token; a final transition records a
  bookmark of the token so far. A minimum-match action returns as soon as it is first accepted.
  When the next transition is dead or the stream ends, the token is cut back to the last bookmark
  and the stream is rewound to just after it.

  Input that no definition accepts becomes an action 0 token. In best-match mode that token is a
  single unit. Otherwise it is a run: the units read so far, plus every following unit that cannot
  begin a token, ending before a unit that can or at end of stream.

*/

use std::fmt::{Display, Formatter};
use std::io;

use super::character::LexChar;
use super::error::{Error, Result};
use super::image::Image;
use super::limits::ERROR_ACTION;
use super::stream::CharStream;
use super::{ActionId, StateId};
use crate::lexicon::Lexicon;


#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token<'l, C: LexChar> {
  pub action : ActionId,
  pub offset : u64,      //< In units from where the stream was bound
  pub length : usize,
  pub line   : u32,      //< 1-based line of the first unit
  pub column : u32,      //< 1-based column of the first unit
  pub name   : &'l str,
  pub text   : Vec<C>,
}

impl<'l, C: LexChar> Token<'l, C> {

  pub fn text_string(&self) -> String {
    C::decode(&self.text)
  }

  /// The zero length, action 0 token returned at end of stream.
  pub fn is_end(&self) -> bool {
    self.action == ERROR_ACTION && self.length == 0
  }

}

impl<'l, C: LexChar> Display for Token<'l, C> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{} {}({}) {:?}", self.line, self.column, self.name, self.action, self.text_string())
  }
}


#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Cursor {
  offset : u64,
  line   : u32,
  column : u32,
}

impl Cursor {
  fn start() -> Self {
    Cursor{ offset: 0, line: 1, column: 1 }
  }

  #[inline]
  fn advance<C: LexChar>(&mut self, c: C) {
    self.offset += 1;
    if c.is(b'\n') {
      self.line  += 1;
      self.column = 1;
    } else {
      self.column += 1;
    }
  }
}


/// Per matcher scan state, reset on `bind` and `reset`.
#[derive(Copy, Clone, Debug)]
struct ScanEnv {
  state  : StateId,
  origin : u64,    //< Stream position at bind time
  cursor : Cursor, //< Where the next token begins
}

impl ScanEnv {
  fn new(origin: u64) -> Self {
    ScanEnv{ state: 0, origin, cursor: Cursor::start() }
  }
}


#[derive(Copy, Clone, Debug)]
enum Stop<C> {
  End,
  Dead(C),
  Minimum,
}


pub struct Matcher<'l, 'a, C: LexChar, S: CharStream<C>> {
  lexicon    : &'l Lexicon<'a, C>,
  stream     : Option<S>,
  env        : ScanEnv,
  best_match : bool,
  failed     : bool, //< The iterator reported an error and is finished
}

impl<'l, 'a, C: LexChar, S: CharStream<C>> Matcher<'l, 'a, C, S> {

  /// An unbound matcher using the lexicon's default `best_match`.
  pub fn new(lexicon: &'l Lexicon<'a, C>) -> Self {
    Matcher {
      lexicon,
      stream     : None,
      env        : ScanEnv::new(0),
      best_match : lexicon.best_match(),
      failed     : false,
    }
  }

  /// A matcher bound to `stream`, whose current position is known to be `origin`.
  pub(crate) fn with_stream(lexicon: &'l Lexicon<'a, C>, stream: S, origin: u64) -> Self {
    let mut matcher = Matcher::new(lexicon);
    matcher.stream = Some(stream);
    matcher.env = ScanEnv::new(origin);
    matcher
  }


  // region Stream binding

  /// Binds `stream`. Tokens are located relative to the stream's current position.
  pub fn bind(&mut self, mut stream: S) -> Result<()> {
    let origin = stream.tell()?;
    self.stream = Some(stream);
    self.env = ScanEnv::new(origin);
    self.failed = false;
    Ok(())
  }

  pub fn unbind(&mut self) -> Option<S> {
    self.env = ScanEnv::new(0);
    self.stream.take()
  }

  pub fn is_bound(&self) -> bool {
    self.stream.is_some()
  }

  /// Rewinds to where the stream was bound.
  pub fn reset(&mut self) -> Result<()> {
    let stream = self.stream.as_mut().ok_or(Error::NoStream)?;
    stream.seek(self.env.origin)?;
    self.env = ScanEnv::new(self.env.origin);
    self.failed = false;
    Ok(())
  }

  // endregion


  pub fn best_match(&self) -> bool {
    self.best_match
  }

  pub fn set_best_match(&mut self, best_match: bool) {
    self.best_match = best_match;
  }

  pub fn lexicon(&self) -> &'l Lexicon<'a, C> {
    self.lexicon
  }


  // region Token extraction

  /// The next token, including tokens of ignored actions. At end of stream this is a zero length
  /// token of action 0.
  pub fn next_raw_token(&mut self) -> Result<Token<'l, C>> {
    let lexicon: &'l Lexicon<'a, C> = self.lexicon;
    let image = lexicon.image();
    let dead = image.dead_state();
    let best_match = self.best_match;
    let origin = self.env.origin;
    let stream = self.stream.as_mut().ok_or(Error::NoStream)?;

    let begin = self.env.cursor;
    let mut cursor = begin;          // End of the pending token
    let mut read = begin.offset;     // Units consumed from the stream
    let mut text: Vec<C> = Vec::new();
    let mut state = self.env.state;
    let mut accepted: Option<(Cursor, ActionId)> = None;
    let mut after_first: Option<Cursor> = None;

    let stop = loop {
      let c = match stream.read_char()? {
        Some(c) => c,
        None    => break Stop::End
      };
      read += 1;

      let transition = image.transition(state, image.column(c));
      if transition.to == dead {
        break Stop::Dead(c);
      }

      text.push(c);
      cursor.advance(c);
      if after_first.is_none() {
        after_first = Some(cursor);
      }
      state = transition.to;

      if transition.is_final {
        accepted = Some((cursor, transition.action));
        if image.action_info(transition.action).map_or(false, |info| info.minimum) {
          break Stop::Minimum;
        }
      }
    };

    let (end, action) = match (accepted, stop) {

      (Some((bookmark, action)), _) => (bookmark, action),

      (None, Stop::End) if text.is_empty() => (begin, ERROR_ACTION),

      // The first unit cannot begin any token.
      (None, Stop::Dead(c)) if text.is_empty() => {
        text.push(c);
        cursor.advance(c);
        if !best_match {
          absorb_unmatched(stream, image, &mut text, &mut cursor, &mut read)?;
        }
        (cursor, ERROR_ACTION)
      }

      (None, _) if best_match => (after_first.unwrap_or(cursor), ERROR_ACTION),

      (None, Stop::Dead(c)) => {
        if !can_begin(image, c) {
          text.push(c);
          cursor.advance(c);
          absorb_unmatched(stream, image, &mut text, &mut cursor, &mut read)?;
        }
        (cursor, ERROR_ACTION)
      }

      (None, _) => (cursor, ERROR_ACTION)

    };

    text.truncate((end.offset - begin.offset) as usize);
    if read != end.offset {
      stream.seek(origin + end.offset)?;
    }
    self.env.cursor = end;
    self.env.state = 0;

    let token = Token {
      action,
      offset : begin.offset,
      length : text.len(),
      line   : begin.line,
      column : begin.column,
      name   : lexicon.action_name(action).unwrap_or(""),
      text,
    };
    debug_log!("Token {}", token);
    Ok(token)
  }


  /// Like `next_raw_token`, but skips tokens whose action is ignored.
  pub fn next_token(&mut self) -> Result<Token<'l, C>> {
    loop {
      let token = self.next_raw_token()?;
      if token.length == 0 || !self.lexicon.is_ignored(token.action) {
        return Ok(token);
      }
    }
  }


  /// Like `next_token`, but `None` at end of stream.
  pub fn fetch_next(&mut self) -> Result<Option<Token<'l, C>>> {
    let token = self.next_token()?;
    match token.is_end() {
      true  => Ok(None),
      false => Ok(Some(token))
    }
  }

  // endregion

}


/// True if some token starts with `c`.
#[inline]
fn can_begin<C: LexChar>(image: &Image<'_, C>, c: C) -> bool {
  image.transition(0, image.column(c)).to != image.dead_state()
}


/// Appends units that cannot begin a token to `text`, stopping at end of stream or after reading a
/// unit that can.
fn absorb_unmatched<C: LexChar, S: CharStream<C>>(
  stream : &mut S,
  image  : &Image<'_, C>,
  text   : &mut Vec<C>,
  cursor : &mut Cursor,
  read   : &mut u64
) -> io::Result<()>
{
  while let Some(c) = stream.read_char()? {
    *read += 1;
    if can_begin(image, c) {
      break;
    }
    text.push(c);
    cursor.advance(c);
  }
  Ok(())
}


impl<'l, 'a, C: LexChar, S: CharStream<C>> Iterator for Matcher<'l, 'a, C, S> {
  type Item = Result<Token<'l, C>>;

  /// Yields the tokens of `fetch_next` until end of stream or the first error.
  fn next(&mut self) -> Option<Self::Item> {
    if self.failed {
      return None;
    }
    match self.fetch_next() {
      Ok(Some(token)) => Some(Ok(token)),
      Ok(None)        => None,
      Err(error)      => {
        self.failed = true;
        Some(Err(error))
      }
    }
  }
}




#[cfg(test)]
mod test {
  use super::*;
  use crate::lex::stream::{ReaderStream, SliceStream};
  use pretty_assertions::assert_eq;
  use std::io::{Cursor as IoCursor, Seek, SeekFrom};

  fn compile(definitions: &str) -> Lexicon<'static, u8> {
    Lexicon::compile_str(definitions).unwrap()
  }

  /// (name, text, line, column) of every raw token.
  fn raw(lexicon: &Lexicon<u8>, input: &str) -> Vec<(String, String, u32, u32)> {
    let mut matcher = lexicon.scan(input.as_bytes());
    let mut tokens = Vec::new();
    loop {
      let token = matcher.next_raw_token().unwrap();
      if token.is_end() {
        break;
      }
      tokens.push((token.name.to_string(), token.text_string(), token.line, token.column));
    }
    tokens
  }

  fn t(name: &str, text: &str, line: u32, column: u32) -> (String, String, u32, u32) {
    (name.to_string(), text.to_string(), line, column)
  }

  #[test]
  fn longest_match_with_positions() {
    let lexicon = compile("num: [0-9]+\nid: [a-zA-Z]+\nws(i): [ \\t\\n]+");
    assert_eq!(
      raw(&lexicon, "12 ab3\n x"),
      vec![
        t("num", "12", 1, 1),
        t("ws", " ", 1, 3),
        t("id", "ab", 1, 4),
        t("num", "3", 1, 6),
        t("ws", "\n ", 1, 7),
        t("id", "x", 2, 2),
      ]
    );
  }

  #[test]
  fn ignored_tokens_are_skipped() {
    let lexicon = compile("ws(i): [ \\t]+\nid: [a-z]+");
    let mut matcher = lexicon.scan(b"a b");
    let mut names = Vec::new();
    while let Some(token) = matcher.fetch_next().unwrap() {
      names.push(token.name);
    }
    assert_eq!(names, vec!["id", "id"]);
    assert_eq!(raw(&lexicon, "a b").len(), 3);
  }

  #[test]
  fn minimum_match_returns_early() {
    let lexicon = compile("a(m): a+");
    assert_eq!(raw(&lexicon, "aaa"), vec![t("a", "a", 1, 1), t("a", "a", 1, 2), t("a", "a", 1, 3)]);
  }

  #[test]
  fn rewinds_to_last_accepted_length() {
    let lexicon = compile("abc: abc\na: a");
    assert_eq!(
      raw(&lexicon, "abdabc"),
      vec![t("a", "a", 1, 1), t("error", "bd", 1, 2), t("abc", "abc", 1, 4)]
    );
  }

  #[test]
  fn unmatched_run_stops_before_a_token() {
    let lexicon = compile("num: [0-9]+");
    assert_eq!(raw(&lexicon, "x y1 "), vec![t("error", "x y", 1, 1), t("num", "1", 1, 4), t("error", " ", 1, 5)]);

    let lexicon = compile("ab: ab\nc: c");
    assert_eq!(raw(&lexicon, "acab"), vec![t("error", "a", 1, 1), t("c", "c", 1, 2), t("ab", "ab", 1, 3)]);
    assert_eq!(raw(&lexicon, "axyab"), vec![t("error", "axy", 1, 1), t("ab", "ab", 1, 4)]);
    assert_eq!(raw(&lexicon, "a"), vec![t("error", "a", 1, 1)]);
  }

  #[test]
  fn best_match_emits_single_units() {
    let lexicon = compile("ab: ab");
    let mut matcher = lexicon.scan(b"axab");
    matcher.set_best_match(true);
    let texts: Vec<(ActionId, String)> =
        matcher.map(|token| token.map(|t| (t.action, t.text_string()))).collect::<Result<_>>().unwrap();
    assert_eq!(texts, vec![(0, "a".to_string()), (0, "x".to_string()), (1, "ab".to_string())]);
  }

  #[test]
  fn reset_replays_the_same_tokens() {
    let lexicon = compile("num: [0-9]+\nid: [a-z]+\nws(i): \\s+");
    let mut matcher = lexicon.scan(b"abc 12 d3 e");
    let first: Vec<Token<u8>> = (0..3).map(|_| matcher.fetch_next().unwrap().unwrap()).collect();
    matcher.reset().unwrap();
    let second: Vec<Token<u8>> = (0..3).map(|_| matcher.fetch_next().unwrap().unwrap()).collect();
    assert_eq!(first, second);
  }

  #[test]
  fn end_of_stream_repeats() {
    let lexicon = compile("id: [a-z]+");
    let mut matcher = lexicon.scan(b"a");
    assert!(matcher.fetch_next().unwrap().is_some());
    assert!(matcher.fetch_next().unwrap().is_none());
    assert!(matcher.fetch_next().unwrap().is_none());
    assert!(matcher.next_raw_token().unwrap().is_end());
  }

  #[test]
  fn unbound_matcher_fails() {
    let lexicon = compile("id: [a-z]+");
    let mut matcher: Matcher<u8, SliceStream<u8>> = lexicon.matcher();
    assert!(matches!(matcher.next_raw_token(), Err(Error::NoStream)));
    assert!(matches!(matcher.reset(), Err(Error::NoStream)));

    matcher.bind(SliceStream::new(&b"ab"[..])).unwrap();
    assert_eq!(matcher.fetch_next().unwrap().unwrap().text, b"ab".to_vec());
    assert!(matcher.unbind().is_some());
    assert!(!matcher.is_bound());
  }

  #[test]
  fn offsets_are_relative_to_the_bind_position() {
    let lexicon = compile("id: [a-z]+\nws(i): \\s+");
    let mut reader = IoCursor::new(b"## ab cd".to_vec());
    reader.seek(SeekFrom::Start(3)).unwrap();

    let mut matcher = lexicon.matcher();
    matcher.bind(ReaderStream::new(reader)).unwrap();
    let offsets: Vec<u64> = matcher.by_ref().map(|t| t.unwrap().offset).collect();
    assert_eq!(offsets, vec![0, 3]);

    matcher.reset().unwrap();
    assert_eq!(matcher.fetch_next().unwrap().unwrap().text_string(), "ab");
  }
}
