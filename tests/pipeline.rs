//! End to end behavior of compiled lexicons: definitions in, tokens out.

use lexicon::{Lexicon, Options, Regex, Specification, Token};
use pretty_assertions::assert_eq;

fn init() {
  let _ = env_logger::builder().is_test(true).try_init();
}

fn compile(definitions: &str) -> Lexicon<'static, u8> {
  init();
  Lexicon::compile_str(definitions).unwrap()
}

fn texts(tokens: &[Token<u8>]) -> Vec<(String, String)> {
  tokens.iter().map(|t| (t.name.to_string(), t.text_string())).collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
  expected.iter().map(|(name, text)| (name.to_string(), text.to_string())).collect()
}


#[test]
fn numbers_words_and_ignored_space() {
  let lexicon = compile("num: [0-9]+\nid: [a-zA-Z]+\nws(i): [ \\t\\n]+\n");
  let tokens: Vec<Token<u8>> = lexicon.scan(b"12 ab3").map(|t| t.unwrap()).collect();

  assert_eq!(texts(&tokens), pairs(&[("num", "12"), ("id", "ab"), ("num", "3")]));
  assert_eq!(tokens.iter().map(|t| t.offset).collect::<Vec<_>>(), vec![0, 3, 5]);
  assert_eq!(tokens.iter().map(|t| t.action).collect::<Vec<_>>(), vec![1, 2, 1]);
}

#[test]
fn minimum_match_stops_at_the_first_accept() {
  let lexicon = compile("comment(m): /\\*(.)*\\*/\nother: .\n");
  let tokens: Vec<Token<u8>> = lexicon.scan(b"/* a */ x /* b */").map(|t| t.unwrap()).collect();
  assert_eq!(tokens[0].text_string(), "/* a */");
  assert_eq!(tokens.last().map(|t| t.text_string()), Some("/* b */".to_string()));
}

#[test]
fn ignored_error_action() {
  let lexicon = compile("error(i):\nnum: [0-9]+\n");
  let tokens: Vec<Token<u8>> = lexicon.scan(b"a1bb22").map(|t| t.unwrap()).collect();
  assert_eq!(texts(&tokens), pairs(&[("num", "1"), ("num", "22")]));

  let mut matcher = lexicon.scan(b"a1");
  assert_eq!(matcher.next_raw_token().unwrap().name, "error");
}

#[test]
fn macros_expand_before_parsing() {
  let lexicon = compile(
    "#!digit: [0-9]\n\
     #!int: {digit}+\n\
     float: {int}\\.{int}\n\
     int: {int}\n\
     brace: \\{x\\}\n"
  );
  let tokens: Vec<Token<u8>> = lexicon.scan(b"3.14 42{x}").map(|t| t.unwrap()).collect();
  assert_eq!(
    texts(&tokens),
    pairs(&[("float", "3.14"), ("error", " "), ("int", "42"), ("brace", "{x}")])
  );
}

#[test]
fn continuation_lines_join_the_pattern() {
  let lexicon = compile("kw: if\n  |else\n  |while\nid: [a-z]+\n");
  let tokens: Vec<Token<u8>> = lexicon.scan(b"else").map(|t| t.unwrap()).collect();
  assert_eq!(texts(&tokens), pairs(&[("kw", "else")]));
  let tokens: Vec<Token<u8>> = lexicon.scan(b"elsewhere").map(|t| t.unwrap()).collect();
  assert_eq!(texts(&tokens), pairs(&[("id", "elsewhere")]));
}

#[test]
fn syntax_errors_carry_line_numbers() {
  init();
  let error = Lexicon::<u8>::compile_str("a: a\n\n# c\nb: a|\n").err().unwrap();
  assert_eq!(error.to_string(), "Syntax error: line 4: expression parse error.");
  assert_eq!(error.line, Some(4));

  let error = Lexicon::<u8>::compile_str("#!x: {y}\n#!y: {x}\nz: {x}\n").err().unwrap();
  assert_eq!(error.to_string(), "Syntax error: line 3: Recursive definition: x");

  let error = Lexicon::<u8>::compile_str("\n# only comments\n").err().unwrap();
  assert_eq!(error.to_string(), "No define any words.");
}

#[test]
fn compilation_is_deterministic() {
  init();
  let definitions = "num: [0-9]+\nid: [a-z_][a-z0-9_]*\nop: [\\+\\*/=]\nws(i): [ \\t\\n]+\n";
  let options = Options::default();
  let first = Specification::<u8>::parse_str(definitions).unwrap().compile(&options).unwrap();
  let second = Specification::<u8>::parse_str(definitions).unwrap().compile(&options).unwrap();
  assert_eq!(first, second);
  assert_eq!(Lexicon::<u8>::compile_str(definitions).unwrap().to_bytes(), first);
}

#[test]
fn pattern_syntax() {
  init();
  let cases: &[(&str, &[&str], &[&str])] = &[
    ("ab",      &["ab"],             &["a", "b", "abb", ""]),
    ("a|b",     &["a", "b"],         &["ab", ""]),
    ("a*",      &["", "a", "aaa"],   &["b"]),
    ("a+",      &["a", "aa"],        &["", "b"]),
    ("a?b",     &["b", "ab"],        &["aab", "a"]),
    ("(a|b)c",  &["ac", "bc"],       &["c", "abc"]),
    ("[a-c]",   &["a", "b", "c"],    &["d", "ab"]),
    ("[^a-c]",  &["d", "z", "\n"],   &["a", "c"]),
    ("\\x41",   &["A"],              &["x41", "a"]),
    ("\\101",   &["e"],              &["A", "101"]),
    ("a.c",     &["abc", "a.c"],     &["ac"]),
    ("\\.",     &["."],              &["a"]),
  ];

  for (pattern, accepted, rejected) in cases {
    let spec = Specification::<u8>::parse_str(&format!("p: {}", pattern)).unwrap();
    let dfa = spec.dfa(&Options::default()).unwrap();
    for input in accepted.iter() {
      // The empty input never produces a token, so test acceptance of the start state directly.
      let accepted = match input.is_empty() {
        true  => dfa.is_accepting(0),
        false => dfa.accepts(input.as_bytes())
      };
      assert!(accepted, "{} should accept {:?}", pattern, input);
    }
    for input in rejected.iter() {
      assert!(!dfa.accepts(input.as_bytes()), "{} should reject {:?}", pattern, input);
    }
  }
}

#[test]
fn wide_characters() {
  init();
  let lexicon = Lexicon::<u16>::compile_str("word: [a-zα-ω]+\nws(i): [ ]+\n").unwrap();
  let input: Vec<u16> = "abc λόγος".encode_utf16().collect();
  let words: Vec<String> = lexicon.scan(&input).map(|t| t.unwrap().text_string()).collect();
  // U+03CC is not in α-ω.
  assert_eq!(words, vec!["abc", "λ", "ό", "γος"]);
  let names: Vec<String> = lexicon.scan(&input).map(|t| t.unwrap().name.to_string()).collect();
  assert_eq!(names, vec!["word", "word", "error", "word"]);
}

#[test]
fn regex_search_and_replace() {
  init();
  let numbers = Regex::<u8>::from_pattern("[0-9]+(\\.[0-9]+)?").unwrap();
  assert_eq!(numbers.find(b"pi is 3.14", 0), Some(6));
  assert_eq!(numbers.replace(b"1 and 2.5", b"N", None), b"N and N".to_vec());
  assert!(Regex::<u8>::from_pattern("(a").is_err());
}
