#![allow(dead_code)]
/*!

  A parsed definition file and its compilation into an image.

  A definition file is read line by line:

  | Line                      | Meaning                                                        |
  |:--------------------------|:---------------------------------------------------------------|
  | blank                     | skipped                                                        |
  | `#!name: value`           | defines the macro `{name}`                                     |
  | `# ...`                   | comment                                                        |
  | starts with whitespace    | continues the pattern of the previous definition               |
  | `name(flags): pattern`    | a definition; its action is its position among definitions    |
  | `error(flags):`           | sets the flags of the reserved `error` action                  |

  Lines are trimmed before they are interpreted. The action of a definition is its 1-based index
  in file order; action 0 is the reserved `error` action for unmatched input.

*/

use codespan::Span;

use crate::lex::character::LexChar;
use crate::lex::dfa::Dfa;
use crate::lex::expression::{ExpressionTree, JoinKind};
use crate::lex::image::{pack, ActionDescriptor};
use crate::lex::ActionId;

use super::definition::{Definition, Key};
use super::error::{CompileError, CompileErrorKind};
use super::macros::MacroTable;
use super::options::Options;


pub struct Specification<C: LexChar> {
  definitions : Vec<Definition<C>>, //< Index 0 is the reserved `error` definition
  macros      : MacroTable<C>,
}

impl<C: LexChar> Specification<C> {

  // region Parsing

  pub fn parse(source: &[C]) -> Result<Self, CompileError> {
    debug_logln!("BEGIN Specification::parse()");
    let mut definitions = vec![Definition::error()];
    let mut macros = MacroTable::new();

    let mut offset = 0usize;
    for (index, raw_line) in source.split(|c| c.is(b'\n')).enumerate() {
      let line_number = index + 1;
      // Spans are in bytes of the decoded source.
      let width = C::decode(raw_line).len();
      let span = Span::new(offset as u32, (offset + width) as u32);
      offset += width + 1;

      let is_continue = raw_line.first().map_or(false, |c| c.is_whitespace());
      let line = trim(raw_line);
      if line.is_empty() {
        continue;
      }

      if line[0].is(b'#') {
        if line.len() > 2 && line[1].is(b'!') {
          parse_macro(&mut macros, &line[2..], line_number);
        }
        continue;
      }

      if is_continue {
        if definitions.len() > 1 {
          if let Some(last) = definitions.last_mut() {
            last.pattern.extend_from_slice(line);
            last.span = last.span.merge(span);
          }
          continue;
        }
        return Err(CompileError::syntax(CompileErrorKind::NothingToExtend, line_number, span));
      }

      let separator = match line.iter().position(|c| c.is(b':')) {
        Some(separator) => separator,
        None => {
          return Err(CompileError::syntax(CompileErrorKind::MissingSeparator, line_number, span));
        }
      };

      let key = match Key::parse(&line[..separator]) {
        Some(key) => key,
        None => {
          return Err(CompileError::syntax(CompileErrorKind::InvalidName, line_number, span));
        }
      };

      let pattern = trim(&line[separator + 1..]);
      let is_error = key.name == definitions[0].name;
      if pattern.is_empty() && !is_error {
        return Err(CompileError::syntax(CompileErrorKind::EmptyExpression, line_number, span));
      }

      if is_error {
        definitions[0].ignore = key.ignore;
      } else {
        definitions.push(Definition{
          name    : key.name,
          pattern : pattern.to_vec(),
          ignore  : key.ignore,
          minimum : key.minimum,
          line    : line_number,
          span,
        });
      }
    }

    debug_logln!(
      "END Specification::parse(): {} definitions, {} macros",
      definitions.len() - 1,
      macros.len()
    );
    Ok(Specification{ definitions, macros })
  }

  pub fn parse_str(source: &str) -> Result<Self, CompileError> {
    Self::parse(&C::encode(source))
  }

  // endregion

  // region Accessors

  /// All definitions in action order, starting with the reserved `error` definition.
  pub fn definitions(&self) -> &[Definition<C>] {
    &self.definitions
  }

  pub fn definition(&self, action: ActionId) -> Option<&Definition<C>> {
    self.definitions.get(action as usize)
  }

  pub fn macros(&self) -> &MacroTable<C> {
    &self.macros
  }

  // endregion

  // region Compilation

  /// The OR-join of every definition's expanded pattern, each tree's root carrying the
  /// definition's action.
  pub fn expression(&self) -> Result<ExpressionTree<C>, CompileError> {
    let references = match self.macros.is_empty() {
      true  => None,
      false => Some(MacroTable::<C>::reference_regex()?)
    };

    let mut tree = ExpressionTree::new();
    for (action, definition) in self.definitions.iter().enumerate().skip(1) {
      let located = |kind: CompileErrorKind| CompileError::syntax(kind, definition.line, definition.span);

      let expanded;
      let pattern: &[C] = match &references {
        Some(references) => {
          expanded = self.macros.expand(references, &definition.pattern).map_err(located)?;
          &expanded
        }
        None => &definition.pattern
      };

      let mut subtree = ExpressionTree::parse(pattern).map_err(|error| located(error.into()))?;
      subtree.set_action(action as ActionId);
      tree = ExpressionTree::join(tree, subtree, JoinKind::Or);
    }

    match tree.is_empty() {
      true  => Err(CompileErrorKind::NoDefinitions.into()),
      false => Ok(tree)
    }
  }

  pub fn dfa(&self, options: &Options) -> Result<Dfa<C>, CompileError> {
    let dfa = Dfa::build(self.expression()?).map_err(CompileErrorKind::from)?;
    if options.log_positions {
      dfa.positions.debug_log();
    }
    Ok(dfa)
  }

  /// Compiles the definitions into image bytes.
  pub fn compile(&self, options: &Options) -> Result<Vec<u8>, CompileError> {
    debug_logln!("BEGIN Specification::compile()");
    let dfa = self.dfa(options)?;

    let names: Vec<Vec<C>> = self.definitions.iter().map(|d| C::encode(&d.name)).collect();
    let actions: Vec<ActionDescriptor<C>> =
      self.definitions
          .iter()
          .zip(names.iter())
          .map(|(definition, name)| {
            ActionDescriptor{ name: name.as_slice(), minimum: definition.minimum, ignore: definition.ignore }
          })
          .collect();

    let image = pack(&dfa, &actions).map_err(CompileErrorKind::from)?;
    debug_logln!(
      "END Specification::compile(): {} states, {} columns, {} bytes, built in {:?}",
      dfa.state_count,
      dfa.range_map.len() + 1,
      image.len(),
      dfa.build_time
    );
    Ok(image)
  }

  // endregion

}


fn parse_macro<C: LexChar>(macros: &mut MacroTable<C>, directive: &[C], line_number: usize) {
  let separator = match directive.iter().position(|c| c.is(b':')) {
    Some(separator) => separator,
    None            => return
  };
  let name = trim(&directive[..separator]);
  let value = trim(&directive[separator + 1..]);
  if !macros.insert(name, value.to_vec()) {
    debug_log!("line {}: ignoring macro with invalid name {}", line_number, C::decode(name));
  }
}


fn trim<C: LexChar>(line: &[C]) -> &[C] {
  let start = line.iter().position(|c| !c.is_whitespace()).unwrap_or(line.len());
  let end = line.iter().rposition(|c| !c.is_whitespace()).map_or(start, |last| last + 1);
  &line[start..end.max(start)]
}
