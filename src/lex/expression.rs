#![allow(dead_code)]
/*!

  The expression tree of a pattern and the operator precedence parser that builds it.

  Nodes live in an arena and refer to their children by `NodeId`, so a tree is a flat vector that
  can be built bottom up, joined with another tree, and walked without recursion. Leaves are
  character ranges; inner nodes are concatenation (`And`), alternation (`Or`), and the three
  postfix repetitions.

  The parser keeps an operator stack and a value stack. The priority of the operator on top of the
  operator stack relative to the incoming operator decides between shifting (`<`), reducing (`>`),
  closing a bracket pair (`=`), and rejecting the pattern (`?`). Postfix operators bind tightest and
  reduce as soon as they are scanned.

*/

use std::fmt::{Display, Formatter};

use smallvec::{smallvec, SmallVec};

use super::character::LexChar;
use super::error::ExpressionError;
use super::range::Range;
use super::scanner::{Operator, ScanToken, Scanner};
use super::{ActionId, NodeId};


// region Priority table

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Precedence {
  Less,    //< Shift the incoming operator
  Equal,   //< Matching bracket pair or end of input; pop
  Greater, //< Reduce the queued operator
  Invalid, //< Syntax error
}

use Precedence::{Equal as EQ, Greater as GT, Invalid as XX, Less as LT};

/// `PRIORITY[queued][incoming]`, both indexed by `Operator::index()` in the order `& | ? + * ( ) #`.
static PRIORITY: [[Precedence; 8]; 8] = [
  //  &   |   ?   +   *   (   )   #
  [ GT, GT, LT, LT, LT, LT, GT, GT ], // &
  [ LT, GT, LT, LT, LT, LT, GT, GT ], // |
  [ GT, GT, GT, GT, GT, GT, GT, GT ], // ?
  [ GT, GT, GT, GT, GT, GT, GT, GT ], // +
  [ GT, GT, GT, GT, GT, GT, GT, GT ], // *
  [ LT, LT, LT, LT, LT, LT, EQ, XX ], // (
  [ GT, GT, LT, LT, LT, XX, GT, GT ], // )
  [ LT, LT, LT, LT, LT, LT, XX, EQ ], // #
];

// endregion


#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind<C: LexChar> {
  Range(Range<C>),
  And(NodeId, NodeId),
  Or(NodeId, NodeId),
  Question(NodeId),
  Plus(NodeId),
  Closure(NodeId),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Node<C: LexChar> {
  pub kind   : NodeKind<C>,
  pub action : ActionId,    //< Nonzero on the root of a named definition
}

impl<C: LexChar> Node<C> {
  fn new(kind: NodeKind<C>) -> Self {
    Node{ kind, action: 0 }
  }
}


/// How `ExpressionTree::join` combines two trees.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum JoinKind {
  And,
  Or,
}


#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpressionTree<C: LexChar> {
  nodes : Vec<Node<C>>,
  root  : Option<NodeId>,
}

impl<C: LexChar> Default for ExpressionTree<C> {
  fn default() -> Self {
    Self{ nodes: Vec::new(), root: None }
  }
}

impl<C: LexChar> ExpressionTree<C> {

  /// The tree with no nodes.
  pub fn new() -> Self {
    Self::default()
  }

  /// A tree consisting of the single leaf `range`.
  pub fn leaf(range: Range<C>) -> Self {
    Self{ nodes: vec![Node::new(NodeKind::Range(range))], root: Some(0) }
  }


  pub fn parse(pattern: &[C]) -> Result<Self, ExpressionError> {
    let mut tree      = ExpressionTree::new();
    let mut scanner   = Scanner::new(pattern);
    let mut operators : SmallVec<[Operator; 16]> = smallvec![Operator::Eof];
    let mut values    : SmallVec<[NodeId; 16]>   = SmallVec::new();

    loop {
      match scanner.next_token() {

        ScanToken::Value(range) => {
          values.push(tree.push(NodeKind::Range(range)));
        }

        ScanToken::Op(op) if op.is_unary() => {
          let child = values.pop().ok_or(ExpressionError::Parse{ index: scanner.index() })?;
          let kind = match op {
            Operator::Question => NodeKind::Question(child),
            Operator::Plus     => NodeKind::Plus(child),
            _                  => NodeKind::Closure(child),
          };
          values.push(tree.push(kind));
        }

        ScanToken::Op(op) => {
          if !tree.parse_operator(op, &mut operators, &mut values) {
            return Err(ExpressionError::Parse{ index: scanner.index() });
          }
          if op == Operator::Eof {
            break;
          }
        }

        ScanToken::Error(index) => {
          return Err(ExpressionError::Parse{ index });
        }

      }
    }

    if !operators.is_empty() || values.len() != 1 {
      return Err(ExpressionError::Parse{ index: scanner.index() });
    }
    tree.root = values.pop();

    debug_log!("Parsed expression: {}", tree);
    Ok(tree)
  }


  /// Applies the incoming binary operator or bracket `op` against the operator stack. Returns
  /// false on a syntax error.
  fn parse_operator(
    &mut self,
    op        : Operator,
    operators : &mut SmallVec<[Operator; 16]>,
    values    : &mut SmallVec<[NodeId; 16]>
  ) -> bool
  {
    loop {
      let queued = match operators.last() {
        Some(queued) => *queued,
        None         => return false
      };

      match PRIORITY[queued.index()][op.index()] {

        Precedence::Greater => {
          operators.pop();
          let (right, left) = match (values.pop(), values.pop()) {
            (Some(right), Some(left)) => (right, left),
            _                         => return false
          };
          let kind = match queued {
            Operator::And => NodeKind::And(left, right),
            Operator::Or  => NodeKind::Or(left, right),
            _             => return false
          };
          values.push(self.push(kind));
        }

        Precedence::Less => {
          operators.push(op);
          return true;
        }

        Precedence::Equal => {
          operators.pop();
          return true;
        }

        Precedence::Invalid => return false

      }
    }
  }


  fn push(&mut self, kind: NodeKind<C>) -> NodeId {
    self.nodes.push(Node::new(kind));
    self.nodes.len() - 1
  }


  /// Combines two trees under a new root. An empty side yields the other tree unchanged.
  pub fn join(mut left: Self, right: Self, kind: JoinKind) -> Self {
    let (left_root, right_root) = match (left.root, right.root) {
      (None, _)                  => return right,
      (_, None)                  => return left,
      (Some(l), Some(r))         => (l, r)
    };

    let base = left.nodes.len();
    left.nodes.extend(right.nodes.into_iter().map(|node| node.rebased(base)));

    let kind = match kind {
      JoinKind::And => NodeKind::And(left_root, right_root + base),
      JoinKind::Or  => NodeKind::Or(left_root, right_root + base),
    };
    left.root = Some(left.push(kind));
    left
  }


  /// Marks the root as the end of the definition `action`.
  pub fn set_action(&mut self, action: ActionId) {
    if let Some(root) = self.root {
      self.nodes[root].action = action;
    }
  }

  pub fn root(&self) -> Option<NodeId> {
    self.root
  }

  pub fn node(&self, id: NodeId) -> &Node<C> {
    &self.nodes[id]
  }

  /// Number of nodes in the arena.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.root.is_none()
  }

  /// Iterates over the nodes reachable from the root in post-order.
  pub fn depth_first(&self) -> DepthFirst<'_, C> {
    let mut stack = SmallVec::new();
    if let Some(root) = self.root {
      stack.push((root, 0));
    }
    DepthFirst{ tree: self, stack }
  }

}


impl<C: LexChar> Node<C> {
  fn rebased(self, base: NodeId) -> Self {
    let kind = match self.kind {
      NodeKind::Range(range)       => NodeKind::Range(range),
      NodeKind::And(left, right)   => NodeKind::And(left + base, right + base),
      NodeKind::Or(left, right)    => NodeKind::Or(left + base, right + base),
      NodeKind::Question(child)    => NodeKind::Question(child + base),
      NodeKind::Plus(child)        => NodeKind::Plus(child + base),
      NodeKind::Closure(child)     => NodeKind::Closure(child + base),
    };
    Node{ kind, action: self.action }
  }
}


/**
  Post-order walk with an explicit stack of `(node, visit state)` pairs. State 0 has not visited
  any child, state 1 has visited the left (or only) child, and state 2 has visited both.
*/
pub struct DepthFirst<'t, C: LexChar> {
  tree  : &'t ExpressionTree<C>,
  stack : SmallVec<[(NodeId, u8); 32]>,
}

impl<'t, C: LexChar> Iterator for DepthFirst<'t, C> {
  type Item = NodeId;

  fn next(&mut self) -> Option<NodeId> {
    loop {
      let (id, visit) = self.stack.pop()?;
      let kind = self.tree.nodes[id].kind;

      match (kind, visit) {
        (NodeKind::Range(_), _) => return Some(id),

        (NodeKind::And(left, _), 0) | (NodeKind::Or(left, _), 0) => {
          self.stack.push((id, 1));
          self.stack.push((left, 0));
        }

        (NodeKind::And(_, right), 1) | (NodeKind::Or(_, right), 1) => {
          self.stack.push((id, 2));
          self.stack.push((right, 0));
        }

        (NodeKind::Question(child), 0)
        | (NodeKind::Plus(child), 0)
        | (NodeKind::Closure(child), 0) => {
          self.stack.push((id, 2));
          self.stack.push((child, 0));
        }

        _ => return Some(id)
      }
    }
  }
}


impl<C: LexChar> Display for ExpressionTree<C> {
  /// Renders the tree as a fully parenthesized pattern that parses back to an equivalent tree.
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut rendered: Vec<String> = Vec::new();

    for id in self.depth_first() {
      let text = match self.nodes[id].kind {
        NodeKind::Range(range) => range.to_string(),
        NodeKind::Question(_)  => format!("{}?", rendered.pop().unwrap_or_default()),
        NodeKind::Plus(_)      => format!("{}+", rendered.pop().unwrap_or_default()),
        NodeKind::Closure(_)   => format!("{}*", rendered.pop().unwrap_or_default()),
        NodeKind::And(_, _) | NodeKind::Or(_, _) => {
          let right = rendered.pop().unwrap_or_default();
          let left  = rendered.pop().unwrap_or_default();
          match self.nodes[id].kind {
            NodeKind::Or(_, _) => format!("({}|{})", left, right),
            _                  => format!("({}{})", left, right),
          }
        }
      };
      rendered.push(text);
    }

    write!(f, "{}", rendered.pop().unwrap_or_default())
  }
}
