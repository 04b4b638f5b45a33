//! Provides methods and types to facilitate the construction of an [Nfa] from
//! a postfix token sequence via Thompson's construction.
//!
//! # Example
//!
//! ```
//! use thompson_compiler::compile;
//! use thompson_runtime::*;
//!
//! let nfa = compile("ab").unwrap();
//! let id = StateId::from;
//!
//! assert_eq!((id(0), id(3)), (nfa.start(), nfa.accept()));
//! assert_eq!(
//!     vec![
//!         Transition::new(id(0), Symbol::Literal('a'), id(1)),
//!         Transition::new(id(1), Symbol::Epsilon, id(2)),
//!         Transition::new(id(2), Symbol::Literal('b'), id(3)),
//!     ],
//!     nfa.transitions().collect::<Vec<_>>()
//! );
//! ```

use log::debug;
use thompson_runtime::{Nfa, State, StateId, Symbol};

use super::parser::{parse, ParseError};
use super::tokenizer::{Operator, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("malformed expression{}", describe_position(.position))]
    MalformedExpression { position: Option<usize> },
}

fn describe_position(position: &Option<usize>) -> String {
    position
        .map(|position| format!(" at position {}", position))
        .unwrap_or_default()
}

/// Any failure encountered while turning a pattern into an [Nfa].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// A sub-automaton with a single entry and a single exit, only alive while
/// the automaton is being assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fragment {
    start: StateId,
    accept: StateId,
}

impl Fragment {
    fn new(start: StateId, accept: StateId) -> Self {
        Self { start, accept }
    }
}

/// The arena of states under construction and the stack of fragments yet to
/// be combined.
#[derive(Default)]
struct Builder {
    states: Vec<State>,
    fragments: Vec<Fragment>,
}

impl Builder {
    fn add_state(&mut self) -> StateId {
        let id = StateId::from(self.states.len());
        self.states.push(State::new(id));
        id
    }

    fn add_transition(&mut self, source: StateId, symbol: Symbol, target: StateId) {
        self.states[source.as_usize()].add_transition_mut(symbol, target);
    }

    fn add_epsilon(&mut self, source: StateId, target: StateId) {
        self.add_transition(source, Symbol::Epsilon, target)
    }

    fn pop(&mut self, position: usize) -> Result<Fragment, BuildError> {
        self.fragments
            .pop()
            .ok_or(BuildError::MalformedExpression {
                position: Some(position),
            })
    }

    /// `S -symbol-> A`
    fn operand(&mut self, symbol: Symbol) {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_transition(start, symbol, accept);
        self.fragments.push(Fragment::new(start, accept));
    }

    /// Joins the accept of the lower fragment to the start of the upper one.
    /// No states are created.
    fn concatenate(&mut self, position: usize) -> Result<(), BuildError> {
        let second = self.pop(position)?;
        let first = self.pop(position)?;

        self.add_epsilon(first.accept, second.start);
        self.fragments.push(Fragment::new(first.start, second.accept));
        Ok(())
    }

    fn union(&mut self, position: usize) -> Result<(), BuildError> {
        let second = self.pop(position)?;
        let first = self.pop(position)?;
        let start = self.add_state();
        let accept = self.add_state();

        self.add_epsilon(start, first.start);
        self.add_epsilon(start, second.start);
        self.add_epsilon(first.accept, accept);
        self.add_epsilon(second.accept, accept);
        self.fragments.push(Fragment::new(start, accept));
        Ok(())
    }

    fn repetition(&mut self, op: Operator, position: usize) -> Result<(), BuildError> {
        let body = self.pop(position)?;
        let start = self.add_state();
        let accept = self.add_state();

        self.add_epsilon(start, body.start);
        match op {
            Operator::ZeroOrMore => {
                self.add_epsilon(start, accept);
                self.add_epsilon(body.accept, body.start);
            }
            // the body must be traversed at least once, so there is no skip.
            Operator::OneOrMore => self.add_epsilon(body.accept, body.start),
            Operator::ZeroOrOne => self.add_epsilon(start, accept),
            Operator::Union | Operator::Concat => {
                return Err(BuildError::MalformedExpression {
                    position: Some(position),
                })
            }
        }
        self.add_epsilon(body.accept, accept);

        self.fragments.push(Fragment::new(start, accept));
        Ok(())
    }

    fn apply(&mut self, token: &Token) -> Result<(), BuildError> {
        let position = token.position();

        match token.kind() {
            TokenKind::Literal(c) => {
                self.operand(Symbol::Literal(c));
                Ok(())
            }
            TokenKind::Epsilon => {
                self.operand(Symbol::Epsilon);
                Ok(())
            }
            TokenKind::Operator(Operator::Concat) => self.concatenate(position),
            TokenKind::Operator(Operator::Union) => self.union(position),
            TokenKind::Operator(op) => self.repetition(op, position),
            TokenKind::LeftParen | TokenKind::RightParen => {
                Err(BuildError::MalformedExpression {
                    position: Some(position),
                })
            }
        }
    }

    fn finish(mut self) -> Result<Nfa, BuildError> {
        let malformed = BuildError::MalformedExpression { position: None };

        let fragment = match (self.fragments.pop(), self.fragments.is_empty()) {
            (Some(fragment), true) => fragment,
            _ => return Err(malformed),
        };

        let nfa = Nfa::try_new(fragment.start, fragment.accept, self.states)
            .ok_or_else(|| malformed.clone())?;

        // every state must be reachable from the start state.
        if nfa.reachable().len() == nfa.len() {
            Ok(nfa)
        } else {
            Err(malformed)
        }
    }
}

/// Assembles an [Nfa] from a postfix token sequence, allocating state ids in
/// creation order. An empty sequence produces an automaton accepting only
/// the empty string.
///
/// # Example
///
/// ```
/// use thompson_compiler::{build, parse};
/// use thompson_runtime::accepts;
///
/// let nfa = parse("a?").map(|postfix| build(&postfix)).unwrap().unwrap();
///
/// assert!(accepts(&nfa, ""));
/// assert!(accepts(&nfa, "a"));
/// assert!(!accepts(&nfa, "aa"));
/// ```
pub fn build(postfix: &[Token]) -> Result<Nfa, BuildError> {
    let mut builder = Builder::default();

    if postfix.is_empty() {
        builder.operand(Symbol::Epsilon);
    }

    for token in postfix {
        builder.apply(token)?;
    }

    builder.finish()
}

/// Parses a pattern and builds its [Nfa].
///
/// # Example
///
/// ```
/// use thompson_compiler::{compile, CompileError, ParseError};
/// use thompson_runtime::accepts;
///
/// let nfa = compile("a*b").unwrap();
/// assert!(accepts(&nfa, "aaab"));
/// assert!(!accepts(&nfa, "aaa"));
///
/// assert_eq!(
///     Err(CompileError::Parse(ParseError::UnbalancedParens { position: 0 })),
///     compile("(")
/// );
/// ```
pub fn compile(pattern: &str) -> Result<Nfa, CompileError> {
    let postfix = parse(pattern)?;
    let nfa = build(&postfix)?;

    debug!(
        "compiled {:?} into {} states with {} transitions",
        pattern,
        nfa.len(),
        nfa.transitions().count()
    );
    Ok(nfa)
}
