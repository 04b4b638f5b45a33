//! Provides the nondeterministic finite automaton produced by Thompson
//! construction and the routines for evaluating an input against it.
//!
//! # Example
//!
//! ```rust
//! use thompson_runtime::*;
//!
//! // approximate to `a`
//! let nfa = Nfa::try_new(
//!     StateId::from(0),
//!     StateId::from(1),
//!     vec![
//!         State::new(StateId::from(0)).with_transition(Symbol::Literal('a'), StateId::from(1)),
//!         State::new(StateId::from(1)),
//!     ],
//! )
//! .expect("automaton is well formed");
//!
//! assert!(accepts(&nfa, "a"));
//! assert!(!accepts(&nfa, "aa"));
//! assert!(!accepts(&nfa, "b"));
//! ```

use std::collections::VecDeque;
use std::fmt::Display;

pub mod dot;
pub mod matcher;
pub mod simulate;
mod sparse_set;

pub use simulate::{accepts, epsilon_closure, r#move, Simulation};
pub use sparse_set::StateSet;

/// The glyph used to spell an epsilon operand in a pattern and to label
/// epsilon transitions when rendering.
pub const EPSILON: char = 'ε';

/// An opaque identifier for a state, assigned in creation order.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for StateId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The label on a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Consumes exactly the given character.
    Literal(char),
    /// Consumes nothing.
    Epsilon,
}

impl Symbol {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Literal(c)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Literal(c) => write!(f, "{}", c),
            Symbol::Epsilon => write!(f, "{}", EPSILON),
        }
    }
}

/// A flattened `(source, symbol, target)` view of a single edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub source: StateId,
    pub symbol: Symbol,
    pub target: StateId,
}

impl Transition {
    #[must_use]
    pub fn new(source: StateId, symbol: Symbol, target: StateId) -> Self {
        Self {
            source,
            symbol,
            target,
        }
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}: {} -> {:04}", self.source, self.symbol, self.target)
    }
}

/// A state and its outgoing edges, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    id: StateId,
    edges: Vec<(Symbol, StateId)>,
}

impl State {
    #[must_use]
    pub fn new(id: StateId) -> Self {
        Self { id, edges: vec![] }
    }

    pub fn with_transition(mut self, symbol: Symbol, target: StateId) -> Self {
        self.add_transition_mut(symbol, target);
        self
    }

    pub fn add_transition_mut(&mut self, symbol: Symbol, target: StateId) {
        self.edges.push((symbol, target));
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    /// Returns an iterator over all outgoing `(symbol, target)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Symbol, StateId)> + '_ {
        self.edges.iter().copied()
    }

    /// Returns the targets of all outgoing edges labeled `symbol`.
    pub fn targets_on(&self, symbol: Symbol) -> impl Iterator<Item = StateId> + '_ {
        self.edges
            .iter()
            .filter(move |(label, _)| *label == symbol)
            .map(|(_, target)| *target)
    }

    pub fn epsilon_targets(&self) -> impl Iterator<Item = StateId> + '_ {
        self.targets_on(Symbol::Epsilon)
    }
}

/// A finalized automaton with exactly one start and one accept state.
///
/// States are stored in an arena indexed by their id, so an `Nfa` holds no
/// references into itself and can be shared freely between threads once
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    start: StateId,
    accept: StateId,
    states: Vec<State>,
}

impl Nfa {
    /// Validates and assembles an automaton, returning `None` if a state is
    /// stored out of id order, or the start, accept or any transition target
    /// references a state that does not exist.
    pub fn try_new(start: StateId, accept: StateId, states: Vec<State>) -> Option<Self> {
        let len = states.len();
        let in_bounds = |id: StateId| id.as_usize() < len;

        let ids_are_indexes = states
            .iter()
            .enumerate()
            .all(|(idx, state)| state.id.as_usize() == idx);
        let targets_exist = states
            .iter()
            .flat_map(State::edges)
            .all(|(_, target)| in_bounds(target));

        if ids_are_indexes && targets_exist && in_bounds(start) && in_bounds(accept) {
            Some(Self {
                start,
                accept,
                states,
            })
        } else {
            None
        }
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(id.as_usize())
    }

    /// Returns all state ids in ascending order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().map(State::id)
    }

    /// Returns every transition ordered by source state, then by the order
    /// the transition was added.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.states.iter().flat_map(|state| {
            state
                .edges()
                .map(move |(symbol, target)| Transition::new(state.id, symbol, target))
        })
    }

    /// Returns the set of states reachable from the start state, visited in
    /// breadth-first order.
    pub fn reachable(&self) -> StateSet {
        let mut visited = StateSet::new(self.len());
        let mut queue = VecDeque::from([self.start]);
        visited.insert(self.start);

        while let Some(id) = queue.pop_front() {
            let targets = self
                .get(id)
                .into_iter()
                .flat_map(|state| state.edges().map(|(_, target)| target));

            for target in targets {
                if visited.insert(target) {
                    queue.push_back(target);
                }
            }
        }

        visited
    }
}

impl std::ops::Index<StateId> for Nfa {
    type Output = State;

    fn index(&self, index: StateId) -> &Self::Output {
        &self.states[index.as_usize()]
    }
}

impl Display for Nfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "start:  {:04}", self.start)?;
        writeln!(f, "accept: {:04}", self.accept)?;
        for transition in self.transitions() {
            writeln!(f, "{}", transition)?
        }

        Ok(())
    }
}
