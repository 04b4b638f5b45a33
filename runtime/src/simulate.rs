//! Evaluates an input against an [Nfa] by tracking the full set of states the
//! automaton could be in after each character.
//!
//! # Example
//!
//! ```
//! use thompson_runtime::matcher::PatternEvaluatorMut;
//! use thompson_runtime::*;
//!
//! // approximate to `a+`
//! let id = StateId::from;
//! let nfa = Nfa::try_new(
//!     id(2),
//!     id(3),
//!     vec![
//!         State::new(id(0)).with_transition(Symbol::Literal('a'), id(1)),
//!         State::new(id(1))
//!             .with_transition(Symbol::Epsilon, id(0))
//!             .with_transition(Symbol::Epsilon, id(3)),
//!         State::new(id(2)).with_transition(Symbol::Epsilon, id(0)),
//!         State::new(id(3)),
//!     ],
//! )
//! .unwrap();
//!
//! let mut simulation = Simulation::new(&nfa).initial_state();
//! assert!(!simulation.is_in_accept_state());
//!
//! // every consumed `a` leaves the automaton in an accepting configuration.
//! assert_eq!(Some(&'a'), simulation.advance_mut(&'a'));
//! assert!(simulation.is_in_accept_state());
//! assert_eq!(Some(&'a'), simulation.advance_mut(&'a'));
//! assert!(simulation.is_in_accept_state());
//!
//! // and an unknown symbol leaves it with no live states at all.
//! assert_eq!(None, simulation.advance_mut(&'b'));
//! assert!(simulation.current().is_empty());
//! ```

use log::trace;

use super::matcher::PatternEvaluatorMut;
use super::{Nfa, StateId, StateSet, Symbol};

/// Returns the smallest superset of `states` that is closed under epsilon
/// transitions.
///
/// Ids with no corresponding state in `nfa` are carried over unchanged.
pub fn epsilon_closure(nfa: &Nfa, states: &StateSet) -> StateSet {
    let mut closure = StateSet::new(nfa.len());
    let mut pending: Vec<StateId> = Vec::with_capacity(states.len());

    for &id in states {
        if closure.insert(id) {
            pending.push(id);
        }
    }

    while let Some(id) = pending.pop() {
        let targets = nfa
            .get(id)
            .into_iter()
            .flat_map(|state| state.epsilon_targets());

        for target in targets {
            // only newly discovered states are expanded, so epsilon cycles
            // terminate.
            if closure.insert(target) {
                pending.push(target);
            }
        }
    }

    closure
}

/// Returns every state reachable from a member of `states` by exactly one
/// transition labeled `symbol`.
pub fn r#move(nfa: &Nfa, states: &StateSet, symbol: Symbol) -> StateSet {
    states
        .iter()
        .filter_map(|&id| nfa.get(id))
        .flat_map(|state| state.targets_on(symbol))
        .collect()
}

/// Returns `true` if `nfa` accepts the entirety of `input`.
///
/// Characters that never appear on a transition simply leave the
/// simulation with no live states, producing a rejection.
pub fn accepts(nfa: &Nfa, input: &str) -> bool {
    Simulation::new(nfa).initial_state().matches(input.chars())
}

/// A single in-progress evaluation of an [Nfa].
///
/// The automaton is only borrowed, so any number of simulations may run
/// against the same automaton at once.
#[derive(Debug)]
pub struct Simulation<'a> {
    nfa: &'a Nfa,
    current: StateSet,
}

impl<'a> Simulation<'a> {
    /// Creates a simulation with no live states. Call
    /// [PatternEvaluatorMut::initial_state] before feeding input.
    #[must_use]
    pub fn new(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            current: StateSet::new(nfa.len()),
        }
    }

    /// The states the automaton may currently be in.
    pub fn current(&self) -> &StateSet {
        &self.current
    }
}

impl PatternEvaluatorMut for Simulation<'_> {
    type Item = char;

    fn initial_state_mut(&mut self) {
        let start = [self.nfa.start()].into_iter().collect::<StateSet>();
        self.current = epsilon_closure(self.nfa, &start);
    }

    fn is_in_accept_state(&self) -> bool {
        self.current.contains(&self.nfa.accept())
    }

    fn advance_mut<'a>(&mut self, next: &'a Self::Item) -> Option<&'a Self::Item> {
        let moved = r#move(self.nfa, &self.current, Symbol::from(*next));
        self.current = epsilon_closure(self.nfa, &moved);
        trace!("consumed {:?}, live states: {:?}", next, self.current);

        (!self.current.is_empty()).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{State, EPSILON};

    fn id(id: usize) -> StateId {
        StateId::from(id)
    }

    fn set(ids: &[usize]) -> StateSet {
        ids.iter().copied().map(StateId::from).collect()
    }

    /// approximate to `a*b`
    fn zero_or_more_then_literal() -> Nfa {
        Nfa::try_new(
            id(2),
            id(5),
            vec![
                State::new(id(0)).with_transition(Symbol::Literal('a'), id(1)),
                State::new(id(1))
                    .with_transition(Symbol::Epsilon, id(0))
                    .with_transition(Symbol::Epsilon, id(3)),
                State::new(id(2))
                    .with_transition(Symbol::Epsilon, id(0))
                    .with_transition(Symbol::Epsilon, id(3)),
                State::new(id(3)).with_transition(Symbol::Epsilon, id(4)),
                State::new(id(4)).with_transition(Symbol::Literal('b'), id(5)),
                State::new(id(5)),
            ],
        )
        .unwrap()
    }

    /// Three states joined in an epsilon cycle with a single exit.
    fn epsilon_cycle() -> Nfa {
        Nfa::try_new(
            id(0),
            id(3),
            vec![
                State::new(id(0)).with_transition(Symbol::Epsilon, id(1)),
                State::new(id(1)).with_transition(Symbol::Epsilon, id(2)),
                State::new(id(2))
                    .with_transition(Symbol::Epsilon, id(0))
                    .with_transition(Symbol::Literal('x'), id(3)),
                State::new(id(3)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn should_compute_epsilon_closure() {
        let nfa = zero_or_more_then_literal();

        assert_eq!(set(&[2, 0, 3, 4]), epsilon_closure(&nfa, &set(&[2])));
        assert_eq!(set(&[1, 0, 3, 4]), epsilon_closure(&nfa, &set(&[1])));
        assert_eq!(set(&[5]), epsilon_closure(&nfa, &set(&[5])));
        assert_eq!(set(&[]), epsilon_closure(&nfa, &set(&[])));
    }

    #[test]
    fn should_terminate_on_epsilon_cycles() {
        let nfa = epsilon_cycle();

        assert_eq!(set(&[0, 1, 2]), epsilon_closure(&nfa, &set(&[1])));
        assert!(accepts(&nfa, "x"));
        assert!(!accepts(&nfa, "xx"));
    }

    #[test]
    fn should_move_on_matching_symbol_only() {
        let nfa = zero_or_more_then_literal();
        let closure = epsilon_closure(&nfa, &set(&[2]));

        assert_eq!(set(&[1]), r#move(&nfa, &closure, Symbol::Literal('a')));
        assert_eq!(set(&[5]), r#move(&nfa, &closure, Symbol::Literal('b')));
        assert_eq!(set(&[]), r#move(&nfa, &closure, Symbol::Literal('c')));
    }

    #[test]
    fn should_evaluate_zero_or_more_then_literal() {
        let nfa = zero_or_more_then_literal();
        let input_output = vec![
            ("aaab", true),
            ("b", true),
            ("ab", true),
            ("aaa", false),
            ("", false),
            ("bb", false),
            ("aca", false),
        ];

        for (test_id, (input, expected_res)) in input_output.into_iter().enumerate() {
            let res = accepts(&nfa, input);
            assert_eq!((test_id, expected_res), (test_id, res))
        }
    }

    #[test]
    fn should_consume_epsilon_glyph_as_literal_input() {
        let nfa = zero_or_more_then_literal();
        let mut simulation = Simulation::new(&nfa).initial_state();

        assert_eq!(Symbol::Literal(EPSILON), Symbol::from(EPSILON));
        assert_eq!(None, simulation.advance_mut(&EPSILON));
        assert!(simulation.current().is_empty());
        assert!(!accepts(&nfa, "εb"));
    }

    #[test]
    fn should_reset_simulation_to_initial_state() {
        let nfa = zero_or_more_then_literal();
        let mut simulation = Simulation::new(&nfa).initial_state();

        assert!(simulation.matches("ab".chars()));
        assert!(!simulation.matches("b".chars()));

        simulation.initial_state_mut();
        assert!(simulation.matches("b".chars()));
    }
}
