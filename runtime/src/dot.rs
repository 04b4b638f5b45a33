//! Renders an [Nfa] in the graphviz dot language.

use super::{Nfa, Symbol, Transition};

impl Nfa {
    /// Converts the NFA to the [graphviz](https://graphviz.org/docs/layouts/dot/)
    /// dot language format.
    ///
    /// # Example
    ///
    /// ```
    /// use thompson_runtime::*;
    ///
    /// let nfa = Nfa::try_new(
    ///     StateId::from(0),
    ///     StateId::from(1),
    ///     vec![
    ///         State::new(StateId::from(0)).with_transition(Symbol::Epsilon, StateId::from(1)),
    ///         State::new(StateId::from(1)),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(
    ///     "digraph nfa {
    /// \trankdir = LR;
    ///
    /// \tnode [shape = point]; start;
    /// \tnode [shape = doublecircle]; 1;
    /// \tnode [shape = circle];
    ///
    /// \tstart -> 0;
    /// \t0 -> 1 [label = \"ε\"];
    /// }
    /// ",
    ///     nfa.to_dot()
    /// );
    /// ```
    pub fn to_dot(&self) -> String {
        format!(
            "digraph nfa {{\n\
                \trankdir = LR;\n\
            \n\
                \tnode [shape = point]; start;\n\
                \tnode [shape = doublecircle]; {};\n\
                \tnode [shape = circle];\n\
            \n\
                \tstart -> {};\n\
                {}\
            }}\n",
            self.accept(),
            self.start(),
            self.transitions()
                .map(|transition| format!("\t{}\n", transition_dot(&transition)))
                .collect::<String>()
        )
    }
}

fn transition_dot(transition: &Transition) -> String {
    format!(
        "{} -> {} [label = \"{}\"];",
        transition.source,
        transition.target,
        label(transition.symbol)
    )
}

/// Escapes a symbol for use inside a quoted dot label.
fn label(symbol: Symbol) -> String {
    match symbol {
        Symbol::Literal('"') => "\\\"".to_string(),
        Symbol::Literal('\\') => "\\\\".to_string(),
        symbol => symbol.to_string(),
    }
}
