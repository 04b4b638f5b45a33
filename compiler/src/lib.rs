//! Provides for the tokenizing, parsing and compilation of a regular
//! expression into its corresponding nondeterministic finite automaton.
//!
//! Patterns support union (`|`), concatenation (implicit, or explicit with
//! `.`), zero-or-more (`*`), one-or-more (`+`), zero-or-one (`?`), grouping
//! with parentheses and the epsilon literal `ε`. Any other non-control,
//! non-whitespace character matches itself.
//!
//! # Example
//!
//! ```rust
//! // Compilation of a pattern into an automaton is accomplished by a single
//! // function exposed in the `thompson_compiler` crate.
//! use thompson_compiler::compile;
//!
//! // Evaluating a given input against an automaton is accomplished via a
//! // single exposed function in the `thompson_runtime` crate.
//! use thompson_runtime::accepts;
//!
//! // A pattern to be compiled.
//! let pattern = "(a|b*)*abb(a|b)*";
//!
//! let nfa = compile(pattern).expect("failed to compile");
//!
//! // An automaton is immutable once built and may be evaluated against any
//! // number of inputs.
//! assert!(accepts(&nfa, "babbba"));
//! assert!(accepts(&nfa, "abb"));
//! assert!(!accepts(&nfa, "ab"));
//! ```

pub mod compiler;
pub mod parser;
pub mod tokenizer;


pub use compiler::{build, compile, BuildError, CompileError};
pub use parser::{parse, to_postfix, ParseError};
pub use tokenizer::preprocess;
