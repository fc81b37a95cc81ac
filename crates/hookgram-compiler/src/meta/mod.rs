//! Rule-body syntax.
//!
//! ```text
//! body text → lexer → meta-tokens → tree builder → GrammarNode
//! ```
//!
//! - [`lexer`]: Logos-based tokenizer for the fixed meta-token set.
//! - [`tree`]: folds meta-tokens into a [`GrammarNode`] by precedence-driven
//!   tree insertion.

pub mod lexer;
pub mod tree;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod tree_tests;

pub use tree::{GrammarNode, parse_rule};
