//! hookgram compiler: rule-body parser and matcher compiler.
//!
//! This crate turns textual rule bodies into an executable matcher graph:
//! - `meta` - lexer and tree builder for rule bodies (`factor (ADD factor)?`)
//! - `compile` - name resolution and lowering of grammar trees into [`Matcher`]s
//! - `dump` - textual rendering of a compiled [`Program`]

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;
pub mod dump;
pub mod error;
pub mod meta;


pub use compile::{Matcher, Program, Rule, RuleId, compile};
pub use error::CompileError;
pub use meta::{GrammarNode, parse_rule};
