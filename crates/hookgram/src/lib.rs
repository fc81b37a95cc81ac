//! hookgram: regex-tokenized grammars with semantic hooks.
//!
//! Rules are written in a small EBNF-like notation over named tokens. Hooks
//! bound to rule and token names build values while parsing; they only ever
//! see the events of the accepted parse, never those of abandoned attempts.
//!
//! # Example
//!
//! ```
//! use hookgram::{Grammar, Visit};
//!
//! let grammar = Grammar::<Vec<i64>>::builder()
//!     .token("NUM", "[0-9]+")
//!     .token("ADD", r"\+")
//!     .token("SPC", "[ \t]+")
//!     .ignore("SPC")
//!     .rule("sum", "NUM (ADD NUM)*")
//!     .on_token("NUM", |stack, text, _| stack.push(text.parse().unwrap()))
//!     .on_rule("sum", |stack, visit, _| {
//!         if visit == Visit::Exit {
//!             let total: i64 = stack.drain(..).sum();
//!             stack.push(total);
//!         }
//!     })
//!     .build()
//!     .expect("valid grammar");
//!
//! let mut stack = Vec::new();
//! assert!(grammar.parse_text("1 + 2 + 39", &mut stack, None).unwrap());
//! assert_eq!(stack, [42]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod debug;
mod grammar;


pub use grammar::{Grammar, GrammarBuilder, HookKind, ParseOutcome, Visit};

pub use hookgram_compiler::{CompileError, Program, RuleId};
pub use hookgram_lexer::{LexError, Token, TokenId};
pub use hookgram_vm::{EventId, HookEvent, Limits, RuntimeError};

/// Errors that can occur while building or running a grammar.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// A parse was started at a rule the grammar does not declare.
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("`{name}` is a {actual}, but a {hook} hook was bound to it")]
    HookKindMismatch {
        name: String,
        hook: HookKind,
        actual: HookKind,
    },

    #[error("ignored token `{0}` is not declared")]
    UnknownIgnoredToken(String),
}

/// Result type for grammar operations.
pub type Result<T> = std::result::Result<T, Error>;
