//! Regex-driven tokenizer for hookgram grammars.
//!
//! A [`Tokenizer`] holds an ordered table of token definitions and a stack of
//! text buffers. Each call to [`Tokenizer::next`] tries the definitions in
//! declaration order against the remaining text of the topmost buffer; the
//! first one that matches wins, even when a later definition would produce a
//! longer match.
//!
//! ```text
//! "57 + 3" → NUM "57", SPC " ", ADD "+", SPC " ", NUM "3"
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod error;
mod token;
mod tokenizer;

#[cfg(test)]
mod tokenizer_tests;

pub use error::LexError;
pub use token::{BufferText, Token, TokenId};
pub use tokenizer::Tokenizer;
