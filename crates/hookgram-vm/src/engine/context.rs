//! Per-parse mutable state.

use hookgram_lexer::Token;

use super::chain::HookChain;
use super::error::RuntimeError;
use super::vm::Limits;

/// Saved parse position: cursor plus hook chain watermark.
///
/// Restoring one rewinds both, so no hook event recorded after the
/// checkpoint survives a failed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub cursor: usize,
    pub watermark: usize,
}

/// Token array, cursor and hook chain of one parse.
///
/// One context per parse; the compiled program is shared and never mutated.
#[derive(Debug, Clone)]
pub struct ParseContext {
    tokens: Vec<Token>,
    cursor: usize,
    chain: HookChain,
    exec_fuel: u32,
    recursion_depth: u32,
}

impl ParseContext {
    pub fn new(tokens: Vec<Token>) -> Self {
        let limits = Limits::default();
        Self {
            tokens,
            cursor: 0,
            chain: HookChain::new(),
            exec_fuel: limits.get_exec_fuel(),
            recursion_depth: 0,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Consume the current token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token)
    }

    pub fn chain(&self) -> &HookChain {
        &self.chain
    }

    #[inline]
    pub(crate) fn chain_mut(&mut self) -> &mut HookChain {
        &mut self.chain
    }

    pub fn into_parts(self) -> (Vec<Token>, HookChain) {
        (self.tokens, self.chain)
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.cursor,
            watermark: self.chain.len(),
        }
    }

    #[inline]
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.cursor;
        self.chain.truncate(checkpoint.watermark);
    }

    /// Rewind to the first token with an empty chain and fresh fuel.
    pub(crate) fn reset(&mut self, limits: Limits) {
        self.cursor = 0;
        self.chain.clear();
        self.exec_fuel = limits.get_exec_fuel();
        self.recursion_depth = 0;
    }

    #[inline]
    pub(crate) fn burn_fuel(&mut self) -> Result<(), RuntimeError> {
        if self.exec_fuel == 0 {
            return Err(RuntimeError::ExecFuelExhausted);
        }
        self.exec_fuel -= 1;
        Ok(())
    }

    #[inline]
    pub(crate) fn enter_rule(&mut self, limit: u32) -> Result<(), RuntimeError> {
        if self.recursion_depth >= limit {
            return Err(RuntimeError::RecursionLimitExceeded);
        }
        self.recursion_depth += 1;
        Ok(())
    }

    #[inline]
    pub(crate) fn leave_rule(&mut self) {
        self.recursion_depth -= 1;
    }
}
