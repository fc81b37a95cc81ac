//! The hook chain: an append-only log of hook events with truncation support
//! for backtracking.

use std::ops::Range;

use hookgram_compiler::RuleId;
use hookgram_lexer::TokenId;

/// What a hook event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventId {
    Rule(RuleId),
    Token(TokenId),
}

/// One recorded hook site.
///
/// `begin` and `end` are token-array indices. Token events have no `end` and
/// cover exactly the token at `begin`. Rule events get their `end` when the
/// rule matches; a rule event still open after a successful parse is a bug in
/// the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HookEvent {
    pub id: EventId,
    pub begin: usize,
    pub end: Option<usize>,
}

impl HookEvent {
    pub fn token(id: TokenId, index: usize) -> Self {
        Self {
            id: EventId::Token(id),
            begin: index,
            end: None,
        }
    }

    pub fn open(rule: RuleId, begin: usize) -> Self {
        Self {
            id: EventId::Rule(rule),
            begin,
            end: None,
        }
    }

    pub fn rule(&self) -> Option<RuleId> {
        match self.id {
            EventId::Rule(rule) => Some(rule),
            EventId::Token(_) => None,
        }
    }

    pub fn token_id(&self) -> Option<TokenId> {
        match self.id {
            EventId::Token(token) => Some(token),
            EventId::Rule(_) => None,
        }
    }

    /// Covered token indices. `None` for a rule event not closed yet.
    pub fn span(&self) -> Option<Range<usize>> {
        match self.id {
            EventId::Token(_) => Some(self.begin..self.begin + 1),
            EventId::Rule(_) => self.end.map(|end| self.begin..end),
        }
    }
}

/// Hook chain with truncation support for backtracking.
#[derive(Debug, Default, Clone)]
pub struct HookChain(Vec<HookEvent>);

impl HookChain {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn push(&mut self, event: HookEvent) {
        self.0.push(event);
    }

    /// Append an open rule event and return its slot for [`close`](Self::close).
    #[inline]
    pub fn open(&mut self, rule: RuleId, begin: usize) -> usize {
        self.0.push(HookEvent::open(rule, begin));
        self.0.len() - 1
    }

    #[inline]
    pub fn close(&mut self, slot: usize, end: usize) {
        let event = &mut self.0[slot];
        debug_assert!(event.end.is_none(), "rule event closed twice");
        event.end = Some(end);
    }

    /// Current length (used as watermark for backtracking).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Truncate to watermark (for backtracking).
    #[inline]
    pub fn truncate(&mut self, watermark: usize) {
        self.0.truncate(watermark);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_slice(&self) -> &[HookEvent] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &HookEvent> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<HookEvent> {
        self.0
    }
}
