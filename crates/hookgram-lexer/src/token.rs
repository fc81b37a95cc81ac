//! Tokens and the buffer text they point into.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Index of a token definition, in declaration order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TokenId(u32);

impl TokenId {
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Text of one loaded buffer.
///
/// Shared between the buffer on the tokenizer stack and every token cut from
/// it, so tokens stay valid after the buffer is popped.
#[derive(Debug, PartialEq, Eq)]
pub struct BufferText {
    name: String,
    text: String,
}

impl BufferText {
    pub(crate) fn new(name: String, text: String) -> Self {
        Self { name, text }
    }

    /// Display name (`buff#0`, `buff#1`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A labeled span of buffer text. `begin..end` are byte offsets.
#[derive(Clone, Debug)]
pub struct Token {
    pub id: TokenId,
    pub begin: usize,
    pub end: usize,
    buffer: Arc<BufferText>,
}

impl Token {
    pub(crate) fn new(id: TokenId, buffer: Arc<BufferText>, begin: usize, end: usize) -> Self {
        Self {
            id,
            begin,
            end,
            buffer,
        }
    }

    /// The matched text. O(1) slice into the owning buffer.
    #[inline]
    pub fn text(&self) -> &str {
        &self.buffer.text()[self.begin..self.end]
    }

    pub fn buffer(&self) -> &BufferText {
        &self.buffer
    }

    pub(crate) fn shared_buffer(&self) -> &Arc<BufferText> {
        &self.buffer
    }

    pub fn span(&self) -> Range<usize> {
        self.begin..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        // Same span of the same buffer
        self.id == other.id
            && self.begin == other.begin
            && self.end == other.end
            && Arc::ptr_eq(&self.buffer, &other.buffer)
    }
}

impl Eq for Token {}
