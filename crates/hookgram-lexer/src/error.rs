//! Errors raised while building or running a tokenizer.

use std::sync::Arc;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::token::BufferText;

#[derive(Debug, Clone, thiserror::Error)]
pub enum LexError {
    /// A definition's pattern is not a valid regular expression.
    #[error("token `{name}` has an invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        name: String,
        pattern: String,
        message: String,
    },

    /// Two definitions share a name.
    #[error("token `{name}` is defined more than once")]
    DuplicateToken { name: String },

    /// No definition matches at the buffer cursor.
    #[error("no token matches {} at offset {offset}", .buffer.name())]
    NoMatchingToken {
        buffer: Arc<BufferText>,
        offset: usize,
    },

    /// A definition matched the empty string, so the cursor cannot advance.
    #[error("token `{token}` matches empty text in {} at offset {offset}", .buffer.name())]
    EmptyToken {
        buffer: Arc<BufferText>,
        offset: usize,
        token: String,
    },
}

impl LexError {
    /// Offset of the failure inside its buffer, for positional errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::NoMatchingToken { offset, .. } | Self::EmptyToken { offset, .. } => {
                Some(*offset)
            }
            Self::InvalidPattern { .. } | Self::DuplicateToken { .. } => None,
        }
    }

    /// Render the error, with an annotated source snippet when it points into
    /// a buffer.
    pub fn render(&self) -> String {
        let (buffer, offset) = match self {
            Self::NoMatchingToken { buffer, offset } | Self::EmptyToken { buffer, offset, .. } => {
                (buffer, *offset)
            }
            Self::InvalidPattern { .. } | Self::DuplicateToken { .. } => return self.to_string(),
        };

        let text = buffer.text();
        let width = text[offset..].chars().next().map_or(0, char::len_utf8);
        let message = self.to_string();

        let snippet = Snippet::source(text)
            .line_start(1)
            .path(buffer.name())
            .annotation(
                AnnotationKind::Primary
                    .span(offset..offset + width)
                    .label("unexpected input"),
            );
        let report = vec![Level::ERROR.primary_title(&message).element(snippet)];

        format!("{}", Renderer::plain().render(&report))
    }
}
