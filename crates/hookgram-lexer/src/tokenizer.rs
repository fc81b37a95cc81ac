//! Tokenizer over a stack of text buffers.

use std::sync::Arc;

use indexmap::IndexMap;
use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};

use crate::error::LexError;
use crate::token::{BufferText, Token, TokenId};

/// A loaded text and the position up to which it has been tokenized.
#[derive(Clone, Debug)]
struct Buffer {
    text: Arc<BufferText>,
    cursor: usize,
}

impl Buffer {
    fn size(&self) -> usize {
        self.text.len()
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.size()
    }

    fn rest(&self) -> &str {
        &self.text.text()[self.cursor..]
    }
}

/// First-match-wins tokenizer.
///
/// Cloning is cheap: clones share the compiled definitions and copy the
/// buffer stack, so a grammar can keep one empty tokenizer around and clone it
/// for every parse.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    /// Compiled patterns keyed by token name; map index is the `TokenId`.
    definitions: Arc<IndexMap<String, Regex>>,
    buffers: Vec<Buffer>,
}

impl Tokenizer {
    /// Compile an ordered list of `(name, pattern)` definitions.
    ///
    /// Patterns use `regex-automata` syntax and are always matched anchored at
    /// the current cursor; no input is ever skipped implicitly.
    pub fn new<I, N, P>(definitions: I) -> Result<Self, LexError>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: AsRef<str>,
    {
        let mut table = IndexMap::new();
        for (name, pattern) in definitions {
            let name = name.into();
            let pattern = pattern.as_ref();
            if table.contains_key(&name) {
                return Err(LexError::DuplicateToken { name });
            }
            let regex = Regex::new(pattern).map_err(|err| LexError::InvalidPattern {
                name: name.clone(),
                pattern: pattern.to_owned(),
                message: err.to_string(),
            })?;
            table.insert(name, regex);
        }

        Ok(Self {
            definitions: Arc::new(table),
            buffers: Vec::new(),
        })
    }

    /// Push a new buffer on top of the stack. It is tokenized before any
    /// buffer below it.
    pub fn load_text(&mut self, text: impl Into<String>) {
        let name = format!("buff#{}", self.buffers.len());
        self.buffers.push(Buffer {
            text: Arc::new(BufferText::new(name, text.into())),
            cursor: 0,
        });
    }

    /// Produce the next token, or `None` once every buffer is exhausted.
    pub fn next(&mut self) -> Result<Option<Token>, LexError> {
        while let Some(buffer) = self.buffers.last_mut() {
            if buffer.is_exhausted() {
                self.buffers.pop();
                continue;
            }

            let rest = buffer.rest();
            let found = self
                .definitions
                .values()
                .enumerate()
                .find_map(|(index, regex)| {
                    let input = Input::new(rest).anchored(Anchored::Yes);
                    regex.search(&input).map(|m| (index, m.end()))
                });

            let Some((index, len)) = found else {
                return Err(LexError::NoMatchingToken {
                    buffer: Arc::clone(&buffer.text),
                    offset: buffer.cursor,
                });
            };

            let begin = buffer.cursor;
            buffer.cursor += len;
            return Ok(Some(Token::new(
                TokenId::from_index(index),
                Arc::clone(&buffer.text),
                begin,
                buffer.cursor,
            )));
        }

        Ok(None)
    }

    /// Drain every remaining token, dropping those whose name is in `ignore`.
    ///
    /// Names that are not defined are never produced, so they are accepted
    /// and have no effect.
    pub fn all<S: AsRef<str>>(&mut self, ignore: &[S]) -> Result<Vec<Token>, LexError> {
        let ignored: Vec<TokenId> = ignore
            .iter()
            .filter_map(|name| self.id(name.as_ref()))
            .collect();

        let mut tokens = Vec::new();
        while let Some(token) = self.next()? {
            if token.is_empty() {
                return Err(LexError::EmptyToken {
                    buffer: Arc::clone(token.shared_buffer()),
                    offset: token.begin,
                    token: self.name(token.id).to_owned(),
                });
            }
            if ignored.contains(&token.id) {
                continue;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Text of `token` within its owning buffer.
    #[inline]
    pub fn text<'t>(&self, token: &'t Token) -> &'t str {
        token.text()
    }

    /// Name of a definition.
    ///
    /// Panics if `id` does not come from this tokenizer.
    pub fn name(&self, id: TokenId) -> &str {
        self.definitions
            .get_index(id.index())
            .map(|(name, _)| name.as_str())
            .unwrap_or_else(|| panic!("token id {id} out of range"))
    }

    pub fn id(&self, name: &str) -> Option<TokenId> {
        self.definitions.get_index_of(name).map(TokenId::from_index)
    }

    /// Definition names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Number of buffers still on the stack.
    pub fn depth(&self) -> usize {
        self.buffers.len()
    }
}
