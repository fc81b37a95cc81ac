//! Lexer for rule bodies.
//!
//! The meta-token set is fixed, so it is compiled once into a Logos automaton
//! rather than built through a runtime tokenizer. Separators (whitespace and
//! `,;:-` outside of occurrence braces) carry no meaning and are dropped.

use std::ops::Range;

use logos::Logos;

/// Kinds of meta-tokens in a rule body.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaKind {
    /// Dropped by [`lex`].
    #[regex(r"[ \t\n\r,;:\-]+")]
    Separator,

    /// Rule or token name.
    #[regex(r"[a-zA-Z][a-zA-Z_0-9]*")]
    Id,

    #[token("(")]
    Open,

    #[token(")")]
    Close,

    /// Explicit bounds: `{3}`, `{2,4}`, `{2:4}`, `{2-4}`, `{1,*}`.
    #[regex(r"\{[ \t]*[0-9]+([ \t:,\-]+([0-9]+|\*))?[ \t]*\}")]
    Occur,

    #[token("|")]
    Alt,

    #[token("?")]
    ZeroOne,

    #[token("*")]
    ZeroMany,

    #[token("+")]
    OneMany,
}

/// Meta-token: kind + byte span into the rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaToken {
    pub kind: MetaKind,
    pub span: Range<usize>,
}

impl MetaToken {
    #[inline]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.span.clone()]
    }
}

/// Tokenize a rule body, dropping separators.
///
/// Fails with the offset of the first character no meta-token accepts.
pub fn lex(source: &str) -> Result<Vec<MetaToken>, usize> {
    let mut tokens = Vec::new();
    let mut lexer = MetaKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(MetaKind::Separator) => {}
            Ok(kind) => tokens.push(MetaToken { kind, span }),
            Err(()) => return Err(span.start),
        }
    }

    Ok(tokens)
}

/// Parse the bounds of an `Occur` token. `None` for `max` means unbounded.
///
/// Returns `None` if a count does not fit in `u32`.
pub fn occurrence_bounds(text: &str) -> Option<(u32, Option<u32>)> {
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    let mut counts = inner
        .split([' ', '\t', ':', ',', '-'])
        .filter(|part| !part.is_empty());

    let min: u32 = counts.next()?.parse().ok()?;
    let max = match counts.next() {
        None => Some(min),
        Some("*") => None,
        Some(count) => Some(count.parse().ok()?),
    };

    Some((min, max))
}
