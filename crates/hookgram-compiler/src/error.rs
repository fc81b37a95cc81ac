//! Errors detected while compiling a grammar.
//!
//! All of them describe a malformed grammar, never a malformed input, and are
//! raised before any text is parsed.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A rule body contains no meta-tokens.
    #[error("rule `{rule}` is empty")]
    EmptyRule { rule: String },

    /// An identifier is neither a rule nor a token.
    #[error("rule `{rule}` references `{name}`, which is neither a rule nor a token")]
    UnknownRuleOrToken { rule: String, name: String },

    #[error("rule `{rule}`: unexpected character at offset {offset}")]
    UnexpectedCharacter { rule: String, offset: usize },

    /// A `(` without its `)`, or a stray `)`.
    #[error("rule `{rule}`: unbalanced parenthesis at offset {offset}")]
    UnbalancedGroup { rule: String, offset: usize },

    #[error("rule `{rule}`: empty group at offset {offset}")]
    EmptyGroup { rule: String, offset: usize },

    /// A quantifier with nothing before it to repeat.
    #[error("rule `{rule}`: quantifier at offset {offset} has nothing to repeat")]
    DanglingQuantifier { rule: String, offset: usize },

    /// A `|` with an empty side.
    #[error("rule `{rule}`: empty alternative next to `|` at offset {offset}")]
    DanglingAlternative { rule: String, offset: usize },

    /// Bounds with `min > max`, or a count that does not fit in `u32`.
    #[error("rule `{rule}`: invalid occurrence `{text}` at offset {offset}")]
    InvalidOccurrence {
        rule: String,
        offset: usize,
        text: String,
    },

    #[error("rule `{name}` is defined more than once")]
    DuplicateRule { name: String },

    #[error("grammar has no rules")]
    NoRules,
}

impl CompileError {
    /// Name of the rule the error was found in, if any.
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::EmptyRule { rule }
            | Self::UnknownRuleOrToken { rule, .. }
            | Self::UnexpectedCharacter { rule, .. }
            | Self::UnbalancedGroup { rule, .. }
            | Self::EmptyGroup { rule, .. }
            | Self::DanglingQuantifier { rule, .. }
            | Self::DanglingAlternative { rule, .. }
            | Self::InvalidOccurrence { rule, .. } => Some(rule),
            Self::DuplicateRule { name } => Some(name),
            Self::NoRules => None,
        }
    }
}
