use hookgram_compiler::{Program, RuleId};
use hookgram_lexer::TokenId;

/// Which rules and tokens have hooks attached.
///
/// Unwatched rules run without touching the hook chain at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HookMask {
    rules: Vec<bool>,
    tokens: Vec<bool>,
}

impl HookMask {
    /// Nothing watched.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every rule and token of `program` watched.
    pub fn all(program: &Program) -> Self {
        Self {
            rules: vec![true; program.rules_count()],
            tokens: vec![true; program.tokenizer().len()],
        }
    }

    pub fn watch_rule(&mut self, rule: RuleId) {
        set(&mut self.rules, rule.index());
    }

    pub fn watch_token(&mut self, token: TokenId) {
        set(&mut self.tokens, token.index());
    }

    #[inline]
    pub fn watches_rule(&self, rule: RuleId) -> bool {
        self.rules.get(rule.index()).copied().unwrap_or(false)
    }

    #[inline]
    pub fn watches_token(&self, token: TokenId) -> bool {
        self.tokens.get(token.index()).copied().unwrap_or(false)
    }
}

fn set(flags: &mut Vec<bool>, index: usize) {
    if flags.len() <= index {
        flags.resize(index + 1, false);
    }
    flags[index] = true;
}
