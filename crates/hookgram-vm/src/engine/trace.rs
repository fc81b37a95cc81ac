//! Tracing infrastructure for debugging grammar execution.
//!
//! The engine is generic over its tracer. With [`NoopTracer`] every method is
//! an `#[inline(always)]` empty function and all tracer calls compile away.
//! [`PrintTracer`] resolves ids to names and collects one line per step.

use hookgram_compiler::{Program, RuleId};
use hookgram_lexer::{Token, TokenId};

/// Tracer trait for engine instrumentation.
///
/// Methods receive the raw ids and cursor positions the engine already has;
/// name resolution and formatting happen in the implementation.
pub trait Tracer {
    /// Called when a rule starts matching at `cursor`.
    fn trace_rule_enter(&mut self, rule: RuleId, cursor: usize);

    /// Called when a rule finishes, `cursor` being the position after it.
    fn trace_rule_exit(&mut self, rule: RuleId, cursor: usize, matched: bool);

    /// Called for every token test. `found` is `None` at end of input.
    fn trace_token(&mut self, expected: TokenId, cursor: usize, found: Option<&Token>, matched: bool);

    /// Called when a failed attempt rewinds the cursor.
    fn trace_backtrack(&mut self, from: usize, to: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_rule_enter(&mut self, _rule: RuleId, _cursor: usize) {}

    #[inline(always)]
    fn trace_rule_exit(&mut self, _rule: RuleId, _cursor: usize, _matched: bool) {}

    #[inline(always)]
    fn trace_token(
        &mut self,
        _expected: TokenId,
        _cursor: usize,
        _found: Option<&Token>,
        _matched: bool,
    ) {
    }

    #[inline(always)]
    fn trace_backtrack(&mut self, _from: usize, _to: usize) {}
}

/// Tracer that collects an indented, human-readable execution log.
///
/// ```text
/// > expression @0
///   > factor @0
///     + NUM "8" @0
///     - MUL @1 (found ADD)
///   < factor @1
/// ```
pub struct PrintTracer<'p> {
    program: &'p Program,
    lines: Vec<String>,
    depth: usize,
}

impl<'p> PrintTracer<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            lines: Vec::new(),
            depth: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All collected lines, newline-terminated.
    pub fn finish(self) -> String {
        let mut out = String::new();
        for line in self.lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn push(&mut self, line: String) {
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{line}"));
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_rule_enter(&mut self, rule: RuleId, cursor: usize) {
        self.push(format!("> {} @{cursor}", self.program.rule_name(rule)));
        self.depth += 1;
    }

    fn trace_rule_exit(&mut self, rule: RuleId, cursor: usize, matched: bool) {
        self.depth = self.depth.saturating_sub(1);
        let name = self.program.rule_name(rule);
        if matched {
            self.push(format!("< {name} @{cursor}"));
        } else {
            self.push(format!("! {name}"));
        }
    }

    fn trace_token(&mut self, expected: TokenId, cursor: usize, found: Option<&Token>, matched: bool) {
        let name = self.program.token_name(expected);
        let line = match found {
            Some(token) if matched => format!("+ {name} {:?} @{cursor}", token.text()),
            Some(token) => format!(
                "- {name} @{cursor} (found {})",
                self.program.token_name(token.id)
            ),
            None => format!("- {name} @{cursor} (end of input)"),
        };
        self.push(line);
    }

    fn trace_backtrack(&mut self, from: usize, to: usize) {
        self.push(format!("~ backtrack {from} -> {to}"));
    }
}
