use hookgram_compiler::Program;
use hookgram_lexer::Token;
use hookgram_vm::{HookEvent, HookSink};

/// Renders a replayed parse as an indented tree, two spaces per level.
pub(crate) struct DebugPrinter<'p> {
    program: &'p Program,
    depth: usize,
    out: String,
}

impl<'p> DebugPrinter<'p> {
    pub(crate) fn new(program: &'p Program) -> Self {
        Self {
            program,
            depth: 0,
            out: String::new(),
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}

impl HookSink for DebugPrinter<'_> {
    fn enter(&mut self, event: &HookEvent) {
        if let Some(rule) = event.rule() {
            let name = self.program.rule_name(rule);
            self.line(name);
        }
        self.depth += 1;
    }

    fn exit(&mut self, _event: &HookEvent) {
        self.depth -= 1;
    }

    fn token(&mut self, _event: &HookEvent, token: &Token) {
        let line = format!("{} {:?}", self.program.token_name(token.id), token.text());
        self.line(&line);
    }
}
