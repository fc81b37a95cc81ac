//! Grammar construction and the parse entry points.

use std::fmt;
use std::fmt::Write as _;

use hookgram_compiler::{Program, RuleId};
use hookgram_lexer::{Token, Tokenizer};
use hookgram_vm::{
    Engine, HookEvent, HookMask, HookSink, Limits, ParseContext, PrintTracer, dispatch,
};

use crate::debug::DebugPrinter;
use crate::{Error, Result};

/// Which side of a rule's span a rule hook is called for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visit {
    /// Before anything the rule covers.
    Enter,
    /// After everything the rule covers.
    Exit,
}

/// What a hook is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    Rule,
    Token,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::Rule => f.write_str("rule"),
            HookKind::Token => f.write_str("token"),
        }
    }
}

type RuleHook<C> = Box<dyn Fn(&mut C, Visit, &HookEvent) + Send + Sync>;
type TokenHook<C> = Box<dyn Fn(&mut C, &str, &HookEvent) + Send + Sync>;

/// How far a parse got.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Whether the rule matched.
    pub matched: bool,
    /// Index of the first token not consumed; 0 when nothing matched.
    pub cursor: usize,
    /// Length of the token array.
    pub tokens: usize,
}

impl ParseOutcome {
    fn of(parse: &ParseContext, matched: bool) -> Self {
        Self {
            matched,
            cursor: parse.cursor(),
            tokens: parse.tokens().len(),
        }
    }

    /// Whether every token was consumed.
    pub fn eof(&self) -> bool {
        self.cursor >= self.tokens
    }

    /// Matched and consumed every token.
    pub fn is_complete(&self) -> bool {
        self.matched && self.eof()
    }
}

/// Builder for [`Grammar`] instances.
///
/// Tokens and rules keep their declaration order: the first token pattern
/// that matches wins, and the first rule is the default start rule.
pub struct GrammarBuilder<C> {
    tokens: Vec<(String, String)>,
    rules: Vec<(String, String)>,
    ignore: Vec<String>,
    rule_hooks: Vec<(String, RuleHook<C>)>,
    token_hooks: Vec<(String, TokenHook<C>)>,
    limits: Limits,
}

impl<C> Default for GrammarBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> GrammarBuilder<C> {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            rules: Vec::new(),
            ignore: Vec::new(),
            rule_hooks: Vec::new(),
            token_hooks: Vec::new(),
            limits: Limits::default(),
        }
    }

    /// Declare a token. `pattern` is matched at the start of the remaining
    /// input.
    pub fn token(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.tokens.push((name.into(), pattern.into()));
        self
    }

    /// Declare several tokens, in order.
    pub fn tokens<I, N, P>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<String>,
    {
        self.tokens.extend(
            tokens
                .into_iter()
                .map(|(name, pattern)| (name.into(), pattern.into())),
        );
        self
    }

    pub fn rule(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.rules.push((name.into(), body.into()));
        self
    }

    /// Declare several rules, in order.
    pub fn rules<I, N, B>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: Into<String>,
    {
        self.rules.extend(
            rules
                .into_iter()
                .map(|(name, body)| (name.into(), body.into())),
        );
        self
    }

    /// Drop tokens of this kind before parsing.
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignore.push(name.into());
        self
    }

    /// Bind a hook called on entering and exiting every matched `name` rule.
    ///
    /// Binding a name twice keeps the last hook. Names that are neither a
    /// rule nor a token are ignored.
    pub fn on_rule<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut C, Visit, &HookEvent) + Send + Sync + 'static,
    {
        self.rule_hooks.push((name.into(), Box::new(hook)));
        self
    }

    /// Bind a hook called with the text of every consumed `name` token.
    pub fn on_token<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut C, &str, &HookEvent) + Send + Sync + 'static,
    {
        self.token_hooks.push((name.into(), Box::new(hook)));
        self
    }

    /// Set the runtime limits of every parse.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> Result<Grammar<C>> {
        let tokenizer = Tokenizer::new(self.tokens)?;
        for name in &self.ignore {
            if tokenizer.id(name).is_none() {
                return Err(Error::UnknownIgnoredToken(name.clone()));
            }
        }

        let program = Program::compile(self.rules, tokenizer)?;
        let mut mask = HookMask::none();

        let mut rule_hooks: Vec<Option<RuleHook<C>>> = Vec::new();
        rule_hooks.resize_with(program.rules_count(), || None);
        for (name, hook) in self.rule_hooks {
            if let Some(id) = program.rule_id(&name) {
                mask.watch_rule(id);
                rule_hooks[id.index()] = Some(hook);
            } else if program.tokenizer().id(&name).is_some() {
                return Err(Error::HookKindMismatch {
                    name,
                    hook: HookKind::Rule,
                    actual: HookKind::Token,
                });
            }
        }

        let mut token_hooks: Vec<Option<TokenHook<C>>> = Vec::new();
        token_hooks.resize_with(program.tokenizer().len(), || None);
        for (name, hook) in self.token_hooks {
            // Rules shadow tokens in rule bodies, so a rule of the same name
            // makes the token unreachable.
            if program.rule_id(&name).is_some() {
                return Err(Error::HookKindMismatch {
                    name,
                    hook: HookKind::Token,
                    actual: HookKind::Rule,
                });
            }
            if let Some(id) = program.tokenizer().id(&name) {
                mask.watch_token(id);
                token_hooks[id.index()] = Some(hook);
            }
        }

        Ok(Grammar {
            program,
            ignore: self.ignore,
            mask,
            rule_hooks,
            token_hooks,
            limits: self.limits,
        })
    }
}

/// A compiled grammar with its hook table.
///
/// Immutable once built. Every parse runs on its own tokenizer clone and
/// [`ParseContext`], so one grammar can serve concurrent parses.
pub struct Grammar<C> {
    program: Program,
    ignore: Vec<String>,
    mask: HookMask,
    rule_hooks: Vec<Option<RuleHook<C>>>,
    token_hooks: Vec<Option<TokenHook<C>>>,
    limits: Limits,
}

impl<C> fmt::Debug for Grammar<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("program", &self.program)
            .field("ignore", &self.ignore)
            .field("mask", &self.mask)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl<C> Grammar<C> {
    pub fn builder() -> GrammarBuilder<C> {
        GrammarBuilder::new()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Name of the default start rule.
    pub fn start_rule(&self) -> &str {
        self.program.rule_name(self.program.start())
    }

    /// The token array a parse of `source` runs on, ignored tokens removed.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>> {
        let mut tokenizer = self.program.tokenizer().clone();
        tokenizer.load_text(source);
        Ok(tokenizer.all(&self.ignore)?)
    }

    /// Match `source` against `rule` (the start rule if `None`) and replay
    /// the accepted parse into the hooks with `ctx`.
    ///
    /// The match may stop before the last token; the outcome tells how far it
    /// got. When it does not match, no hook has been called.
    pub fn parse(&self, source: &str, ctx: &mut C, rule: Option<&str>) -> Result<ParseOutcome> {
        let start = self.resolve(rule)?;
        let mut parse = ParseContext::new(self.tokenize(source)?);
        let matched = self.engine(&self.mask).run(&mut parse, start)?;
        let outcome = ParseOutcome::of(&parse, matched);
        if !matched {
            return Ok(outcome);
        }

        let (tokens, chain) = parse.into_parts();
        let mut sink = HookInvoker { grammar: self, ctx };
        dispatch(chain.as_slice(), &tokens, &mut sink);
        Ok(outcome)
    }

    /// [`parse`](Self::parse), reduced to whether `rule` matched.
    ///
    /// `Ok(true)` does not imply every token was consumed; use
    /// [`parse`](Self::parse) and [`ParseOutcome::eof`], or
    /// [`matches`](Self::matches), for that.
    pub fn parse_text(&self, source: &str, ctx: &mut C, rule: Option<&str>) -> Result<bool> {
        Ok(self.parse(source, ctx, rule)?.matched)
    }

    /// Whether `rule` matches all of `source`, without calling any hook.
    pub fn matches(&self, source: &str, rule: Option<&str>) -> Result<bool> {
        let start = self.resolve(rule)?;
        let mut parse = ParseContext::new(self.tokenize(source)?);
        let mask = HookMask::none();
        let matched = self.engine(&mask).run(&mut parse, start)?;
        Ok(ParseOutcome::of(&parse, matched).is_complete())
    }

    /// Indented rendering of the accepted parse with every rule and token
    /// shown, or `None` if `rule` does not match.
    ///
    /// ```text
    /// expression
    ///   factor
    ///     atom
    ///       NUM "8"
    ///   ADD "+"
    /// ```
    pub fn debug_text(&self, source: &str, rule: Option<&str>) -> Result<Option<String>> {
        let start = self.resolve(rule)?;
        let mut parse = ParseContext::new(self.tokenize(source)?);
        let mask = HookMask::all(&self.program);
        if !self.engine(&mask).run(&mut parse, start)? {
            return Ok(None);
        }

        let (tokens, chain) = parse.into_parts();
        let mut printer = DebugPrinter::new(&self.program);
        dispatch(chain.as_slice(), &tokens, &mut printer);
        Ok(Some(printer.finish()))
    }

    /// Step-by-step engine trace of parsing `source`, ending with the verdict.
    pub fn trace_text(&self, source: &str, rule: Option<&str>) -> Result<String> {
        let start = self.resolve(rule)?;
        let mut parse = ParseContext::new(self.tokenize(source)?);
        let mut tracer = PrintTracer::new(&self.program);
        let matched = self
            .engine(&self.mask)
            .run_traced(&mut parse, start, &mut tracer)?;

        let outcome = ParseOutcome::of(&parse, matched);
        let mut out = tracer.finish();
        if outcome.is_complete() {
            out.push_str("accepted\n");
        } else if outcome.matched {
            let _ = writeln!(
                out,
                "accepted, stopped at @{} of {} tokens",
                outcome.cursor, outcome.tokens
            );
        } else {
            out.push_str("rejected\n");
        }
        Ok(out)
    }

    fn resolve(&self, rule: Option<&str>) -> Result<RuleId> {
        match rule {
            None => Ok(self.program.start()),
            Some(name) => self
                .program
                .rule_id(name)
                .ok_or_else(|| Error::UnknownRule(name.to_owned())),
        }
    }

    fn engine<'g>(&'g self, mask: &'g HookMask) -> Engine<'g> {
        Engine::builder(&self.program, mask)
            .limits(self.limits)
            .build()
    }
}

/// Routes replayed events to the grammar's hooks.
struct HookInvoker<'g, 'c, C> {
    grammar: &'g Grammar<C>,
    ctx: &'c mut C,
}

impl<C> HookInvoker<'_, '_, C> {
    fn visit(&mut self, event: &HookEvent, visit: Visit) {
        let grammar = self.grammar;
        let hook = event
            .rule()
            .and_then(|rule| grammar.rule_hooks.get(rule.index()))
            .and_then(Option::as_ref);
        if let Some(hook) = hook {
            hook(self.ctx, visit, event);
        }
    }
}

impl<C> HookSink for HookInvoker<'_, '_, C> {
    fn enter(&mut self, event: &HookEvent) {
        self.visit(event, Visit::Enter);
    }

    fn exit(&mut self, event: &HookEvent) {
        self.visit(event, Visit::Exit);
    }

    fn token(&mut self, event: &HookEvent, token: &Token) {
        let grammar = self.grammar;
        if let Some(hook) = grammar
            .token_hooks
            .get(token.id.index())
            .and_then(Option::as_ref)
        {
            hook(self.ctx, token.text(), event);
        }
    }
}
