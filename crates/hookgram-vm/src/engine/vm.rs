//! Backtracking executor for compiled matchers.

use hookgram_compiler::{Matcher, Program, RuleId};
use hookgram_lexer::TokenId;

use super::chain::HookEvent;
use super::context::{Checkpoint, ParseContext};
use super::error::RuntimeError;
use super::mask::HookMask;
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for a parse.
#[derive(Clone, Copy, Debug)]
pub struct Limits {
    /// Maximum total matcher steps (default: 10,000,000).
    pub(crate) exec_fuel: u32,
    /// Maximum rule nesting depth (default: 1,024).
    pub(crate) recursion_limit: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            exec_fuel: 10_000_000,
            recursion_limit: 1024,
        }
    }
}

impl Limits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Executes one program with one hook mask. Holds no per-parse state, so a
/// single engine can run any number of parses, concurrently if shared.
#[derive(Clone, Copy, Debug)]
pub struct Engine<'p> {
    program: &'p Program,
    mask: &'p HookMask,
    limits: Limits,
}

/// Builder for [`Engine`] instances.
pub struct EngineBuilder<'p> {
    program: &'p Program,
    mask: &'p HookMask,
    limits: Limits,
}

impl<'p> EngineBuilder<'p> {
    pub fn new(program: &'p Program, mask: &'p HookMask) -> Self {
        Self {
            program,
            mask,
            limits: Limits::default(),
        }
    }

    /// Set the runtime limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    pub fn build(self) -> Engine<'p> {
        Engine {
            program: self.program,
            mask: self.mask,
            limits: self.limits,
        }
    }
}

impl<'p> Engine<'p> {
    pub fn builder(program: &'p Program, mask: &'p HookMask) -> EngineBuilder<'p> {
        EngineBuilder::new(program, mask)
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Match `rule` from the first token.
    ///
    /// A match may stop before the end of the token array; check
    /// [`ParseContext::eof`] afterwards for full consumption. On success the
    /// context's chain holds the hook events of the accepted parse, every rule
    /// event closed.
    pub fn run(&self, ctx: &mut ParseContext, rule: RuleId) -> Result<bool, RuntimeError> {
        self.run_traced(ctx, rule, &mut NoopTracer)
    }

    /// [`run`](Self::run) with a tracer observing every step.
    pub fn run_traced<T: Tracer>(
        &self,
        ctx: &mut ParseContext,
        rule: RuleId,
        tracer: &mut T,
    ) -> Result<bool, RuntimeError> {
        ctx.reset(self.limits);
        self.exec_rule(rule, ctx, tracer)
    }

    /// Try `matcher` at the current cursor.
    ///
    /// On failure the cursor and hook chain are exactly as they were before
    /// the call.
    pub fn exec<T: Tracer>(
        &self,
        matcher: &Matcher,
        ctx: &mut ParseContext,
        tracer: &mut T,
    ) -> Result<bool, RuntimeError> {
        ctx.burn_fuel()?;
        match matcher {
            Matcher::Token(id) => Ok(self.exec_token(*id, ctx, tracer)),
            Matcher::Rule(id) => self.exec_rule(*id, ctx, tracer),
            Matcher::Sequence(children) => self.exec_sequence(children, ctx, tracer),
            Matcher::Alternation(children) => self.exec_alternation(children, ctx, tracer),
            Matcher::Occurrence { child, min, max } => {
                self.exec_occurrence(child, *min, *max, ctx, tracer)
            }
        }
    }

    fn exec_token<T: Tracer>(&self, id: TokenId, ctx: &mut ParseContext, tracer: &mut T) -> bool {
        let cursor = ctx.cursor();
        let found = ctx.peek();
        let matched = found.is_some_and(|token| token.id == id);
        tracer.trace_token(id, cursor, found, matched);
        if !matched {
            return false;
        }

        ctx.next();
        if self.mask.watches_token(id) {
            ctx.chain_mut().push(HookEvent::token(id, cursor));
        }
        true
    }

    fn exec_rule<T: Tracer>(
        &self,
        id: RuleId,
        ctx: &mut ParseContext,
        tracer: &mut T,
    ) -> Result<bool, RuntimeError> {
        ctx.enter_rule(self.limits.recursion_limit)?;
        tracer.trace_rule_enter(id, ctx.cursor());

        let matcher = &self.program.rule(id).matcher;
        let matched = if self.mask.watches_rule(id) {
            let checkpoint = ctx.checkpoint();
            let slot = ctx.chain_mut().open(id, checkpoint.cursor);
            if self.exec(matcher, ctx, tracer)? {
                let end = ctx.cursor();
                ctx.chain_mut().close(slot, end);
                true
            } else {
                self.backtrack(ctx, checkpoint, tracer);
                false
            }
        } else {
            self.exec(matcher, ctx, tracer)?
        };

        ctx.leave_rule();
        tracer.trace_rule_exit(id, ctx.cursor(), matched);
        Ok(matched)
    }

    fn exec_sequence<T: Tracer>(
        &self,
        children: &[Matcher],
        ctx: &mut ParseContext,
        tracer: &mut T,
    ) -> Result<bool, RuntimeError> {
        let checkpoint = ctx.checkpoint();
        for child in children {
            if !self.exec(child, ctx, tracer)? {
                self.backtrack(ctx, checkpoint, tracer);
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn exec_alternation<T: Tracer>(
        &self,
        children: &[Matcher],
        ctx: &mut ParseContext,
        tracer: &mut T,
    ) -> Result<bool, RuntimeError> {
        let checkpoint = ctx.checkpoint();
        for child in children {
            if self.exec(child, ctx, tracer)? {
                return Ok(true);
            }
            self.backtrack(ctx, checkpoint, tracer);
        }
        Ok(false)
    }

    /// Greedy: takes as many repetitions as possible and never gives any
    /// back to let a following matcher succeed.
    fn exec_occurrence<T: Tracer>(
        &self,
        child: &Matcher,
        min: u32,
        max: Option<u32>,
        ctx: &mut ParseContext,
        tracer: &mut T,
    ) -> Result<bool, RuntimeError> {
        let start = ctx.checkpoint();
        let mut count: u32 = 0;

        while max.is_none_or(|max| count < max) {
            let before = ctx.checkpoint();
            if !self.exec(child, ctx, tracer)? {
                break;
            }
            count += 1;
            if ctx.cursor() == before.cursor {
                // A repetition that consumed nothing would repeat forever;
                // it stands in for every remaining one.
                count = count.max(min);
                break;
            }
        }

        if count < min {
            self.backtrack(ctx, start, tracer);
            return Ok(false);
        }
        Ok(true)
    }

    fn backtrack<T: Tracer>(&self, ctx: &mut ParseContext, checkpoint: Checkpoint, tracer: &mut T) {
        if ctx.cursor() != checkpoint.cursor {
            tracer.trace_backtrack(ctx.cursor(), checkpoint.cursor);
        }
        ctx.restore(checkpoint);
    }
}
