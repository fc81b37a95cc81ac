//! Parse engine for compiled hookgram grammars.
//!
//! This crate executes a compiled [`Program`](hookgram_compiler::Program)
//! against a token array, producing a hook chain that the dispatcher replays
//! into nested enter/exit callbacks.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    Checkpoint, Engine, EngineBuilder, EventId, HookChain, HookEvent, HookMask, HookSink, Limits,
    NoopTracer, ParseContext, PrintTracer, RuntimeError, Tracer, dispatch,
};
