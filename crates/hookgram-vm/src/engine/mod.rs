//! Runtime engine for executing compiled grammars.
//!
//! Matchers run against a [`ParseContext`] holding the token array, a single
//! cursor and the hook chain. Every matcher that can fail after partially
//! succeeding records a [`Checkpoint`] before trying and restores it on
//! failure, which rewinds the cursor and truncates the hook chain together.

mod chain;
mod context;
mod dispatch;
mod error;
mod mask;
mod trace;
mod vm;


pub use chain::{EventId, HookChain, HookEvent};
pub use context::{Checkpoint, ParseContext};
pub use dispatch::{HookSink, dispatch};
pub use error::RuntimeError;
pub use mask::HookMask;
pub use trace::{NoopTracer, PrintTracer, Tracer};
pub use vm::{Engine, EngineBuilder, Limits};
