//! Replay of a hook chain as nested enter/exit callbacks.
//!
//! The chain is ordered by `begin`, and the rule events opened by an
//! accepted parse nest by their spans. Walking it with a stack of open rule
//! events is enough to recover the nesting: before an event starting at `b`
//! is handled, every open rule that ends at or before `b` is exited.

use hookgram_lexer::Token;

use super::chain::{EventId, HookEvent};

/// Receiver of replayed hook events.
pub trait HookSink {
    /// A watched rule is entered. Tokens and rules it covers follow.
    fn enter(&mut self, event: &HookEvent);

    /// The most recently entered, still open rule is done.
    fn exit(&mut self, event: &HookEvent);

    /// A watched token was consumed.
    fn token(&mut self, event: &HookEvent, token: &Token);
}

/// Replay `chain` of an accepted parse over `tokens` into `sink`.
///
/// A rule whose span is empty exits as soon as the next event starts at the
/// same index, so empty rules never enclose anything.
///
/// Panics if a rule event was never closed or a token event points past
/// `tokens`; neither can come out of a successful parse.
pub fn dispatch<S: HookSink + ?Sized>(chain: &[HookEvent], tokens: &[Token], sink: &mut S) {
    let mut open: Vec<&HookEvent> = Vec::new();

    for event in chain {
        while let Some(&top) = open.last() {
            if rule_end(top) > event.begin {
                break;
            }
            open.pop();
            sink.exit(top);
        }

        match event.id {
            EventId::Rule(_) => {
                rule_end(event);
                sink.enter(event);
                open.push(event);
            }
            EventId::Token(_) => {
                let token = tokens.get(event.begin).unwrap_or_else(|| {
                    panic!(
                        "token event at {} is past the end of {} tokens",
                        event.begin,
                        tokens.len()
                    )
                });
                sink.token(event, token);
            }
        }
    }

    while let Some(top) = open.pop() {
        sink.exit(top);
    }
}

fn rule_end(event: &HookEvent) -> usize {
    event
        .end
        .unwrap_or_else(|| panic!("rule event at {} was never closed", event.begin))
}
