//! Human-readable dump of a compiled program.
//!
//! One line per rule, in declaration order:
//!
//! ```text
//! expression = (seq <factor> (occur 0 1 (seq ADD <factor>)))
//! atom = (alt NUM <bloc>)
//! ```
//!
//! Rule references are written `<name>`, tokens by their bare name.

use std::fmt::Write as _;

use crate::compile::{Matcher, Program};

impl Program {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (_, rule) in self.rules() {
            out.push_str(&rule.name);
            out.push_str(" = ");
            self.write_matcher(&mut out, &rule.matcher);
            out.push('\n');
        }
        out
    }

    /// Render a single matcher.
    pub fn format_matcher(&self, matcher: &Matcher) -> String {
        let mut out = String::new();
        self.write_matcher(&mut out, matcher);
        out
    }

    fn write_matcher(&self, out: &mut String, matcher: &Matcher) {
        match matcher {
            Matcher::Token(id) => out.push_str(self.token_name(*id)),
            Matcher::Rule(id) => {
                let _ = write!(out, "<{}>", self.rule_name(*id));
            }
            Matcher::Sequence(children) => self.write_list(out, "seq", children),
            Matcher::Alternation(children) => self.write_list(out, "alt", children),
            Matcher::Occurrence { child, min, max } => {
                match max {
                    Some(max) => {
                        let _ = write!(out, "(occur {min} {max} ");
                    }
                    None => {
                        let _ = write!(out, "(occur {min} * ");
                    }
                }
                self.write_matcher(out, child);
                out.push(')');
            }
        }
    }

    fn write_list(&self, out: &mut String, head: &str, children: &[Matcher]) {
        out.push('(');
        out.push_str(head);
        for child in children {
            out.push(' ');
            self.write_matcher(out, child);
        }
        out.push(')');
    }
}
