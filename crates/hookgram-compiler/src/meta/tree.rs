//! Grammar trees and the tree builder for rule bodies.
//!
//! There is no expression parser with precedence climbing here. Each
//! meta-token is turned into a fragment and inserted into a running root, and
//! the insertion rules alone give the fragments their relative precedence:
//!
//! ```text
//! Ref/Group  <  Occur  <  Seq  <  Alt
//! (tightest)                (loosest)
//! ```
//!
//! - a quantifier wraps the rightmost fragment whose precedence does not
//!   exceed `Occur`, descending through `Alt` and `Seq` last children;
//! - an adjacent fragment extends the rightmost `Seq`, or pairs with the
//!   rightmost tighter fragment into a new `Seq`;
//! - `|` lifts the root into an `Alt` and opens a fresh alternative, which the
//!   next fragment fills directly.
//!
//! Same-kind nodes are never nested: sequences extend in place and
//! alternatives append to the existing `Alt`.

use std::fmt;

use serde::Serialize;

use super::lexer::{MetaKind, MetaToken, lex, occurrence_bounds};
use crate::error::CompileError;

/// A node of a rule's grammar tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GrammarNode {
    /// Reference to a rule or token, resolved at compile time.
    Ref(String),
    /// Parenthesized fragment. Compiles to its child.
    Group(Box<GrammarNode>),
    /// Repetition with `min..=max` bounds; `None` is unbounded.
    Occur {
        min: u32,
        max: Option<u32>,
        child: Box<GrammarNode>,
    },
    Seq(Vec<GrammarNode>),
    Alt(Vec<GrammarNode>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Atom,
    Occur,
    Seq,
    Alt,
}

impl GrammarNode {
    fn precedence(&self) -> Precedence {
        match self {
            GrammarNode::Ref(_) | GrammarNode::Group(_) => Precedence::Atom,
            GrammarNode::Occur { .. } => Precedence::Occur,
            GrammarNode::Seq(_) => Precedence::Seq,
            GrammarNode::Alt(_) => Precedence::Alt,
        }
    }

    /// Place `fragment` right after `self`.
    fn sequence(self, fragment: GrammarNode) -> GrammarNode {
        if self.precedence() < Precedence::Seq {
            return GrammarNode::Seq(vec![self, fragment]);
        }
        match self {
            GrammarNode::Seq(mut children) => {
                children.push(fragment);
                GrammarNode::Seq(children)
            }
            GrammarNode::Alt(children) => {
                GrammarNode::Alt(map_last(children, |last| last.sequence(fragment)))
            }
            _ => unreachable!("only Seq and Alt bind looser than Occur"),
        }
    }

    /// Wrap the rightmost fragment in an occurrence.
    fn quantify(self, min: u32, max: Option<u32>) -> GrammarNode {
        if self.precedence() <= Precedence::Occur {
            return GrammarNode::Occur {
                min,
                max,
                child: Box::new(self),
            };
        }
        match self {
            GrammarNode::Seq(children) => {
                GrammarNode::Seq(map_last(children, |last| last.quantify(min, max)))
            }
            GrammarNode::Alt(children) => {
                GrammarNode::Alt(map_last(children, |last| last.quantify(min, max)))
            }
            _ => unreachable!("only Seq and Alt bind looser than Occur"),
        }
    }
}

/// Replace the last element of a non-empty child list.
fn map_last(
    mut children: Vec<GrammarNode>,
    f: impl FnOnce(GrammarNode) -> GrammarNode,
) -> Vec<GrammarNode> {
    let last = children
        .pop()
        .unwrap_or_else(|| panic!("Seq/Alt nodes always have children"));
    children.push(f(last));
    children
}

impl fmt::Display for GrammarNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarNode::Ref(name) => write!(f, "{name}"),
            GrammarNode::Group(child) => write!(f, "(group {child})"),
            GrammarNode::Occur { min, max, child } => match max {
                Some(max) => write!(f, "(occur {min} {max} {child})"),
                None => write!(f, "(occur {min} * {child})"),
            },
            GrammarNode::Seq(children) => write_list(f, "seq", children),
            GrammarNode::Alt(children) => write_list(f, "alt", children),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, head: &str, children: &[GrammarNode]) -> fmt::Result {
    write!(f, "({head}")?;
    for child in children {
        write!(f, " {child}")?;
    }
    write!(f, ")")
}

/// Running root of one nesting level (the whole body, or one group).
#[derive(Default)]
struct Level {
    root: Option<GrammarNode>,
    /// Offset of a `|` whose right-hand side has not been seen yet.
    open_alternative: Option<usize>,
}

impl Level {
    fn push(&mut self, fragment: GrammarNode) {
        let root = match (self.root.take(), self.open_alternative.take()) {
            (None, _) => fragment,
            (Some(GrammarNode::Alt(mut children)), Some(_)) => {
                children.push(fragment);
                GrammarNode::Alt(children)
            }
            (Some(root), _) => root.sequence(fragment),
        };
        self.root = Some(root);
    }

    fn quantify(&mut self, min: u32, max: Option<u32>) -> bool {
        if self.open_alternative.is_some() {
            return false;
        }
        let Some(root) = self.root.take() else {
            return false;
        };
        self.root = Some(root.quantify(min, max));
        true
    }

    fn alternate(&mut self, offset: usize) -> bool {
        if self.open_alternative.is_some() {
            return false;
        }
        let Some(root) = self.root.take() else {
            return false;
        };
        self.root = Some(match root {
            GrammarNode::Alt(children) => GrammarNode::Alt(children),
            other => GrammarNode::Alt(vec![other]),
        });
        self.open_alternative = Some(offset);
        true
    }
}

/// How a nesting level ended.
enum End {
    /// Ran out of tokens.
    Eof,
    /// Hit a `)` at the given offset.
    Close(usize),
}

struct TreeBuilder<'a> {
    rule: &'a str,
    body: &'a str,
    tokens: Vec<MetaToken>,
    pos: usize,
}

impl TreeBuilder<'_> {
    fn rule(&self) -> String {
        self.rule.to_owned()
    }

    /// Build one nesting level until `)` or end of input.
    fn level(&mut self) -> Result<(Option<GrammarNode>, End), CompileError> {
        let mut level = Level::default();

        while let Some(token) = self.tokens.get(self.pos).cloned() {
            self.pos += 1;
            let offset = token.span.start;

            match token.kind {
                MetaKind::Id => level.push(GrammarNode::Ref(token.text(self.body).to_owned())),
                MetaKind::Open => {
                    let group = self.group(offset)?;
                    level.push(GrammarNode::Group(Box::new(group)));
                }
                MetaKind::Close => {
                    return self.finish(level).map(|root| (root, End::Close(offset)));
                }
                MetaKind::Alt => {
                    if !level.alternate(offset) {
                        return Err(CompileError::DanglingAlternative {
                            rule: self.rule(),
                            offset,
                        });
                    }
                }
                MetaKind::ZeroOne | MetaKind::ZeroMany | MetaKind::OneMany | MetaKind::Occur => {
                    let (min, max) = self.bounds(&token)?;
                    if !level.quantify(min, max) {
                        return Err(CompileError::DanglingQuantifier {
                            rule: self.rule(),
                            offset,
                        });
                    }
                }
                MetaKind::Separator => {}
            }
        }

        self.finish(level).map(|root| (root, End::Eof))
    }

    fn group(&mut self, open: usize) -> Result<GrammarNode, CompileError> {
        match self.level()? {
            (Some(root), End::Close(_)) => Ok(root),
            (None, End::Close(_)) => Err(CompileError::EmptyGroup {
                rule: self.rule(),
                offset: open,
            }),
            (_, End::Eof) => Err(CompileError::UnbalancedGroup {
                rule: self.rule(),
                offset: open,
            }),
        }
    }

    fn finish(&self, level: Level) -> Result<Option<GrammarNode>, CompileError> {
        if let Some(offset) = level.open_alternative {
            return Err(CompileError::DanglingAlternative {
                rule: self.rule(),
                offset,
            });
        }
        Ok(level.root)
    }

    fn bounds(&self, token: &MetaToken) -> Result<(u32, Option<u32>), CompileError> {
        let bounds = match token.kind {
            MetaKind::ZeroOne => (0, Some(1)),
            MetaKind::ZeroMany => (0, None),
            MetaKind::OneMany => (1, None),
            _ => {
                let text = token.text(self.body);
                let invalid = || CompileError::InvalidOccurrence {
                    rule: self.rule(),
                    offset: token.span.start,
                    text: text.to_owned(),
                };
                let (min, max) = occurrence_bounds(text).ok_or_else(&invalid)?;
                if max.is_some_and(|max| min > max) {
                    return Err(invalid());
                }
                (min, max)
            }
        };
        Ok(bounds)
    }
}

/// Parse the body of rule `rule` into a grammar tree.
pub fn parse_rule(rule: &str, body: &str) -> Result<GrammarNode, CompileError> {
    let tokens = lex(body).map_err(|offset| CompileError::UnexpectedCharacter {
        rule: rule.to_owned(),
        offset,
    })?;
    if tokens.is_empty() {
        return Err(CompileError::EmptyRule {
            rule: rule.to_owned(),
        });
    }

    let mut builder = TreeBuilder {
        rule,
        body,
        tokens,
        pos: 0,
    };

    match builder.level()? {
        (Some(root), End::Eof) => Ok(root),
        (_, End::Close(offset)) => Err(CompileError::UnbalancedGroup {
            rule: rule.to_owned(),
            offset,
        }),
        (None, End::Eof) => Err(CompileError::EmptyRule {
            rule: rule.to_owned(),
        }),
    }
}
