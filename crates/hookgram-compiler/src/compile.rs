//! Lowering of grammar trees into matchers.
//!
//! Identifiers are resolved once, here: a name is a rule if the grammar
//! declares a rule of that name, otherwise a token. Rule references are kept
//! as [`RuleId`]s into the program's rule table and looked up when executed,
//! so forward, recursive and mutually recursive references need no fixup
//! pass and the matcher graph holds no cycles.

use std::fmt;

use hookgram_lexer::{TokenId, Tokenizer};
use indexmap::{IndexMap, IndexSet};

use crate::error::CompileError;
use crate::meta::{GrammarNode, parse_rule};

/// Index of a rule, in declaration order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Executable form of a grammar node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Consume one token of this kind.
    Token(TokenId),
    /// Run the named rule's matcher, looked up in the rule table.
    Rule(RuleId),
    Sequence(Vec<Matcher>),
    /// Ordered choice: the first child that matches wins.
    Alternation(Vec<Matcher>),
    /// Greedy repetition, `min..=max` times; `None` is unbounded.
    Occurrence {
        child: Box<Matcher>,
        min: u32,
        max: Option<u32>,
    },
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub body: String,
    pub tree: GrammarNode,
    pub matcher: Matcher,
}

/// Compile one grammar tree.
///
/// `rules` holds every rule name of the grammar, so references to rules that
/// have not been compiled yet resolve too.
pub fn compile(
    rule: &str,
    tree: &GrammarNode,
    rules: &IndexSet<String>,
    tokens: &Tokenizer,
) -> Result<Matcher, CompileError> {
    let matcher = match tree {
        GrammarNode::Ref(name) => {
            if let Some(index) = rules.get_index_of(name) {
                Matcher::Rule(RuleId::from_index(index))
            } else if let Some(id) = tokens.id(name) {
                Matcher::Token(id)
            } else {
                return Err(CompileError::UnknownRuleOrToken {
                    rule: rule.to_owned(),
                    name: name.clone(),
                });
            }
        }
        GrammarNode::Group(child) => compile(rule, child, rules, tokens)?,
        GrammarNode::Occur { min, max, child } => Matcher::Occurrence {
            child: Box::new(compile(rule, child, rules, tokens)?),
            min: *min,
            max: *max,
        },
        GrammarNode::Seq(children) => Matcher::Sequence(
            children
                .iter()
                .map(|child| compile(rule, child, rules, tokens))
                .collect::<Result<_, _>>()?,
        ),
        GrammarNode::Alt(children) => Matcher::Alternation(
            children
                .iter()
                .map(|child| compile(rule, child, rules, tokens))
                .collect::<Result<_, _>>()?,
        ),
    };
    Ok(matcher)
}

/// A compiled grammar: the rule table plus the tokenizer its tokens come from.
///
/// Immutable once built and shared by every parse.
#[derive(Debug, Clone)]
pub struct Program {
    rules: IndexMap<String, Rule>,
    tokenizer: Tokenizer,
}

impl Program {
    /// Compile `(name, body)` rules in declaration order. The first rule is
    /// the default start rule.
    pub fn compile<I, N, B>(rules: I, tokenizer: Tokenizer) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: Into<String>,
    {
        let sources: Vec<(String, String)> = rules
            .into_iter()
            .map(|(name, body)| (name.into(), body.into()))
            .collect();
        if sources.is_empty() {
            return Err(CompileError::NoRules);
        }

        let mut names = IndexSet::with_capacity(sources.len());
        for (name, _) in &sources {
            if !names.insert(name.clone()) {
                return Err(CompileError::DuplicateRule { name: name.clone() });
            }
        }

        let mut table = IndexMap::with_capacity(sources.len());
        for (name, body) in sources {
            let tree = parse_rule(&name, &body)?;
            let matcher = compile(&name, &tree, &names, &tokenizer)?;
            table.insert(
                name.clone(),
                Rule {
                    name,
                    body,
                    tree,
                    matcher,
                },
            );
        }

        Ok(Self {
            rules: table,
            tokenizer,
        })
    }

    /// The first declared rule.
    pub fn start(&self) -> RuleId {
        RuleId::from_index(0)
    }

    pub fn rule_id(&self, name: &str) -> Option<RuleId> {
        self.rules.get_index_of(name).map(RuleId::from_index)
    }

    /// Panics if `id` does not come from this program.
    pub fn rule(&self, id: RuleId) -> &Rule {
        self.rules
            .get_index(id.index())
            .map(|(_, rule)| rule)
            .unwrap_or_else(|| panic!("rule id {id} out of range"))
    }

    pub fn rule_name(&self, id: RuleId) -> &str {
        &self.rule(id).name
    }

    pub fn token_name(&self, id: TokenId) -> &str {
        self.tokenizer.name(id)
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules
            .values()
            .enumerate()
            .map(|(index, rule)| (RuleId::from_index(index), rule))
    }

    pub fn rules_count(&self) -> usize {
        self.rules.len()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }
}
