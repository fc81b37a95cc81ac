use super::tree::{GrammarNode, parse_rule};
use crate::error::CompileError;

fn tree(body: &str) -> String {
    parse_rule("r", body).expect("parse failed").to_string()
}

fn error(body: &str) -> CompileError {
    parse_rule("r", body).expect_err("parse should fail")
}

#[test]
fn single_reference() {
    assert_eq!(tree("NUM"), "NUM");
}

#[test]
fn adjacent_fragments_form_one_sequence() {
    assert_eq!(tree("A B C"), "(seq A B C)");
}

#[test]
fn alternation_binds_loosest() {
    assert_eq!(tree("A | B C | D"), "(alt A (seq B C) D)");
    assert_eq!(tree("A B | C"), "(alt (seq A B) C)");
}

#[test]
fn quantifier_binds_to_preceding_fragment() {
    assert_eq!(tree("A B*"), "(seq A (occur 0 * B))");
    assert_eq!(tree("A B* | C+"), "(alt (seq A (occur 0 * B)) (occur 1 * C))");
    assert_eq!(tree("A? B"), "(seq (occur 0 1 A) B)");
}

#[test]
fn group_is_atomic() {
    assert_eq!(tree("(A | B) C"), "(seq (group (alt A B)) C)");
    assert_eq!(tree("A (B C)? D"), "(seq A (occur 0 1 (group (seq B C))) D)");
    assert_eq!(tree("((A))"), "(group (group A))");
}

#[test]
fn explicit_bounds() {
    assert_eq!(tree("A{2,4}"), "(occur 2 4 A)");
    assert_eq!(tree("A{3}"), "(occur 3 3 A)");
    assert_eq!(tree("A{1-*}"), "(occur 1 * A)");
    assert_eq!(tree("A{ 0 : 2 }"), "(occur 0 2 A)");
}

#[test]
fn stacked_quantifiers_wrap_outward() {
    assert_eq!(tree("A*?"), "(occur 0 1 (occur 0 * A))");
}

#[test]
fn separators_between_items() {
    assert_eq!(tree("A, B; C"), "(seq A B C)");
}

#[test]
fn tree_structure() {
    let node = parse_rule("expression", "factor (ADD factor)?").unwrap();

    assert_eq!(
        node,
        GrammarNode::Seq(vec![
            GrammarNode::Ref("factor".into()),
            GrammarNode::Occur {
                min: 0,
                max: Some(1),
                child: Box::new(GrammarNode::Group(Box::new(GrammarNode::Seq(vec![
                    GrammarNode::Ref("ADD".into()),
                    GrammarNode::Ref("factor".into()),
                ])))),
            },
        ])
    );
}

#[test]
fn serialized_tree() {
    let node = parse_rule("r", "A B?").unwrap();
    let json = serde_json::to_string(&node).unwrap();

    insta::assert_snapshot!(json, @r#"{"Seq":[{"Ref":"A"},{"Occur":{"min":0,"max":1,"child":{"Ref":"B"}}}]}"#);
}

#[test]
fn empty_rule() {
    assert_eq!(error(""), CompileError::EmptyRule { rule: "r".into() });
    assert_eq!(error("  ,; "), CompileError::EmptyRule { rule: "r".into() });
}

#[test]
fn unbalanced_groups() {
    assert_eq!(
        error("A (B"),
        CompileError::UnbalancedGroup {
            rule: "r".into(),
            offset: 2
        }
    );
    assert_eq!(
        error("A) B"),
        CompileError::UnbalancedGroup {
            rule: "r".into(),
            offset: 1
        }
    );
}

#[test]
fn empty_group() {
    assert_eq!(
        error("A ()"),
        CompileError::EmptyGroup {
            rule: "r".into(),
            offset: 2
        }
    );
}

#[test]
fn dangling_quantifiers() {
    assert!(matches!(
        error("* A"),
        CompileError::DanglingQuantifier { offset: 0, .. }
    ));
    assert!(matches!(
        error("A | ?"),
        CompileError::DanglingQuantifier { offset: 4, .. }
    ));
    assert!(matches!(
        error("({2,3})"),
        CompileError::DanglingQuantifier { offset: 1, .. }
    ));
}

#[test]
fn dangling_alternatives() {
    assert!(matches!(
        error("| A"),
        CompileError::DanglingAlternative { offset: 0, .. }
    ));
    assert!(matches!(
        error("A | | B"),
        CompileError::DanglingAlternative { offset: 4, .. }
    ));
    assert!(matches!(
        error("A |"),
        CompileError::DanglingAlternative { offset: 2, .. }
    ));
    assert!(matches!(
        error("(A |) B"),
        CompileError::DanglingAlternative { offset: 3, .. }
    ));
}

#[test]
fn invalid_occurrences() {
    assert_eq!(
        error("A{4,2}"),
        CompileError::InvalidOccurrence {
            rule: "r".into(),
            offset: 1,
            text: "{4,2}".into()
        }
    );
    assert!(matches!(
        error("A{99999999999}"),
        CompileError::InvalidOccurrence { .. }
    ));
}

#[test]
fn unexpected_character() {
    assert_eq!(
        error("A & B"),
        CompileError::UnexpectedCharacter {
            rule: "r".into(),
            offset: 2
        }
    );
}
