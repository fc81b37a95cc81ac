use super::lexer::{MetaKind, lex, occurrence_bounds};

fn snapshot(input: &str) -> String {
    let tokens = lex(input).expect("lex failed");
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!("{:?} {:?}\n", token.kind, token.text(input)));
    }
    out
}

#[test]
fn rule_with_group_and_quantifier() {
    insta::assert_snapshot!(snapshot("factor (ADD factor)?"), @r#"
    Id "factor"
    Open "("
    Id "ADD"
    Id "factor"
    Close ")"
    ZeroOne "?"
    "#);
}

#[test]
fn quantifiers_and_alternation() {
    insta::assert_snapshot!(snapshot("a* | b+ | c? d{2,4}"), @r#"
    Id "a"
    ZeroMany "*"
    Alt "|"
    Id "b"
    OneMany "+"
    Alt "|"
    Id "c"
    ZeroOne "?"
    Id "d"
    Occur "{2,4}"
    "#);
}

#[test]
fn separators_are_dropped() {
    insta::assert_snapshot!(snapshot(" a, b;\n\tc : d - e "), @r#"
    Id "a"
    Id "b"
    Id "c"
    Id "d"
    Id "e"
    "#);
}

#[test]
fn occurrence_forms() {
    let kinds: Vec<MetaKind> = lex("{3} {2:4} {2-4} { 1 , * }")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds, [MetaKind::Occur; 4]);

    assert_eq!(occurrence_bounds("{3}"), Some((3, Some(3))));
    assert_eq!(occurrence_bounds("{2:4}"), Some((2, Some(4))));
    assert_eq!(occurrence_bounds("{2-4}"), Some((2, Some(4))));
    assert_eq!(occurrence_bounds("{ 1 , * }"), Some((1, None)));
    assert_eq!(occurrence_bounds("{99999999999}"), None);
}

#[test]
fn identifiers_keep_underscores_and_digits() {
    insta::assert_snapshot!(snapshot("snake_case2 X1"), @r#"
    Id "snake_case2"
    Id "X1"
    "#);
}

#[test]
fn unexpected_character_offset() {
    assert_eq!(lex("a & b"), Err(2));
    assert_eq!(lex("_x"), Err(0));
}
