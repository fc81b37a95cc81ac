use proptest::prelude::*;

use crate::{LexError, Tokenizer};

fn arithmetic() -> Tokenizer {
    Tokenizer::new([
        ("NUM", "[0-9]+"),
        ("ADD", r"\+"),
        ("MUL", r"\*"),
        ("SPC", "[ \t]+"),
    ])
    .expect("valid definitions")
}

fn snapshot(mut lexer: Tokenizer, input: &str, ignore: &[&str]) -> String {
    lexer.load_text(input);
    let tokens = lexer.all(ignore).expect("tokenize failed");
    let mut out = String::new();
    for token in &tokens {
        out.push_str(&format!("{} {:?}\n", lexer.name(token.id), token.text()));
    }
    out
}

fn ids(lexer: &Tokenizer, tokens: &[crate::Token]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| lexer.name(t.id).to_owned())
        .collect()
}

#[test]
fn arithmetic_ignoring_spaces() {
    let mut lexer = arithmetic();
    lexer.load_text("57 + 3 * 21");
    let tokens = lexer.all(&["SPC"]).unwrap();

    assert_eq!(ids(&lexer, &tokens), ["NUM", "ADD", "NUM", "MUL", "NUM"]);
}

#[test]
fn arithmetic_with_spaces() {
    insta::assert_snapshot!(snapshot(arithmetic(), "  57 + 3", &[]), @r#"
    SPC "  "
    NUM "57"
    SPC " "
    ADD "+"
    SPC " "
    NUM "3"
    "#);
}

#[test]
fn next_walks_tokens_then_reports_end() {
    let mut lexer = arithmetic();
    lexer.load_text("1+2");

    let first = lexer.next().unwrap().unwrap();
    assert_eq!(lexer.name(first.id), "NUM");
    assert_eq!((first.begin, first.end), (0, 1));
    assert_eq!(lexer.text(&first), "1");

    let second = lexer.next().unwrap().unwrap();
    assert_eq!(lexer.name(second.id), "ADD");

    let third = lexer.next().unwrap().unwrap();
    assert_eq!(third.span(), 2..3);

    assert!(lexer.next().unwrap().is_none());
    assert_eq!(lexer.depth(), 0);
    assert!(lexer.next().unwrap().is_none());
}

#[test]
fn first_declared_definition_wins() {
    // `name` comes first and also matches keywords.
    let lexer = Tokenizer::new([
        ("name", "[$a-zA-Z_-][$a-zA-Z_0-9-]+"),
        ("number", r"-?(\.[0-9]+|[0-9]+(\.[0-9]+)?)"),
        ("keyword", "true|false|null"),
        ("string", r"'(\\.|[^\\']+)*'"),
        ("comma", "[ \t\n\r]*,[ \t\n\r]*"),
        ("colon", "[ \t\n\r]*:[ \t\n\r]*"),
        ("equal", "[ \t\n\r]*=[ \t\n\r]*"),
    ])
    .unwrap();

    let code = "view-task-close:text, btnCancelTaskClose:value=false";
    insta::assert_snapshot!(snapshot(lexer, code, &[]), @r#"
    name "view-task-close"
    colon ":"
    name "text"
    comma ", "
    name "btnCancelTaskClose"
    colon ":"
    name "value"
    equal "="
    name "false"
    "#);
}

#[test]
fn shorter_earlier_match_beats_longer_later_match() {
    let mut lexer = Tokenizer::new([("ONE", "[0-9]"), ("MANY", "[0-9]+")]).unwrap();
    lexer.load_text("123");
    let tokens = lexer.all::<&str>(&[]).unwrap();

    assert_eq!(ids(&lexer, &tokens), ["ONE", "ONE", "ONE"]);
}

#[test]
fn no_matching_token_reports_position() {
    let mut lexer = arithmetic();
    lexer.load_text("12 - 3");
    let err = lexer.all(&["SPC"]).unwrap_err();

    let LexError::NoMatchingToken { buffer, offset } = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(*offset, 3);
    assert_eq!(buffer.name(), "buff#0");
    assert_eq!(buffer.text(), "12 - 3");
    assert_eq!(err.offset(), Some(3));
    assert_eq!(err.to_string(), "no token matches buff#0 at offset 3");
}

#[test]
fn no_matching_token_renders_snippet() {
    let mut lexer = arithmetic();
    lexer.load_text("1 ? 2");
    let err = lexer.all(&["SPC"]).unwrap_err();
    let rendered = err.render();

    assert!(rendered.contains("no token matches buff#0 at offset 2"));
    assert!(rendered.contains("1 ? 2"));
    assert!(rendered.contains("unexpected input"));
}

#[test]
fn zero_length_match_wins_but_cannot_be_drained() {
    let mut lexer = Tokenizer::new([("OPT", "a*"), ("B", "b")]).unwrap();
    lexer.load_text("b");

    let token = lexer.next().unwrap().unwrap();
    assert_eq!(lexer.name(token.id), "OPT");
    assert!(token.is_empty());

    let mut lexer = Tokenizer::new([("OPT", "a*"), ("B", "b")]).unwrap();
    lexer.load_text("aab");
    let err = lexer.all::<&str>(&[]).unwrap_err();
    let LexError::EmptyToken { offset, token, .. } = err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(offset, 2);
    assert_eq!(token, "OPT");
}

#[test]
fn stacked_buffers_drain_top_first() {
    let mut lexer = arithmetic();
    lexer.load_text("1+2");
    lexer.load_text("3*4");
    assert_eq!(lexer.depth(), 2);

    let tokens = lexer.all::<&str>(&[]).unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();

    assert_eq!(texts, ["3", "*", "4", "1", "+", "2"]);
    assert_eq!(tokens[0].buffer().name(), "buff#1");
    assert_eq!(tokens[3].buffer().name(), "buff#0");
}

#[test]
fn tokens_outlive_the_tokenizer() {
    let tokens = {
        let mut lexer = arithmetic();
        lexer.load_text("8*9");
        lexer.all::<&str>(&[]).unwrap()
    };

    assert_eq!(tokens[2].text(), "9");
    assert_eq!(tokens[1].buffer().text(), "8*9");
}

#[test]
fn clones_share_definitions_but_not_buffers() {
    let template = arithmetic();
    let mut a = template.clone();
    let mut b = template.clone();
    a.load_text("1");
    b.load_text("2+3");

    assert_eq!(a.all::<&str>(&[]).unwrap().len(), 1);
    assert_eq!(b.all::<&str>(&[]).unwrap().len(), 3);
    assert_eq!(template.depth(), 0);
}

#[test]
fn unknown_ignore_names_are_harmless() {
    let mut lexer = arithmetic();
    lexer.load_text("1 + 2");
    let tokens = lexer.all(&["SPC", "COMMENT"]).unwrap();

    assert_eq!(tokens.len(), 3);
}

#[test]
fn lookups() {
    let lexer = arithmetic();

    assert_eq!(lexer.len(), 4);
    assert_eq!(lexer.id("MUL").map(|id| id.index()), Some(2));
    assert_eq!(lexer.id("DIV"), None);
    assert_eq!(lexer.names().collect::<Vec<_>>(), ["NUM", "ADD", "MUL", "SPC"]);
}

#[test]
fn duplicate_definition() {
    let err = Tokenizer::new([("A", "a"), ("A", "b")]).unwrap_err();

    assert!(matches!(err, LexError::DuplicateToken { ref name } if name == "A"));
}

#[test]
fn invalid_pattern() {
    let err = Tokenizer::new([("BAD", "(unclosed")]).unwrap_err();

    let LexError::InvalidPattern { name, pattern, .. } = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(name, "BAD");
    assert_eq!(pattern, "(unclosed");
    assert_eq!(err.render(), err.to_string());
}

fn piece() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{1,3}", r"[+*]", "[ \t]{1,2}"]
}

proptest! {
    #[test]
    fn tokens_partition_the_input(pieces in proptest::collection::vec(piece(), 0..24)) {
        let input: String = pieces.concat();
        let mut lexer = arithmetic();
        lexer.load_text(input.as_str());
        let tokens = lexer.all::<&str>(&[]).unwrap();

        let mut cursor = 0;
        for token in &tokens {
            prop_assert_eq!(token.begin, cursor);
            prop_assert!(token.end > token.begin);
            cursor = token.end;
        }
        prop_assert_eq!(cursor, input.len());

        let rebuilt: String = tokens.iter().map(|t| t.text()).collect();
        prop_assert_eq!(rebuilt, input);
    }

    #[test]
    fn ignoring_removes_only_ignored(pieces in proptest::collection::vec(piece(), 0..24)) {
        let input: String = pieces.concat();
        let mut all = arithmetic();
        all.load_text(input.as_str());
        let every = all.all::<&str>(&[]).unwrap();

        let mut filtered = arithmetic();
        filtered.load_text(input.as_str());
        let kept = filtered.all(&["SPC"]).unwrap();

        let expected: Vec<&str> = every
            .iter()
            .filter(|t| all.name(t.id) != "SPC")
            .map(|t| t.text())
            .collect();
        let actual: Vec<&str> = kept.iter().map(|t| t.text()).collect();
        prop_assert_eq!(actual, expected);
    }
}
