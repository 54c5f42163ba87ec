//! End-to-end classification scenarios.

mod common;

use common::summary;
use tq_highlight::{TokenKind, tokenize};

#[test]
fn let_binding_scenario() {
    use TokenKind::{AssignOperator, Identifier, Keyword, Number};
    assert_eq!(
        summary(&tokenize("let x = 5")),
        [
            (Keyword, "let".to_string()),
            (Identifier, "x".to_string()),
            (AssignOperator, "=".to_string()),
            (Number, "5".to_string()),
        ]
    );
}

#[test]
fn function_scenario() {
    use TokenKind::{BinaryOperator, Function, Identifier, Keyword, Punctuation, Type};
    assert_eq!(
        summary(&tokenize("func add(i32 a, i32 b) i32 { return a + b }")),
        [
            (Keyword, "func".to_string()),
            (Function, "add".to_string()),
            (Punctuation, "(".to_string()),
            (Type, "i32".to_string()),
            (Identifier, "a".to_string()),
            (Punctuation, ",".to_string()),
            (Type, "i32".to_string()),
            (Identifier, "b".to_string()),
            (Punctuation, ")".to_string()),
            (Type, "i32".to_string()),
            (Punctuation, "{".to_string()),
            (Keyword, "return".to_string()),
            (Identifier, "a".to_string()),
            (BinaryOperator, "+".to_string()),
            (Identifier, "b".to_string()),
            (Punctuation, "}".to_string()),
        ]
    );
}

#[test]
fn unterminated_string_scenario() {
    let tokens = tokenize("\"abc");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "\"abc");
    assert!(tokens[0].error);
}

#[test]
fn import_scenario() {
    use TokenKind::{Identifier, Keyword, Punctuation};
    assert_eq!(
        summary(&tokenize("from mod import { a, b as c }")),
        [
            (Keyword, "from".to_string()),
            (Identifier, "mod".to_string()),
            (Keyword, "import".to_string()),
            (Punctuation, "{".to_string()),
            (Identifier, "a".to_string()),
            (Punctuation, ",".to_string()),
            (Identifier, "b".to_string()),
            (Keyword, "as".to_string()),
            (Identifier, "c".to_string()),
            (Punctuation, "}".to_string()),
        ]
    );
}

#[test]
fn scope_hint_scenario() {
    let hinted = tokenize("#/// func scope ///\nx.y(1)");
    assert!(hinted.iter().all(|t| !t.error));
    let y = hinted.iter().find(|t| t.value == "y").unwrap();
    assert_eq!(y.kind, TokenKind::Function);

    let bare = tokenize("x.y(1)");
    assert!(bare.iter().any(|t| t.error));
}

#[test]
fn error_annotation_scenario() {
    let tokens = tokenize("### /!\\ Compilation Error!\nsomething bad\n###\n");
    let meta: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::MetaError)
        .collect();
    assert_eq!(meta.len(), 1);
    assert_eq!(meta[0].value, "something bad");
    // the newline right after the annotation is dropped
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Newline));
}

#[test]
fn annotated_sample_renders_around_the_callout() {
    let tokens = tokenize(
        "let i32 count = 0\n\
         ### /!\\ Compilation Error!\n\
         cannot redeclare `count`\n\
         ###\n\
         let i32 count = 1",
    );
    let meta = tokens
        .iter()
        .find(|t| t.kind == TokenKind::MetaError)
        .unwrap();
    assert_eq!(meta.value, "cannot redeclare `count`");
    assert!(!meta.error);

    // both declarations classify normally around the callout
    let keywords = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Keyword)
        .count();
    assert_eq!(keywords, 2);
    assert!(tokens.iter().all(|t| !t.error));
}

#[test]
fn full_module_sample() {
    let tokens = tokenize(
        "from std.fmt import { print }\n\
         \n\
         @export\n\
         struct Counter {\n\
         \tlet i64 value = 0\n\
         \n\
         \tconstructor(i64 start) { value = start }\n\
         \n\
         \tfunc bump() i64 {\n\
         \t\tvalue = value + 1\n\
         \t\treturn value\n\
         \t}\n\
         }\n\
         \n\
         func ...",
    );
    assert!(tokens.iter().all(|t| !t.error));

    let bump = tokens.iter().find(|t| t.value == "bump").unwrap();
    assert_eq!(bump.kind, TokenKind::Function);
    let hint = tokens.iter().rev().find(|t| t.value == "...").unwrap();
    assert_eq!(hint.kind, TokenKind::InlineHint);
}

#[test]
fn tokenize_is_deterministic() {
    let input = "#/// struct scope ///\nlet u16 port = 0x1F90\nfunc ...";
    assert_eq!(tokenize(input), tokenize(input));
}
