use popcorn::lexer::{tokenize, Lexer, LexicalErrorKind, TokenKind};
use proptest::prelude::*;

fn check_kinds(input: &str, expected: &[TokenKind], test_name: &str) {
    let tokens = tokenize(input).expect("Input should lex cleanly");
    let actual: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(actual, expected, "Failed the test {test_name}");
}

#[test]
fn smoke_test() {
    check_kinds("", &[TokenKind::Eof], "smoke");
}

#[test]
fn single_character_tokens() {
    check_kinds(
        "( ) { } [ ] , . : ; + - * % ! = < >",
        &[
            TokenKind::LeftParenthesis,
            TokenKind::RightParenthesis,
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Percent,
            TokenKind::Bang,
            TokenKind::Equal,
            TokenKind::LessThan,
            TokenKind::GreaterThan,
            TokenKind::Eof,
        ],
        "single_character",
    );
}

#[test]
fn two_character_operators_are_never_split() {
    check_kinds(
        "== != <= >= && ||",
        &[
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::LessThanEqual,
            TokenKind::GreaterThanEqual,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Eof,
        ],
        "two_character",
    );
}

#[test]
fn adjacent_equals_prefer_the_two_character_form() {
    check_kinds(
        "===",
        &[TokenKind::EqualEqual, TokenKind::Equal, TokenKind::Eof],
        "triple_equal",
    );
}

#[test]
fn newline_is_a_token_but_spaces_are_not() {
    check_kinds(
        "1\n2",
        &[
            TokenKind::NumericLiteral,
            TokenKind::Newline,
            TokenKind::NumericLiteral,
            TokenKind::Eof,
        ],
        "newline_token",
    );
    check_kinds(
        "1 \t 2",
        &[
            TokenKind::NumericLiteral,
            TokenKind::NumericLiteral,
            TokenKind::Eof,
        ],
        "spaces_skipped",
    );
}

#[test]
fn comment_is_discarded_but_its_newline_survives() {
    check_kinds(
        "1 // ignore the rest == != let\n2",
        &[
            TokenKind::NumericLiteral,
            TokenKind::Newline,
            TokenKind::NumericLiteral,
            TokenKind::Eof,
        ],
        "comment",
    );
}

#[test]
fn comment_at_end_of_input() {
    check_kinds(
        "1 // trailing",
        &[TokenKind::NumericLiteral, TokenKind::Eof],
        "trailing_comment",
    );
}

#[test]
fn keywords_and_identifiers() {
    check_kinds(
        "let const fn pop true false null lettuce popped _x x1",
        &[
            TokenKind::KeywordLet,
            TokenKind::KeywordConst,
            TokenKind::KeywordFn,
            TokenKind::KeywordPop,
            TokenKind::KeywordTrue,
            TokenKind::KeywordFalse,
            TokenKind::KeywordNull,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eof,
        ],
        "keywords",
    );
}

#[test]
fn string_literal_is_one_token_with_quotes_in_the_span() {
    let source = "\"hello world\"";
    let tokens = tokenize(source).expect("Should lex");
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    let lexer = Lexer::new(source);
    assert_eq!(lexer.get_lexeme(&tokens[0].span), Some("\"hello world\""));
}

#[test]
fn unterminated_string_is_an_error() {
    let error = tokenize("\"never closed").expect_err("Should fail");
    assert_eq!(error.kind, LexicalErrorKind::UnclosedString);
    assert_eq!(error.line, 1);
}

#[test]
fn unrecognized_characters_are_errors() {
    let error = tokenize("@").expect_err("Should fail");
    assert_eq!(error.kind, LexicalErrorKind::Unrecognized('@'));

    // A lone ampersand is not a token even though `&&` is.
    let error = tokenize("1 & 2").expect_err("Should fail");
    assert_eq!(error.kind, LexicalErrorKind::Unrecognized('&'));
}

#[test]
fn line_numbers_advance_on_newlines() {
    let tokens = tokenize("1\n2\n3").expect("Should lex");
    let lines: Vec<_> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 1, 2, 2, 3, 3]);
}

#[test]
fn numbers_are_integer_digit_runs() {
    check_kinds(
        "12.5",
        &[
            TokenKind::NumericLiteral,
            TokenKind::Dot,
            TokenKind::NumericLiteral,
            TokenKind::Eof,
        ],
        "no_decimal_point",
    );
}

proptest! {
    #[test]
    fn any_decimal_integer_lexes_to_a_single_number(value: u32) {
        let source = value.to_string();
        let tokens = tokenize(&source).expect("Digits always lex");
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::NumericLiteral);
        prop_assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn identifier_like_words_never_fail(word in "[a-zA-Z_][a-zA-Z0-9_]{0,16}") {
        let tokens = tokenize(&word).expect("Words always lex");
        prop_assert_eq!(tokens.len(), 2);
    }
}
