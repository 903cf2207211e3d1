use super::{scan, Token};

fn tokens(input: &str) -> Vec<Token> {
    scan(input).into_iter().map(|(token, _)| token).collect()
}

fn identifier(text: &str) -> Token {
    Token::Identifier(text.to_string())
}

fn number(text: &str) -> Token {
    Token::Number(text.to_string())
}

#[test]
fn empty_input() {
    assert_eq!(tokens(""), vec![]);
    assert_eq!(tokens("   \t  "), vec![]);
}

#[test]
fn newlines_are_tokens_not_whitespace() {
    assert_eq!(
        tokens("dup\n\ndup"),
        vec![
            identifier("dup"),
            Token::Newline,
            Token::Newline,
            identifier("dup"),
        ]
    );
}

#[test]
fn carriage_return_is_whitespace() {
    assert_eq!(
        tokens("dup\r\npop"),
        vec![identifier("dup"), Token::Newline, identifier("pop")]
    );
}

#[test]
fn pragma_line() {
    assert_eq!(
        tokens("#pragma version 8\n"),
        vec![Token::Pragma, Token::Version, number("8"), Token::Newline]
    );
}

#[test]
fn label_definition() {
    assert_eq!(
        tokens("main_loop:\n"),
        vec![identifier("main_loop"), Token::Colon, Token::Newline]
    );
}

#[test]
fn numbers_keep_their_text() {
    // Overflow is not the lexer's concern; the text survives so the
    // literal parser can report it properly.
    assert_eq!(
        tokens("0 007 18446744073709551616"),
        vec![number("0"), number("007"), number("18446744073709551616")]
    );
}

#[test]
fn hex_literal_beats_number() {
    assert_eq!(
        tokens("0xDeadBeef 0x 0x0"),
        vec![
            Token::HexBytes("0xDeadBeef".to_string()),
            Token::HexBytes("0x".to_string()),
            Token::HexBytes("0x0".to_string()),
        ]
    );
}

#[test]
fn hex_prefix_stops_at_non_hex_digit() {
    assert_eq!(
        tokens("0xg"),
        vec![Token::HexBytes("0x".to_string()), identifier("g")]
    );
}

#[test]
fn string_literals_keep_their_quotes() {
    assert_eq!(
        tokens(r#""hello world""#),
        vec![Token::Str(r#""hello world""#.to_string())]
    );
}

#[test]
fn unterminated_string_stops_at_line_end() {
    // The missing close quote becomes one Str token, not a cascade
    // of bogus tokens swallowing the next line.
    assert_eq!(
        tokens("\"oops\ndup"),
        vec![
            Token::Str("\"oops".to_string()),
            Token::Newline,
            identifier("dup"),
        ]
    );
}

#[test]
fn operator_mnemonics() {
    assert_eq!(
        tokens("+ != b<= b~"),
        vec![
            Token::Symbol("+".to_string()),
            Token::Symbol("!=".to_string()),
            Token::Symbol("b<=".to_string()),
            Token::Symbol("b~".to_string()),
        ]
    );
}

#[test]
fn identifier_wins_over_byte_operator_prefix() {
    // "b-loop" is a label identifier, not the operator "b-" followed
    // by "loop": the identifier match is longer.
    assert_eq!(tokens("b-loop"), vec![identifier("b-loop")]);
    assert_eq!(tokens("bnz"), vec![identifier("bnz")]);
}

#[test]
fn version_is_its_own_token() {
    assert_eq!(tokens("version"), vec![Token::Version]);
}

#[test]
fn comments_are_skipped_to_line_end() {
    assert_eq!(
        tokens("dup // duplicate the top of the stack\npop"),
        vec![identifier("dup"), Token::Newline, identifier("pop")]
    );
    // A comment is not an operator even though it starts with '/'.
    assert_eq!(tokens("// +-*/"), vec![]);
}

#[test]
fn unrecognized_characters_become_error_tokens() {
    assert_eq!(
        tokens("dup @ pop"),
        vec![
            identifier("dup"),
            Token::Error("unrecognized character '@'".to_string()),
            identifier("pop"),
        ]
    );
}

#[test]
fn spans_index_the_original_input() {
    let scanned = scan("int 5\n");
    assert_eq!(
        scanned,
        vec![
            (identifier("int"), 0..3),
            (number("5"), 4..5),
            (Token::Newline, 5..6),
        ]
    );
}

#[test]
fn mnemonics_with_underscores_and_digits() {
    assert_eq!(
        tokens("sha512_256 extract_uint16 intc_0"),
        vec![
            identifier("sha512_256"),
            identifier("extract_uint16"),
            identifier("intc_0"),
        ]
    );
}
