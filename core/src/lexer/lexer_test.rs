use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn signed_and_unsigned_numbers() {
    for source in ["345", "+345"] {
        let tokens = tokenize(source);
        assert_eq!(tokens.len(), 2, "{source}");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].number, Some(345.0));
        assert!(tokens[1].is_end());
    }
}

#[test]
fn list_with_positions() {
    let tokens = tokenize("(ADD 1 2)");
    let summary: Vec<_> = tokens
        .iter()
        .map(|t| (t.kind, t.text.to_string(), t.pos.line, t.pos.column))
        .collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Open, "(".to_string(), 1, 1),
            (TokenKind::Symbol, "ADD".to_string(), 1, 2),
            (TokenKind::Number, "1".to_string(), 1, 6),
            (TokenKind::Number, "2".to_string(), 1, 8),
            (TokenKind::Close, ")".to_string(), 1, 9),
            (TokenKind::End, "".to_string(), 1, 10),
        ]
    );
    assert_eq!(tokens[2].number, Some(1.0));
    assert_eq!(tokens[3].number, Some(2.0));
}

#[test]
fn number_forms() {
    let cases = [
        ("-7", -7.0),
        (".5", 0.5),
        ("-.25", -0.25),
        ("1e3", 1000.0),
        ("2.5E2", 250.0),
        ("12.", 12.0),
    ];
    for (source, expected) in cases {
        let token = Lexer::new(source).next_token();
        assert_eq!(token.kind, TokenKind::Number, "{source}");
        assert_eq!(token.number, Some(expected), "{source}");
    }
}

#[test]
fn malformed_number_has_nan_payload() {
    let token = Lexer::new("1.2.3").next_token();
    assert_eq!(token.kind, TokenKind::Number);
    assert!(token.number.is_some_and(f64::is_nan));
    assert_eq!(token.text, "1.2.3");
}

#[test]
fn number_stops_at_close_paren() {
    assert_eq!(
        kinds("(+ 1 2)"),
        vec![
            TokenKind::Open,
            TokenKind::Symbol,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::Close,
            TokenKind::End,
        ]
    );
}

#[test]
fn signs_alone_are_symbols() {
    let tokens = tokenize("- + -x");
    assert_eq!(tokens[0].kind, TokenKind::Symbol);
    assert_eq!(tokens[0].text, "-");
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[2].kind, TokenKind::Symbol);
    assert_eq!(tokens[2].text, "-x");
}

#[test]
fn standalone_dot() {
    assert_eq!(
        kinds("(a . b)"),
        vec![
            TokenKind::Open,
            TokenKind::Symbol,
            TokenKind::Dot,
            TokenKind::Symbol,
            TokenKind::Close,
            TokenKind::End,
        ]
    );
}

#[test]
fn reserved_words() {
    assert_eq!(
        kinds("if nil define set let lambda quote iff NIL"),
        vec![
            TokenKind::If,
            TokenKind::Nil,
            TokenKind::Define,
            TokenKind::Set,
            TokenKind::Let,
            TokenKind::Lambda,
            TokenKind::Quote,
            TokenKind::Symbol,
            TokenKind::Symbol,
            TokenKind::End,
        ]
    );
}

#[test]
fn quote_mark() {
    assert_eq!(
        kinds("'(a)"),
        vec![
            TokenKind::QuoteMark,
            TokenKind::Open,
            TokenKind::Symbol,
            TokenKind::Close,
            TokenKind::End,
        ]
    );
}

#[test]
fn strings_and_escapes() {
    let tokens = tokenize(r#""hello world" "a\"b" "c\nd""#);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "hello world");
    assert_eq!(tokens[1].text, "a\"b");
    // Escapes pass the next character through without decoding.
    assert_eq!(tokens[2].text, "cnd");
    assert!(tokens[3].is_end());
}

#[test]
fn unterminated_string() {
    let token = Lexer::new("\"abc").next_token();
    assert_eq!(token.kind, TokenKind::UnterminatedString);
    assert_eq!(token.text, "abc");
}

#[test]
fn comments_are_skipped() {
    let source = "; leading\n# hash comment\n(a // trailing\n b)";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Open,
            TokenKind::Symbol,
            TokenKind::Symbol,
            TokenKind::Close,
            TokenKind::End,
        ]
    );
    let tokens = tokenize(source);
    assert_eq!(tokens[0].pos, Position::new(3, 1));
    assert_eq!(tokens[2].pos, Position::new(4, 2));
}

#[test]
fn push_back_returns_token_again() {
    let mut lexer = Lexer::new("(foo bar)");
    assert_eq!(lexer.next_token().kind, TokenKind::Open);
    let foo = lexer.next_token();
    assert_eq!(foo.text, "foo");
    lexer.push_back(foo.clone());
    assert_eq!(lexer.next_token(), foo);
    assert_eq!(lexer.next_token().text, "bar");
}

#[test]
fn end_is_sticky() {
    let mut lexer = Lexer::new("  ");
    assert!(lexer.next_token().is_end());
    assert!(lexer.next_token().is_end());
}

#[test]
fn spans_cover_token_text() {
    let source = "(define x \"hi\")";
    for token in tokenize(source) {
        if token.kind == TokenKind::String {
            assert_eq!(token.span.slice(source), "\"hi\"");
        } else if !token.is_end() {
            assert_eq!(token.span.slice(source), token.text);
        }
    }
}
