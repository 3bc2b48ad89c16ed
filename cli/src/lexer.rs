use logos::Logos;

/// Coarse tokens for the REPL: enough to balance parentheses and colour a
/// line, not a replacement for the interpreter's own lexer.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("'")]
    QuoteMark,

    #[regex(r"(;|#|//)[^\n]*", priority = 10)]
    Comment,

    // Strict Double Quote String (must end with ")
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    String,

    #[regex(r"[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?", priority = 5)]
    Number,

    #[token("if")]
    #[token("define")]
    #[token("set")]
    #[token("let")]
    #[token("lambda")]
    #[token("quote")]
    Keyword,

    #[regex("true|false|nil", priority = 8, ignore(case))]
    Constant,

    #[regex(r#"[^ \t\r\n\f\(\)"';]+"#)]
    Other,
}

/// Number of parentheses still open at the end of `buffer`.
///
/// Returns `None` when the buffer ends inside a string literal.
pub fn calculate_depth(buffer: &str) -> Option<usize> {
    let mut depth: isize = 0;

    for token_res in Token::lexer(buffer) {
        match token_res {
            Ok(Token::LParen) => depth += 1,
            Ok(Token::RParen) => depth -= 1,

            // Valid tokens that don't affect depth
            Ok(_) => {}

            // An unclosed string is the only thing the patterns above can't match.
            Err(_) => {
                return None;
            }
        }
    }

    // Extra closers are a syntax error the interpreter reports itself.
    if depth < 0 {
        Some(0)
    } else {
        Some(depth as usize)
    }
}
