use logos::Logos;
use nu_ansi_term::{Color, Style};
use reedline::StyledText;

use crate::lexer::Token;

fn color_of(token: Token, text: &str, primitives: &[&str]) -> Color {
    match token {
        Token::Keyword => Color::Magenta,
        Token::Constant | Token::Number => Color::Cyan,
        Token::String => Color::Green,
        Token::Comment => Color::DarkGray,
        Token::QuoteMark => Color::Yellow,
        Token::LParen | Token::RParen => Color::White,
        Token::Other if primitives.contains(&text) => Color::Blue,
        Token::Other => Color::Default,
    }
}

/// Colours a REPL line from the coarse token stream.
pub struct Highlighter {
    primitives: Vec<&'static str>,
}

impl Highlighter {
    pub fn new() -> Self {
        let primitives = sprig_core::stdlib::PRIMITIVES
            .iter()
            .map(|(name, _)| *name)
            .collect();
        Self { primitives }
    }
}

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();
        let mut curr_end = 0;

        for (token, span) in Token::lexer(line).spanned() {
            if span.start > curr_end {
                output.push((Style::new(), line[curr_end..span.start].to_string()));
            }
            let text = &line[span.clone()];
            let style = match token {
                Ok(token) => Style::new().fg(color_of(token, text, &self.primitives)),
                // Input no pattern matches, such as an unclosed quote.
                Err(_) => Style::new().fg(Color::Green),
            };
            output.push((style, text.to_string()));
            curr_end = span.end;
        }

        if curr_end < line.len() {
            output.push((Style::new(), line[curr_end..].to_string()));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reedline::Highlighter as _;

    fn plain(styled: &StyledText) -> String {
        styled.buffer.iter().map(|(_, text)| text.as_str()).collect()
    }

    #[test]
    fn test_highlight_preserves_text() {
        let highlighter = Highlighter::new();
        for line in ["(define x 1)", "  '(a  b) ; note", "(print \"open"] {
            assert_eq!(plain(&highlighter.highlight(line, 0)), line);
        }
    }

    #[test]
    fn test_primitives_are_blue() {
        let highlighter = Highlighter::new();
        let styled = highlighter.highlight("(car x)", 0);
        let car = styled
            .buffer
            .iter()
            .find(|(_, text)| text == "car")
            .map(|(style, _)| style.foreground);
        assert_eq!(car, Some(Some(Color::Blue)));
    }
}
