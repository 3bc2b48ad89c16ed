use alloc::borrow::Cow;

use bumpalo::Bump;
use tracing::{debug, trace, warn};

use super::error::{ParseError, ParseErrorKind};
use crate::api::ParserOptions;
use crate::ast::{Node, NodeKind};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::syntax::Span;
use crate::values::Number;
use crate::{String, Vec, format, vec};

/// What an open `(` or `'` will turn into once it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    List,
    /// `(quote x)`.
    Quote,
    /// `'x`, closed by its single child instead of by `)`.
    QuoteMark,
    If,
    Define,
    Set,
    Let,
    Lambda,
}

impl Form {
    fn from_keyword(kind: TokenKind) -> Option<Form> {
        match kind {
            TokenKind::If => Some(Form::If),
            TokenKind::Define => Some(Form::Define),
            TokenKind::Set => Some(Form::Set),
            TokenKind::Let => Some(Form::Let),
            TokenKind::Lambda => Some(Form::Lambda),
            TokenKind::Quote => Some(Form::Quote),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Form::List => "list",
            Form::Quote | Form::QuoteMark => "quote",
            Form::If => "if",
            Form::Define => "define",
            Form::Set => "set",
            Form::Let => "let",
            Form::Lambda => "lambda",
        }
    }
}

/// A node whose closing token has not been seen yet.
struct Open<'a> {
    form: Form,
    token: Token<'a>,
    children: Vec<Node<'a>>,
}

/// Builds AST nodes from a token stream.
///
/// Nesting is tracked on an explicit stack of open nodes, so the native stack
/// does not grow with source depth; the stack height is bounded by
/// [`ParserOptions::max_depth`].
pub struct Parser<'a> {
    arena: &'a Bump,
    lexer: Lexer<'a>,
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, source: &'a str) -> Self {
        Self::with_options(arena, source, ParserOptions::default())
    }

    pub fn with_options(arena: &'a Bump, source: &'a str, options: ParserOptions) -> Self {
        Self {
            arena,
            lexer: Lexer::new(source),
            options,
        }
    }

    /// Parses exactly one top-level form and wraps it in a `Start` node.
    ///
    /// Input after the first form is ignored with a warning, or rejected when
    /// [`ParserOptions::strict`] is set.
    pub fn parse(&mut self) -> Result<&'a Node<'a>, ParseError> {
        let Some(root) = self.parse_form()? else {
            let pos = self.lexer.position();
            let offset = self.lexer.source().len();
            return Err(ParseError::new(
                ParseErrorKind::EmptyInput,
                Span::new(offset, offset),
                pos,
            ));
        };

        let next = self.lexer.next_token();
        if !next.is_end() {
            if self.options.strict {
                return Err(ParseError::new(
                    ParseErrorKind::TrailingContent,
                    next.span.clone(),
                    next.pos,
                ));
            }
            warn!(at = %next.pos, "ignoring input after the first form");
            self.lexer.push_back(next);
        }

        debug!(kind = root.kind_name(), "parsed form");
        Ok(self.arena.alloc(Node::new(
            NodeKind::Start(root),
            root.pos,
            root.span.clone(),
            root.text,
        )))
    }

    /// Parses the next top-level form, or returns `None` at end of input.
    pub fn parse_form(&mut self) -> Result<Option<&'a Node<'a>>, ParseError> {
        let mut stack: Vec<Open<'a>> = Vec::new();

        loop {
            let token = self.lexer.next_token();
            trace!(kind = ?token.kind, at = %token.pos, "token");

            let node = match token.kind {
                TokenKind::End => {
                    return match stack.last() {
                        Some(open) => Err(self.error(ParseErrorKind::UnclosedList, &open.token)),
                        None => Ok(None),
                    };
                }
                TokenKind::Open => {
                    self.check_depth(&stack, &token)?;
                    let head = self.lexer.next_token();
                    let form = match Form::from_keyword(head.kind) {
                        Some(form) => form,
                        None => {
                            self.lexer.push_back(head);
                            Form::List
                        }
                    };
                    stack.push(Open {
                        form,
                        token,
                        children: Vec::new(),
                    });
                    continue;
                }
                TokenKind::QuoteMark => {
                    self.check_depth(&stack, &token)?;
                    stack.push(Open {
                        form: Form::QuoteMark,
                        token,
                        children: Vec::new(),
                    });
                    continue;
                }
                TokenKind::Close => {
                    let Some(open) = stack.pop() else {
                        return Err(self.error(ParseErrorKind::UnexpectedClose, &token));
                    };
                    if open.form == Form::QuoteMark {
                        return Err(self.unexpected(&token));
                    }
                    let span = open.token.span.to(&token.span);
                    self.finish(open, span)?
                }
                TokenKind::Dot => return Err(self.unexpected(&token)),
                TokenKind::UnterminatedString => {
                    return Err(self.error(ParseErrorKind::UnterminatedString, &token));
                }
                _ => self.leaf(&token),
            };

            if let Some(node) = self.attach(&mut stack, node)? {
                return Ok(Some(node));
            }
        }
    }

    /// Appends a completed node to the innermost open node. Quote marks close
    /// as soon as they receive their child. Returns the node once nothing is
    /// left open.
    fn attach(
        &self,
        stack: &mut Vec<Open<'a>>,
        mut node: Node<'a>,
    ) -> Result<Option<&'a Node<'a>>, ParseError> {
        loop {
            let Some(top) = stack.last_mut() else {
                return Ok(Some(self.arena.alloc(node)));
            };
            if top.form == Form::If && top.children.len() == 3 {
                return Err(ParseError::new(
                    ParseErrorKind::FormArity {
                        form: "if",
                        expected: "3 operands",
                        found: 4,
                    },
                    node.span.clone(),
                    node.pos,
                ));
            }
            top.children.push(node);
            if top.form != Form::QuoteMark {
                return Ok(None);
            }
            let Some(open) = stack.pop() else {
                return Ok(None);
            };
            let span = open
                .children
                .last()
                .map(|child| open.token.span.to(&child.span))
                .unwrap_or_else(|| open.token.span.clone());
            node = self.finish(open, span)?;
        }
    }

    fn check_depth(&self, stack: &[Open<'a>], token: &Token<'a>) -> Result<(), ParseError> {
        if stack.len() >= self.options.max_depth {
            return Err(self.error(
                ParseErrorKind::MaxDepthExceeded {
                    max_depth: self.options.max_depth,
                },
                token,
            ));
        }
        Ok(())
    }

    /// Builds the node for a closed form, checking its shape.
    fn finish(&self, open: Open<'a>, span: Span) -> Result<Node<'a>, ParseError> {
        let Open {
            form,
            token,
            children,
        } = open;
        let text = span.slice(self.lexer.source());
        let pos = token.pos;
        let found = children.len();
        let arity = |expected: &'static str| {
            ParseError::new(
                ParseErrorKind::FormArity {
                    form: form.name(),
                    expected,
                    found,
                },
                span.clone(),
                pos,
            )
        };

        let kind = match form {
            Form::List => NodeKind::List(self.arena.alloc_slice_fill_iter(children)),
            Form::Quote | Form::QuoteMark => {
                let Ok([inner]) = <[Node<'a>; 1]>::try_from(children) else {
                    return Err(arity("1 operand"));
                };
                NodeKind::Quote(self.arena.alloc(inner))
            }
            Form::If => {
                let Ok([test, then, otherwise]) = <[Node<'a>; 3]>::try_from(children) else {
                    return Err(arity("3 operands"));
                };
                NodeKind::If {
                    test: self.arena.alloc(test),
                    then: self.arena.alloc(then),
                    otherwise: self.arena.alloc(otherwise),
                }
            }
            Form::Define | Form::Set => {
                let Ok([target, value]) = <[Node<'a>; 2]>::try_from(children) else {
                    return Err(arity("2 operands"));
                };
                expect_symbol(form, &target)?;
                let target = self.arena.alloc(target);
                let value = self.arena.alloc(value);
                if form == Form::Define {
                    NodeKind::Define { target, value }
                } else {
                    NodeKind::Set { target, value }
                }
            }
            Form::Let | Form::Lambda => {
                let mut children = children.into_iter();
                let Some(head) = children.next() else {
                    return Err(arity("at least 1 operand"));
                };
                if form == Form::Let {
                    check_bindings(&head)?;
                } else {
                    check_params(&head)?;
                }
                let head = self.arena.alloc(head);
                let body = self.arena.alloc_slice_fill_iter(children);
                if form == Form::Let {
                    NodeKind::Let {
                        bindings: head,
                        body,
                    }
                } else {
                    NodeKind::Lambda { params: head, body }
                }
            }
        };
        Ok(Node::new(kind, pos, span.clone(), text))
    }

    /// Node factory for single-token forms.
    fn leaf(&self, token: &Token<'a>) -> Node<'a> {
        let text = token.span.slice(self.lexer.source());
        let kind = match token.kind {
            TokenKind::Number => {
                let value = token.number.unwrap_or(f64::NAN);
                NodeKind::Number(Number::from_literal(text, value))
            }
            TokenKind::String => NodeKind::String(self.alloc_text(&token.text)),
            TokenKind::Nil => NodeKind::Nil,
            _ => {
                let word = self.alloc_text(&token.text);
                if word.eq_ignore_ascii_case("true") {
                    NodeKind::Boolean(true)
                } else if word.eq_ignore_ascii_case("false") {
                    NodeKind::Boolean(false)
                } else if word.eq_ignore_ascii_case("nil") {
                    NodeKind::Nil
                } else {
                    NodeKind::Symbol(word)
                }
            }
        };
        Node::new(kind, token.pos, token.span.clone(), text)
    }

    fn alloc_text(&self, text: &Cow<'a, str>) -> &'a str {
        match text {
            Cow::Borrowed(text) => *text,
            Cow::Owned(text) => self.arena.alloc_str(text),
        }
    }

    fn error(&self, kind: ParseErrorKind, token: &Token<'a>) -> ParseError {
        ParseError::new(kind, token.span.clone(), token.pos)
    }

    fn unexpected(&self, token: &Token<'a>) -> ParseError {
        self.error(
            ParseErrorKind::UnexpectedToken {
                found: String::from(token.kind.describe()),
            },
            token,
        )
    }
}

fn expect_symbol(form: Form, node: &Node<'_>) -> Result<(), ParseError> {
    if let Some(name) = node.symbol_name() {
        return check_not_reserved(form, node, name);
    }
    Err(ParseError::new(
        ParseErrorKind::ExpectedSymbol {
            form: form.name(),
            found: format!("{}", node),
        },
        node.span.clone(),
        node.pos,
    ))
}

fn check_not_reserved(form: Form, node: &Node<'_>, name: &str) -> Result<(), ParseError> {
    if !TokenKind::from_word(name).is_form_keyword() {
        return Ok(());
    }
    Err(ParseError::new(
        ParseErrorKind::ReservedWord {
            form: form.name(),
            word: String::from(name),
        },
        node.span.clone(),
        node.pos,
    ))
}

fn check_params(params: &Node<'_>) -> Result<(), ParseError> {
    let Some(items) = params.list_items() else {
        return Err(ParseError::new(
            ParseErrorKind::ExpectedList { form: "lambda" },
            params.span.clone(),
            params.pos,
        ));
    };
    items
        .iter()
        .try_for_each(|param| expect_symbol(Form::Lambda, param))
}

fn check_bindings(bindings: &Node<'_>) -> Result<(), ParseError> {
    let Some(pairs) = bindings.list_items() else {
        return Err(ParseError::new(
            ParseErrorKind::ExpectedList { form: "let" },
            bindings.span.clone(),
            bindings.pos,
        ));
    };
    for pair in pairs {
        let malformed = |reason: String| {
            ParseError::new(
                ParseErrorKind::MalformedBinding { reason },
                pair.span.clone(),
                pair.pos,
            )
        };
        match pair.list_items() {
            Some([name, _]) => match name.symbol_name() {
                Some(word) => check_not_reserved(Form::Let, name, word)?,
                None => return Err(malformed(format!("{} is not a symbol", name))),
            },
            Some(items) => {
                return Err(malformed(format!(
                    "expected 2 elements, found {}",
                    items.len()
                )));
            }
            None => return Err(malformed(format!("{} is not a list", pair))),
        }
    }
    Ok(())
}

/// Parses a single top-level form with default options.
pub fn parse<'a>(arena: &'a Bump, source: &'a str) -> Result<&'a Node<'a>, ParseError> {
    Parser::new(arena, source).parse()
}

pub fn parse_with_options<'a>(
    arena: &'a Bump,
    source: &'a str,
    options: ParserOptions,
) -> Result<&'a Node<'a>, ParseError> {
    Parser::with_options(arena, source, options).parse()
}

/// Parses every top-level form of `source`.
pub fn parse_all<'a>(
    arena: &'a Bump,
    source: &'a str,
    options: ParserOptions,
) -> Result<Vec<&'a Node<'a>>, ParseError> {
    let mut parser = Parser::with_options(arena, source, options);
    let mut forms = vec![];
    while let Some(form) = parser.parse_form()? {
        forms.push(form);
    }
    debug!(count = forms.len(), "parsed source");
    Ok(forms)
}
