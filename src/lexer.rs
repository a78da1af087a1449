use std::{iter::Peekable, str::CharIndices};

use log::debug;

use crate::config::Config;
use crate::token::{Span, Token, TokenKind};

pub mod error;

pub use self::error::{LexError, LexResult};

/// Turns source text into tokens, synthesizing `Indent`/`Dedent` markers from
/// leading whitespace.
///
/// `indent_stack` always starts with `[0]`. A strictly deeper line pushes its
/// width and yields one `Indent`; a shallower line pops one `Dedent` per level
/// and must land exactly on a width that was pushed before.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    indent_stack: Vec<usize>,
    pending_tokens: Vec<Token<'a>>,
    at_line_start: bool,
    eof_reached: bool,
    paren_depth: usize,
    tab_width: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn with_config(input: &'a str, config: &Config) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            indent_stack: vec![0],
            pending_tokens: Vec::new(),
            at_line_start: true,
            eof_reached: false,
            paren_depth: 0,
            tab_width: config.tab_width.max(1),
            line: 1,
            column: 1,
        }
    }

    pub fn next_token(&mut self) -> LexResult<Token<'a>> {
        if let Some(token) = self.pending_tokens.pop() {
            return Ok(token);
        }

        if self.eof_reached {
            return Ok(Token::new(TokenKind::EOF, self.point_span()));
        }

        if self.at_line_start && self.paren_depth == 0 {
            self.at_line_start = false;
            if let Some(indent_level) = self.measure_indentation() {
                if let Some(token) = self.apply_indentation(indent_level)? {
                    return Ok(token);
                }
            }
        }

        self.skip_whitespace();

        let (start_idx, ch) = match self.chars.peek() {
            Some(&(idx, c)) => (idx, c),
            None => return Ok(self.finish()),
        };

        let start_line = self.line;
        let start_column = self.column;
        let kind = match ch {
            '\n' => {
                self.advance_char();
                self.at_line_start = true;
                TokenKind::Newline
            }
            '=' => self.one_or_two(TokenKind::Equal, '=', TokenKind::EqualEqual),
            '<' => self.one_or_two(TokenKind::Less, '=', TokenKind::LessEqual),
            '>' => self.one_or_two(TokenKind::Greater, '=', TokenKind::GreaterEqual),
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '%' => self.single(TokenKind::Percent),
            ':' => self.single(TokenKind::Colon),
            ',' => self.single(TokenKind::Comma),
            '.' => self.single(TokenKind::Dot),
            '(' => {
                self.paren_depth += 1;
                self.single(TokenKind::LParen)
            }
            ')' => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                self.single(TokenKind::RParen)
            }
            '"' => return self.read_string(start_idx, start_line, start_column),
            c if c.is_alphabetic() || c == '_' => {
                return Ok(self.read_identifier(start_idx, start_line, start_column));
            }
            c if c.is_ascii_digit() => {
                return self.read_integer(start_idx, start_line, start_column);
            }
            _ => {
                return Err(LexError::UnexpectedCharacter {
                    character: ch,
                    line: start_line,
                    column: start_column,
                });
            }
        };

        Ok(Token::new(
            kind,
            Span {
                start: start_idx,
                end: self.current_index(),
                line: start_line,
                column: start_column,
            },
        ))
    }

    /// Skips blank and comment-only lines, then consumes the leading whitespace
    /// of the next meaningful line and returns its width. Returns `None` when
    /// only blank lines remain.
    fn measure_indentation(&mut self) -> Option<usize> {
        loop {
            let mut lookahead = self.chars.clone();
            let mut width = 0;
            let mut blank = true;
            while let Some(&(_, c)) = lookahead.peek() {
                match c {
                    ' ' => width += 1,
                    '\t' => width += self.tab_width - width % self.tab_width,
                    '\r' => {}
                    '\n' | '#' => break,
                    _ => {
                        blank = false;
                        break;
                    }
                }
                lookahead.next();
            }

            if !blank {
                while matches!(self.chars.peek(), Some(&(_, ' ' | '\t' | '\r'))) {
                    self.advance_char();
                }
                return Some(width);
            }

            // Blank or comment-only line: drop it entirely, newline included.
            while let Some(&(_, c)) = self.chars.peek() {
                self.advance_char();
                if c == '\n' {
                    break;
                }
            }
            if self.chars.peek().is_none() {
                return None;
            }
        }
    }

    fn apply_indentation(&mut self, indent_level: usize) -> LexResult<Option<Token<'a>>> {
        let current_indent = self.current_indent();
        let span = self.point_span();

        if indent_level > current_indent {
            self.indent_stack.push(indent_level);
            return Ok(Some(Token::new(TokenKind::Indent, span)));
        }

        while self.current_indent() > indent_level {
            self.indent_stack.pop();
            self.pending_tokens.push(Token::new(TokenKind::Dedent, span));
        }
        if self.current_indent() != indent_level {
            return Err(LexError::Indentation {
                indent_level,
                line: self.line,
            });
        }
        Ok(self.pending_tokens.pop())
    }

    /// Unwinds every open block at end of input, then yields `EOF`.
    fn finish(&mut self) -> Token<'a> {
        self.eof_reached = true;
        let span = self.point_span();
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.pending_tokens.push(Token::new(TokenKind::Dedent, span));
        }
        self.pending_tokens
            .pop()
            .unwrap_or_else(|| Token::new(TokenKind::EOF, span))
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.advance_char();
                }
                '\n' if self.paren_depth > 0 => {
                    self.advance_char();
                }
                '#' => {
                    while matches!(self.chars.peek(), Some(&(_, c)) if c != '\n') {
                        self.advance_char();
                    }
                }
                _ => break,
            }
        }
    }

    fn single(&mut self, kind: TokenKind<'a>) -> TokenKind<'a> {
        self.advance_char();
        kind
    }

    fn one_or_two(
        &mut self,
        one: TokenKind<'a>,
        second: char,
        two: TokenKind<'a>,
    ) -> TokenKind<'a> {
        self.advance_char();
        if matches!(self.chars.peek(), Some(&(_, c)) if c == second) {
            self.advance_char();
            two
        } else {
            one
        }
    }

    fn read_identifier(&mut self, start: usize, line: usize, column: usize) -> Token<'a> {
        self.advance_char(); // Consume first char
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance_char();
            } else {
                break;
            }
        }

        let end_idx = self.current_index();
        let ident = &self.input[start..end_idx];
        let kind = TokenKind::keyword(ident).unwrap_or(TokenKind::Identifier(ident));
        Token::new(
            kind,
            Span {
                start,
                end: end_idx,
                line,
                column,
            },
        )
    }

    fn read_integer(&mut self, start: usize, line: usize, column: usize) -> LexResult<Token<'a>> {
        self.advance_char(); // Consume first digit
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                self.advance_char();
            } else {
                break;
            }
        }

        let end_idx = self.current_index();
        let num_str = &self.input[start..end_idx];
        let num = num_str
            .parse::<i64>()
            .map_err(|_| LexError::InvalidIntegerLiteral {
                literal: num_str.to_string(),
                line,
                column,
            })?;
        Ok(Token::new(
            TokenKind::Integer(num),
            Span {
                start,
                end: end_idx,
                line,
                column,
            },
        ))
    }

    fn read_string(&mut self, start: usize, line: usize, column: usize) -> LexResult<Token<'a>> {
        self.advance_char(); // Consume opening quote
        let content_start = (start + 1).min(self.input.len());
        while let Some(&(idx, c)) = self.chars.peek() {
            match c {
                '"' => {
                    self.advance_char(); // Consume closing quote
                    return Ok(Token::new(
                        TokenKind::String(&self.input[content_start..idx]),
                        Span {
                            start,
                            end: idx + 1,
                            line,
                            column,
                        },
                    ));
                }
                '\n' => break,
                '\\' => {
                    self.advance_char();
                    if matches!(self.chars.peek(), Some(&(_, '\n')) | None) {
                        break;
                    }
                    self.advance_char();
                }
                _ => {
                    self.advance_char();
                }
            }
        }
        Err(LexError::UnterminatedString { line, column })
    }
}

impl Lexer<'_> {
    fn advance_char(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn current_index(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }

    fn current_indent(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    fn point_span(&mut self) -> Span {
        let index = self.current_index();
        Span {
            start: index,
            end: index,
            line: self.line,
            column: self.column,
        }
    }
}

pub fn tokenize(input: &str) -> LexResult<Vec<Token<'_>>> {
    tokenize_with(input, &Config::default())
}

pub fn tokenize_with<'a>(input: &'a str, config: &Config) -> LexResult<Vec<Token<'a>>> {
    let mut lexer = Lexer::with_config(input, config);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let is_eof = matches!(token.kind, TokenKind::EOF);
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    debug!("tokenized {} bytes into {} tokens", input.len(), tokens.len());
    Ok(tokens)
}
