mod error;
mod token;

pub use error::{LexicalError, LexicalErrorKind};
pub use token::{Span, Token, TokenKind, KEYWORD_HASHMAP};

use std::iter::Peekable;
use std::str::CharIndices;

/// Streaming scanner over a source fragment. Tokens carry byte spans; the
/// lexeme text is recovered by slicing the source.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
    line: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
        }
    }

    pub fn get_source(&self) -> &'src str {
        self.source
    }

    pub fn get_lexeme(&self, span: &Span) -> Option<&'src str> {
        self.source.get(span.range())
    }

    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        loop {
            let line = self.line;
            let Some((start, c)) = self.chars.next() else {
                return Ok(self.make_token(TokenKind::Eof, self.source.len(), 0));
            };

            // Two-character lookahead comes first so `==` is never split
            // into two `=` tokens and comments swallow their whole line.
            if let Some(&(_, next)) = self.chars.peek() {
                if c == '/' && next == '/' {
                    // Discard through end of line, keeping the newline itself.
                    while self.chars.next_if(|&(_, c)| c != '\n').is_some() {}
                    continue;
                }
                let two = match (c, next) {
                    ('=', '=') => Some(TokenKind::EqualEqual),
                    ('!', '=') => Some(TokenKind::BangEqual),
                    ('<', '=') => Some(TokenKind::LessThanEqual),
                    ('>', '=') => Some(TokenKind::GreaterThanEqual),
                    ('&', '&') => Some(TokenKind::And),
                    ('|', '|') => Some(TokenKind::Or),
                    _ => None,
                };
                if let Some(kind) = two {
                    let _ = self.chars.next();
                    return Ok(self.make_token(kind, start, 2));
                }
            }

            let kind = match c {
                '(' => TokenKind::LeftParenthesis,
                ')' => TokenKind::RightParenthesis,
                '{' => TokenKind::LeftBrace,
                '}' => TokenKind::RightBrace,
                '[' => TokenKind::LeftBracket,
                ']' => TokenKind::RightBracket,
                ',' => TokenKind::Comma,
                '.' => TokenKind::Dot,
                ':' => TokenKind::Colon,
                ';' => TokenKind::Semicolon,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '%' => TokenKind::Percent,
                '!' => TokenKind::Bang,
                '=' => TokenKind::Equal,
                '<' => TokenKind::LessThan,
                '>' => TokenKind::GreaterThan,
                '\n' => {
                    self.line += 1;
                    return Ok(Token {
                        kind: TokenKind::Newline,
                        span: Span::new(start, 1),
                        line,
                    });
                }
                '"' => return self.string(start),
                c if c.is_ascii_digit() => return Ok(self.number(start)),
                c if c.is_alphabetic() || c == '_' => return Ok(self.word(start)),
                c if c.is_whitespace() => continue,
                c => {
                    return Err(LexicalError {
                        kind: LexicalErrorKind::Unrecognized(c),
                        span: Span::new(start, c.len_utf8()),
                        line,
                    })
                }
            };
            return Ok(self.make_token(kind, start, 1));
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize, length: usize) -> Token {
        Token {
            kind,
            span: Span::new(start, length),
            line: self.line,
        }
    }

    /// Reads the rest of a string literal as a single token run between the
    /// quotes. No escape sequences are processed.
    fn string(&mut self, start: usize) -> Result<Token, LexicalError> {
        let line = self.line;
        while let Some((offset, c)) = self.chars.next() {
            match c {
                '"' => {
                    return Ok(Token {
                        kind: TokenKind::StringLiteral,
                        span: Span::new(start, offset + 1 - start),
                        line,
                    });
                }
                '\n' => {
                    self.line += 1;
                }
                _ => {}
            }
        }
        Err(LexicalError {
            kind: LexicalErrorKind::UnclosedString,
            span: Span::new(start, self.source.len() - start),
            line,
        })
    }

    /// Reads the rest of a digit run. Integer lexical form only; there is no
    /// decimal point at the token level.
    fn number(&mut self, start: usize) -> Token {
        let end = self.consume_while(|c| c.is_ascii_digit());
        self.make_token(TokenKind::NumericLiteral, start, end - start)
    }

    /// Reads the rest of an identifier or keyword.
    fn word(&mut self, start: usize) -> Token {
        let end = self.consume_while(|c| c.is_alphanumeric() || c == '_');
        let lexeme = &self.source[start..end];
        let kind = KEYWORD_HASHMAP
            .get(lexeme)
            .copied()
            .unwrap_or(TokenKind::Ident);
        self.make_token(kind, start, end - start)
    }

    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        loop {
            match self.chars.peek() {
                Some(&(offset, c)) => {
                    if predicate(c) {
                        let _ = self.chars.next();
                    } else {
                        return offset;
                    }
                }
                None => return self.source.len(),
            }
        }
    }
}

/// Scans a whole source fragment into a token sequence ending with `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = matches!(token.kind, TokenKind::Eof);
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
