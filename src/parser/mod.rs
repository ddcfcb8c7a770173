mod error;

pub use error::{ParserError, ParserErrorKind};

use crate::ast::{
    BinaryOperator, Expression, LogicalOperator, Program, Property, Statement, UnaryOperator,
};
use crate::lexer::{Lexer, Token, TokenKind};
use compact_str::CompactString;

/// Parses a complete source fragment into a [`Program`].
pub fn produce_ast(source: &str) -> Result<Program, ParserError> {
    Parser::new(source).parse()
}

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    lookahead: Option<Result<Token, ParserError>>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: None,
        }
    }

    fn peek(&mut self) -> Result<Token, ParserError> {
        match self.lookahead {
            Some(ref token_or_error) => token_or_error.clone(),
            None => {
                let next_token = self.next_token();
                self.lookahead = Some(next_token.clone());
                next_token
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParserError> {
        match self.lookahead.take() {
            Some(token_or_error) => token_or_error,
            None => {
                let token_or_error = self.lexer.next_token();
                token_or_error.map_err(|e| ParserError {
                    line: e.line,
                    kind: ParserErrorKind::LexicalError(e),
                })
            }
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParserError> {
        let next_token = self.next_token()?;
        if next_token.kind != expected {
            Err(ParserError {
                line: next_token.line,
                kind: ParserErrorKind::UnexpectedToken {
                    actual: next_token.kind,
                    expected,
                },
            })
        } else {
            Ok(next_token)
        }
    }

    fn eat_if(&mut self, next: TokenKind) -> Result<Option<Token>, ParserError> {
        let next_token = self.peek()?;
        if next_token.kind != next {
            Ok(None)
        } else {
            let _ = self.next_token().expect("Just peeked.");
            Ok(Some(next_token))
        }
    }

    fn skip_newlines(&mut self) -> Result<(), ParserError> {
        while self.eat_if(TokenKind::Newline)?.is_some() {}
        Ok(())
    }

    /// Statements end at a newline; end of input also terminates so a
    /// fragment without a trailing newline still parses.
    fn expect_terminator(&mut self) -> Result<(), ParserError> {
        let next = self.peek()?;
        match next.kind {
            TokenKind::Newline => {
                let _ = self.next_token()?;
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            kind => Err(ParserError {
                kind: ParserErrorKind::UnterminatedStatement(kind),
                line: next.line,
            }),
        }
    }

    fn lexeme(&self, token: &Token) -> &'src str {
        self.lexer
            .get_lexeme(&token.span)
            .expect("Lexed tokens have valid spans")
    }
}

// Statements
impl<'src> Parser<'src> {
    pub fn parse(&mut self) -> Result<Program, ParserError> {
        let mut body = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.peek()?.kind == TokenKind::Eof {
                break;
            }
            body.push(self.parse_statement()?);
        }
        Ok(Program { body })
    }

    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        match self.peek()?.kind {
            TokenKind::KeywordLet | TokenKind::KeywordConst => self.parse_variable_declaration(),
            TokenKind::KeywordFn => self.parse_function_declaration(),
            TokenKind::KeywordPop => self.parse_return_statement(),
            _ => {
                let expr = self.parse_expression()?;
                self.expect_terminator()?;
                Ok(Statement::Expression { expr })
            }
        }
    }

    fn parse_variable_declaration(&mut self) -> Result<Statement, ParserError> {
        let keyword = self.next_token()?;
        let is_constant = keyword.kind == TokenKind::KeywordConst;
        let name_token = self.expect(TokenKind::Ident)?;
        let name = CompactString::from(self.lexeme(&name_token));

        // A declaration that stops at the terminator carries no initializer.
        if matches!(self.peek()?.kind, TokenKind::Newline | TokenKind::Eof) {
            let _ = self.eat_if(TokenKind::Newline)?;
            if is_constant {
                return Err(ParserError {
                    kind: ParserErrorKind::MissingConstInitializer,
                    line: keyword.line,
                });
            }
            return Ok(Statement::VariableDeclaration {
                name,
                is_constant,
                initial: None,
            });
        }

        self.expect(TokenKind::Equal)?;
        let initial = self.parse_expression()?;
        self.expect_terminator()?;

        Ok(Statement::VariableDeclaration {
            name,
            is_constant,
            initial: Some(initial),
        })
    }

    fn parse_return_statement(&mut self) -> Result<Statement, ParserError> {
        let _ = self.next_token()?;

        let next = self.peek()?;
        let value = match next.kind {
            // Only an identifier, number, or open parenthesis starts a
            // return value expression.
            TokenKind::Ident | TokenKind::NumericLiteral | TokenKind::LeftParenthesis => {
                Some(self.parse_expression()?)
            }
            TokenKind::RightBrace | TokenKind::Eof => None,
            kind => {
                return Err(ParserError {
                    kind: ParserErrorKind::InvalidReturnValue(kind),
                    line: next.line,
                })
            }
        };
        Ok(Statement::Return { value })
    }

    fn parse_function_declaration(&mut self) -> Result<Statement, ParserError> {
        let _ = self.next_token()?;
        let name_token = self.expect(TokenKind::Ident)?;
        let name = CompactString::from(self.lexeme(&name_token));

        let arguments = self.parse_arguments()?;
        let mut parameters = Vec::with_capacity(arguments.len());
        for argument in arguments {
            match argument {
                Expression::Identifier { name } => parameters.push(name),
                _ => {
                    return Err(ParserError {
                        kind: ParserErrorKind::NonIdentifierParameter,
                        line: name_token.line,
                    })
                }
            }
        }

        self.expect(TokenKind::LeftBrace)?;
        let mut body = Vec::new();
        loop {
            self.skip_newlines()?;
            if matches!(self.peek()?.kind, TokenKind::RightBrace | TokenKind::Eof) {
                break;
            }
            body.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RightBrace)?;
        let _ = self.eat_if(TokenKind::Newline)?;

        Ok(Statement::FunctionDeclaration {
            name,
            parameters,
            body,
        })
    }
}

// Expressions, one precedence level per function.
impl<'src> Parser<'src> {
    pub fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        self.parse_assignment()
    }

    /// Right-associative. Any expression shape is accepted as the assignee;
    /// the evaluator restricts it to an identifier.
    fn parse_assignment(&mut self) -> Result<Expression, ParserError> {
        let left = self.parse_logical()?;
        if self.eat_if(TokenKind::Equal)?.is_some() {
            let value = self.parse_assignment()?;
            return Ok(Expression::Assignment {
                assignee: Box::new(left),
                value: Box::new(value),
            });
        }
        Ok(left)
    }

    fn parse_logical(&mut self) -> Result<Expression, ParserError> {
        let mut left = self.parse_comparison()?;
        loop {
            let operator = match self.peek()?.kind {
                TokenKind::And => LogicalOperator::And,
                TokenKind::Or => LogicalOperator::Or,
                _ => break,
            };
            let _ = self.next_token()?;
            let right = self.parse_comparison()?;
            left = Expression::Logical {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expression, ParserError> {
        let mut left = self.parse_comparison_operand()?;
        loop {
            let operator = match self.peek()?.kind {
                TokenKind::EqualEqual => BinaryOperator::EqualEqual,
                TokenKind::BangEqual => BinaryOperator::BangEqual,
                TokenKind::LessThan => BinaryOperator::LessThan,
                TokenKind::GreaterThan => BinaryOperator::GreaterThan,
                TokenKind::LessThanEqual => BinaryOperator::LessThanEqual,
                TokenKind::GreaterThanEqual => BinaryOperator::GreaterThanEqual,
                _ => break,
            };
            let _ = self.next_token()?;
            let right = self.parse_comparison_operand()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Object literals sit at the comparison level: an opening brace starts
    /// one instead of descending further.
    fn parse_comparison_operand(&mut self) -> Result<Expression, ParserError> {
        if self.peek()?.kind == TokenKind::LeftBrace {
            let object = self.parse_object_literal()?;
            return self.parse_postfix_operators(object);
        }
        self.parse_additive()
    }

    fn parse_object_literal(&mut self) -> Result<Expression, ParserError> {
        self.expect(TokenKind::LeftBrace)?;

        let mut properties = Vec::new();
        loop {
            self.skip_newlines()?;
            if matches!(self.peek()?.kind, TokenKind::RightBrace | TokenKind::Eof) {
                break;
            }

            let key_token = self.expect(TokenKind::Ident)?;
            let key = CompactString::from(self.lexeme(&key_token));

            // Shorthand property: `{ key }` resolves by name at evaluation.
            match self.peek()?.kind {
                TokenKind::Comma => {
                    let _ = self.next_token()?;
                    properties.push(Property { key, value: None });
                    continue;
                }
                TokenKind::RightBrace => {
                    properties.push(Property { key, value: None });
                    continue;
                }
                _ => {}
            }

            self.expect(TokenKind::Colon)?;
            let value = self.parse_expression()?;
            properties.push(Property {
                key,
                value: Some(value),
            });

            self.skip_newlines()?;
            if self.peek()?.kind != TokenKind::RightBrace {
                self.expect(TokenKind::Comma)?;
            }
        }

        self.expect(TokenKind::RightBrace)?;
        Ok(Expression::ObjectLiteral { properties })
    }

    fn parse_additive(&mut self) -> Result<Expression, ParserError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let operator = match self.peek()?.kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            let _ = self.next_token()?;
            let right = self.parse_multiplicative()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression, ParserError> {
        let mut left = self.parse_unary()?;
        loop {
            let operator = match self.peek()?.kind {
                TokenKind::Star => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                TokenKind::Percent => BinaryOperator::Modulo,
                _ => break,
            };
            let _ = self.next_token()?;
            let right = self.parse_unary()?;
            left = Expression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression, ParserError> {
        let operator = match self.peek()?.kind {
            TokenKind::Bang => Some(UnaryOperator::Bang),
            TokenKind::Minus => Some(UnaryOperator::Minus),
            // Unary plus is a no-op that returns its operand unchanged.
            TokenKind::Plus => None,
            _ => return self.parse_postfix(),
        };
        let _ = self.next_token()?;
        let operand = self.parse_unary()?;
        Ok(match operator {
            Some(operator) => Expression::Unary {
                operator,
                operand: Box::new(operand),
            },
            None => operand,
        })
    }

    fn parse_postfix(&mut self) -> Result<Expression, ParserError> {
        let base = self.parse_primary()?;
        self.parse_postfix_operators(base)
    }

    /// Postfix `.`, `[]`, and `()` chain left-associatively, so
    /// `a.b[0](x).c` is a single chain.
    fn parse_postfix_operators(
        &mut self,
        mut expr: Expression,
    ) -> Result<Expression, ParserError> {
        loop {
            match self.peek()?.kind {
                TokenKind::Dot => {
                    let _ = self.next_token()?;
                    let property_token = self.next_token()?;
                    if property_token.kind != TokenKind::Ident {
                        return Err(ParserError {
                            kind: ParserErrorKind::NonIdentifierProperty,
                            line: property_token.line,
                        });
                    }
                    let property = Expression::Identifier {
                        name: CompactString::from(self.lexeme(&property_token)),
                    };
                    expr = Expression::Member {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: false,
                    };
                }
                TokenKind::LeftBracket => {
                    let _ = self.next_token()?;
                    let property = self.parse_expression()?;
                    self.expect(TokenKind::RightBracket)?;
                    expr = Expression::Member {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: true,
                    };
                }
                TokenKind::LeftParenthesis => {
                    let arguments = self.parse_arguments()?;
                    expr = Expression::Call {
                        callee: Box::new(expr),
                        arguments,
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expression>, ParserError> {
        self.expect(TokenKind::LeftParenthesis)?;
        let mut arguments = Vec::new();
        if self.peek()?.kind != TokenKind::RightParenthesis {
            arguments.push(self.parse_assignment()?);
            while self.eat_if(TokenKind::Comma)?.is_some() {
                arguments.push(self.parse_assignment()?);
            }
        }
        self.expect(TokenKind::RightParenthesis)?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<Expression, ParserError> {
        if self.peek()?.kind == TokenKind::LeftBrace {
            return self.parse_object_literal();
        }

        let token = self.next_token()?;
        match token.kind {
            TokenKind::Ident => Ok(Expression::Identifier {
                name: CompactString::from(self.lexeme(&token)),
            }),
            TokenKind::NumericLiteral => Ok(Expression::NumericLiteral {
                value: self
                    .lexeme(&token)
                    .parse()
                    .expect("Numeric literal tokens are valid `f64`"),
            }),
            TokenKind::StringLiteral => {
                let lexeme = self.lexeme(&token);
                let value = lexeme
                    .get(1..lexeme.len() - 1)
                    .expect("String literal tokens are at least length 2.");
                Ok(Expression::StringLiteral {
                    value: CompactString::from(value),
                })
            }
            TokenKind::KeywordTrue => Ok(Expression::BooleanLiteral { value: true }),
            TokenKind::KeywordFalse => Ok(Expression::BooleanLiteral { value: false }),
            TokenKind::LeftParenthesis => {
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RightParenthesis)?;
                Ok(inner)
            }
            TokenKind::LeftBracket => self.parse_array_literal(),
            kind => Err(ParserError {
                kind: ParserErrorKind::NonExpression(kind),
                line: token.line,
            }),
        }
    }

    /// The opening bracket is already consumed. Supports the empty array and
    /// a trailing comma.
    fn parse_array_literal(&mut self) -> Result<Expression, ParserError> {
        let mut elements = Vec::new();
        if self.peek()?.kind != TokenKind::RightBracket {
            loop {
                elements.push(self.parse_expression()?);
                if self.peek()?.kind == TokenKind::RightBracket {
                    break;
                }
                self.expect(TokenKind::Comma)?;
                if self.peek()?.kind == TokenKind::RightBracket {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightBracket)?;
        Ok(Expression::ArrayLiteral { elements })
    }
}
