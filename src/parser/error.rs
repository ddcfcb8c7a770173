use crate::lexer::{LexicalError, TokenKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserErrorKind {
    #[error("Expected {expected} but got token {actual}.")]
    UnexpectedToken {
        actual: TokenKind,
        expected: TokenKind,
    },
    #[error("Expected an expression but got token {0}.")]
    NonExpression(TokenKind),
    #[error("Expected a newline or end of input after statement but got token {0}.")]
    UnterminatedStatement(TokenKind),
    #[error("Must assign a value to a constant declaration.")]
    MissingConstInitializer,
    #[error("Expected function parameters to be plain identifiers.")]
    NonIdentifierParameter,
    #[error("The right hand side of '.' must be an identifier.")]
    NonIdentifierProperty,
    #[error("Expected an expression or end of block after 'pop' but got token {0}.")]
    InvalidReturnValue(TokenKind),
    #[error("Encountered a lexer error {0}.")]
    LexicalError(#[from] LexicalError),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {line}] {kind}")]
pub struct ParserError {
    #[source]
    pub kind: ParserErrorKind,
    pub line: u32,
}
