use std::fmt::Display;

use compact_str::CompactString;
use serde::Serialize;

/// Root of a parsed source fragment: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Program {
    pub body: Vec<Statement>,
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.body.iter()
    }
}

/// The serialized form tags every node with its variant name, matching the
/// tagged JSON tree emitted for AST inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Statement {
    VariableDeclaration {
        name: CompactString,
        is_constant: bool,
        initial: Option<Expression>,
    },
    FunctionDeclaration {
        name: CompactString,
        parameters: Vec<CompactString>,
        body: Vec<Statement>,
    },
    #[serde(rename = "ReturnStatement")]
    Return { value: Option<Expression> },
    #[serde(rename = "IfStatement")]
    If {
        condition: Expression,
        consequent: Box<Statement>,
        alternate: Option<Box<Statement>>,
    },
    #[serde(rename = "WhileStatement")]
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    #[serde(rename = "ForStatement")]
    For {
        init: Option<Box<Statement>>,
        condition: Option<Expression>,
        update: Option<Expression>,
        body: Box<Statement>,
    },
    #[serde(rename = "BlockStatement")]
    Block { body: Vec<Statement> },
    #[serde(rename = "ExpressionStatement")]
    Expression { expr: Expression },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expression {
    #[serde(rename = "AssignmentExpr")]
    Assignment {
        assignee: Box<Expression>,
        value: Box<Expression>,
    },
    #[serde(rename = "BinaryExpr")]
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    #[serde(rename = "LogicalExpr")]
    Logical {
        left: Box<Expression>,
        operator: LogicalOperator,
        right: Box<Expression>,
    },
    #[serde(rename = "UnaryExpr")]
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    #[serde(rename = "CallExpr")]
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    #[serde(rename = "MemberExpr")]
    Member {
        object: Box<Expression>,
        property: Box<Expression>,
        computed: bool,
    },
    #[serde(rename = "IdentifierExpr")]
    Identifier { name: CompactString },
    NumericLiteral { value: f64 },
    StringLiteral { value: CompactString },
    BooleanLiteral { value: bool },
    ArrayLiteral { elements: Vec<Expression> },
    ObjectLiteral { properties: Vec<Property> },
}

/// One object-literal entry. A missing value is the shorthand form
/// `{ key }`, resolved by name in the enclosing scope at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub key: CompactString,
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Modulo,
    #[serde(rename = "==")]
    EqualEqual,
    #[serde(rename = "!=")]
    BangEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<=")]
    LessThanEqual,
    #[serde(rename = ">=")]
    GreaterThanEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "!")]
    Bang,
    #[serde(rename = "-")]
    Minus,
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Subtract => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::Divide => write!(f, "/"),
            BinaryOperator::Modulo => write!(f, "%"),
            BinaryOperator::EqualEqual => write!(f, "=="),
            BinaryOperator::BangEqual => write!(f, "!="),
            BinaryOperator::LessThan => write!(f, "<"),
            BinaryOperator::GreaterThan => write!(f, ">"),
            BinaryOperator::LessThanEqual => write!(f, "<="),
            BinaryOperator::GreaterThanEqual => write!(f, ">="),
        }
    }
}

impl Display for LogicalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalOperator::And => write!(f, "&&"),
            LogicalOperator::Or => write!(f, "||"),
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Bang => write!(f, "!"),
            UnaryOperator::Minus => write!(f, "-"),
        }
    }
}
