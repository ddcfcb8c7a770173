use super::environment::Environment;
use super::error::RuntimeError;
use crate::ast::Statement;
use compact_str::CompactString;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex};

/// Builtin functions installed into an environment by the host. The
/// evaluator calls these like any other callable value.
pub trait NativeFunction: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn call(
        &self,
        arguments: &[Value],
        environment: &mut Environment,
    ) -> Result<Value, RuntimeError>;
}

/// A declared function together with the environment it closed over.
#[derive(Debug)]
pub struct Function {
    pub name: CompactString,
    pub parameters: Vec<CompactString>,
    pub body: Vec<Statement>,
    pub closure: Environment,
}

/// Runtime values. Arrays and objects are reference types so that every
/// binding sees in-place mutation; the rest copy on assignment.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(CompactString),
    Array(Arc<Mutex<Vec<Value>>>),
    Object(Arc<Mutex<HashMap<CompactString, Value>>>),
    Function(Arc<Function>),
    NativeFunction(Arc<dyn NativeFunction>),
}

impl Value {
    pub fn array(elements: Vec<Value>) -> Self {
        Self::Array(Arc::new(Mutex::new(elements)))
    }

    pub fn object(properties: HashMap<CompactString, Value>) -> Self {
        Self::Object(Arc::new(Mutex::new(properties)))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Array(elements) => {
                let elements = elements.lock().unwrap();
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Value::Object(properties) => {
                let properties = properties.lock().unwrap();
                write!(f, "{{")?;
                for (index, (key, value)) in properties.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Value::Function(function) => write!(f, "<fn {}>", function.name),
            Value::NativeFunction(function) => write!(f, "<native fn `{}`>", function.name()),
        }
    }
}

// Operator semantics. Arithmetic and ordering are defined on numbers only;
// equality compares primitives and is `false` across mismatched types.
impl Value {
    pub fn add(&self, other: &Self) -> Result<Self, RuntimeError> {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => Ok(Value::Number(lhs + rhs)),
            (lhs, rhs) => Err(RuntimeError::NonNumericOperands(lhs.clone(), rhs.clone())),
        }
    }

    pub fn subtract(&self, other: &Self) -> Result<Self, RuntimeError> {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => Ok(Value::Number(lhs - rhs)),
            (lhs, rhs) => Err(RuntimeError::NonNumericOperands(lhs.clone(), rhs.clone())),
        }
    }

    pub fn multiply(&self, other: &Self) -> Result<Self, RuntimeError> {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => Ok(Value::Number(lhs * rhs)),
            (lhs, rhs) => Err(RuntimeError::NonNumericOperands(lhs.clone(), rhs.clone())),
        }
    }

    pub fn divide(&self, other: &Self) -> Result<Self, RuntimeError> {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => Ok(Value::Number(lhs / rhs)),
            (lhs, rhs) => Err(RuntimeError::NonNumericOperands(lhs.clone(), rhs.clone())),
        }
    }

    /// Truncates both operands to integers before taking the remainder.
    pub fn modulo(&self, other: &Self) -> Result<Self, RuntimeError> {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => {
                let result = (*lhs as i64)
                    .checked_rem(*rhs as i64)
                    .ok_or(RuntimeError::ModuloByZero)?;
                Ok(Value::Number(result as f64))
            }
            (lhs, rhs) => Err(RuntimeError::NonNumericOperands(lhs.clone(), rhs.clone())),
        }
    }

    pub fn less_than(&self, other: &Self) -> Result<Self, RuntimeError> {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => Ok(Value::Bool(lhs < rhs)),
            (lhs, rhs) => Err(RuntimeError::NonNumericOperands(lhs.clone(), rhs.clone())),
        }
    }

    pub fn less_than_or_equal(&self, other: &Self) -> Result<Self, RuntimeError> {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => Ok(Value::Bool(lhs <= rhs)),
            (lhs, rhs) => Err(RuntimeError::NonNumericOperands(lhs.clone(), rhs.clone())),
        }
    }

    pub fn greater_than(&self, other: &Self) -> Result<Self, RuntimeError> {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => Ok(Value::Bool(lhs > rhs)),
            (lhs, rhs) => Err(RuntimeError::NonNumericOperands(lhs.clone(), rhs.clone())),
        }
    }

    pub fn greater_than_or_equal(&self, other: &Self) -> Result<Self, RuntimeError> {
        match (self, other) {
            (Value::Number(lhs), Value::Number(rhs)) => Ok(Value::Bool(lhs >= rhs)),
            (lhs, rhs) => Err(RuntimeError::NonNumericOperands(lhs.clone(), rhs.clone())),
        }
    }

    pub fn is_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(lhs), Value::Bool(rhs)) => lhs == rhs,
            (Value::Number(lhs), Value::Number(rhs)) => lhs == rhs,
            (Value::String(lhs), Value::String(rhs)) => lhs == rhs,
            _ => false,
        }
    }

    pub fn is_not_equal(&self, other: &Self) -> bool {
        !self.is_equal(other)
    }

    pub fn numeric_negate(&self) -> Result<Self, RuntimeError> {
        match self {
            Value::Number(n) => Ok(Value::Number(-n)),
            v => Err(RuntimeError::NonNumericUnary(v.clone())),
        }
    }

    pub fn logical_not(&self) -> Result<Self, RuntimeError> {
        match self {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            v => Err(RuntimeError::NonBooleanUnary(v.clone())),
        }
    }
}
