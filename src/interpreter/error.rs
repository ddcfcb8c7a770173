use super::value::Value;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum RuntimeError {
    #[error("Cannot resolve variable '{0}'.")]
    UndefinedVariable(CompactString),
    #[error("Cannot redeclare variable '{0}' in the same scope.")]
    Redeclaration(CompactString),
    #[error("Cannot reassign constant '{0}'.")]
    ConstantReassignment(CompactString),
    #[error("Left hand side of an assignment must be an identifier.")]
    InvalidAssignmentTarget,
    #[error("Value {0} is not callable.")]
    NonCallable(Value),
    #[error("Operand {0} of a numeric unary operator is not a number.")]
    NonNumericUnary(Value),
    #[error("Operand {0} of '!' is not a boolean.")]
    NonBooleanUnary(Value),
    #[error("Operands {0} and {1} must both be numbers.")]
    NonNumericOperands(Value, Value),
    #[error("Operand {0} of a logical operator is not a boolean.")]
    NonBooleanOperand(Value),
    #[error("Condition evaluated to non-boolean value {0}.")]
    NonBooleanCondition(Value),
    #[error("Branch of a conditional must be a block.")]
    NonBlockBranch,
    #[error("Cannot take the modulo by zero.")]
    ModuloByZero,
    #[error("Array index {0} is not a number.")]
    NonNumericIndex(Value),
    #[error("Array index {index} is out of bounds for length {length}.")]
    IndexOutOfBounds { index: i64, length: usize },
    #[error("Value {0} is not a valid object key.")]
    InvalidKey(Value),
    #[error("Value {0} does not support indexing.")]
    NonIndexable(Value),
    #[error("Value {0} is not an object.")]
    NonObject(Value),
    #[error("Property access with '.' requires an identifier property.")]
    NonIdentifierProperty,
}
