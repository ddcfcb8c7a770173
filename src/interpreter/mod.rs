mod environment;
mod error;
mod tree;
mod value;

pub use environment::Environment;
pub use error::RuntimeError;
pub use tree::TreeWalkEvaluator;
pub use value::{Function, NativeFunction, Value};

use crate::ast::Program;

/// Outcome of running one statement. `Return` unwinds to the nearest
/// function call boundary, or out of the program entirely at top level.
#[derive(Debug, Clone)]
pub enum ProgramState {
    Completed(Value),
    Return(Value),
}

/// Evaluates a program in the given environment, returning the value of the
/// last statement (or the returned value if a top-level `pop` runs).
pub fn evaluate(program: &Program, environment: &mut Environment) -> Result<Value, RuntimeError> {
    TreeWalkEvaluator::run(program, environment)
}
