use super::environment::Environment;
use super::error::RuntimeError;
use super::value::{Function, Value};
use super::ProgramState;
use crate::ast::{BinaryOperator, Expression, LogicalOperator, Program, Statement, UnaryOperator};
use compact_str::ToCompactString;
use std::collections::HashMap;
use std::sync::Arc;

pub struct TreeWalkEvaluator;

impl TreeWalkEvaluator {
    pub fn run(program: &Program, environment: &mut Environment) -> Result<Value, RuntimeError> {
        let mut last = Value::Null;
        for statement in program.iter() {
            match Self::interpret_statement(statement, environment)? {
                ProgramState::Completed(value) => last = value,
                // A top-level `pop` ends the program with its value.
                ProgramState::Return(value) => return Ok(value),
            }
        }
        Ok(last)
    }

    fn interpret_statement(
        statement: &Statement,
        environment: &mut Environment,
    ) -> Result<ProgramState, RuntimeError> {
        match statement {
            Statement::VariableDeclaration {
                name,
                is_constant,
                initial,
            } => {
                let value = match initial {
                    Some(expr) => Self::evaluate_expression(expr, environment)?,
                    None => Value::Null,
                };
                environment.declare(name, *is_constant, value.clone())?;
                Ok(ProgramState::Completed(value))
            }
            Statement::FunctionDeclaration {
                name,
                parameters,
                body,
            } => {
                let function = Value::Function(Arc::new(Function {
                    name: name.clone(),
                    parameters: parameters.clone(),
                    body: body.clone(),
                    closure: environment.clone(),
                }));
                // Function names bind as constants.
                environment.declare(name, true, function.clone())?;
                Ok(ProgramState::Completed(function))
            }
            Statement::Return { value } => {
                let value = match value {
                    Some(expr) => Self::evaluate_expression(expr, environment)?,
                    None => Value::Null,
                };
                Ok(ProgramState::Return(value))
            }
            Statement::If {
                condition,
                consequent,
                alternate,
            } => {
                let mut scope = environment.new_scope();
                let condition = Self::evaluate_expression(condition, &mut scope)?;
                let Value::Bool(condition) = condition else {
                    return Err(RuntimeError::NonBooleanCondition(condition));
                };
                if condition {
                    let Statement::Block { body } = consequent.as_ref() else {
                        return Err(RuntimeError::NonBlockBranch);
                    };
                    if let state @ ProgramState::Return(_) =
                        Self::interpret_block_body(body, &mut scope)?
                    {
                        return Ok(state);
                    }
                } else if let Some(alternate) = alternate {
                    // The alternate is either another `If` (an else-if
                    // chain) or a block.
                    let state = match alternate.as_ref() {
                        Statement::If { .. } => {
                            Self::interpret_statement(alternate, &mut scope)?
                        }
                        Statement::Block { body } => {
                            Self::interpret_block_body(body, &mut scope)?
                        }
                        _ => return Err(RuntimeError::NonBlockBranch),
                    };
                    if let state @ ProgramState::Return(_) = state {
                        return Ok(state);
                    }
                }
                Ok(ProgramState::Completed(Value::Null))
            }
            Statement::While { condition, body } => {
                // A single scope covers every iteration.
                let mut scope = environment.new_scope();
                loop {
                    let value = Self::evaluate_expression(condition, &mut scope)?;
                    let Value::Bool(value) = value else {
                        return Err(RuntimeError::NonBooleanCondition(value));
                    };
                    if !value {
                        break;
                    }
                    if let state @ ProgramState::Return(_) =
                        Self::interpret_loop_body(body, &mut scope)?
                    {
                        return Ok(state);
                    }
                }
                Ok(ProgramState::Completed(Value::Null))
            }
            Statement::For {
                init,
                condition,
                update,
                body,
            } => {
                let mut scope = environment.new_scope();
                if let Some(init) = init {
                    let _ = Self::interpret_statement(init, &mut scope)?;
                }
                loop {
                    let proceed = match condition {
                        Some(condition) => {
                            let value = Self::evaluate_expression(condition, &mut scope)?;
                            let Value::Bool(value) = value else {
                                return Err(RuntimeError::NonBooleanCondition(value));
                            };
                            value
                        }
                        None => true,
                    };
                    if !proceed {
                        break;
                    }
                    if let state @ ProgramState::Return(_) =
                        Self::interpret_loop_body(body, &mut scope)?
                    {
                        return Ok(state);
                    }
                    if let Some(update) = update {
                        let _ = Self::evaluate_expression(update, &mut scope)?;
                    }
                }
                Ok(ProgramState::Completed(Value::Null))
            }
            Statement::Block { body } => {
                let mut scope = environment.new_scope();
                Self::interpret_block_body(body, &mut scope)
            }
            Statement::Expression { expr } => Ok(ProgramState::Completed(
                Self::evaluate_expression(expr, environment)?,
            )),
        }
    }

    fn interpret_block_body(
        body: &[Statement],
        environment: &mut Environment,
    ) -> Result<ProgramState, RuntimeError> {
        for statement in body {
            if let state @ ProgramState::Return(_) =
                Self::interpret_statement(statement, environment)?
            {
                return Ok(state);
            }
        }
        Ok(ProgramState::Completed(Value::Null))
    }

    /// A block body runs directly in the loop scope rather than opening a
    /// fresh scope each iteration.
    fn interpret_loop_body(
        body: &Statement,
        environment: &mut Environment,
    ) -> Result<ProgramState, RuntimeError> {
        match body {
            Statement::Block { body } => Self::interpret_block_body(body, environment),
            _ => Self::interpret_statement(body, environment),
        }
    }

    pub fn evaluate_expression(
        expr: &Expression,
        environment: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        match expr {
            Expression::Identifier { name } => environment.get(name),
            Expression::NumericLiteral { value } => Ok(Value::Number(*value)),
            Expression::StringLiteral { value } => Ok(Value::String(value.clone())),
            Expression::BooleanLiteral { value } => Ok(Value::Bool(*value)),
            Expression::Assignment { assignee, value } => {
                let Expression::Identifier { name } = assignee.as_ref() else {
                    return Err(RuntimeError::InvalidAssignmentTarget);
                };
                let value = Self::evaluate_expression(value, environment)?;
                environment.assign(name, value)
            }
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                let lhs = Self::evaluate_expression(left, environment)?;
                let rhs = Self::evaluate_expression(right, environment)?;
                match operator {
                    BinaryOperator::Add => lhs.add(&rhs),
                    BinaryOperator::Subtract => lhs.subtract(&rhs),
                    BinaryOperator::Multiply => lhs.multiply(&rhs),
                    BinaryOperator::Divide => lhs.divide(&rhs),
                    BinaryOperator::Modulo => lhs.modulo(&rhs),
                    BinaryOperator::EqualEqual => Ok(Value::Bool(lhs.is_equal(&rhs))),
                    BinaryOperator::BangEqual => Ok(Value::Bool(lhs.is_not_equal(&rhs))),
                    BinaryOperator::LessThan => lhs.less_than(&rhs),
                    BinaryOperator::LessThanEqual => lhs.less_than_or_equal(&rhs),
                    BinaryOperator::GreaterThan => lhs.greater_than(&rhs),
                    BinaryOperator::GreaterThanEqual => lhs.greater_than_or_equal(&rhs),
                }
            }
            Expression::Logical {
                left,
                operator,
                right,
            } => {
                let lhs = Self::evaluate_expression(left, environment)?;
                let Value::Bool(lhs) = lhs else {
                    return Err(RuntimeError::NonBooleanOperand(lhs));
                };
                // Short circuit without touching the right operand.
                match operator {
                    LogicalOperator::And if !lhs => return Ok(Value::Bool(false)),
                    LogicalOperator::Or if lhs => return Ok(Value::Bool(true)),
                    _ => {}
                }
                let rhs = Self::evaluate_expression(right, environment)?;
                let Value::Bool(rhs) = rhs else {
                    return Err(RuntimeError::NonBooleanOperand(rhs));
                };
                Ok(Value::Bool(rhs))
            }
            Expression::Unary { operator, operand } => {
                let operand = Self::evaluate_expression(operand, environment)?;
                match operator {
                    UnaryOperator::Bang => operand.logical_not(),
                    UnaryOperator::Minus => operand.numeric_negate(),
                }
            }
            Expression::Call { callee, arguments } => {
                let callee = Self::evaluate_expression(callee, environment)?;
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(Self::evaluate_expression(argument, environment)?);
                }
                Self::call_value(&callee, &args, environment)
            }
            Expression::Member {
                object,
                property,
                computed,
            } => {
                let object = Self::evaluate_expression(object, environment)?;
                if *computed {
                    let key = Self::evaluate_expression(property, environment)?;
                    Self::evaluate_computed_member(&object, &key)
                } else {
                    let Expression::Identifier { name } = property.as_ref() else {
                        return Err(RuntimeError::NonIdentifierProperty);
                    };
                    let Value::Object(properties) = &object else {
                        return Err(RuntimeError::NonObject(object));
                    };
                    let properties = properties.lock().unwrap();
                    Ok(properties.get(name.as_str()).cloned().unwrap_or(Value::Null))
                }
            }
            Expression::ArrayLiteral { elements } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(Self::evaluate_expression(element, environment)?);
                }
                Ok(Value::array(values))
            }
            Expression::ObjectLiteral { properties } => {
                let mut map = HashMap::with_capacity(properties.len());
                for property in properties {
                    let value = match &property.value {
                        Some(expr) => Self::evaluate_expression(expr, environment)?,
                        // Shorthand `{ key }` resolves the key as a variable.
                        None => environment.get(&property.key)?,
                    };
                    map.insert(property.key.clone(), value);
                }
                Ok(Value::object(map))
            }
        }
    }

    fn call_value(
        callee: &Value,
        args: &[Value],
        environment: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::NativeFunction(function) => function.call(args, environment),
            Value::Function(function) => {
                let mut scope = function.closure.new_scope();
                // Parameters bind positionally; missing arguments become
                // null and extra arguments are dropped.
                for (index, parameter) in function.parameters.iter().enumerate() {
                    let argument = args.get(index).cloned().unwrap_or(Value::Null);
                    scope.declare(parameter, false, argument)?;
                }
                let mut last = Value::Null;
                for statement in &function.body {
                    match Self::interpret_statement(statement, &mut scope)? {
                        ProgramState::Completed(value) => last = value,
                        ProgramState::Return(value) => return Ok(value),
                    }
                }
                Ok(last)
            }
            value => Err(RuntimeError::NonCallable(value.clone())),
        }
    }

    fn evaluate_computed_member(object: &Value, key: &Value) -> Result<Value, RuntimeError> {
        match object {
            Value::Array(elements) => {
                let Value::Number(index) = key else {
                    return Err(RuntimeError::NonNumericIndex(key.clone()));
                };
                let elements = elements.lock().unwrap();
                let index = *index as i64;
                if index < 0 || index as usize >= elements.len() {
                    return Err(RuntimeError::IndexOutOfBounds {
                        index,
                        length: elements.len(),
                    });
                }
                Ok(elements[index as usize].clone())
            }
            Value::Object(properties) => {
                let key = match key {
                    Value::String(key) => key.clone(),
                    Value::Number(n) => n.to_compact_string(),
                    key => return Err(RuntimeError::InvalidKey(key.clone())),
                };
                let properties = properties.lock().unwrap();
                Ok(properties.get(key.as_str()).cloned().unwrap_or(Value::Null))
            }
            value => Err(RuntimeError::NonIndexable(value.clone())),
        }
    }
}
