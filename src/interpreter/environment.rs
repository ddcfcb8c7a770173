use super::error::RuntimeError;
use super::value::Value;
use compact_str::CompactString;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Shared handle to a scope. Cloning the handle aliases the same scope, so
/// closures observe later mutations through their captured environment.
#[derive(Debug, Clone)]
pub struct Environment {
    inner: Arc<Mutex<EnvironmentImpl>>,
}

#[derive(Debug)]
struct EnvironmentImpl {
    variables: HashMap<CompactString, Value>,
    constants: HashSet<CompactString>,
    parent: Option<Environment>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EnvironmentImpl {
                variables: HashMap::new(),
                constants: HashSet::new(),
                parent: None,
            })),
        }
    }

    pub fn new_scope(&self) -> Self {
        Self {
            inner: Arc::new(Mutex::new(EnvironmentImpl {
                variables: HashMap::new(),
                constants: HashSet::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Resolves a name by walking the parent chain.
    pub fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        let inner = self.inner.lock().unwrap();
        if let Some(value) = inner.variables.get(name) {
            return Ok(value.clone());
        }
        match &inner.parent {
            Some(parent) => parent.get(name),
            None => Err(RuntimeError::UndefinedVariable(CompactString::from(name))),
        }
    }

    /// Introduces a binding into this scope. Shadowing an outer binding is
    /// allowed; declaring the same name twice in one scope is not.
    pub fn declare(
        &mut self,
        name: &str,
        is_constant: bool,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.variables.contains_key(name) {
            return Err(RuntimeError::Redeclaration(CompactString::from(name)));
        }
        inner.variables.insert(CompactString::from(name), value);
        if is_constant {
            inner.constants.insert(CompactString::from(name));
        }
        Ok(())
    }

    /// Reassigns the nearest binding of `name`, mutating the scope that
    /// declared it. Returns the assigned value.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<Value, RuntimeError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.variables.contains_key(name) {
            if inner.constants.contains(name) {
                return Err(RuntimeError::ConstantReassignment(CompactString::from(name)));
            }
            inner
                .variables
                .insert(CompactString::from(name), value.clone());
            return Ok(value);
        }
        match &mut inner.parent {
            Some(parent) => parent.assign(name, value),
            None => Err(RuntimeError::UndefinedVariable(CompactString::from(name))),
        }
    }
}
