use crate::error::{FwjsError, Result};
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A single scope: local bindings plus the scope it was created inside.
struct Scope {
    values: HashMap<String, Value>,
    enclosing: Option<Environment>,
}

/// Shared handle to one node of the scope tree.
///
/// Cloning the handle aliases the scope; closures and call frames that hold
/// the same handle observe each other's writes.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Scope>>);

impl Environment {
    /// The root scope of a program run.
    pub fn global() -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            values: HashMap::new(),
            enclosing: None,
        })))
    }

    /// A fresh scope nested inside `enclosing`.
    pub fn with_enclosing(enclosing: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            values: HashMap::new(),
            enclosing: Some(enclosing.clone()),
        })))
    }

    pub fn is_global(&self) -> bool {
        self.0.borrow().enclosing.is_none()
    }

    /// Do both handles point at the same scope?
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.0.borrow().values.contains_key(name)
    }

    /// Names bound directly in this scope, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().values.keys().cloned().collect();
        names.sort();
        names
    }

    fn enclosing(&self) -> Option<Environment> {
        self.0.borrow().enclosing.clone()
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.0.borrow().values.get(name).cloned()
    }

    fn set(&self, name: &str, value: Value) {
        self.0.borrow_mut().values.insert(name.to_string(), value);
    }

    /// Walks outward from this scope and returns the first scope binding `name`.
    fn find_scope(&self, name: &str) -> Option<Environment> {
        let mut current: Environment = self.clone();

        loop {
            if current.contains_local(name) {
                return Some(current);
            }

            current = current.enclosing()?;
        }
    }

    fn root(&self) -> Environment {
        let mut current: Environment = self.clone();

        while let Some(next) = current.enclosing() {
            current = next;
        }

        current
    }

    /// Looks `name` up through the chain; unbound names are `null`.
    pub fn resolve(&self, name: &str) -> Value {
        let value: Value = self
            .find_scope(name)
            .and_then(|scope| scope.get(name))
            .unwrap_or(Value::Null);

        debug!("Resolved '{}' to {}", name, value);

        value
    }

    /// Creates `name` in this scope. Shadowing an outer binding is allowed,
    /// rebinding a name already local to this scope is not.
    pub fn declare(&self, name: &str, value: Value) -> Result<()> {
        if self.contains_local(name) {
            debug!("Rejecting duplicate declaration of '{}'", name);
            return Err(FwjsError::duplicate(name));
        }

        debug!("Declaring '{}' = {}", name, value);
        self.set(name, value);

        Ok(())
    }

    /// Overwrites the nearest binding of `name`; with none in the chain the
    /// binding is created in the global scope.
    pub fn update(&self, name: &str, value: Value) {
        let target: Environment = match self.find_scope(name) {
            Some(scope) => scope,
            None => {
                debug!("'{}' is unbound, creating it in the global scope", name);
                self.root()
            }
        };

        debug!("Updating '{}' = {}", name, value);
        target.set(name, value);
    }
}

impl fmt::Debug for Environment {
    // Bindings can hold closures that capture this very scope, so only names
    // are printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.local_names())
            .field("global", &self.is_global())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_are_scope_local() {
        let global = Environment::global();
        let local = Environment::with_enclosing(&global);

        global.set("x", Value::Int(1));

        assert_eq!(local.get("x"), None);
        assert_eq!(global.get("x"), Some(Value::Int(1)));
    }

    #[test]
    fn root_walks_to_global() {
        let global = Environment::global();
        let inner = Environment::with_enclosing(&Environment::with_enclosing(&global));

        assert!(inner.root().ptr_eq(&global));
        assert!(global.root().ptr_eq(&global));
        assert!(!inner.is_global());
    }
}
