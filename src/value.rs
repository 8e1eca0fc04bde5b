//! Runtime values produced by evaluation.

use std::fmt;
use std::rc::Rc;

use crate::environment::Environment;
use crate::expr::Expr;

/// A first‑class function: parameter names, body, and the environment that
/// was current when the function expression was evaluated.
///
/// The environment is shared, not copied, so later writes to captured
/// bindings are visible when the closure runs.
#[derive(Debug, Clone)]
pub struct Closure {
    pub params: Rc<[String]>,
    pub body: Rc<Expr>,
    pub env: Environment,
}

impl Closure {
    pub fn new(params: Rc<[String]>, body: Rc<Expr>, env: Environment) -> Self {
        Self { params, body, env }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl PartialEq for Closure {
    /// Identity, not structure: same body node and same captured scope.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && self.env.ptr_eq(&other.env)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Null,
    Closure(Closure),
}

impl Value {
    /// Name of the variant, used in type‑mismatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Closure(_) => "closure",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }

            Value::Bool(b) => write!(f, "{}", b),

            Value::Null => write!(f, "null"),

            // Also the key FunctionDecl binds the closure under.
            Value::Closure(closure) => {
                write!(f, "function({}) {{...}};", closure.params.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closure(params: &[&str]) -> Value {
        let params: Rc<[String]> = params.iter().map(|p| p.to_string()).collect();
        Value::Closure(Closure::new(
            params,
            Rc::new(Expr::Literal(Value::Null)),
            Environment::global(),
        ))
    }

    #[test]
    fn renders_scalars() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn renders_closure_with_params() {
        assert_eq!(closure(&[]).to_string(), "function() {...};");
        assert_eq!(closure(&["a", "b"]).to_string(), "function(a,b) {...};");
    }

    #[test]
    fn closures_compare_by_identity() {
        let a = closure(&["x"]);
        let b = closure(&["x"]);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_eq!(Value::Int(3), Value::from(3));
    }
}
