use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// Binary operators. All of them take two ints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Eq => "==",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression tree. Built once by the parser (or by hand) and never mutated
/// by evaluation.
///
/// `FunctionDecl` keeps its parameters and body behind `Rc` so that every
/// closure created from the node can point at them without cloning the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Constant value
    Literal(Value),

    // Variable reference
    Variable(String),

    // print(expr)
    Print(Box<Expr>),

    // Integer arithmetic and comparison
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    // if/else as an expression
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    While {
        condition: Box<Expr>,
        body: Box<Expr>,
    },

    // first; second
    Sequence(Box<Expr>, Box<Expr>),

    // var name = initializer
    VarDecl {
        name: String,
        initializer: Box<Expr>,
    },

    // name = value
    Assign {
        name: String,
        value: Box<Expr>,
    },

    // function(params) { body }
    FunctionDecl {
        params: Rc<[String]>,
        body: Rc<Expr>,
    },

    // callee(arguments)
    FunctionApp {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
}

impl Expr {
    pub fn int(n: i64) -> Self {
        Expr::Literal(Value::Int(n))
    }

    pub fn bool(b: bool) -> Self {
        Expr::Literal(Value::Bool(b))
    }

    pub fn null() -> Self {
        Expr::Literal(Value::Null)
    }

    pub fn var<S: Into<String>>(name: S) -> Self {
        Expr::Variable(name.into())
    }

    pub fn print(expr: Expr) -> Self {
        Expr::Print(Box::new(expr))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn if_else(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn while_loop(condition: Expr, body: Expr) -> Self {
        Expr::While {
            condition: Box::new(condition),
            body: Box::new(body),
        }
    }

    pub fn seq(first: Expr, second: Expr) -> Self {
        Expr::Sequence(Box::new(first), Box::new(second))
    }

    /// Folds a list into right‑nested sequences: `[a, b, c]` becomes
    /// `a; (b; c)`. An empty list is `null`.
    pub fn sequence<I>(exprs: I) -> Self
    where
        I: IntoIterator<Item = Expr>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut iter = exprs.into_iter().rev();

        match iter.next() {
            Some(last) => iter.fold(last, |rest, expr| Expr::seq(expr, rest)),
            None => Expr::null(),
        }
    }

    pub fn var_decl<S: Into<String>>(name: S, initializer: Expr) -> Self {
        Expr::VarDecl {
            name: name.into(),
            initializer: Box::new(initializer),
        }
    }

    pub fn assign<S: Into<String>>(name: S, value: Expr) -> Self {
        Expr::Assign {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn function<I, S>(params: I, body: Expr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::FunctionDecl {
            params: params.into_iter().map(|p| -> String { p.into() }).collect(),
            body: Rc::new(body),
        }
    }

    pub fn call(callee: Expr, arguments: Vec<Expr>) -> Self {
        Expr::FunctionApp {
            callee: Box::new(callee),
            arguments,
        }
    }
}
