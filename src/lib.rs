pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

pub use environment::Environment;
pub use error::{FwjsError, Result};
pub use expr::{BinaryOp, Expr};
pub use interpreter::Interpreter;
pub use value::{Closure, Value};
