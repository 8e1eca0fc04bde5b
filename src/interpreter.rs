use std::io::{self, Stdout, Write};

use log::{debug, info};

use crate::environment::Environment;
use crate::error::{FwjsError, Result};
use crate::expr::{BinaryOp, Expr};
use crate::value::{Closure, Value};

/// Tree‑walking evaluator.
///
/// Owns the global scope of a program run and the sink that `print` writes
/// to. Everything else lives in the environment chain reachable from the
/// frame being evaluated.
pub struct Interpreter<W: Write = Stdout> {
    globals: Environment,
    out: W,
}

impl Interpreter<Stdout> {
    /// Creates an interpreter that prints to standard output.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter that prints into `out`.
    pub fn with_output(out: W) -> Self {
        info!("Initializing Interpreter");

        Self {
            globals: Environment::global(),
            out,
        }
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Gives back the print sink, e.g. a `Vec<u8>` holding captured output.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Evaluates a whole program in the global scope.
    pub fn interpret(&mut self, program: &Expr) -> Result<Value> {
        debug!("Interpreting program");

        let globals: Environment = self.globals.clone();
        let value: Value = self.evaluate(program, &globals)?;
        self.out.flush()?;

        info!("Interpretation completed with value: {}", value);
        Ok(value)
    }

    /// Evaluates `expr` in `env`.
    pub fn evaluate(&mut self, expr: &Expr, env: &Environment) -> Result<Value> {
        let value: Value = match expr {
            Expr::Literal(value) => value.clone(),

            Expr::Variable(name) => env.resolve(name),

            Expr::Print(operand) => {
                let value: Value = self.evaluate(operand, env)?;
                writeln!(self.out, "{}", value)?;
                debug!("Printed value: {}", value);
                value
            }

            Expr::Binary { op, left, right } => self.evaluate_binary(*op, left, right, env)?,

            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate_condition(condition, env, "if condition")? {
                    debug!("Condition is true; evaluating then branch");
                    self.evaluate(then_branch, env)?
                } else {
                    debug!("Condition is false; evaluating else branch");
                    self.evaluate(else_branch, env)?
                }
            }

            Expr::While { condition, body } => {
                debug!("Entering while loop");
                let mut last: Value = Value::Null;
                while self.evaluate_condition(condition, env, "while condition")? {
                    last = self.evaluate(body, env)?;
                }
                debug!("Exited while loop");
                last
            }

            Expr::Sequence(first, second) => {
                self.evaluate(first, env)?;
                self.evaluate(second, env)?
            }

            Expr::VarDecl { name, initializer } => {
                let value: Value = self.evaluate(initializer, env)?;
                env.declare(name, value.clone())?;
                value
            }

            Expr::Assign { name, value } => {
                let value: Value = self.evaluate(value, env)?;
                env.update(name, value.clone());
                value
            }

            Expr::FunctionDecl { params, body } => {
                let closure =
                    Value::Closure(Closure::new(params.clone(), body.clone(), env.clone()));
                // The closure is also bound under its own rendering.
                env.update(&closure.to_string(), closure.clone());
                debug!("Defined closure with {} parameters", params.len());
                closure
            }

            Expr::FunctionApp { callee, arguments } => {
                debug!("Evaluating function call");
                let callee_val: Value = self.evaluate(callee, env)?;
                let closure: Closure = match callee_val {
                    Value::Closure(closure) => closure,
                    other => {
                        return Err(FwjsError::type_mismatch(
                            "closure",
                            other.type_name(),
                            "function application",
                        ));
                    }
                };

                let mut arg_values: Vec<Value> = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    let av: Value = self.evaluate(arg, env)?;
                    debug!("Evaluated argument => {}", av);
                    arg_values.push(av);
                }

                self.apply(&closure, arg_values)?
            }
        };

        Ok(value)
    }

    /// Runs `closure` on already evaluated arguments in a fresh frame whose
    /// parent is the closure's captured scope.
    pub fn apply(&mut self, closure: &Closure, args: Vec<Value>) -> Result<Value> {
        if args.len() != closure.arity() {
            debug!(
                "Arity mismatch: expected {}, got {}",
                closure.arity(),
                args.len()
            );
            return Err(FwjsError::arity(closure.arity(), args.len()));
        }

        let frame: Environment = Environment::with_enclosing(&closure.env);
        for (param, arg) in closure.params.iter().zip(args) {
            debug!("Binding parameter '{}' to {}", param, arg);
            frame.declare(param, arg)?;
        }

        debug!("Executing function body");
        let result: Value = self.evaluate(&closure.body, &frame)?;
        debug!("Function returned: {}", result);

        Ok(result)
    }

    fn evaluate_condition(
        &mut self,
        condition: &Expr,
        env: &Environment,
        context: &str,
    ) -> Result<bool> {
        match self.evaluate(condition, env)? {
            Value::Bool(b) => Ok(b),
            other => Err(FwjsError::type_mismatch("bool", other.type_name(), context)),
        }
    }

    fn evaluate_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        env: &Environment,
    ) -> Result<Value> {
        let left_val: Value = self.evaluate(left, env)?;
        let right_val: Value = self.evaluate(right, env)?;
        debug!("Evaluating {} {} {}", left_val, op, right_val);

        let (a, b) = match (&left_val, &right_val) {
            (Value::Int(a), Value::Int(b)) => (*a, *b),
            (Value::Int(_), other) | (other, _) => {
                return Err(FwjsError::type_mismatch(
                    "int",
                    other.type_name(),
                    format!("operator '{}'", op),
                ));
            }
        };

        let value: Value = match op {
            BinaryOp::Add => Value::Int(a.wrapping_add(b)),
            BinaryOp::Subtract => Value::Int(a.wrapping_sub(b)),
            BinaryOp::Multiply => Value::Int(a.wrapping_mul(b)),
            BinaryOp::Divide => {
                if b == 0 {
                    return Err(FwjsError::arithmetic("division by zero"));
                }
                Value::Int(a.wrapping_div(b))
            }
            BinaryOp::Mod => {
                if b == 0 {
                    return Err(FwjsError::arithmetic("modulo by zero"));
                }
                Value::Int(a.wrapping_rem(b))
            }
            BinaryOp::Gt => Value::Bool(a > b),
            BinaryOp::Ge => Value::Bool(a >= b),
            BinaryOp::Lt => Value::Bool(a < b),
            BinaryOp::Le => Value::Bool(a <= b),
            BinaryOp::Eq => Value::Bool(a == b),
        };

        Ok(value)
    }
}
