use crate::expr::Expr;
use crate::value::Value;

/// Renders an expression tree in parenthesised prefix form, e.g.
/// `(seq (var x 1) (print (+ x 2)))`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        match expr {
            // ── leaves ─────────────────────────────────────────────────
            Expr::Literal(value) => match value {
                Value::Closure(_) => "<closure>".into(),
                other => other.to_string(),
            },

            Expr::Variable(name) => name.clone(),

            // ── operators ──────────────────────────────────────────────
            Expr::Print(operand) => format!("(print {})", Self::print(operand)),

            Expr::Binary { op, left, right } => {
                format!("({} {} {})", op, Self::print(left), Self::print(right))
            }

            // ── control flow ───────────────────────────────────────────
            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => format!(
                "(if {} {} {})",
                Self::print(condition),
                Self::print(then_branch),
                Self::print(else_branch)
            ),

            Expr::While { condition, body } => {
                format!("(while {} {})", Self::print(condition), Self::print(body))
            }

            Expr::Sequence(first, second) => {
                format!("(seq {} {})", Self::print(first), Self::print(second))
            }

            // ── bindings ───────────────────────────────────────────────
            Expr::VarDecl { name, initializer } => {
                format!("(var {} {})", name, Self::print(initializer))
            }

            Expr::Assign { name, value } => format!("(= {} {})", name, Self::print(value)),

            // ── functions ──────────────────────────────────────────────
            Expr::FunctionDecl { params, body } => {
                format!("(function ({}) {})", params.join(" "), Self::print(body))
            }

            Expr::FunctionApp { callee, arguments } => {
                let mut s = format!("(call {}", Self::print(callee));
                for arg in arguments {
                    s.push(' ');
                    s.push_str(&Self::print(arg));
                }
                s.push(')');
                s
            }
        }
    }
}
