/*!
Recursive‑descent parser from FWJS tokens to the [`Expr`] tree.

Every FWJS statement is an expression, so the parser produces one tree for
the whole program: statements are chained with right‑nested
[`Expr::Sequence`] nodes and the program's value is the value of its last
statement.

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| `statement`, `block`         | `debug`| High‑level descent into grammar branches. |
| Error paths (`consume`, etc.)| `debug`| Context before returning structured error.|

--------------------------------------------------------------------------------
Grammar (EBNF)
--------------------------------------------------------------------------------

```text
program    → statement* EOF ;
statement  → ";" | block
           | "if" "(" expression ")" body ( "else" body )?
           | "while" "(" expression ")" body
           | "function" IDENT "(" parameters? ")" block
           | expression ";" ;
body       → block | statement ;
block      → "{" statement* "}" ;
parameters → IDENT ( "," IDENT )* ;
expression → "var" IDENT ( "=" expression )?
           | IDENT "=" expression
           | comparison ;
comparison → term ( ( ">" | ">=" | "<" | "<=" | "==" ) term )* ;
term       → factor ( ( "-" | "+" ) factor )* ;
factor     → unary ( ( "/" | "*" | "%" ) unary )* ;
unary      → "-" unary | call ;
call       → primary ( "(" arguments? ")" )* ;
arguments  → expression ( "," expression )* ;
primary    → INT | "true" | "false" | "null" | IDENT
           | "(" expression ")"
           | "print" "(" expression ")"
           | "function" "(" parameters? ")" block ;
```

Desugarings: a missing `else` is `null`, `var x;` initializes to `null`,
`function f(..) {..}` is `var f = function(..) {..}`, and `-e` is `0 - e`.
Blocks group statements but do not open a scope.
*/

use std::rc::Rc;

use crate::error::{FwjsError, Result};
use crate::expr::{BinaryOp, Expr};
use crate::scanner;
use crate::token::{Token, TokenType};

use log::{debug, info};

const MAX_ARITY: usize = 255;

/// Top‑level parser over an immutable slice of tokens.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
}

impl<'a> Parser<'a> {
    /// Construct a new parser. `tokens` must end with an `EOF` token, as
    /// produced by the scanner.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self { tokens, current: 0 }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program into a single expression tree.
    pub fn parse(&mut self) -> Result<Expr> {
        info!("Beginning parse phase");

        let mut statements: Vec<Expr> = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.statement()? {
                statements.push(stmt);
            }
        }

        info!("Parsed {} top-level statements", statements.len());

        Ok(Expr::sequence(statements))
    }

    // ───────────────────────── statement rules ────────────────────

    /// Returns `None` for an empty statement (a lone `;`).
    fn statement(&mut self) -> Result<Option<Expr>> {
        debug!("Entering statement at line {}", self.peek().line);

        if self.matches(TokenType::SEMICOLON) {
            return Ok(None);
        }

        let stmt: Expr = if self.matches(TokenType::LEFT_BRACE) {
            self.block()?
        } else if self.matches(TokenType::IF) {
            self.if_statement()?
        } else if self.matches(TokenType::WHILE) {
            self.while_statement()?
        } else if self.check(TokenType::FUNCTION) && self.check_next(TokenType::IDENTIFIER) {
            self.advance();
            self.function_declaration()?
        } else {
            self.expression_statement()?
        };

        Ok(Some(stmt))
    }

    fn expression_statement(&mut self) -> Result<Expr> {
        let expr: Expr = self.expression()?;
        self.consume(TokenType::SEMICOLON, "Expected ';' after expression")?;
        Ok(expr)
    }

    /// Parses the statements after an opening `{`.
    fn block(&mut self) -> Result<Expr> {
        debug!("Entering block");

        let mut statements: Vec<Expr> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            if let Some(stmt) = self.statement()? {
                statements.push(stmt);
            }
        }

        self.consume(TokenType::RIGHT_BRACE, "Expected '}' after block")?;

        Ok(Expr::sequence(statements))
    }

    /// A loop or branch body: a block, or a single statement.
    fn body(&mut self) -> Result<Expr> {
        Ok(self.statement()?.unwrap_or_else(Expr::null))
    }

    fn if_statement(&mut self) -> Result<Expr> {
        self.consume(TokenType::LEFT_PAREN, "Expected '(' after 'if'")?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expected ')' after condition")?;

        let then_branch: Expr = self.body()?;
        let else_branch: Expr = if self.matches(TokenType::ELSE) {
            self.body()?
        } else {
            Expr::null()
        };

        Ok(Expr::if_else(condition, then_branch, else_branch))
    }

    fn while_statement(&mut self) -> Result<Expr> {
        self.consume(TokenType::LEFT_PAREN, "Expected '(' after 'while'")?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expected ')' after condition")?;
        let body: Expr = self.body()?;

        Ok(Expr::while_loop(condition, body))
    }

    /// `function name(params) { body }`, bound with `var`.
    fn function_declaration(&mut self) -> Result<Expr> {
        let name: &Token<'_> = self.consume(TokenType::IDENTIFIER, "Expected function name")?;
        let function: Expr = self.function_rest()?;

        Ok(Expr::var_decl(name.lexeme, function))
    }

    /// Parameters and body, after the `function` keyword (and name).
    fn function_rest(&mut self) -> Result<Expr> {
        let paren_line: usize = self
            .consume(TokenType::LEFT_PAREN, "Expected '(' after 'function'")?
            .line;

        let mut params: Vec<String> = Vec::new();
        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if params.len() >= MAX_ARITY {
                    return Err(FwjsError::parse(
                        paren_line,
                        "Cannot have more than 255 parameters",
                    ));
                }

                let param: &Token<'_> =
                    self.consume(TokenType::IDENTIFIER, "Expected parameter name")?;
                params.push(param.lexeme.to_string());

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Expected ')' after parameters")?;
        self.consume(TokenType::LEFT_BRACE, "Expected '{' before function body")?;
        let body: Expr = self.block()?;

        Ok(Expr::FunctionDecl {
            params: params.into(),
            body: Rc::new(body),
        })
    }

    // ──────────────────────── expression rules ────────────────────

    fn expression(&mut self) -> Result<Expr> {
        if self.matches(TokenType::VAR) {
            let name: &Token<'_> = self.consume(TokenType::IDENTIFIER, "Expected variable name")?;

            let initializer: Expr = if self.matches(TokenType::EQUAL) {
                self.expression()?
            } else {
                Expr::null()
            };

            return Ok(Expr::var_decl(name.lexeme, initializer));
        }

        if self.check(TokenType::IDENTIFIER) && self.check_next(TokenType::EQUAL) {
            let name: &Token<'_> = self.advance();
            self.advance(); // '='
            let value: Expr = self.expression()?;

            return Ok(Expr::assign(name.lexeme, value));
        }

        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.term()?;

        while let Some(op) = self.match_operator(&[
            (TokenType::GREATER, BinaryOp::Gt),
            (TokenType::GREATER_EQUAL, BinaryOp::Ge),
            (TokenType::LESS, BinaryOp::Lt),
            (TokenType::LESS_EQUAL, BinaryOp::Le),
            (TokenType::EQUAL_EQUAL, BinaryOp::Eq),
        ]) {
            let right: Expr = self.term()?;
            expr = Expr::binary(op, expr, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.factor()?;

        while let Some(op) = self.match_operator(&[
            (TokenType::PLUS, BinaryOp::Add),
            (TokenType::MINUS, BinaryOp::Subtract),
        ]) {
            let right: Expr = self.factor()?;
            expr = Expr::binary(op, expr, right);
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.unary()?;

        while let Some(op) = self.match_operator(&[
            (TokenType::STAR, BinaryOp::Multiply),
            (TokenType::SLASH, BinaryOp::Divide),
            (TokenType::PERCENT, BinaryOp::Mod),
        ]) {
            let right: Expr = self.unary()?;
            expr = Expr::binary(op, expr, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.matches(TokenType::MINUS) {
            let right: Expr = self.unary()?;
            return Ok(Expr::binary(BinaryOp::Subtract, Expr::int(0), right));
        }

        self.call()
    }

    fn call(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.primary()?;

        while self.matches(TokenType::LEFT_PAREN) {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr> {
        let mut arguments: Vec<Expr> = Vec::new();

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if arguments.len() >= MAX_ARITY {
                    return Err(FwjsError::parse(
                        self.peek().line,
                        "Cannot have more than 255 arguments",
                    ));
                }

                arguments.push(self.expression()?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Expected ')' after arguments")?;

        Ok(Expr::call(callee, arguments))
    }

    fn primary(&mut self) -> Result<Expr> {
        let token: &Token<'_> = self.advance();

        let expr: Expr = match &token.token_type {
            TokenType::INT(n) => Expr::int(*n),
            TokenType::TRUE => Expr::bool(true),
            TokenType::FALSE => Expr::bool(false),
            TokenType::NULL => Expr::null(),
            TokenType::IDENTIFIER => Expr::var(token.lexeme),

            TokenType::LEFT_PAREN => {
                let expr: Expr = self.expression()?;
                self.consume(TokenType::RIGHT_PAREN, "Expected ')' after expression")?;
                expr
            }

            TokenType::PRINT => {
                self.consume(TokenType::LEFT_PAREN, "Expected '(' after 'print'")?;
                let operand: Expr = self.expression()?;
                self.consume(TokenType::RIGHT_PAREN, "Expected ')' after print operand")?;
                Expr::print(operand)
            }

            TokenType::FUNCTION => self.function_rest()?,

            _ => {
                debug!("Unexpected token in primary: {}", token);
                let message: String = if token.token_type == TokenType::EOF {
                    "Expected expression at end of input".to_string()
                } else {
                    format!("Expected expression at '{}'", token.lexeme)
                };
                return Err(FwjsError::parse(token.line, message));
            }
        };

        Ok(expr)
    }

    // ───────────────────────── token helpers ──────────────────────

    fn match_operator(&mut self, table: &[(TokenType, BinaryOp)]) -> Option<BinaryOp> {
        let (_, op) = table
            .iter()
            .find(|(token_type, _)| self.check(token_type.clone()))?;
        let op: BinaryOp = *op;
        self.advance();
        Some(op)
    }

    fn matches(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> Result<&'a Token<'a>> {
        if self.check(token_type) {
            return Ok(self.advance());
        }

        let token: &Token<'_> = self.peek();
        debug!("consume failed at {}: {}", token, message);

        let found: String = if token.token_type == TokenType::EOF {
            "end of input".to_string()
        } else {
            format!("'{}'", token.lexeme)
        };

        Err(FwjsError::parse(
            token.line,
            format!("{}, found {}", message, found),
        ))
    }

    fn check(&self, token_type: TokenType) -> bool {
        !self.is_at_end() && self.peek().token_type == token_type
    }

    fn check_next(&self, token_type: TokenType) -> bool {
        self.tokens
            .get(self.current + 1)
            .is_some_and(|token| token.token_type == token_type)
    }

    fn advance(&mut self) -> &'a Token<'a> {
        let token: &'a Token<'a> = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EOF
    }

    fn peek(&self) -> &'a Token<'a> {
        // A token slice without EOF is treated as ending right here.
        static EOF: Token<'static> = Token {
            token_type: TokenType::EOF,
            lexeme: "",
            line: 0,
        };

        self.tokens.get(self.current).unwrap_or(&EOF)
    }
}

/// Scans and parses `source` in one go.
pub fn parse_source(source: &str) -> Result<Expr> {
    let tokens: Vec<Token<'_>> = scanner::tokenize(source)?;
    Parser::new(&tokens).parse()
}
