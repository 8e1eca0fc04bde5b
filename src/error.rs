//! Centralised error hierarchy for the **FWJS interpreter**.
//!
//! Every subsystem (scanner, parser, environment, evaluator, CLI) converts its
//! failure modes into one of the variants defined here, so the whole crate
//! shares a single `Result<T>` alias and interoperates with `anyhow` at the
//! binary boundary.
//!
//! Unresolved variables are deliberately absent: they evaluate to `null`.
//!
//! The module **does not** print diagnostics itself

use std::io;
use thiserror::Error;

use log::info;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FwjsError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error: {message}")]
    Parse { message: String, line: usize },

    /// An operator or control construct received a value of the wrong variant.
    #[error("Type mismatch: {context} expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        context: String,
    },

    /// `declare` hit a name already bound in the same scope.
    #[error("Variable '{name}' already defined in this scope")]
    DuplicateDeclaration { name: String },

    /// Division or modulo by zero.
    #[error("Arithmetic error: {message}")]
    Arithmetic { message: String },

    /// Call site argument count differs from the closure's parameter count.
    #[error("Expected {expected} arguments but got {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl FwjsError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        FwjsError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", line, message);

        FwjsError::Parse { message, line }
    }

    pub fn type_mismatch<S: Into<String>>(
        expected: &'static str,
        found: &'static str,
        context: S,
    ) -> Self {
        let context: String = context.into();

        info!(
            "Creating TypeMismatch error: expected={}, found={}, context={}",
            expected, found, context
        );

        FwjsError::TypeMismatch {
            expected,
            found,
            context,
        }
    }

    pub fn duplicate<S: Into<String>>(name: S) -> Self {
        let name: String = name.into();

        info!("Creating DuplicateDeclaration error: name={}", name);

        FwjsError::DuplicateDeclaration { name }
    }

    pub fn arithmetic<S: Into<String>>(msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Arithmetic error: msg={}", message);

        FwjsError::Arithmetic { message }
    }

    pub fn arity(expected: usize, found: usize) -> Self {
        info!(
            "Creating ArityMismatch error: expected={}, found={}",
            expected, found
        );

        FwjsError::ArityMismatch { expected, found }
    }

    /// `true` for failures raised before evaluation starts (scanner/parser).
    pub fn is_static(&self) -> bool {
        matches!(self, FwjsError::Lex { .. } | FwjsError::Parse { .. })
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, FwjsError>;
