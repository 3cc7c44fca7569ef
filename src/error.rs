//! Error types for loose JSON/TOML parsing and value conversion.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: A document that the grammar rejects, including literals
//!   whose value the numeric or date interpreter refuses. Carries the 1-based
//!   line and column (tabs count as 4 columns) and the offending source line.
//! - **Type Mismatches**: A [`Value`](crate::Value) that cannot be converted to
//!   the requested Rust type
//! - **Unsupported Types**: A Rust value that has no [`Value`](crate::Value) form
//! - **JSON Errors**: Failures while encoding canonical JSON text
//!
//! ## Examples
//!
//! ```rust
//! use serde_loose::{parse_json, Error, Interop, LineBreak};
//!
//! let err = parse_json("[1, 2\n  'abc", LineBreak::Lf, Interop::None).unwrap_err();
//! assert_eq!(err.line(), Some(2));
//! assert_eq!(err.column(), Some(3));
//! assert!(err.to_string().contains("Expect array closing bracket"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Parse failure with position information
    #[error("{msg}\n --> Line {line}, Col {col}\n{context}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
    },

    /// Type mismatch during conversion to a Rust type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Unsupported type during conversion to a value
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Canonical JSON encoding failure
    #[error("JSON error: {0}")]
    Json(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line, column and source line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_loose::Error;
    ///
    /// let err = Error::syntax(10, 5, "Expect termination", "a = 1 2");
    /// assert!(err.to_string().contains("Line 10, Col 5"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str, context: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_loose::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Line of a syntax error, 1-based.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Column of a syntax error, 1-based, tabs counted as 4 columns.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Error::Syntax { col, .. } => Some(*col),
            _ => None,
        }
    }

    /// The bare diagnostic message, without position decoration.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Error::Syntax { msg, .. } => msg.clone(),
            other => other.to_string(),
        }
    }

    /// The source line a syntax error points into.
    #[must_use]
    pub fn source_line(&self) -> Option<&str> {
        match self {
            Error::Syntax { context, .. } => Some(context),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
