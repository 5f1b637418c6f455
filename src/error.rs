//! Error types for the Numetrify engine.
//!
//! [`NumetrifyError`] covers everything that can go wrong *before* a method
//! runs: malformed expressions, malformed matrices and vectors, and invalid
//! request parameters. Once a method is running it never returns an error;
//! failures are classified inside its trace instead (see
//! [`crate::roots::RootFailure`] and [`crate::linear::LinearFailure`]).

use thiserror::Error;

/// Result type alias using [`NumetrifyError`].
pub type Result<T> = std::result::Result<T, NumetrifyError>;

/// Unified error type for input validation.
#[derive(Error, Debug)]
pub enum NumetrifyError {
    // ============ Expression Errors ============
    /// Error during lexical analysis of an expression
    #[error("Lexer error at column {column}: {message}")]
    LexerError { column: usize, message: String },

    /// Error while parsing an expression
    #[error("Parse error at column {column}: {message}")]
    ParseError { column: usize, message: String },

    /// Identifier that is neither the variable, a constant nor a function
    #[error("Unknown identifier '{name}' at column {column}")]
    UnknownIdentifier { name: String, column: usize },

    // ============ Matrix / Vector Errors ============
    /// A matrix entry or vector entry could not be read as a number
    #[error("Invalid number '{text}' in {context}")]
    InvalidNumber { text: String, context: String },

    /// Matrix is empty, ragged or not square
    #[error("Invalid matrix: {message}")]
    InvalidMatrix { message: String },

    /// Vector length does not agree with the matrix dimension
    #[error("Dimension mismatch: expected {expected} values, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    // ============ Parameter Errors ============
    /// Invalid method parameter
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // ============ I/O Errors ============
    /// Error reading a request file
    #[error("Failed to read request '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Request or report (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NumetrifyError {
    /// Create a lexer error
    pub fn lexer(column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(column: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            column,
            message: message.into(),
        }
    }

    /// Create an invalid matrix error
    pub fn invalid_matrix(message: impl Into<String>) -> Self {
        Self::InvalidMatrix {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}
