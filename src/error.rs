// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

/// Broad classification of a [`TsonError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input text is not valid TSON syntax.
    Parse,
    /// A top-level or referenced file could not be read.
    Io,
    /// The reference chain went deeper than the configured ceiling.
    Recursion,
    /// A value had the wrong type (bad `"*"` value, failed conversion).
    Type,
    /// A lookup path does not exist in the document.
    Missing,
}

/// The main error type for TSON parsing and resolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TsonError {
    #[error("[TSON] Syntax Error at {line}:{column}: {message}{}", suffix(.hint, .code))]
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TSON] Unexpected EOF at {line}:{column}: {message}{}", suffix(.hint, .code))]
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TSON] File Error '{path}': {message}{}", suffix(.hint, .code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when `@` references nest deeper than the depth ceiling.
    #[error("[TSON] Recursion Error: {message}{}", suffix(.hint, .code))]
    RecursionError {
        message: String,
        depth: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TSON] Type Error: {message}{}", suffix(.hint, .code))]
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TSON] Missing Key '{path}'{}", suffix(.hint, .code))]
    MissingKey {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl TsonError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TsonError::SyntaxError { .. }
            | TsonError::UnexpectedEof { .. } => ErrorKind::Parse,
            TsonError::FileError { .. } => ErrorKind::Io,
            TsonError::RecursionError { .. } => ErrorKind::Recursion,
            TsonError::TypeError { .. } => ErrorKind::Type,
            TsonError::MissingKey { .. } => ErrorKind::Missing,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            TsonError::SyntaxError { code, .. }
            | TsonError::UnexpectedEof { code, .. }
            | TsonError::FileError { code, .. }
            | TsonError::RecursionError { code, .. }
            | TsonError::TypeError { code, .. }
            | TsonError::MissingKey { code, .. } => *code,
        }
    }

    pub(crate) fn type_error(message: impl Into<String>, hint: Option<&str>, code: u32) -> Self {
        TsonError::TypeError {
            message: message.into(),
            hint: hint.map(str::to_string),
            code: Some(code),
        }
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}
