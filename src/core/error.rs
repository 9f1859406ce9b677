//! Failure taxonomy for the macro engine.
//!
//! Absence of a marker call is not an error and never shows up here. Every
//! variant below is recoverable: the dispatcher turns it into the conservative
//! outcome for its path plus a single warning.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacroError {
    /// The parser could not produce a clean AST for the script.
    #[error("{message}")]
    Syntax { message: String },

    /// The configuration object references a binding local to the script.
    #[error(
        "`{macro_name}()` in <script setup> cannot reference locally declared variables because it will be hoisted outside of the setup() function"
    )]
    ScopeViolation { macro_name: String },

    /// The marker call has no argument, or its argument is not an object literal.
    #[error("{macro_name}() expects an object expression as its only argument")]
    InvalidArgument { macro_name: String },
}

impl MacroError {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }
}

pub type MacroResult<T> = Result<T, MacroError>;

/// Pipeline stage a failure is reported from.
///
/// Each stage owns a fixed warning prefix so callers can tell which entry
/// point gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Transform,
    Extract,
}

impl Stage {
    pub fn warning(self, macro_name: &str, error: &MacroError) -> String {
        match self {
            Self::Transform => format!("Failed to process {}: {}", macro_name, error),
            Self::Extract => format!("Failed to extract {} info: {}", macro_name, error),
        }
    }
}
