//! Error types for sheetbridge

use sheetbridge_protocol::{StackFrame, TransportError, Value};
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by spreadsheet and sheet handles.
#[derive(Debug, Error)]
pub enum Error {
    /// The execution request never reached the script.
    #[error(
        "Failed to call function {function} with parameters {}: {source}",
        render_parameters(.parameters)
    )]
    Transport {
        function: String,
        parameters: Vec<Value>,
        #[source]
        source: TransportError,
    },

    /// The script ran and reported an error.
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// The named sheet is not part of the spreadsheet.
    #[error("Sheet '{sheet}' does not exist in {url}")]
    SheetNotFound { sheet: String, url: String },

    /// The spreadsheet is missing or the user may not open it.
    #[error("Spreadsheet {url} does not exist or the user has insufficient permission")]
    Access { url: String },

    /// Values passed to a range write do not match the declared dimensions.
    #[error("Shape mismatch: expected {expected_rows}x{expected_cols} values, {}", shape_detail(.row, .actual))]
    Shape {
        expected_rows: usize,
        expected_cols: usize,
        /// Offending row, or `None` when the row count itself is wrong.
        row: Option<usize>,
        actual: usize,
    },

    /// The script returned something other than the documented shape.
    #[error("Unexpected result from {function}: expected {expected}, got {actual}")]
    UnexpectedResult {
        function: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Credentials do not cover a scope the script needs.
    #[error("Credentials are missing required scope: {0}")]
    MissingScope(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

fn shape_detail(row: &Option<usize>, actual: &usize) -> String {
    match row {
        Some(row) => format!("row {row} has {actual} values"),
        None => format!("got {actual} rows"),
    }
}

fn render_parameters(parameters: &[Value]) -> String {
    let rendered: Vec<String> = parameters.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

impl Error {
    /// True when the remote call never ran.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// True when the remote call ran and the script failed.
    pub fn is_script(&self) -> bool {
        matches!(self, Error::Script(_))
    }

    pub(crate) fn transport(function: &str, parameters: &[Value], source: TransportError) -> Self {
        Error::Transport {
            function: function.to_string(),
            parameters: parameters.to_vec(),
            source,
        }
    }
}

/// An error raised by the backing script while it was executing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptError {
    /// The remote function that failed.
    pub function: String,
    /// Parameters the function was called with.
    pub parameters: Vec<Value>,
    pub message: String,
    pub error_type: Option<String>,
    /// Script stack trace, innermost frame first. Empty when the script
    /// failed before it started running.
    pub frames: Vec<StackFrame>,
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Error while calling function {} with parameters {}: {}",
            self.function,
            render_parameters(&self.parameters),
            self.message
        )?;
        if !self.frames.is_empty() {
            write!(f, "\nStacktrace:")?;
            for frame in &self.frames {
                write!(f, "\n\t{frame}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ScriptError {}
