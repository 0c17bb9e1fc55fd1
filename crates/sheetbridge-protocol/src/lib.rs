//! Shared protocol types for calling functions of a deployed Apps Script
//! project through the `scripts.run` execution API.
//!
//! The request body is an [`ExecutionRequest`]; the reply is an [`Operation`]
//! holding either a successful [`ExecutionResponse`] or an error [`Status`]
//! whose details carry the script's own error message and stack trace.
//!
//! ```text
//! -> {"function": "getRow", "parameters": ["https://...", "Sheet1", 1], "devMode": true}
//! <- {"done": true, "response": {"result": ["a", "b"]}}
//! <- {"done": true, "error": {"code": 3, "details": [{"errorMessage": "...", "scriptStackTraceElements": [...]}]}}
//! ```

mod service;
mod value;

pub use service::{ScriptService, TransportError};
pub use value::Value;

use serde::{Deserialize, Serialize};

/// A call envelope: one named function and its positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    /// Name of the function in the script project.
    pub function: String,
    /// Positional parameters, in the order the function declares them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Value>,
    /// Run the most recently saved code instead of the deployed version.
    #[serde(default)]
    pub dev_mode: bool,
}

impl ExecutionRequest {
    /// A request for the deployed version of `function`.
    pub fn new(function: impl Into<String>, parameters: Vec<Value>) -> Self {
        Self {
            function: function.into(),
            parameters,
            dev_mode: false,
        }
    }

    /// Set whether the most recently saved code runs instead.
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }
}

/// The reply to an execution request.
///
/// Exactly one of `response` and `error` is set by a well-behaved server;
/// when `error` is present it wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Whether the execution has finished. Always true for `scripts.run`.
    #[serde(default)]
    pub done: bool,
    /// Set when the function ran to completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ExecutionResponse>,
    /// Set when the function threw or could not be run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Status>,
}

impl Operation {
    /// A completed call whose function returned `value`.
    pub fn result(value: impl Into<Value>) -> Self {
        Self {
            done: true,
            response: Some(ExecutionResponse {
                result: Some(value.into()),
            }),
            error: None,
        }
    }

    /// A completed call whose function returned nothing.
    pub fn empty() -> Self {
        Self {
            done: true,
            response: Some(ExecutionResponse { result: None }),
            error: None,
        }
    }

    /// A completed call whose function threw.
    pub fn script_error(message: impl Into<String>, frames: Vec<StackFrame>) -> Self {
        Self {
            done: true,
            response: None,
            error: Some(Status {
                code: Some(3),
                message: Some("ScriptError".to_string()),
                details: vec![ExecutionError {
                    error_message: Some(message.into()),
                    error_type: Some("ScriptError".to_string()),
                    script_stack_trace_elements: frames,
                }],
            }),
        }
    }
}

/// Successful execution payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    /// What the function returned. Absent (or `null`) when it returned nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

/// Error payload of a failed execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// RPC status code (3 for a script error, 10 for a timeout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    /// Summary message, usually just the error type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Script error details; the first entry describes the failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ExecutionError>,
}

/// The script's own description of what went wrong.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionError {
    /// Message of the exception thrown by the script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Exception type, such as `ScriptError` or `TypeError`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Absent when the script failed before it started executing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub script_stack_trace_elements: Vec<StackFrame>,
}

/// One frame of a script stack trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    /// Script function the frame belongs to.
    pub function: String,
    /// Line within the script file.
    #[serde(default)]
    pub line_number: u32,
}

impl StackFrame {
    pub fn new(function: impl Into<String>, line_number: u32) -> Self {
        Self {
            function: function.into(),
            line_number,
        }
    }
}

impl std::fmt::Display for StackFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.function, self.line_number)
    }
}
