//! The service handle capability consumed by the bridge.

use std::sync::Arc;

use thiserror::Error;

use crate::{ExecutionRequest, Operation};

/// Reasons an execution request never reached the script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode execution response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

/// An authenticated handle able to run functions of a script project.
///
/// Implementations enforce their own timeouts and report them as
/// [`TransportError`]. A returned [`Operation`] means the request was
/// accepted by the execution service, whether or not the script succeeded.
pub trait ScriptService {
    fn execute(
        &self,
        script_id: &str,
        request: &ExecutionRequest,
    ) -> Result<Operation, TransportError>;
}

impl<T: ScriptService + ?Sized> ScriptService for &T {
    fn execute(
        &self,
        script_id: &str,
        request: &ExecutionRequest,
    ) -> Result<Operation, TransportError> {
        (**self).execute(script_id, request)
    }
}

impl<T: ScriptService + ?Sized> ScriptService for Box<T> {
    fn execute(
        &self,
        script_id: &str,
        request: &ExecutionRequest,
    ) -> Result<Operation, TransportError> {
        (**self).execute(script_id, request)
    }
}

impl<T: ScriptService + ?Sized> ScriptService for Arc<T> {
    fn execute(
        &self,
        script_id: &str,
        request: &ExecutionRequest,
    ) -> Result<Operation, TransportError> {
        (**self).execute(script_id, request)
    }
}
