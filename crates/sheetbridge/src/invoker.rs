//! Remote function invocation and response interpretation.

use sheetbridge_protocol::{ExecutionRequest, Operation, ScriptService, Status, TransportError, Value};

use crate::config::ScriptConfig;
use crate::error::{Error, Result, ScriptError};

/// How a single remote call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome {
    /// The function ran. `None` when it returned nothing.
    Success(Option<Value>),
    /// The function ran and threw.
    ScriptFailure(ScriptError),
    /// The function never ran.
    TransportFailure(TransportError),
}

impl RemoteOutcome {
    /// Classify the reply to a call of `function` with `parameters`.
    ///
    /// Checked in order: transport failure, error marker, result field.
    /// A reply with neither an error nor a result is a successful call that
    /// returned nothing.
    pub fn interpret(
        function: &str,
        parameters: &[Value],
        reply: std::result::Result<Operation, TransportError>,
    ) -> Self {
        let operation = match reply {
            Ok(operation) => operation,
            Err(e) => return RemoteOutcome::TransportFailure(e),
        };

        if let Some(status) = operation.error {
            return RemoteOutcome::ScriptFailure(script_error(function, parameters, status));
        }

        let result = operation
            .response
            .and_then(|response| response.result)
            .filter(|value| !value.is_null());
        RemoteOutcome::Success(result)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RemoteOutcome::Success(_))
    }

    /// Convert to a `Result`, attributing transport failures to the call of
    /// `function` with `parameters`.
    pub fn into_result(self, function: &str, parameters: &[Value]) -> Result<Option<Value>> {
        match self {
            RemoteOutcome::Success(value) => Ok(value),
            RemoteOutcome::ScriptFailure(e) => Err(Error::Script(e)),
            RemoteOutcome::TransportFailure(e) => Err(Error::transport(function, parameters, e)),
        }
    }
}

fn script_error(function: &str, parameters: &[Value], status: Status) -> ScriptError {
    let detail = status.details.into_iter().next().unwrap_or_default();
    let message = detail
        .error_message
        .or(status.message)
        .unwrap_or_else(|| "unknown script error".to_string());

    ScriptError {
        function: function.to_string(),
        parameters: parameters.to_vec(),
        message,
        error_type: detail.error_type,
        frames: detail.script_stack_trace_elements,
    }
}

/// Calls functions of the configured script through a service handle.
///
/// Holds no state between calls; copying it is free.
pub struct RemoteInvoker<'a, S: ?Sized> {
    service: &'a S,
    script_id: &'a str,
    dev_mode: bool,
}

impl<S: ?Sized> Clone for RemoteInvoker<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for RemoteInvoker<'_, S> {}

impl<'a, S: ScriptService + ?Sized> RemoteInvoker<'a, S> {
    pub fn new(service: &'a S, config: &'a ScriptConfig) -> Self {
        Self {
            service,
            script_id: &config.script_id,
            dev_mode: config.dev_mode,
        }
    }

    pub fn service(&self) -> &'a S {
        self.service
    }

    /// Run `function` and classify the reply without converting it to an error.
    pub fn call(&self, function: &str, parameters: Vec<Value>) -> RemoteOutcome {
        self.run(&self.request(function, parameters))
    }

    /// Run `function`, surfacing script and transport failures as errors.
    pub fn invoke(&self, function: &str, parameters: Vec<Value>) -> Result<Option<Value>> {
        let request = self.request(function, parameters);
        self.run(&request).into_result(function, &request.parameters)
    }

    fn request(&self, function: &str, parameters: Vec<Value>) -> ExecutionRequest {
        ExecutionRequest::new(function, parameters).with_dev_mode(self.dev_mode)
    }

    fn run(&self, request: &ExecutionRequest) -> RemoteOutcome {
        let function = request.function.as_str();
        tracing::debug!("Calling {}() with {} parameters", function, request.parameters.len());
        tracing::trace!("{}() parameters: {:?}", function, request.parameters);

        let reply = self.service.execute(self.script_id, request);
        let outcome = RemoteOutcome::interpret(function, &request.parameters, reply);
        match &outcome {
            RemoteOutcome::Success(result) => {
                tracing::trace!("{}() returned {:?}", function, result);
            }
            RemoteOutcome::ScriptFailure(e) => {
                tracing::debug!("{}() raised: {}", function, e.message);
            }
            RemoteOutcome::TransportFailure(e) => {
                tracing::debug!("{}() was not executed: {}", function, e);
            }
        }
        outcome
    }
}
