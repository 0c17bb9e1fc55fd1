//! Blocking client for `POST /v1/scripts/{scriptId}:run`.

use std::time::Duration;

use sheetbridge_protocol::{ExecutionRequest, Operation, ScriptService, TransportError};

/// Production endpoint of the Apps Script API.
pub const DEFAULT_API_BASE: &str = "https://script.googleapis.com";

/// Configuration for the HTTP service handle.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL of the execution API, without a trailing path.
    pub api_base: String,
    /// Timeout for a whole request, including the script's run time.
    pub timeout: Duration,
    pub user_agent: String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: format!("sheetbridge/{}", env!("CARGO_PKG_VERSION")),
            system_proxy: true,
        }
    }
}

/// Service handle that runs script functions over HTTPS.
#[derive(Clone)]
pub struct HttpScriptService {
    http: reqwest::blocking::Client,
    api_base: String,
    token: String,
}

impl HttpScriptService {
    /// Create a handle that authenticates every call with `access_token`.
    pub fn new(access_token: impl Into<String>, config: HttpConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: access_token.into(),
        })
    }

    /// The run endpoint for a script project.
    pub fn run_url(&self, script_id: &str) -> String {
        format!("{}/v1/scripts/{}:run", self.api_base, script_id)
    }
}

impl ScriptService for HttpScriptService {
    fn execute(
        &self,
        script_id: &str,
        request: &ExecutionRequest,
    ) -> Result<Operation, TransportError> {
        let url = self.run_url(script_id);
        tracing::trace!("POST {} function={}", url, request.function);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Rejected before the script ran: bad token, unknown script id, quota.
            let body = response.text().unwrap_or_default();
            tracing::debug!("{} rejected with HTTP {}", request.function, status.as_u16());
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_url_strips_trailing_slash() {
        let config = HttpConfig {
            api_base: "http://localhost:8080/".to_string(),
            ..HttpConfig::default()
        };
        let service = HttpScriptService::new("tok", config).unwrap();
        assert_eq!(service.run_url("abc"), "http://localhost:8080/v1/scripts/abc:run");
    }

    #[test]
    fn test_default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.user_agent.starts_with("sheetbridge/"));
    }
}
