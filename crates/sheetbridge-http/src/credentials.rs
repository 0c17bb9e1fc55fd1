//! Caller-supplied OAuth2 token bundle.

use serde::{Deserialize, Serialize};

/// An access token for the execution API, and the scopes it was granted for.
///
/// `scopes` may be left empty when the caller does not know them; scope
/// checks are then skipped.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            scopes: Vec::new(),
        }
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the token declares `scope`. Tokens with no declared scopes
    /// are assumed to cover everything.
    pub fn covers(&self, scope: &str) -> bool {
        self.scopes.is_empty() || self.scopes.iter().any(|s| s == scope)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("scopes", &self.scopes)
            .finish()
    }
}
