//! User session: an authorized service handle and its configuration.

use sheetbridge_protocol::ScriptService;

use crate::config::ScriptConfig;
use crate::error::Result;
use crate::invoker::RemoteInvoker;
use crate::spreadsheet::Spreadsheet;
use crate::url;

/// Entry point for opening spreadsheets as one authorized user.
///
/// Owns the service handle. Spreadsheets opened from a session borrow it,
/// so the session outlives every handle it hands out.
pub struct UserSession<S> {
    service: S,
    config: ScriptConfig,
}

impl<S: ScriptService> UserSession<S> {
    /// Wrap an already-authorized service handle.
    pub fn new(service: S, config: ScriptConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { service, config })
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Open a spreadsheet by URL. A bare document key is accepted too.
    ///
    /// Fails with [`Error::Access`](crate::Error::Access) if the spreadsheet
    /// does not exist or the user cannot open it.
    pub fn open_by_url(&self, url: &str) -> Result<Spreadsheet<'_, S>> {
        Spreadsheet::open(self, url::canonical_url(url, &self.config.url_template))
    }

    /// Open a spreadsheet by its document key.
    pub fn open_by_key(&self, key: &str) -> Result<Spreadsheet<'_, S>> {
        Spreadsheet::open(self, url::url_for_key(key, &self.config.url_template))
    }

    pub(crate) fn invoker(&self) -> RemoteInvoker<'_, S> {
        RemoteInvoker::new(&self.service, &self.config)
    }
}

#[cfg(feature = "http")]
mod http {
    use sheetbridge_http::{Credentials, HttpConfig, HttpScriptService};

    use super::UserSession;
    use crate::config::ScriptConfig;
    use crate::error::{Error, Result};

    /// Create a session that talks to the Apps Script API over HTTPS.
    ///
    /// `credentials` must hold a valid access token; acquiring one is the
    /// caller's job. When the credentials declare their scopes, every scope in
    /// `config.scopes` must be among them.
    pub fn authorize(credentials: &Credentials, config: ScriptConfig) -> Result<UserSession<HttpScriptService>> {
        authorize_with(credentials, config, HttpConfig::default())
    }

    /// [`authorize`] with explicit HTTP settings.
    pub fn authorize_with(
        credentials: &Credentials,
        config: ScriptConfig,
        http: HttpConfig,
    ) -> Result<UserSession<HttpScriptService>> {
        if let Some(missing) = config.scopes.iter().find(|scope| !credentials.covers(scope)) {
            return Err(Error::MissingScope(missing.clone()));
        }

        let service = HttpScriptService::new(credentials.access_token.clone(), http)
            .map_err(|e| Error::Config(e.to_string()))?;
        tracing::debug!("Authorized session for script {}", config.script_id);
        UserSession::new(service, config)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_authorize_checks_declared_scopes() {
            let creds = Credentials::new("tok").with_scopes(["https://www.googleapis.com/auth/drive"]);
            let err = authorize(&creds, ScriptConfig::new("abc")).err().unwrap();
            match err {
                Error::MissingScope(scope) => {
                    assert_eq!(scope, "https://www.googleapis.com/auth/spreadsheets")
                }
                other => panic!("expected MissingScope, got {other:?}"),
            }
        }

        #[test]
        fn test_authorize_without_declared_scopes() {
            let session = authorize(&Credentials::new("tok"), ScriptConfig::new("abc")).unwrap();
            assert_eq!(session.config().script_id, "abc");
        }

        #[test]
        fn test_authorize_rejects_invalid_config() {
            let err = authorize(&Credentials::new("tok"), ScriptConfig::default()).err().unwrap();
            assert!(matches!(err, Error::Config(_)));
        }
    }
}

#[cfg(feature = "http")]
pub use http::{authorize, authorize_with};
