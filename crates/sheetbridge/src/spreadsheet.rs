//! Spreadsheet handle.

use sheetbridge_protocol::{ScriptService, Value};

use crate::catalog;
use crate::error::{Error, Result};
use crate::invoker::{RemoteInvoker, RemoteOutcome};
use crate::session::UserSession;
use crate::sheet::Sheet;
use crate::url;

/// A spreadsheet the user is known to be able to open.
///
/// Every read is a fresh call to the script; nothing is cached here.
pub struct Spreadsheet<'s, S> {
    session: &'s UserSession<S>,
    invoker: RemoteInvoker<'s, S>,
    url: String,
}

impl<'s, S: ScriptService> Spreadsheet<'s, S> {
    pub(crate) fn open(session: &'s UserSession<S>, url: String) -> Result<Self> {
        let invoker = session.invoker();
        check_exists(&invoker, &url)?;
        tracing::info!("Opened spreadsheet {}", url);
        Ok(Self {
            session,
            invoker,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The document key, when the URL has the usual `/d/{key}/` form.
    pub fn key(&self) -> Option<&str> {
        url::key_from_url(&self.url)
    }

    pub fn session(&self) -> &'s UserSession<S> {
        self.session
    }

    /// Point this handle at another spreadsheet.
    ///
    /// The new URL (or key) is checked first; on failure the handle keeps
    /// its current URL.
    pub fn set_url(&mut self, url: &str) -> Result<()> {
        let url = url::canonical_url(url, &self.session.config().url_template);
        check_exists(&self.invoker, &url)?;
        self.url = url;
        Ok(())
    }

    /// Names of all sheets, in tab order.
    pub fn get_sheet_names(&self) -> Result<Vec<String>> {
        let function = catalog::GET_SHEET_NAMES;
        let names = match self.invoker.invoke(function, vec![Value::from(&self.url)])? {
            None => return Ok(Vec::new()),
            Some(value) => value.into_array().map_err(|other| unexpected(function, "list of strings", &other))?,
        };

        names
            .into_iter()
            .map(|name| match name {
                Value::String(name) => Ok(name),
                other => Err(unexpected(function, "list of strings", &other)),
            })
            .collect()
    }

    /// Open the sheet called `name`.
    ///
    /// Fails with [`Error::SheetNotFound`] if there is no such sheet.
    pub fn get_sheet(&self, name: &str) -> Result<Sheet<'_, S>> {
        Sheet::open(self, self.invoker, name.to_string())
    }

    /// Open every sheet of the spreadsheet.
    pub fn sheets(&self) -> Result<Vec<Sheet<'_, S>>> {
        self.get_sheet_names()?
            .iter()
            .map(|name| self.get_sheet(name))
            .collect()
    }
}

fn check_exists<S: ScriptService>(invoker: &RemoteInvoker<'_, S>, url: &str) -> Result<()> {
    let function = catalog::CHECK_SS_EXISTS;
    let parameters = vec![Value::from(url)];
    match invoker.call(function, parameters.clone()) {
        RemoteOutcome::Success(_) => Ok(()),
        RemoteOutcome::ScriptFailure(e) => {
            tracing::warn!("Cannot open spreadsheet {}: {}", url, e.message);
            Err(Error::Access {
                url: url.to_string(),
            })
        }
        RemoteOutcome::TransportFailure(e) => Err(Error::transport(function, &parameters, e)),
    }
}

pub(crate) fn unexpected(function: &str, expected: &'static str, got: &Value) -> Error {
    Error::UnexpectedResult {
        function: function.to_string(),
        expected,
        actual: got.kind(),
    }
}
