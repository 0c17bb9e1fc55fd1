//! Typed access to Google Sheets through a backing Apps Script project.
//!
//! Every operation is a call to a named function of the script, made through
//! a [`ScriptService`] handle. Replies are classified three ways: the call
//! never ran ([`Error::Transport`]), it ran and threw ([`Error::Script`]), or
//! it ran and returned a value or nothing.
//!
//! # Architecture
//!
//! ```text
//! Your Rust code
//!     └── UserSession (owns the service handle and ScriptConfig)
//!           └── Spreadsheet (checked with checkSSExists)
//!                 └── Sheet (checked with checkSheetExists)
//!                       └── RemoteInvoker
//!                             └── ScriptService::execute (e.g. HttpScriptService)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetbridge::{authorize, Credentials, ScriptConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::new(std::env::var("GOOGLE_ACCESS_TOKEN")?);
//!     let user = authorize(&creds, ScriptConfig::new("my-script-id"))?;
//!
//!     let ss = user.open_by_key("1VB8V2MdhyBQdvxMxssjGkk_8Yq9OY60VtNiOfTJXJsc")?;
//!     let sheet = ss.get_sheet("Sheet1")?;
//!     sheet.set_cell_value(2, 2, 57)?;
//!     println!("B2 = {}", sheet.get_cell_value(2, 2)?);
//!     println!("row 1 = {:?}", sheet.get_row(1)?);
//!     Ok(())
//! }
//! ```
//!
//! Handles hold no locks. Two handles on the same spreadsheet, in one process
//! or many, may interleave their writes.

mod catalog;
pub mod config;
pub mod error;
pub mod invoker;
pub mod session;
pub mod sheet;
pub mod spreadsheet;
pub mod url;

pub use config::ScriptConfig;
pub use error::{Error, Result, ScriptError};
pub use invoker::{RemoteInvoker, RemoteOutcome};
pub use session::UserSession;
pub use sheet::{Sheet, MAX_RANGE_CELLS};
pub use spreadsheet::Spreadsheet;

pub use sheetbridge_protocol::{
    ExecutionRequest, Operation, ScriptService, StackFrame, TransportError, Value,
};

#[cfg(feature = "http")]
pub use session::{authorize, authorize_with};
#[cfg(feature = "http")]
pub use sheetbridge_http::{Credentials, HttpConfig, HttpScriptService};
