//! CLI commands
//!
//! Command implementations for the `nullog` binary.

mod fill;
mod import;
mod months;
mod progress;
mod session;
mod style;

pub use fill::{FillArgs, run_fill};
pub use import::run_import;
pub use months::run_months;
pub use session::{run_session_import, run_session_status};

use nullog::error::Result;
use nullog::gateway::HttpGateway;
use nullog::session::FileSessionStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Build the portal gateway from the optional `--session-file` override
pub(crate) fn open_gateway(session_file: Option<PathBuf>) -> Result<HttpGateway> {
    let store =
        session_file.map_or_else(FileSessionStore::at_default_path, FileSessionStore::new);
    HttpGateway::new(Arc::new(store))
}
