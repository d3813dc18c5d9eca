//! Session command - inspect and import portal session state

use crate::cli::style::{Stylize, check, cross};
use anstream::{eprintln, println};
use nullog::error::{Error, Result};
use nullog::session::{
    FileSessionStore, SessionCookie, SessionProvider, SessionState, default_session_path,
};
use std::path::PathBuf;

fn store_for(session_file: Option<PathBuf>) -> FileSessionStore {
    session_file.map_or_else(FileSessionStore::at_default_path, FileSessionStore::new)
}

/// Show where the session lives and whether it loads
pub async fn run_session_status(session_file: Option<PathBuf>) -> Result<()> {
    let store = store_for(session_file);
    println!("Session file: {}", store.path().display().to_string().accent());

    match store.session().await {
        Ok(state) => {
            println!(
                "{} {} cookie{} loaded",
                check(),
                state.cookies.len().to_string().accent(),
                if state.cookies.len() == 1 { "" } else { "s" }
            );
            println!("  user agent: {}", state.user_agent().muted());
        }
        Err(e) => {
            eprintln!("{} {}", cross(), e.to_string().error());
        }
    }
    Ok(())
}

/// Import cookies exported from the browser into the session file.
///
/// Accepts either a full session document or a bare cookie array as the
/// browser devtools export it; unknown cookie fields are ignored.
pub fn run_session_import(session_file: Option<PathBuf>, input: PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(&input)
        .map_err(|e| Error::Session(format!("cannot read {}: {e}", input.display())))?;

    let state = serde_json::from_str::<SessionState>(&raw).or_else(|_| {
        serde_json::from_str::<Vec<SessionCookie>>(&raw).map(|cookies| SessionState {
            cookies,
            user_agent: None,
        })
    });
    let state =
        state.map_err(|e| Error::Session(format!("unrecognized cookie export: {e}")))?;

    if state.cookies.is_empty() {
        return Err(Error::Session("export contains no cookies".to_string()));
    }

    let path = session_file.unwrap_or_else(default_session_path);
    FileSessionStore::save(&path, &state)?;

    println!(
        "{} {} cookie{} saved to {}",
        check(),
        state.cookies.len().to_string().accent(),
        if state.cookies.len() == 1 { "" } else { "s" },
        path.display().to_string().accent()
    );
    Ok(())
}
