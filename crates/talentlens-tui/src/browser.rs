//! Hand a URL to the desktop's default browser.

use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("refusing to open non-web URL {0:?}")]
    UnsupportedScheme(String),

    #[error("failed to launch {opener}: {source}")]
    Launch {
        opener: &'static str,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

/// Only http(s) links from the catalogue are opened.
pub fn check_url(url: &str) -> Result<&str, OpenError> {
    let url = url.trim();
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(url)
    } else {
        Err(OpenError::UnsupportedScheme(url.to_string()))
    }
}

pub fn open_url(url: &str) -> Result<(), OpenError> {
    let url = check_url(url)?;
    launch(OPENER, url).map(|_| ())
}

/// Spawn `opener` detached from the terminal and reap it in the background.
fn launch(opener: &'static str, url: &str) -> Result<JoinHandle<()>, OpenError> {
    let mut child = Command::new(opener)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| OpenError::Launch { opener, source })?;

    Ok(std::thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => warn!(%status, opener, "Opener exited with failure"),
        Ok(_) => {}
        Err(e) => warn!(opener, "Failed to reap opener: {}", e),
    }))
}
