//! Host-side effects: hiding the launcher window and opening URLs.
//!
//! CHANGELOG:
//! - 01/14/2026 - Initial implementation (Claude)

use crate::applescript::{BridgeError, ScriptBridge};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Hides the frontmost application (the window the command was started from).
pub const HIDE_FRONTMOST_SCRIPT: &str = r#"
tell application "System Events"
    set visible of first application process whose frontmost is true to false
end tell
"#;

#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("Failed to run open: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("open exited with {status} for {url}")]
    OpenFailed { url: String, status: String },
}

/// What the surrounding environment can do for us.
#[async_trait]
pub trait Host: Send + Sync {
    async fn close_main_window(&self) -> Result<(), HostError>;

    /// Open a URL with the system handler (sms:, imessage:, x-apple.systempreferences:, ...).
    async fn open(&self, url: &str) -> Result<(), HostError>;
}

/// macOS desktop: System Events for the window, `open` for URLs.
pub struct DesktopHost {
    bridge: Arc<dyn ScriptBridge>,
}

impl DesktopHost {
    pub fn new(bridge: Arc<dyn ScriptBridge>) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl Host for DesktopHost {
    async fn close_main_window(&self) -> Result<(), HostError> {
        self.bridge.run(HIDE_FRONTMOST_SCRIPT).await?;
        Ok(())
    }

    async fn open(&self, url: &str) -> Result<(), HostError> {
        debug!(url, "opening url");
        let status = Command::new("open").arg(url).status().await?;
        if status.success() {
            Ok(())
        } else {
            Err(HostError::OpenFailed {
                url: url.to_string(),
                status: status.to_string(),
            })
        }
    }
}
