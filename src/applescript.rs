//! AppleScript execution through osascript.
//!
//! The bridge is a plain text-in/text-out boundary: a script goes in, its
//! stdout comes back. Anything that needs Messages.app, Contacts.app or
//! System Events goes through a [`ScriptBridge`] so tests can swap in a fake.
//!
//! CHANGELOG:
//! - 01/14/2026 - Bridge trait with argv support, async osascript backend (Claude)
//! - 01/10/2026 - Initial implementation (Claude)

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Errors raised by the bridge itself (not by the script's own error handler).
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to launch osascript: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("AppleScript failed: {stderr}")]
    ScriptFailed { stderr: String },
}

/// Executes scripts and captures their textual result.
#[async_trait]
pub trait ScriptBridge: Send + Sync {
    /// Run a script and return its stdout.
    async fn run(&self, script: &str) -> Result<String, BridgeError> {
        self.run_with_args(script, &[]).await
    }

    /// Run a script with positional arguments (available as `argv` in `on run argv`).
    async fn run_with_args(&self, script: &str, args: &[&str]) -> Result<String, BridgeError>;
}

/// Bridge backed by `/usr/bin/osascript`.
#[derive(Debug, Clone)]
pub struct OsascriptBridge {
    program: String,
}

impl Default for OsascriptBridge {
    fn default() -> Self {
        Self {
            program: "osascript".to_string(),
        }
    }
}

impl OsascriptBridge {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScriptBridge for OsascriptBridge {
    async fn run_with_args(&self, script: &str, args: &[&str]) -> Result<String, BridgeError> {
        debug!(args = args.len(), "running osascript");

        let output = Command::new(&self.program)
            .arg("-e")
            .arg(script)
            .args(args)
            .output()
            .await?;

        if output.status.success() {
            Ok(strip_trailing_newline(&String::from_utf8_lossy(&output.stdout)))
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(BridgeError::ScriptFailed {
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

/// osascript terminates its result with a newline; leading whitespace is data.
fn strip_trailing_newline(s: &str) -> String {
    s.trim_end_matches(['\n', '\r']).to_string()
}

/// Escape a string for safe inclusion in an AppleScript string literal.
///
/// CRITICAL: Order matters!
/// 1. Escape backslashes FIRST
/// 2. Then escape quotes
///
/// Only needed for scripts that interpolate text; the send script takes argv.
pub fn escape_applescript_string(s: &str) -> String {
    s.replace('\\', "\\\\") // Backslashes FIRST
        .replace('"', "\\\"") // Then quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_simple() {
        assert_eq!(escape_applescript_string("Hello"), "Hello");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_applescript_string(r#"Say "Hi""#), r#"Say \"Hi\""#);
    }

    #[test]
    fn test_escape_order_matters() {
        let input = r#"\"test\""#;
        let expected = r#"\\\"test\\\""#;
        assert_eq!(escape_applescript_string(input), expected);
    }

    #[test]
    fn test_strip_trailing_newline_keeps_leading_tabs() {
        assert_eq!(strip_trailing_newline("\tabc\n"), "\tabc");
        assert_eq!(strip_trailing_newline("Success\r\n"), "Success");
        assert_eq!(strip_trailing_newline(""), "");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let bridge = OsascriptBridge {
            program: "definitely-not-osascript-wolfies".to_string(),
        };
        let err = bridge.run("return 1").await.unwrap_err();
        assert!(matches!(err, BridgeError::Spawn(_)));
    }
}
