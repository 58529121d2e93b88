//! Messages.app driver: running-state query, quit, and send.
//!
//! CHANGELOG:
//! - 01/14/2026 - Split out of applescript.rs, argv-based send script (Claude)

use crate::applescript::{BridgeError, ScriptBridge};

/// Literal returned by [`SEND_SCRIPT`] when the message was handed to Messages.
pub const SUCCESS_MARKER: &str = "Success";

/// Returns "true" if a Messages process exists, "false" otherwise.
pub const IS_RUNNING_SCRIPT: &str = r#"
tell application "System Events"
    return (count of (every process whose name is "Messages")) > 0
end tell
"#;

pub const QUIT_SCRIPT: &str = r#"
tell application "Messages"
    quit
end tell
"#;

/// argv: (address, text). Errors are caught and returned as the result text.
pub const SEND_SCRIPT: &str = r#"
on run argv
    try
        tell application "Messages"
            set targetBuddy to item 1 of argv
            set targetService to id of 1st account
            set textMessage to item 2 of argv
            set theBuddy to participant targetBuddy of account id targetService
            send textMessage to theBuddy
        end tell
        return "Success"
    on error error_message
        return error_message
    end try
end run
"#;

/// Outcome of the send script, interpreted from its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendResult {
    Success,
    /// Whatever the script's error handler returned, verbatim.
    Error(String),
}

impl SendResult {
    pub fn from_script_output(output: String) -> Self {
        if output == SUCCESS_MARKER {
            SendResult::Success
        } else {
            SendResult::Error(output)
        }
    }
}

/// Thin wrapper that knows which scripts drive Messages.app.
pub struct MessagesApp<'a> {
    bridge: &'a dyn ScriptBridge,
}

impl<'a> MessagesApp<'a> {
    pub fn new(bridge: &'a dyn ScriptBridge) -> Self {
        Self { bridge }
    }

    /// Anything other than "true" counts as not running.
    pub async fn is_running(&self) -> Result<bool, BridgeError> {
        let result = self.bridge.run(IS_RUNNING_SCRIPT).await?;
        Ok(result == "true")
    }

    pub async fn quit(&self) -> Result<(), BridgeError> {
        self.bridge.run(QUIT_SCRIPT).await.map(|_| ())
    }

    /// Send `text` to `address` on the first account. Address and text are passed raw.
    pub async fn send(&self, address: &str, text: &str) -> Result<SendResult, BridgeError> {
        let output = self
            .bridge
            .run_with_args(SEND_SCRIPT, &[address, text])
            .await?;
        Ok(SendResult::from_script_output(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_marker_is_exact() {
        assert_eq!(
            SendResult::from_script_output("Success".to_string()),
            SendResult::Success
        );
        assert_eq!(
            SendResult::from_script_output("success".to_string()),
            SendResult::Error("success".to_string())
        );
        assert_eq!(
            SendResult::from_script_output("Success ".to_string()),
            SendResult::Error("Success ".to_string())
        );
    }

    #[test]
    fn test_send_script_reads_argv_in_order() {
        assert!(SEND_SCRIPT.contains("set targetBuddy to item 1 of argv"));
        assert!(SEND_SCRIPT.contains("set textMessage to item 2 of argv"));
        assert!(SEND_SCRIPT.contains(r#"return "Success""#));
    }
}
