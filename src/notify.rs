//! Toast-style notifications and how they reach the user.
//!
//! CHANGELOG:
//! - 01/14/2026 - Initial implementation (Claude)

use crate::applescript::{escape_applescript_string, ScriptBridge};
use crate::host::Host;
use crate::output::OutputControls;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastStyle {
    Success,
    Failure,
}

/// Follow-up the user can trigger from a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastAction {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub style: ToastStyle,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_action: Option<ToastAction>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Success,
            title: title.into(),
            message: None,
            primary_action: None,
        }
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Failure,
            ..Self::success(title)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_action(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        self.primary_action = Some(ToastAction {
            title: title.into(),
            url: url.into(),
        });
        self
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn show(&self, notification: Notification);
}

/// Prints notifications to the terminal.
///
/// Optionally mirrors them to a macOS banner and runs the primary action
/// (there is nothing to click in a terminal).
pub struct TerminalNotifier {
    output: OutputControls,
    host: Arc<dyn Host>,
    run_primary_action: bool,
    banner: Option<Arc<dyn ScriptBridge>>,
}

impl TerminalNotifier {
    pub fn new(output: OutputControls, host: Arc<dyn Host>) -> Self {
        Self {
            output,
            host,
            run_primary_action: false,
            banner: None,
        }
    }

    pub fn run_primary_action(mut self, enabled: bool) -> Self {
        self.run_primary_action = enabled;
        self
    }

    pub fn with_banner(mut self, bridge: Arc<dyn ScriptBridge>) -> Self {
        self.banner = Some(bridge);
        self
    }

    fn render_text(notification: &Notification) -> String {
        let marker = match notification.style {
            ToastStyle::Success => "✓",
            ToastStyle::Failure => "✗",
        };
        let mut text = format!("{} {}", marker, notification.title);
        if let Some(message) = &notification.message {
            text.push_str(&format!("\n  {}", message));
        }
        if let Some(action) = &notification.primary_action {
            text.push_str(&format!("\n  {}: {}", action.title, action.url));
        }
        text
    }
}

/// `display notification` script for a banner; text is interpolated, so escape it.
pub fn banner_script(notification: &Notification) -> String {
    format!(
        r#"display notification "{}" with title "{}""#,
        escape_applescript_string(notification.message.as_deref().unwrap_or("")),
        escape_applescript_string(&notification.title)
    )
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn show(&self, notification: Notification) {
        let text = if self.output.json {
            self.output.emit(&notification)
        } else {
            Self::render_text(&notification)
        };
        match notification.style {
            ToastStyle::Success => println!("{}", text),
            ToastStyle::Failure => eprintln!("{}", text),
        }

        if let Some(bridge) = &self.banner {
            if let Err(e) = bridge.run(&banner_script(&notification)).await {
                warn!(error = %e, "failed to post notification banner");
            }
        }

        if self.run_primary_action {
            if let Some(action) = &notification.primary_action {
                if let Err(e) = self.host.open(&action.url).await {
                    warn!(error = %e, url = %action.url, "failed to run notification action");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_includes_action() {
        let n = Notification::success("Sent Message to Ada")
            .with_message("hi")
            .with_action("Open Chat with Ada", "imessage://+15550100");
        assert_eq!(
            TerminalNotifier::render_text(&n),
            "✓ Sent Message to Ada\n  hi\n  Open Chat with Ada: imessage://+15550100"
        );
    }

    #[test]
    fn test_banner_script_escapes_quotes() {
        let n = Notification::failure("Could not send message").with_message(r#"Can't get "x""#);
        assert_eq!(
            banner_script(&n),
            r#"display notification "Can't get \"x\"" with title "Could not send message""#
        );
    }

    #[test]
    fn test_serialized_shape() {
        let n = Notification::failure("Could not send message").with_message("Contact not found");
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(value["style"], "failure");
        assert_eq!(value["message"], "Contact not found");
        assert!(value.get("primary_action").is_none());
    }
}
