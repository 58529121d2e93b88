//! Quicklink and chat-link builders, plus the launch-context parser.
//!
//! CHANGELOG:
//! - 01/14/2026 - Initial implementation (Claude)

use crate::form::LaunchContext;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

pub const STABLE_PROTOCOL: &str = "raycast://";
pub const PRERELEASE_PROTOCOL: &str = "raycastinternal://";
/// Substring of the host version that marks a pre-release build.
pub const PRERELEASE_MARKER: &str = "alpha";

const LAUNCH_CONTEXT_PARAM: &str = "launchContext";

#[derive(Error, Debug)]
pub enum DeepLinkError {
    #[error("Invalid link: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Link has no launchContext parameter")]
    MissingLaunchContext,

    #[error("Invalid launch context: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Field order matters for the encoded link: contactId, address, text.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LaunchPayload<'a> {
    contact_id: &'a str,
    address: &'a str,
    text: &'a str,
}

/// Native compose view for an address.
pub fn sms_quicklink(address: &str) -> String {
    format!("sms:{}", address)
}

pub fn host_protocol(host_version: &str) -> &'static str {
    if host_version.contains(PRERELEASE_MARKER) {
        PRERELEASE_PROTOCOL
    } else {
        STABLE_PROTOCOL
    }
}

/// Link that re-opens the send-message command pre-filled with these values.
pub fn host_quicklink(
    host_version: &str,
    namespace: &str,
    contact_id: &str,
    address: &str,
    text: &str,
) -> String {
    let payload = LaunchPayload {
        contact_id,
        address,
        text,
    };
    // Serializing three borrowed strings cannot fail.
    let json = serde_json::to_string(&payload).unwrap_or_default();
    format!(
        "{}extensions/{}/messages/send-message?{}={}",
        host_protocol(host_version),
        namespace,
        LAUNCH_CONTEXT_PARAM,
        urlencoding::encode(&json)
    )
}

fn whitespace() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s").expect("valid regex"))
}

/// Chat thread for an address, whitespace removed ("+1 555 0100" -> "+15550100").
pub fn chat_link(address: &str) -> String {
    format!("imessage://{}", whitespace().replace_all(address, ""))
}

/// Recover the launch context from a host quicklink.
pub fn parse_launch_context(link: &str) -> Result<LaunchContext, DeepLinkError> {
    let url = Url::parse(link)?;
    let raw = url
        .query_pairs()
        .find(|(key, _)| key == LAUNCH_CONTEXT_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or(DeepLinkError::MissingLaunchContext)?;
    Ok(serde_json::from_str(&raw)?)
}

/// "Send Message to <given name>"
pub fn quicklink_name(given_name: &str) -> String {
    format!("Send Message to {}", given_name)
}
