//! Where the address book comes from.
//!
//! CHANGELOG:
//! - 01/18/2026 - Flatten tabs/line breaks in Contacts.app values, JSON format picked by first byte (Claude)
//! - 01/14/2026 - Source trait, Contacts.app backend over the bridge (Claude)
//! - 01/10/2026 - JSON file loading (Claude)

use super::manager::Contact;
use crate::applescript::{BridgeError, ScriptBridge};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactsError {
    #[error("Failed to read contacts file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse contacts JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Contacts.app query failed: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Malformed contact record on line {line}")]
    Malformed { line: usize },
}

/// Something that can produce the full contact list.
#[async_trait]
pub trait ContactsSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Contact>, ContactsError>;
}

/// Contacts exported to a JSON file.
///
/// Supports both formats:
/// - `{"contacts": [...]}`
/// - `[...]` (flat array)
#[derive(Debug, Clone)]
pub struct JsonContactsSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ContactsFile {
    contacts: Vec<Contact>,
}

impl JsonContactsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The first non-whitespace byte picks the format, so a bad record
    /// reports its own error rather than the other format's.
    pub fn parse(content: &str) -> Result<Vec<Contact>, ContactsError> {
        if content.trim_start().starts_with('{') {
            let wrapper: ContactsFile = serde_json::from_str(content)?;
            Ok(wrapper.contacts)
        } else {
            Ok(serde_json::from_str(content)?)
        }
    }
}

#[async_trait]
impl ContactsSource for JsonContactsSource {
    async fn fetch_all(&self) -> Result<Vec<Contact>, ContactsError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ContactsError::Read {
                path: self.path.clone(),
                source,
            })?;
        Self::parse(&content)
    }
}

/// One line per person: id, first, last, phones, emails separated by tabs;
/// multiple phones/emails separated by the unit separator (0x1F).
/// Tabs and line breaks inside values become spaces so every record stays on
/// one line with five fields.
pub const LIST_CONTACTS_SCRIPT: &str = r#"
on flattenText(s)
    set AppleScript's text item delimiters to {tab, linefeed, return}
    set parts to text items of s
    set AppleScript's text item delimiters to " "
    set s to parts as text
    set AppleScript's text item delimiters to ""
    return s
end flattenText

set unitSep to character id 31
set output to ""
tell application "Contacts"
    repeat with p in every person
        set pid to id of p
        set fn to first name of p
        if fn is missing value then set fn to ""
        set ln to last name of p
        if ln is missing value then set ln to ""
        set phoneValues to value of every phone of p
        set emailValues to value of every email of p
        set AppleScript's text item delimiters to unitSep
        set phoneText to phoneValues as text
        set emailText to emailValues as text
        set AppleScript's text item delimiters to ""
        set fn to my flattenText(fn)
        set ln to my flattenText(ln)
        set phoneText to my flattenText(phoneText)
        set emailText to my flattenText(emailText)
        set output to output & pid & tab & fn & tab & ln & tab & phoneText & tab & emailText & linefeed
    end repeat
end tell
return output
"#;

const UNIT_SEPARATOR: char = '\u{1f}';

/// The system address book, read through Contacts.app.
///
/// Fails with a bridge error when the user hasn't granted contacts access.
pub struct ContactsAppSource {
    bridge: Arc<dyn ScriptBridge>,
}

impl ContactsAppSource {
    pub fn new(bridge: Arc<dyn ScriptBridge>) -> Self {
        Self { bridge }
    }

    pub fn parse(output: &str) -> Result<Vec<Contact>, ContactsError> {
        output
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| parse_record(line).ok_or(ContactsError::Malformed { line: idx + 1 }))
            .collect()
    }
}

fn parse_record(line: &str) -> Option<Contact> {
    let mut fields = line.split('\t');
    let id = fields.next().filter(|id| !id.is_empty())?;
    let given = fields.next()?;
    let family = fields.next()?;
    let phones = fields.next().unwrap_or("");
    let emails = fields.next().unwrap_or("");

    Some(Contact {
        id: id.to_string(),
        given_name: given.to_string(),
        family_name: family.to_string(),
        phone_numbers: split_values(phones),
        email_addresses: split_values(emails),
    })
}

fn split_values(field: &str) -> Vec<String> {
    field
        .split(UNIT_SEPARATOR)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

#[async_trait]
impl ContactsSource for ContactsAppSource {
    async fn fetch_all(&self) -> Result<Vec<Contact>, ContactsError> {
        let output = self.bridge.run(LIST_CONTACTS_SCRIPT).await?;
        Self::parse(&output)
    }
}
