//! Send-message form state: seeding, validation, derived addresses.
//!
//! CHANGELOG:
//! - 01/14/2026 - Initial implementation (Claude)

use crate::contacts::ContactsManager;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The three form fields. Also the shape persisted as a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub text: String,
}

/// Pre-filled values carried by a quicklink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchContext {
    #[serde(default)]
    pub contact_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Contact,
    Address,
    Text,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Contact => "contact",
            Field::Address => "address",
            Field::Text => "text",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Missing required field(s): {}", join_fields(.0))]
    MissingFields(Vec<Field>),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: FormValues,
    focus: Option<Field>,
}

fn pick(draft: Option<&String>, launch: Option<&String>) -> String {
    draft.or(launch).cloned().unwrap_or_default()
}

impl FormState {
    pub fn new(values: FormValues) -> Self {
        Self {
            values,
            focus: None,
        }
    }

    /// Initial values: draft first, then launch context, then empty.
    ///
    /// A launch context naming a contact moves focus to the message text.
    pub fn seeded(draft: Option<&FormValues>, launch: Option<&LaunchContext>) -> Self {
        let values = FormValues {
            contact: pick(
                draft.map(|d| &d.contact),
                launch.map(|l| &l.contact_id),
            ),
            address: pick(draft.map(|d| &d.address), launch.map(|l| &l.address)),
            text: pick(draft.map(|d| &d.text), launch.map(|l| &l.text)),
        };
        let focus = launch
            .filter(|l| !l.contact_id.is_empty())
            .map(|_| Field::Text);
        Self { values, focus }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    /// Change the contact. The address is kept as-is even if it no longer
    /// belongs to the new contact.
    pub fn select_contact(&mut self, contact_id: impl Into<String>) {
        self.values.contact = contact_id.into();
    }

    pub fn select_address(&mut self, address: impl Into<String>) {
        self.values.address = address.into();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.values.text = text.into();
    }

    /// Clear the message, keeping contact and address for the next one.
    pub fn reset_text(&mut self) {
        self.values.text.clear();
    }

    /// Addresses offered for the currently selected contact.
    pub fn addresses(&self, contacts: &ContactsManager) -> Vec<String> {
        contacts.addresses_for(&self.values.contact)
    }

    /// Required-field check run before any submission.
    pub fn validate(&self) -> Result<(), FormError> {
        let missing: Vec<Field> = [
            (Field::Contact, &self.values.contact),
            (Field::Address, &self.values.address),
            (Field::Text, &self.values.text),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::Contact;

    fn values(contact: &str, address: &str, text: &str) -> FormValues {
        FormValues {
            contact: contact.to_string(),
            address: address.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_seed_precedence_draft_over_launch() {
        let draft = values("draft-id", "", "draft text");
        let launch = LaunchContext {
            contact_id: "launch-id".to_string(),
            address: "+15550100".to_string(),
            text: "launch text".to_string(),
        };
        let form = FormState::seeded(Some(&draft), Some(&launch));
        // Empty draft fields still win; the draft is the last thing the user saw.
        assert_eq!(form.values(), &values("draft-id", "", "draft text"));
    }

    #[test]
    fn test_seed_from_launch_focuses_text() {
        let launch = LaunchContext {
            contact_id: "abc".to_string(),
            address: "+15550100".to_string(),
            text: String::new(),
        };
        let form = FormState::seeded(None, Some(&launch));
        assert_eq!(form.values(), &values("abc", "+15550100", ""));
        assert_eq!(form.focus(), Some(Field::Text));
    }

    #[test]
    fn test_seed_empty() {
        let form = FormState::seeded(None, None);
        assert_eq!(form.values(), &FormValues::default());
        assert_eq!(form.focus(), None);
    }

    #[test]
    fn test_validate_lists_every_missing_field() {
        let form = FormState::new(values("", "+1", ""));
        assert_eq!(
            form.validate(),
            Err(FormError::MissingFields(vec![Field::Contact, Field::Text]))
        );
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Missing required field(s): contact, text"
        );
        assert!(FormState::new(values("1", "+1", "hi")).validate().is_ok());
    }

    #[test]
    fn test_changing_contact_keeps_stale_address() {
        let book = ContactsManager::new(vec![
            Contact {
                id: "1".to_string(),
                given_name: "Ada".to_string(),
                family_name: String::new(),
                phone_numbers: vec!["+1".to_string()],
                email_addresses: vec![],
            },
            Contact {
                id: "2".to_string(),
                given_name: "Grace".to_string(),
                family_name: String::new(),
                phone_numbers: vec![],
                email_addresses: vec!["grace@example.com".to_string()],
            },
        ]);

        let mut form = FormState::new(values("1", "+1", "hi"));
        assert_eq!(form.addresses(&book), vec!["+1"]);

        form.select_contact("2");
        assert_eq!(form.addresses(&book), vec!["grace@example.com"]);
        assert_eq!(form.values().address, "+1");
    }

    #[test]
    fn test_reset_text_keeps_selection() {
        let mut form = FormState::new(values("1", "+1", "hi"));
        form.reset_text();
        assert_eq!(form.values(), &values("1", "+1", ""));
    }
}
