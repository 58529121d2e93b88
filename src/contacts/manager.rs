//! Contact records and lookups over a loaded address book.
//!
//! CHANGELOG:
//! - 01/14/2026 - Multi-address contacts with stable ids, address derivation (Claude)
//! - 01/10/2026 - Added fuzzy matching with score threshold (Claude)
//! - 01/10/2026 - Initial stub (Claude)

use super::fuzzy;
use serde::{Deserialize, Serialize};

/// A contact as returned by the contacts source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub email_addresses: Vec<String>,
}

impl Contact {
    /// "Given Family", or just the given name when there is no family name.
    pub fn display_name(&self) -> String {
        if self.family_name.is_empty() {
            self.given_name.clone()
        } else {
            format!("{} {}", self.given_name, self.family_name)
        }
    }

    /// Every address a message can go to: phone numbers first, then emails.
    ///
    /// No deduplication and no format checks; the bridge gets the raw string.
    pub fn addresses(&self) -> Vec<String> {
        self.phone_numbers
            .iter()
            .chain(self.email_addresses.iter())
            .cloned()
            .collect()
    }

    /// Contacts with neither a given nor a family name are not offered for selection.
    pub fn is_listed(&self) -> bool {
        !self.given_name.is_empty() || !self.family_name.is_empty()
    }

    /// Search keywords: names plus every address.
    pub fn keywords(&self) -> Vec<&str> {
        [self.given_name.as_str(), self.family_name.as_str()]
            .into_iter()
            .chain(self.phone_numbers.iter().map(String::as_str))
            .chain(self.email_addresses.iter().map(String::as_str))
            .collect()
    }
}

/// Immutable snapshot of the address book for one command invocation.
#[derive(Debug, Clone, Default)]
pub struct ContactsManager {
    contacts: Vec<Contact>,
}

impl ContactsManager {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    /// Create an empty manager (for when contacts aren't available).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get all contacts.
    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    /// Contacts offered for selection, in source order.
    pub fn listed(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.is_listed())
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Derived address list for the contact with this id (empty if unknown).
    pub fn addresses_for(&self, id: &str) -> Vec<String> {
        self.find_by_id(id).map(Contact::addresses).unwrap_or_default()
    }

    /// Find a contact by display name (exact, case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Contact> {
        let name_lower = name.to_lowercase();
        self.listed()
            .find(|c| c.display_name().to_lowercase() == name_lower)
    }

    /// Find contact with fuzzy matching.
    ///
    /// Order of matching:
    /// 1. Exact name match
    /// 2. Partial name match (name contains query)
    /// 3. Fuzzy match with score >= 0.85
    pub fn find_fuzzy(&self, name: &str) -> Option<&Contact> {
        if let Some(contact) = self.find_by_name(name) {
            return Some(contact);
        }

        let name_lower = name.to_lowercase();
        if let Some(contact) = self
            .listed()
            .find(|c| c.display_name().to_lowercase().contains(&name_lower))
        {
            return Some(contact);
        }

        let mut best_match: Option<(&Contact, f64)> = None;
        for contact in self.listed() {
            let match_result = fuzzy::multi_match(name, &contact.display_name());
            if match_result.score >= fuzzy::DEFAULT_THRESHOLD
                && !matches!(best_match, Some((_, best)) if best >= match_result.score)
            {
                best_match = Some((contact, match_result.score));
            }
        }

        best_match.map(|(c, _)| c)
    }

    /// First listed contact with a keyword (name, phone, email) equal to `query`.
    pub fn find_by_keyword(&self, query: &str) -> Option<&Contact> {
        let query_lower = query.to_lowercase();
        self.listed().find(|c| {
            c.keywords()
                .iter()
                .any(|k| !k.is_empty() && k.to_lowercase() == query_lower)
        })
    }

    /// Turn user input into a contact id.
    ///
    /// An exact id wins, then an exact keyword (so an address works), then
    /// name matching. When nothing matches the input is returned unchanged,
    /// so submission reports the contact as not found.
    pub fn resolve_id(&self, id_or_name: &str) -> String {
        if id_or_name.is_empty() || self.find_by_id(id_or_name).is_some() {
            return id_or_name.to_string();
        }
        self.find_by_keyword(id_or_name)
            .or_else(|| self.find_fuzzy(id_or_name))
            .map(|c| c.id.clone())
            .unwrap_or_else(|| id_or_name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, given: &str, family: &str, phones: &[&str], emails: &[&str]) -> Contact {
        Contact {
            id: id.to_string(),
            given_name: given.to_string(),
            family_name: family.to_string(),
            phone_numbers: phones.iter().map(|s| s.to_string()).collect(),
            email_addresses: emails.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_addresses_phones_then_emails() {
        let c = contact(
            "1",
            "Ada",
            "Lovelace",
            &["+1 555 0100", "+1 555 0101"],
            &["ada@example.com"],
        );
        assert_eq!(
            c.addresses(),
            vec!["+1 555 0100", "+1 555 0101", "ada@example.com"]
        );
    }

    #[test]
    fn test_addresses_no_dedup() {
        let c = contact("1", "Ada", "", &["same", "same"], &["same"]);
        assert_eq!(c.addresses(), vec!["same", "same", "same"]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(contact("1", "Ada", "Lovelace", &[], &[]).display_name(), "Ada Lovelace");
        assert_eq!(contact("1", "Ada", "", &[], &[]).display_name(), "Ada");
    }

    #[test]
    fn test_unnamed_contacts_are_not_listed() {
        let book = ContactsManager::new(vec![
            contact("1", "", "", &["+15550100"], &[]),
            contact("2", "", "Hopper", &[], &[]),
        ]);
        let ids: Vec<&str> = book.listed().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_resolve_id_prefers_exact_id() {
        let book = ContactsManager::new(vec![
            contact("ABC:ABPerson", "Grace", "Hopper", &[], &[]),
            contact("DEF:ABPerson", "Alan", "Turing", &[], &[]),
        ]);
        assert_eq!(book.resolve_id("DEF:ABPerson"), "DEF:ABPerson");
        assert_eq!(book.resolve_id("grace hopper"), "ABC:ABPerson");
        assert_eq!(book.resolve_id("Turing"), "DEF:ABPerson");
        assert_eq!(book.resolve_id("Nobody Atall"), "Nobody Atall");
    }

    #[test]
    fn test_resolve_id_by_address() {
        let book = ContactsManager::new(vec![
            contact("1", "Ada", "", &["+15550100"], &[]),
            contact("2", "Grace", "", &[], &["Grace@Example.com"]),
        ]);
        assert_eq!(book.resolve_id("+15550100"), "1");
        assert_eq!(book.resolve_id("grace@example.com"), "2");
    }

    #[test]
    fn test_fuzzy_keeps_highest_score() {
        let book = ContactsManager::new(vec![
            contact("1", "Jonas", "Dole", &[], &[]),
            contact("2", "John", "Doe", &[], &[]),
        ]);
        assert_eq!(book.find_fuzzy("Jon Doe").map(|c| c.id.as_str()), Some("2"));
    }

    #[test]
    fn test_addresses_for_unknown_id_is_empty() {
        let book = ContactsManager::new(vec![contact("1", "Ada", "", &["+1"], &[])]);
        assert!(book.addresses_for("2").is_empty());
        assert_eq!(book.addresses_for("1"), vec!["+1"]);
    }

    #[test]
    fn test_contact_json_is_camel_case() {
        let c: Contact = serde_json::from_str(
            r#"{"id":"x","givenName":"Ada","phoneNumbers":["+1"]}"#,
        )
        .unwrap();
        assert_eq!(c.given_name, "Ada");
        assert_eq!(c.family_name, "");
        assert!(c.email_addresses.is_empty());
    }
}
