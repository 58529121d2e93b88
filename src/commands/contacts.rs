//! Contact commands: contacts, addresses.
//!
//! CHANGELOG:
//! - 01/14/2026 - List from the active source with derived addresses (Claude)
//! - 01/10/2026 - Implemented list and add with JSON file I/O (Claude)

use super::Session;
use crate::contacts::Contact;
use anyhow::{anyhow, Result};
use serde::Serialize;

#[derive(Serialize)]
struct ContactRow<'a> {
    id: &'a str,
    name: String,
    addresses: Vec<String>,
}

impl<'a> From<&'a Contact> for ContactRow<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            id: &contact.id,
            name: contact.display_name().trim().to_string(),
            addresses: contact.addresses(),
        }
    }
}

/// List every selectable contact.
pub async fn list(session: &Session) -> Result<()> {
    let contacts = session.loader.contacts().await;
    let rows: Vec<ContactRow> = contacts.listed().map(ContactRow::from).collect();

    if session.output.json {
        session.output.print(&rows);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No contacts found.");
        return Ok(());
    }

    println!("Contacts ({}):", rows.len());
    println!("{}", "-".repeat(50));
    for row in &rows {
        println!("{} [{}]", row.name, row.id);
        for address in &row.addresses {
            println!("    {}", address);
        }
    }
    Ok(())
}

/// Print the addresses a message to `contact` can go to.
pub async fn addresses(session: &Session, contact: &str) -> Result<()> {
    let contacts = session.loader.contacts().await;
    let id = contacts.resolve_id(contact);
    let found = contacts
        .find_by_id(&id)
        .ok_or_else(|| anyhow!("Contact '{}' not found", contact))?;

    let addresses = found.addresses();
    if session.output.json {
        session.output.print(&addresses);
    } else {
        for address in addresses {
            println!("{}", address);
        }
    }
    Ok(())
}
