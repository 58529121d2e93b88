//! Quicklink command: print shareable links for a contact/address/text.
//!
//! CHANGELOG:
//! - 01/14/2026 - Initial implementation (Claude)

use super::Session;
use crate::deeplink;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Quicklink {
    pub name: String,
    pub link: String,
}

/// Messages quicklink and host quicklink, in that order.
pub fn build(
    given_name: &str,
    host_version: &str,
    namespace: &str,
    contact_id: &str,
    address: &str,
    text: &str,
) -> [Quicklink; 2] {
    let name = deeplink::quicklink_name(given_name);
    [
        Quicklink {
            name: name.clone(),
            link: deeplink::sms_quicklink(address),
        },
        Quicklink {
            name,
            link: deeplink::host_quicklink(host_version, namespace, contact_id, address, text),
        },
    ]
}

pub async fn create(session: &Session, contact: &str, address: &str, text: &str) -> Result<()> {
    let contacts = session.loader.contacts().await;
    let contact_id = contacts.resolve_id(contact);
    let given_name = contacts
        .find_by_id(&contact_id)
        .map(|c| c.given_name.as_str())
        .unwrap_or_default();

    let links = build(
        given_name,
        &session.prefs.host.version,
        &session.prefs.host.namespace,
        &contact_id,
        address,
        text,
    );

    if session.output.json {
        session.output.print(&links);
    } else {
        println!("{}", links[0].name);
        println!("  Messages: {}", links[0].link);
        println!("  Launcher: {}", links[1].link);
    }
    Ok(())
}
