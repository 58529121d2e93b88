//! Command implementations.
//!
//! CHANGELOG:
//! - 01/14/2026 - Session wiring for send, contacts and quicklink commands (Claude)
//! - 01/10/2026 - Initial module structure (Claude)

pub mod contacts;
pub mod quicklink;
pub mod send;

use crate::applescript::{OsascriptBridge, ScriptBridge};
use crate::config::{ContactsBackend, Preferences};
use crate::contacts::{ContactLoader, ContactsAppSource, ContactsSource, JsonContactsSource};
use crate::drafts::{default_draft_path, DraftStore};
use crate::host::{DesktopHost, Host};
use crate::notify::{Notifier, TerminalNotifier};
use crate::output::OutputControls;
use std::sync::Arc;

/// Everything one command invocation needs. Lives exactly as long as the command.
pub struct Session {
    pub prefs: Preferences,
    pub output: OutputControls,
    pub bridge: Arc<dyn ScriptBridge>,
    pub host: Arc<dyn Host>,
    pub notifier: Arc<dyn Notifier>,
    pub loader: ContactLoader,
    pub drafts: DraftStore,
}

impl Session {
    /// Wire up the real backends: osascript, `open`, the terminal.
    ///
    /// `open_chat` runs a notification's follow-up action automatically.
    pub fn desktop(prefs: Preferences, output: OutputControls, open_chat: bool) -> Self {
        let bridge: Arc<dyn ScriptBridge> = Arc::new(OsascriptBridge::new());
        let host: Arc<dyn Host> = Arc::new(DesktopHost::new(bridge.clone()));

        let mut notifier =
            TerminalNotifier::new(output.clone(), host.clone()).run_primary_action(open_chat);
        if prefs.system_notifications {
            notifier = notifier.with_banner(bridge.clone());
        }
        let notifier: Arc<dyn Notifier> = Arc::new(notifier);

        let source: Box<dyn ContactsSource> = match prefs.contacts.source {
            ContactsBackend::Json => {
                Box::new(JsonContactsSource::new(prefs.contacts.resolved_path()))
            }
            ContactsBackend::ContactsApp => Box::new(ContactsAppSource::new(bridge.clone())),
        };
        let loader = ContactLoader::new(source, notifier.clone());

        Self {
            prefs,
            output,
            bridge,
            host,
            notifier,
            loader,
            drafts: DraftStore::new(default_draft_path()),
        }
    }
}
