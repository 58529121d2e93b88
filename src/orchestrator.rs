//! Submit flow: resolve contact, snapshot Messages state, send, reconcile.
//!
//! CHANGELOG:
//! - 01/14/2026 - Initial implementation (Claude)

use crate::applescript::ScriptBridge;
use crate::contacts::{Contact, ContactsManager};
use crate::deeplink;
use crate::form::{FormError, FormState};
use crate::host::Host;
use crate::messages::{MessagesApp, SendResult};
use crate::notify::{Notification, Notifier};
use tracing::{info, warn};

pub const SEND_FAILED_TITLE: &str = "Could not send message";
pub const CONTACT_NOT_FOUND: &str = "Contact not found";

/// How a submission ended. Mirrors what the user was told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    /// Required fields were empty; nothing was attempted.
    Rejected(FormError),
    ContactNotFound,
    /// The script or the bridge reported this message.
    Failed(String),
}

/// Messages state captured before sending, consumed once the send succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreSendState {
    pub messages_was_running: bool,
}

pub struct SendOrchestrator<'a> {
    messages: MessagesApp<'a>,
    host: &'a dyn Host,
    notifier: &'a dyn Notifier,
    close_main_window: bool,
}

impl<'a> SendOrchestrator<'a> {
    pub fn new(
        bridge: &'a dyn ScriptBridge,
        host: &'a dyn Host,
        notifier: &'a dyn Notifier,
        close_main_window: bool,
    ) -> Self {
        Self {
            messages: MessagesApp::new(bridge),
            host,
            notifier,
            close_main_window,
        }
    }

    /// Run one submission against the loaded contacts.
    ///
    /// On success the text is cleared and contact/address are kept. On any
    /// failure the form is left untouched.
    pub async fn submit(&self, form: &mut FormState, contacts: &ContactsManager) -> SubmitOutcome {
        if let Err(e) = form.validate() {
            return SubmitOutcome::Rejected(e);
        }

        let values = form.values().clone();
        let Some(contact) = contacts.find_by_id(&values.contact) else {
            self.report_failure(CONTACT_NOT_FOUND).await;
            return SubmitOutcome::ContactNotFound;
        };

        let pre = match self.messages.is_running().await {
            Ok(running) => PreSendState {
                messages_was_running: running,
            },
            Err(e) => return self.fail(e.to_string()).await,
        };

        match self.messages.send(&values.address, &values.text).await {
            Ok(SendResult::Success) => {
                info!(contact = %contact.id, "message sent");
                self.restore(pre).await;
                self.notify_sent(contact, &values.address, &values.text).await;
                form.reset_text();
                SubmitOutcome::Sent
            }
            Ok(SendResult::Error(message)) => self.fail(message).await,
            Err(e) => self.fail(e.to_string()).await,
        }
    }

    /// Undo what sending did to the desktop: hide our window if configured,
    /// and quit Messages if it was only started to send this message.
    async fn restore(&self, pre: PreSendState) {
        if self.close_main_window {
            if let Err(e) = self.host.close_main_window().await {
                warn!(error = %e, "failed to close main window");
            }
        }

        if !pre.messages_was_running {
            if let Err(e) = self.messages.quit().await {
                warn!(error = %e, "failed to quit Messages");
            }
        }
    }

    async fn notify_sent(&self, contact: &Contact, address: &str, text: &str) {
        let name = contact.display_name();
        self.notifier
            .show(
                Notification::success(format!("Sent Message to {}", name))
                    .with_message(text)
                    .with_action(
                        format!("Open Chat with {}", name),
                        deeplink::chat_link(address),
                    ),
            )
            .await;
    }

    async fn report_failure(&self, message: &str) {
        warn!(message, "send failed");
        self.notifier
            .show(Notification::failure(SEND_FAILED_TITLE).with_message(message))
            .await;
    }

    async fn fail(&self, message: String) -> SubmitOutcome {
        self.report_failure(&message).await;
        SubmitOutcome::Failed(message)
    }
}
