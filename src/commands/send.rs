//! Send command: seed the form, fill it from flags, submit.
//!
//! CHANGELOG:
//! - 01/14/2026 - Rewritten around the submit flow, drafts and quicklink replay (Claude)
//! - 01/10/2026 - Implemented send and send_by_phone with AppleScript (Claude)

use super::Session;
use crate::contacts::ContactsManager;
use crate::deeplink;
use crate::form::{Field, FormError, FormState, LaunchContext};
use crate::orchestrator::{SendOrchestrator, SubmitOutcome};
use anyhow::{anyhow, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Values typed on the command line. `None` means "keep the seeded value".
#[derive(Debug, Clone, Default)]
pub struct SendArgs {
    pub contact: Option<String>,
    pub address: Option<String>,
    pub text: Option<String>,
    pub launch_context: Option<LaunchContext>,
    pub resume: bool,
}

/// Send a message built from a draft, a launch context and flags.
pub async fn send(session: &Session, args: SendArgs) -> Result<SubmitOutcome> {
    let draft = if args.resume {
        match session.drafts.load() {
            Ok(draft) => draft,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable draft");
                None
            }
        }
    } else {
        None
    };

    let mut form = FormState::seeded(
        draft.as_ref().map(|d| &d.values),
        args.launch_context.as_ref(),
    );
    let contacts = session.loader.contacts().await;

    if let Some(contact) = &args.contact {
        form.select_contact(contacts.resolve_id(contact));
    }
    if let Some(address) = args.address {
        form.select_address(address);
    }
    if let Some(text) = args.text {
        form.set_text(text);
    }

    if form.focus() == Some(Field::Text) && form.values().text.is_empty() {
        form.set_text(prompt_for_text().await?);
    }

    let orchestrator = SendOrchestrator::new(
        session.bridge.as_ref(),
        session.host.as_ref(),
        session.notifier.as_ref(),
        session.prefs.close_main_window,
    );
    let outcome = orchestrator.submit(&mut form, contacts).await;

    match &outcome {
        SubmitOutcome::Sent => {
            if let Err(e) = session.drafts.clear() {
                warn!(error = %e, "failed to clear draft");
            }
        }
        SubmitOutcome::Rejected(e) => {
            return Err(anyhow!(describe_rejection(e, &form, contacts)));
        }
        SubmitOutcome::ContactNotFound | SubmitOutcome::Failed(_) => {
            match session.drafts.save(form.values()) {
                Ok(_) => info!(path = ?session.drafts.path(), "draft saved; retry with --resume"),
                Err(e) => warn!(error = %e, "failed to save draft"),
            }
        }
    }

    Ok(outcome)
}

/// Replay a host quicklink: its launch context seeds the form.
pub async fn open_link(session: &Session, link: &str) -> Result<SubmitOutcome> {
    let launch_context = deeplink::parse_launch_context(link)
        .with_context(|| format!("Failed to read quicklink: {}", link))?;
    send(
        session,
        SendArgs {
            launch_context: Some(launch_context),
            ..SendArgs::default()
        },
    )
    .await
}

/// Missing-field error, listing the addresses the user could have picked.
fn describe_rejection(error: &FormError, form: &FormState, contacts: &ContactsManager) -> String {
    let FormError::MissingFields(fields) = error;
    let addresses = form.addresses(contacts);
    if fields.contains(&Field::Address) && !addresses.is_empty() {
        format!("{} (available addresses: {})", error, addresses.join(", "))
    } else {
        error.to_string()
    }
}

/// Ask for the message on stdin; one line.
async fn prompt_for_text() -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Message: ").await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read message from stdin")?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::Contact;
    use crate::form::FormValues;

    #[test]
    fn test_rejection_lists_addresses() {
        let contacts = ContactsManager::new(vec![Contact {
            id: "1".to_string(),
            given_name: "Ada".to_string(),
            family_name: String::new(),
            phone_numbers: vec!["+15550100".to_string()],
            email_addresses: vec!["ada@example.com".to_string()],
        }]);
        let form = FormState::new(FormValues {
            contact: "1".to_string(),
            address: String::new(),
            text: "hi".to_string(),
        });
        let err = form.validate().unwrap_err();
        assert_eq!(
            describe_rejection(&err, &form, &contacts),
            "Missing required field(s): address (available addresses: +15550100, ada@example.com)"
        );
    }
}
