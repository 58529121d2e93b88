//! Per-invocation contact cache.
//!
//! CHANGELOG:
//! - 01/14/2026 - Initial implementation (Claude)

use super::manager::ContactsManager;
use super::source::ContactsSource;
use crate::notify::{Notification, Notifier};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

pub const PRIVACY_SETTINGS_URL: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_Contacts";

/// Fetches the address book at most once for the lifetime of the loader.
///
/// A failed fetch is reported and cached as an empty book; it is not retried.
pub struct ContactLoader {
    source: Box<dyn ContactsSource>,
    notifier: Arc<dyn Notifier>,
    cache: OnceCell<ContactsManager>,
}

impl ContactLoader {
    pub fn new(source: Box<dyn ContactsSource>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            source,
            notifier,
            cache: OnceCell::new(),
        }
    }

    pub async fn contacts(&self) -> &ContactsManager {
        self.cache
            .get_or_init(|| async {
                match self.source.fetch_all().await {
                    Ok(contacts) => {
                        info!(count = contacts.len(), "loaded contacts");
                        ContactsManager::new(contacts)
                    }
                    Err(e) => {
                        warn!(error = %e, "could not load contacts");
                        self.notifier
                            .show(
                                Notification::failure("Could not get contacts")
                                    .with_message(
                                        "Make sure you have granted access to your contacts.",
                                    )
                                    .with_action("Open System Preferences", PRIVACY_SETTINGS_URL),
                            )
                            .await;
                        ContactsManager::empty()
                    }
                }
            })
            .await
    }

    /// True once a fetch has settled (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::manager::Contact;
    use crate::contacts::source::ContactsError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl ContactsSource for CountingSource {
        async fn fetch_all(&self) -> Result<Vec<Contact>, ContactsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ContactsError::Malformed { line: 1 });
            }
            Ok(vec![Contact {
                id: "1".to_string(),
                given_name: "Ada".to_string(),
                family_name: String::new(),
                phone_numbers: vec!["+15550100".to_string()],
                email_addresses: vec![],
            }])
        }
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<Notification>>);

    #[async_trait]
    impl Notifier for Collect {
        async fn show(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    #[tokio::test]
    async fn test_fetches_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = ContactLoader::new(
            Box::new(CountingSource {
                calls: calls.clone(),
                fail: false,
            }),
            Arc::new(Collect::default()),
        );

        assert!(!loader.is_loaded());
        assert_eq!(loader.contacts().await.all().len(), 1);
        assert_eq!(loader.contacts().await.all().len(), 1);
        assert!(loader.is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_notifies_with_settings_action_and_is_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let notes = Arc::new(Collect::default());
        let loader = ContactLoader::new(
            Box::new(CountingSource {
                calls: calls.clone(),
                fail: true,
            }),
            notes.clone(),
        );

        assert!(loader.contacts().await.all().is_empty());
        assert!(loader.contacts().await.all().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let shown = notes.0.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Could not get contacts");
        let action = shown[0].primary_action.as_ref().unwrap();
        assert_eq!(action.url, PRIVACY_SETTINGS_URL);
    }
}
