//! Contacts: model, sources, per-invocation loader, and name matching.
//!
//! CHANGELOG:
//! - 01/14/2026 - Address book model, sources and memoized loader (Claude)
//! - 01/10/2026 - Initial module structure (Claude)

pub mod fuzzy;
pub mod loader;
pub mod manager;
pub mod source;

pub use loader::ContactLoader;
pub use manager::{Contact, ContactsManager};
pub use source::{ContactsAppSource, ContactsError, ContactsSource, JsonContactsSource};
