//! wolfies-send library
//!
//! Pick a contact, pick one of its addresses, send a message through
//! Messages.app, and put Messages back the way it was.
//!
//! CHANGELOG:
//! - 01/14/2026 - Send-message modules (Claude)
//! - 01/10/2026 - Initial library structure (Phase 4C, Claude)

pub mod applescript;
pub mod commands;
pub mod config;
pub mod contacts;
pub mod deeplink;
pub mod drafts;
pub mod form;
pub mod host;
pub mod messages;
pub mod notify;
pub mod orchestrator;
pub mod output;
