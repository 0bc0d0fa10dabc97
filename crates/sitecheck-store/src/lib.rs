#![forbid(unsafe_code)]
//! SQLite persistence for sitecheck.
//!
//! The [`Store`] is an explicitly constructed handle; nothing in this
//! crate keeps process-global state. Every status-consistency operation
//! runs inside one `BEGIN IMMEDIATE` transaction and recomputes the
//! checklist aggregate from the full sibling set before committing.

pub const CRATE_NAME: &str = "sitecheck-store";

mod authorize;
mod checklists;
mod error;
mod items;
mod migrations;
mod notifications;
mod row;
mod schema;
mod seed;
mod store;
mod users;

pub use checklists::{ChecklistDetail, NewChecklist, ReminderSource};
pub use error::StoreError;
pub use items::{BatchStatusUpdate, ItemStatusUpdate, NewItem};
pub use migrations::{current_schema_version, LATEST_SCHEMA_VERSION};
pub use store::Store;
