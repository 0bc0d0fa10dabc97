#![forbid(unsafe_code)]

pub const CRATE_NAME: &str = "sitecheck-core";

mod error;
mod ids;
pub mod time;

pub use error::Error;
pub use ids::{CategoryId, ChecklistId, ItemId, UserId};
