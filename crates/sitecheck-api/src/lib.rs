#![forbid(unsafe_code)]

pub const CRATE_NAME: &str = "sitecheck-api";

pub mod dto;
pub mod errors;
pub mod params;

pub use dto::{
    decode_body, CreateChecklistRequest, CreateItemRequest, UpdateItemStatusRequest,
    UpdateItemsStatusRequest,
};
pub use errors::{ApiError, ApiErrorCode};
pub use params::parse_list_checklists_params;
