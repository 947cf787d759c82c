//! External service interactions
//!
//! - `api` - blocking HTTP client for the campaigns REST API
//! - `api_runner` - runs API calls in the background for the UI
//! - `error` - client error taxonomy

pub mod api;
pub mod api_runner;
pub mod error;

pub use api::{CampaignApi, HttpCampaignClient};
pub use api_runner::{ApiMessage, ApiRunner};
pub use error::{ApiError, ApiResult};
