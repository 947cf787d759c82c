//! Model layer - centralized state management
//!
//! - `Campaign` / `CreateCampaignPayload` - records exchanged with the API
//! - `CampaignDraft` - the create form's in-progress payload
//! - `DomainState` - the canonical campaign list
//! - `ModalStack` - modal overlay management

pub mod campaign;
pub mod domain;
pub mod draft;
pub mod modal;
pub mod ui;

// Re-export commonly used types
pub use campaign::{Campaign, CampaignStatus, CreateCampaignPayload};
pub use domain::DomainState;
pub use ui::{AppMode, Focus};
