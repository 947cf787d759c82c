//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod alert_dialog;
pub mod campaign_form;
pub mod campaign_list;
pub mod confirm_dialog;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod setup;

pub use alert_dialog::AlertDialog;
pub use campaign_form::CampaignFormComponent;
pub use campaign_list::CampaignListComponent;
pub use confirm_dialog::ConfirmDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use setup::SetupComponent;
