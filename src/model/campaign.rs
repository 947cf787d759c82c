//! Campaign records as served by the campaigns API

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Objectives offered by the create form. The server owns the real vocabulary;
/// the client only cycles through these and sends the chosen text as-is.
pub const OBJECTIVES: [&str; 4] = ["TRAFFIC", "SALES", "LEADS", "AWARENESS"];

/// Campaign types offered by the create form
pub const CAMPAIGN_TYPES: [&str; 4] = ["SEARCH", "DISPLAY", "VIDEO", "PERFORMANCE_MAX"];

/// Lifecycle status of a campaign
///
/// `Published` is terminal: there is no transition back to `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Published,
}

impl CampaignStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "DRAFT",
            CampaignStatus::Published => "PUBLISHED",
        }
    }

    /// Only drafts expose the publish control
    pub fn is_publishable(&self) -> bool {
        matches!(self, CampaignStatus::Draft)
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A campaign record. Read-only on the client; the server assigns `id`,
/// `status`, `google_campaign_id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub objective: String,
    pub campaign_type: String,
    pub daily_budget: u64,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_campaign_id: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl Campaign {
    /// Budget rendered with the configured currency symbol, e.g. `₹500`
    pub fn formatted_budget(&self, currency_symbol: &str) -> String {
        format!("{}{}", currency_symbol, self.daily_budget)
    }

    /// Creation time trimmed to minutes when the server sent a parseable
    /// timestamp, otherwise the raw text
    pub fn formatted_created_at(&self) -> String {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.created_at) {
            return ts.format("%Y-%m-%d %H:%M").to_string();
        }
        for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%a, %d %b %Y %H:%M:%S GMT"] {
            if let Ok(ts) = NaiveDateTime::parse_from_str(&self.created_at, pattern) {
                return ts.format("%Y-%m-%d %H:%M").to_string();
            }
        }
        self.created_at.clone()
    }
}

/// Body of `POST /api/campaigns/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCampaignPayload {
    pub name: String,
    pub objective: String,
    pub campaign_type: String,
    pub daily_budget: u64,
    pub start_date: String,
    pub end_date: String,
    pub ad_group_name: String,
    pub ad_headline: String,
    pub ad_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> CreateCampaignPayload {
        CreateCampaignPayload {
            name: "Sale".to_string(),
            objective: "TRAFFIC".to_string(),
            campaign_type: "SEARCH".to_string(),
            daily_budget: 500,
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
            ad_group_name: "AG1".to_string(),
            ad_headline: "Big Sale".to_string(),
            ad_description: "Save now".to_string(),
            asset_url: None,
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(CampaignStatus::Draft).unwrap(), json!("DRAFT"));
        assert_eq!(
            serde_json::from_value::<CampaignStatus>(json!("PUBLISHED")).unwrap(),
            CampaignStatus::Published
        );
        assert!(serde_json::from_value::<CampaignStatus>(json!("ARCHIVED")).is_err());
    }

    #[test]
    fn test_only_drafts_are_publishable() {
        assert!(CampaignStatus::Draft.is_publishable());
        assert!(!CampaignStatus::Published.is_publishable());
    }

    #[test]
    fn test_campaign_decodes_server_record() {
        let campaign: Campaign = serde_json::from_value(json!({
            "id": "3f2c",
            "name": "Sale",
            "objective": "TRAFFIC",
            "campaign_type": "SEARCH",
            "daily_budget": 500,
            "start_date": "2024-01-01",
            "end_date": "2024-01-31",
            "status": "PUBLISHED",
            "google_campaign_id": "customers/1/campaigns/99",
            "google_budget_resource": "customers/1/campaignBudgets/7",
            "ad_group_name": "AG1",
            "created_at": "2024-01-01T10:15:00"
        }))
        .unwrap();

        assert_eq!(campaign.status, CampaignStatus::Published);
        assert_eq!(campaign.google_campaign_id.as_deref(), Some("customers/1/campaigns/99"));
        assert_eq!(campaign.formatted_created_at(), "2024-01-01 10:15");
    }

    #[test]
    fn test_null_google_id_is_none() {
        let campaign: Campaign = serde_json::from_value(json!({
            "id": "a",
            "name": "n",
            "objective": "TRAFFIC",
            "campaign_type": "SEARCH",
            "daily_budget": 1,
            "start_date": "2024-01-01",
            "end_date": "2024-01-02",
            "status": "DRAFT",
            "google_campaign_id": null,
            "created_at": "not a date"
        }))
        .unwrap();

        assert!(campaign.google_campaign_id.is_none());
        assert_eq!(campaign.formatted_created_at(), "not a date");
        assert_eq!(campaign.formatted_budget("₹"), "₹1");
    }

    #[test]
    fn test_payload_omits_missing_asset_url() {
        let value = serde_json::to_value(sample_payload()).unwrap();
        assert!(value.get("asset_url").is_none());
        assert_eq!(value["daily_budget"], json!(500));
        assert!(value.get("status").is_none());
        assert!(value.get("id").is_none());

        let mut with_asset = sample_payload();
        with_asset.asset_url = Some("https://cdn.example.com/banner.png".to_string());
        let value = serde_json::to_value(with_asset).unwrap();
        assert_eq!(value["asset_url"], json!("https://cdn.example.com/banner.png"));
    }
}
