//! Domain state - business/data state separate from UI concerns

use super::campaign::Campaign;
use chrono::{DateTime, Local};

/// The canonical campaign list as last reported by the server
///
/// Only ever replaced wholesale by a completed list request, never patched
/// in place.
#[derive(Debug, Default)]
pub struct DomainState {
    /// All campaigns in server order
    pub campaigns: Vec<Campaign>,

    /// Number of list requests currently in flight
    pub pending_loads: usize,

    /// Request number of the list currently shown (0 before the first load)
    pub loaded_seq: u64,

    /// When the list was last replaced
    pub last_loaded_at: Option<DateTime<Local>>,
}

impl DomainState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    /// Record that a list request was issued
    pub fn begin_load(&mut self) {
        self.pending_loads += 1;
    }

    /// Record that a list request settled without replacing anything
    pub fn end_load(&mut self) {
        self.pending_loads = self.pending_loads.saturating_sub(1);
    }

    /// Settle list request `seq`, swapping in its result unless a list from a
    /// later request is already shown. Returns whether the list was replaced.
    pub fn apply_load(&mut self, seq: u64, campaigns: Vec<Campaign>) -> bool {
        self.end_load();
        if seq <= self.loaded_seq {
            return false;
        }
        self.loaded_seq = seq;
        self.replace_campaigns(campaigns);
        true
    }

    /// Swap in a freshly fetched list
    pub fn replace_campaigns(&mut self, campaigns: Vec<Campaign>) {
        self.campaigns = campaigns;
        self.last_loaded_at = Some(Local::now());
    }

    pub fn find(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn draft_count(&self) -> usize {
        self.campaigns
            .iter()
            .filter(|c| c.status.is_publishable())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CampaignStatus;

    fn campaign(id: &str, status: CampaignStatus) -> Campaign {
        Campaign {
            id: id.to_string(),
            name: format!("campaign {}", id),
            objective: "TRAFFIC".to_string(),
            campaign_type: "SEARCH".to_string(),
            daily_budget: 100,
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-02".to_string(),
            status,
            google_campaign_id: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut domain = DomainState::new();
        domain.replace_campaigns(vec![
            campaign("a", CampaignStatus::Draft),
            campaign("b", CampaignStatus::Published),
        ]);
        assert_eq!(domain.draft_count(), 1);
        assert!(domain.last_loaded_at.is_some());

        domain.replace_campaigns(vec![campaign("c", CampaignStatus::Draft)]);
        assert!(domain.find("a").is_none());
        assert!(domain.find("c").is_some());
        assert_eq!(domain.campaigns.len(), 1);
    }

    #[test]
    fn test_older_list_never_replaces_newer() {
        let mut domain = DomainState::new();
        domain.begin_load();
        domain.begin_load();

        assert!(domain.apply_load(2, vec![campaign("a", CampaignStatus::Published)]));
        assert!(!domain.apply_load(1, vec![campaign("a", CampaignStatus::Draft)]));

        assert_eq!(domain.find("a").map(|c| c.status), Some(CampaignStatus::Published));
        assert_eq!(domain.loaded_seq, 2);
        assert!(!domain.is_loading(), "stale results still settle their load");
    }

    #[test]
    fn test_load_counter_never_underflows() {
        let mut domain = DomainState::new();
        domain.begin_load();
        domain.begin_load();
        assert!(domain.is_loading());
        domain.end_load();
        assert!(domain.is_loading());
        domain.end_load();
        domain.end_load();
        assert!(!domain.is_loading());
    }
}
