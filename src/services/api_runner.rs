//! Background request runner
//!
//! Each API call runs on its own thread and reports back over a channel.
//! The UI thread drains the channel on every tick, so all state changes
//! still happen on the event loop.

use crate::model::{Campaign, CreateCampaignPayload};
use crate::services::api::CampaignApi;
use crate::services::error::ApiResult;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Result of a finished background request
#[derive(Debug)]
pub enum ApiMessage {
    /// Campaign list fetched (initial load, manual refresh, or after a mutation).
    /// `seq` orders list requests by when they were sent; a higher number
    /// reflects a newer server state.
    Loaded {
        seq: u64,
        result: ApiResult<Vec<Campaign>>,
    },
    /// Create request settled
    Created(ApiResult<Campaign>),
    /// Publish request for `id` settled. On success the refreshed list has
    /// already been delivered as a `Loaded` message.
    Published { id: String, result: ApiResult<()> },
}

/// Spawns API calls off the UI thread
pub struct ApiRunner {
    api: Arc<dyn CampaignApi>,
    sender: Sender<ApiMessage>,
    receiver: Receiver<ApiMessage>,
    load_seq: Arc<AtomicU64>,
}

/// Number a list request, then run it
fn fetch_list(api: &dyn CampaignApi, load_seq: &AtomicU64) -> ApiMessage {
    let seq = load_seq.fetch_add(1, Ordering::SeqCst) + 1;
    ApiMessage::Loaded {
        seq,
        result: api.list_campaigns(),
    }
}

impl ApiRunner {
    pub fn new(api: Arc<dyn CampaignApi>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            api,
            sender,
            receiver,
            load_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Fetch the full list
    pub fn load(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.sender.clone();
        let load_seq = Arc::clone(&self.load_seq);
        thread::spawn(move || {
            let _ = tx.send(fetch_list(api.as_ref(), &load_seq));
        });
    }

    /// Submit a new campaign
    pub fn create(&self, payload: CreateCampaignPayload) {
        let api = Arc::clone(&self.api);
        let tx = self.sender.clone();
        thread::spawn(move || {
            let _ = tx.send(ApiMessage::Created(api.create_campaign(&payload)));
        });
    }

    /// Publish a draft, then reload the list before reporting completion
    pub fn publish(&self, id: String) {
        let api = Arc::clone(&self.api);
        let tx = self.sender.clone();
        let load_seq = Arc::clone(&self.load_seq);
        thread::spawn(move || {
            let result = api.publish_campaign(&id);
            if result.is_ok() {
                let _ = tx.send(fetch_list(api.as_ref(), &load_seq));
            }
            let _ = tx.send(ApiMessage::Published { id, result });
        });
    }

    /// Drain every message that has arrived since the last poll
    pub fn poll(&self) -> Vec<ApiMessage> {
        let mut messages = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(message) => messages.push(message),
                // The runner holds a sender, so the channel never disconnects.
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        messages
    }

    /// Block until the next message arrives
    #[cfg(test)]
    pub fn wait(&self, timeout: std::time::Duration) -> Option<ApiMessage> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::CampaignStatus;
    use crate::services::error::{ApiError, PUBLISH_FAILED};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory `CampaignApi` shared by the flow tests
    #[derive(Default)]
    pub struct FakeApi {
        pub campaigns: Mutex<Vec<Campaign>>,
        pub fail_publish: bool,
        pub create_error: Option<String>,
        pub publish_calls: Mutex<Vec<String>>,
        /// Per-call delays applied after a list snapshot is taken
        pub list_delays: Mutex<VecDeque<Duration>>,
    }

    impl FakeApi {
        pub fn with_campaigns(campaigns: Vec<Campaign>) -> Self {
            Self {
                campaigns: Mutex::new(campaigns),
                ..Self::default()
            }
        }
    }

    pub fn draft_campaign(id: &str, name: &str) -> Campaign {
        Campaign {
            id: id.to_string(),
            name: name.to_string(),
            objective: "TRAFFIC".to_string(),
            campaign_type: "SEARCH".to_string(),
            daily_budget: 500,
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
            status: CampaignStatus::Draft,
            google_campaign_id: None,
            created_at: "2024-01-01T09:00:00".to_string(),
        }
    }

    impl CampaignApi for FakeApi {
        fn list_campaigns(&self) -> ApiResult<Vec<Campaign>> {
            let snapshot = self.campaigns.lock().unwrap().clone();
            let delay = self.list_delays.lock().unwrap().pop_front();
            if let Some(delay) = delay {
                thread::sleep(delay);
            }
            Ok(snapshot)
        }

        fn create_campaign(&self, payload: &CreateCampaignPayload) -> ApiResult<Campaign> {
            if let Some(message) = &self.create_error {
                return Err(ApiError::Status {
                    status: 400,
                    message: message.clone(),
                });
            }
            let mut campaigns = self.campaigns.lock().unwrap();
            let mut campaign = draft_campaign(&format!("cmp-{}", campaigns.len() + 1), &payload.name);
            campaign.daily_budget = payload.daily_budget;
            campaign.start_date = payload.start_date.clone();
            campaign.end_date = payload.end_date.clone();
            campaigns.push(campaign.clone());
            Ok(campaign)
        }

        fn publish_campaign(&self, id: &str) -> ApiResult<()> {
            self.publish_calls.lock().unwrap().push(id.to_string());
            if self.fail_publish {
                return Err(ApiError::Status {
                    status: 502,
                    message: PUBLISH_FAILED.to_string(),
                });
            }
            let mut campaigns = self.campaigns.lock().unwrap();
            if let Some(c) = campaigns.iter_mut().find(|c| c.id == id) {
                c.status = CampaignStatus::Published;
                c.google_campaign_id = Some(format!("g-{}", id));
            }
            Ok(())
        }
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_load_reports_list() {
        let runner = ApiRunner::new(Arc::new(FakeApi::with_campaigns(vec![
            draft_campaign("1", "Spring"),
            draft_campaign("2", "Summer"),
        ])));
        runner.load();

        match runner.wait(WAIT) {
            Some(ApiMessage::Loaded {
                seq,
                result: Ok(campaigns),
            }) => {
                assert_eq!(seq, 1);
                let names: Vec<_> = campaigns.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names, vec!["Spring", "Summer"]);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_publish_success_reloads_before_settling() {
        let runner = ApiRunner::new(Arc::new(FakeApi::with_campaigns(vec![draft_campaign(
            "1", "Spring",
        )])));
        runner.publish("1".to_string());

        match runner.wait(WAIT) {
            Some(ApiMessage::Loaded {
                result: Ok(campaigns),
                ..
            }) => {
                assert_eq!(campaigns[0].status, CampaignStatus::Published);
            }
            other => panic!("expected reload first, got {other:?}"),
        }
        match runner.wait(WAIT) {
            Some(ApiMessage::Published { id, result }) => {
                assert_eq!(id, "1");
                assert!(result.is_ok());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_publish_failure_skips_reload() {
        let api = FakeApi {
            fail_publish: true,
            ..FakeApi::with_campaigns(vec![draft_campaign("1", "Spring")])
        };
        let runner = ApiRunner::new(Arc::new(api));
        runner.publish("1".to_string());

        match runner.wait(WAIT) {
            Some(ApiMessage::Published { id, result }) => {
                assert_eq!(id, "1");
                assert_eq!(result.unwrap_err().to_string(), "Publish failed");
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert!(runner.wait(Duration::from_millis(100)).is_none());
    }

    #[test]
    fn test_list_requests_are_numbered_in_send_order() {
        let runner = ApiRunner::new(Arc::new(FakeApi::with_campaigns(vec![draft_campaign(
            "1", "Spring",
        )])));

        runner.load();
        let first = runner.wait(WAIT);
        runner.publish("1".to_string());
        let second = runner.wait(WAIT);

        match (first, second) {
            (Some(ApiMessage::Loaded { seq: a, .. }), Some(ApiMessage::Loaded { seq: b, .. })) => {
                assert!(b > a, "publish reload {b} should outrank earlier load {a}");
            }
            other => panic!("unexpected messages: {other:?}"),
        }
    }

    #[test]
    fn test_poll_is_empty_when_idle() {
        let runner = ApiRunner::new(Arc::new(FakeApi::default()));
        assert!(runner.poll().is_empty());
    }
}
