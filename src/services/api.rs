//! HTTP client for the campaigns REST API
//!
//! Endpoints (relative to the configured base URL):
//! - `GET  /api/campaigns/`             list all campaigns
//! - `POST /api/campaigns/`             create a campaign from a payload
//! - `POST /api/campaigns/{id}/publish` publish a draft
//!
//! Calls are blocking and single-shot: no retries, and no timeout unless one
//! is configured. Run them off the UI thread (see `ApiRunner`).

use crate::model::{Campaign, CreateCampaignPayload};
use crate::services::error::{ApiError, ApiResult, CREATE_FAILED, LOAD_FAILED, PUBLISH_FAILED};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use ureq::http::Response;
use ureq::Body;

/// Path of the campaigns collection, relative to the base URL
pub const COLLECTION_PATH: &str = "/api/campaigns/";

/// Operations the UI needs from the campaigns backend
pub trait CampaignApi: Send + Sync {
    /// Fetch every campaign, in server order
    fn list_campaigns(&self) -> ApiResult<Vec<Campaign>>;

    /// Create a campaign; the server returns it in `DRAFT` status
    fn create_campaign(&self, payload: &CreateCampaignPayload) -> ApiResult<Campaign>;

    /// Request the one-way `DRAFT -> PUBLISHED` transition
    fn publish_campaign(&self, id: &str) -> ApiResult<()>;
}

/// `CampaignApi` over HTTP using a shared `ureq` agent
#[derive(Clone)]
pub struct HttpCampaignClient {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpCampaignClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        // Status codes are inspected by hand so error bodies can be read.
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build(),
        );

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, COLLECTION_PATH)
    }

    pub fn publish_url(&self, id: &str) -> String {
        format!(
            "{}{}{}/publish",
            self.base_url,
            COLLECTION_PATH,
            urlencoding::encode(id)
        )
    }

    fn finish(
        method: &str,
        url: &str,
        started: Instant,
        result: Result<Response<Body>, ureq::Error>,
    ) -> ApiResult<Response<Body>> {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::debug!(method, url, status, elapsed_ms, "campaigns api response");
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(method, url, elapsed_ms, error = %err, "campaigns api request failed");
                Err(ApiError::Network(err))
            }
        }
    }

    fn read_body(response: &mut Response<Body>) -> ApiResult<String> {
        response
            .body_mut()
            .read_to_string()
            .map_err(ApiError::Network)
    }

    fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull the `error` string out of a JSON error body, if there is one
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.as_str())
        .filter(|e| !e.is_empty())
        .map(str::to_string)
}

impl CampaignApi for HttpCampaignClient {
    fn list_campaigns(&self) -> ApiResult<Vec<Campaign>> {
        let url = self.collection_url();
        let started = Instant::now();
        let mut response = Self::finish("GET", &url, started, self.agent.get(&url).call())?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: LOAD_FAILED.to_string(),
            });
        }

        let body = Self::read_body(&mut response)?;
        let campaigns: Vec<Campaign> = Self::decode(&body)?;
        tracing::info!(count = campaigns.len(), "loaded campaigns");
        Ok(campaigns)
    }

    fn create_campaign(&self, payload: &CreateCampaignPayload) -> ApiResult<Campaign> {
        let url = self.collection_url();
        let started = Instant::now();
        let mut response = Self::finish(
            "POST",
            &url,
            started,
            self.agent.post(&url).send_json(payload),
        )?;

        let status = response.status();
        // An unreadable error body still yields a status error.
        let body = match Self::read_body(&mut response) {
            Ok(body) => body,
            Err(err) if status.is_success() => return Err(err),
            Err(_) => String::new(),
        };

        if !status.is_success() {
            let message =
                extract_error_message(&body).unwrap_or_else(|| CREATE_FAILED.to_string());
            tracing::warn!(status = status.as_u16(), %message, "create campaign rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let campaign: Campaign = Self::decode(&body)?;
        tracing::info!(id = %campaign.id, name = %campaign.name, "created campaign");
        Ok(campaign)
    }

    fn publish_campaign(&self, id: &str) -> ApiResult<()> {
        let url = self.publish_url(id);
        let started = Instant::now();
        let response = Self::finish("POST", &url, started, self.agent.post(&url).send_empty())?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(id, status = status.as_u16(), "publish rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: PUBLISH_FAILED.to_string(),
            });
        }

        tracing::info!(id, "published campaign");
        Ok(())
    }
}
