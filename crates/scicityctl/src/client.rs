//! HTTP client for communicating with scicityd.

use anyhow::{anyhow, Result};
use scicity_common::rpc::{AskRequest, AskResponse, ResetResponse, SessionRequest, StatusResponse};
use uuid::Uuid;

/// Client for communicating with scicityd.
pub struct GuideClient {
    http: reqwest::Client,
    base_url: String,
}

impl GuideClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn connect_hint(&self, e: reqwest::Error) -> anyhow::Error {
        anyhow!(
            "Cannot reach the guide daemon at {}: {}\n\n\
             Is scicityd running? Start it with:\n\
             scicityd",
            self.base_url,
            e
        )
    }

    /// Ask one question within the given session.
    pub async fn ask(&self, question: &str, session_id: Option<Uuid>) -> Result<AskResponse> {
        let request = AskRequest {
            question: question.to_string(),
            session_id,
        };
        let response = self
            .http
            .post(format!("{}/ask", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.connect_hint(e))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("daemon rejected the question: {}", body));
        }
        Ok(response.json().await?)
    }

    /// Jump straight into the planning dialogue.
    pub async fn plan_trip(&self, session_id: Option<Uuid>) -> Result<AskResponse> {
        let response = self
            .http
            .post(format!("{}/plan_trip", self.base_url))
            .json(&SessionRequest { session_id })
            .send()
            .await
            .map_err(|e| self.connect_hint(e))?;
        Ok(response.json().await?)
    }

    /// Reset the conversation back to the welcome state.
    pub async fn reset(&self, session_id: Option<Uuid>) -> Result<ResetResponse> {
        let response = self
            .http
            .post(format!("{}/reset", self.base_url))
            .json(&SessionRequest { session_id })
            .send()
            .await
            .map_err(|e| self.connect_hint(e))?;
        Ok(response.json().await?)
    }

    /// Service and credential health.
    pub async fn status(&self) -> Result<StatusResponse> {
        let response = self
            .http
            .get(format!("{}/status", self.base_url))
            .send()
            .await
            .map_err(|e| self.connect_hint(e))?;
        Ok(response.json().await?)
    }
}
