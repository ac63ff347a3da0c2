//! Gemini completion gateway with credential rotation.
//!
//! `complete()` never fails outward: every provider failure is classified,
//! logged with the active key index, accounted against the key, and
//! converted to a fixed user-safe sentence. The pool rotates to the next
//! key after too many classified errors, and proactively after a usage
//! threshold, wrapping around the ordered key list.

use reqwest::StatusCode;
use scicity_common::rpc::KeyStatus;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const FALLBACK_QUOTA: &str =
    "I'm currently experiencing high demand. Please try again in a moment.";
const FALLBACK_PERMISSION: &str = "Service temporarily unavailable. Please try again shortly.";
const FALLBACK_INVALID_KEY: &str = "Service configuration issue. Please try again later.";

/// Provider failures, classified from the HTTP response.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("quota exhausted: {0}")]
    QuotaExhausted(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone)]
struct Credential {
    key: String,
    usage: u64,
    errors: u64,
}

/// Ordered set of interchangeable API keys with usage/error accounting.
///
/// The cursor always indexes a present key; counters only grow and reset
/// with the process. Rotation advances the cursor by one, modulo pool
/// size; keys are never reordered or removed.
#[derive(Debug)]
pub struct CredentialPool {
    keys: Vec<Credential>,
    current: usize,
    max_errors_per_key: u64,
    max_requests_per_key: u64,
}

impl CredentialPool {
    pub fn new(keys: Vec<String>, max_errors_per_key: u64, max_requests_per_key: u64) -> Self {
        let keys = if keys.is_empty() {
            // An unconfigured pool still satisfies the cursor invariant;
            // calls will fail and surface the configuration fallback.
            warn!("no API keys configured, gateway will return fallback answers");
            vec![Credential {
                key: String::new(),
                usage: 0,
                errors: 0,
            }]
        } else {
            keys.into_iter()
                .map(|key| Credential {
                    key,
                    usage: 0,
                    errors: 0,
                })
                .collect()
        };

        Self {
            keys,
            current: 0,
            max_errors_per_key,
            max_requests_per_key,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    fn rotate(&mut self) {
        self.current = (self.current + 1) % self.keys.len();
        info!("switching to API key index {}", self.current);
    }

    /// Account one outgoing request and return the key to use. Rotates
    /// proactively once the active key crosses the usage threshold.
    pub fn begin_request(&mut self) -> String {
        self.keys[self.current].usage += 1;
        if self.keys[self.current].usage >= self.max_requests_per_key {
            info!(
                "key {} reached request limit, rotating",
                self.current
            );
            self.rotate();
        }
        self.keys[self.current].key.clone()
    }

    /// Account a classified provider failure against the active key.
    /// Unclassified failures are not counted and never trigger rotation.
    /// Returns true when the failure caused a rotation.
    pub fn record_failure(&mut self, err: &ProviderError) -> bool {
        if matches!(err, ProviderError::Other(_)) {
            return false;
        }

        self.keys[self.current].errors += 1;
        if self.keys[self.current].errors >= self.max_errors_per_key {
            warn!("key {} has too many errors, rotating", self.current);
            self.rotate();
            return true;
        }
        false
    }

    pub fn key_statuses(&self) -> Vec<KeyStatus> {
        self.keys
            .iter()
            .enumerate()
            .map(|(index, c)| KeyStatus {
                index,
                usage: c.usage,
                errors: c.errors,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Gateway to the Gemini text-completion API.
pub struct LlmGateway {
    http: reqwest::Client,
    base_url: String,
    model: String,
    pool: Mutex<CredentialPool>,
}

impl LlmGateway {
    pub fn new(pool: CredentialPool, model: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            base_url: GEMINI_BASE_URL.to_string(),
            model,
            pool: Mutex::new(pool),
        }
    }

    /// Send a prompt for completion. Always returns text: on any provider
    /// failure the sanitized per-category fallback sentence comes back and
    /// the underlying error goes to the log.
    pub async fn complete(&self, prompt: &str) -> String {
        let (key, index) = {
            let mut pool = self.pool.lock().await;
            let key = pool.begin_request();
            (key, pool.current_index())
        };

        match self.generate(&key, prompt).await {
            Ok(text) => text,
            Err(err) => {
                error!("key {} request failed: {}", index, err);
                let mut pool = self.pool.lock().await;
                pool.record_failure(&err);
                match err {
                    ProviderError::QuotaExhausted(_) => FALLBACK_QUOTA.to_string(),
                    ProviderError::PermissionDenied(_) => FALLBACK_PERMISSION.to_string(),
                    ProviderError::InvalidCredential(_) => FALLBACK_INVALID_KEY.to_string(),
                    ProviderError::Other(detail) => {
                        format!("Sorry, I encountered an error: {}", detail)
                    }
                }
            }
        }
    }

    async fn generate(&self, key: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Other(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_status(status, detail));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Other(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| ProviderError::Other("empty completion response".to_string()))
    }

    /// Pool snapshot for the status endpoint.
    pub async fn pool_snapshot(&self) -> (usize, Vec<KeyStatus>) {
        let pool = self.pool.lock().await;
        (pool.current_index(), pool.key_statuses())
    }
}

fn classify_status(status: StatusCode, detail: String) -> ProviderError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::QuotaExhausted(detail),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::PermissionDenied(detail),
        StatusCode::BAD_REQUEST => ProviderError::InvalidCredential(detail),
        _ => ProviderError::Other(format!("HTTP {}: {}", status, detail)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(keys: usize) -> CredentialPool {
        let keys = (0..keys).map(|i| format!("key-{}", i)).collect();
        CredentialPool::new(keys, 5, 1000)
    }

    #[test]
    fn quota_failures_rotate_after_threshold() {
        let mut pool = pool(3);
        let err = ProviderError::QuotaExhausted("429".to_string());

        for _ in 0..4 {
            assert!(!pool.record_failure(&err));
            assert_eq!(pool.current_index(), 0);
        }
        // Fifth consecutive failure crosses the threshold.
        assert!(pool.record_failure(&err));
        assert_eq!(pool.current_index(), 1);
    }

    #[test]
    fn rotation_wraps_around() {
        let mut pool = pool(2);
        let err = ProviderError::PermissionDenied("403".to_string());

        for _ in 0..5 {
            pool.record_failure(&err);
        }
        assert_eq!(pool.current_index(), 1);

        for _ in 0..5 {
            pool.record_failure(&err);
        }
        assert_eq!(pool.current_index(), 0);
    }

    #[test]
    fn unclassified_failures_do_not_rotate() {
        let mut pool = pool(2);
        let err = ProviderError::Other("connection reset".to_string());

        for _ in 0..20 {
            assert!(!pool.record_failure(&err));
        }
        assert_eq!(pool.current_index(), 0);
        assert_eq!(pool.key_statuses()[0].errors, 0);
    }

    #[test]
    fn usage_threshold_rotates_proactively() {
        let keys = vec!["a".to_string(), "b".to_string()];
        let mut pool = CredentialPool::new(keys, 5, 3);

        assert_eq!(pool.begin_request(), "a");
        assert_eq!(pool.begin_request(), "a");
        // Third request hits the limit and hands out the next key.
        assert_eq!(pool.begin_request(), "b");
        assert_eq!(pool.current_index(), 1);
    }

    #[test]
    fn counters_are_monotonic_and_reported() {
        let mut pool = pool(2);
        pool.begin_request();
        pool.begin_request();
        pool.record_failure(&ProviderError::QuotaExhausted("q".to_string()));

        let statuses = pool.key_statuses();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].usage, 2);
        assert_eq!(statuses[0].errors, 1);
        assert_eq!(statuses[1].usage, 0);
    }

    #[test]
    fn empty_key_list_still_has_a_cursor() {
        let pool = CredentialPool::new(Vec::new(), 5, 1000);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.current_index(), 0);
    }

    #[test]
    fn status_classification() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            ProviderError::QuotaExhausted(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, String::new()),
            ProviderError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, String::new()),
            ProviderError::InvalidCredential(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            ProviderError::Other(_)
        ));
    }
}
