//! Wire schemas shared between scicityd and scicityctl.
//!
//! All endpoints speak JSON. Session identity travels as an explicit
//! server-issued uuid token in request/response bodies rather than an
//! ambient cookie, so clients (and tests) can hold several independent
//! conversations against one daemon.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a conversation currently sits in the guided dialogue.
///
/// The planning flow is a sub-loop: after a plan is produced the session
/// returns to `MainMenu`, there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Welcome,
    MainMenu,
    AskingInterests,
    AskingTime,
    AskingStartTime,
    AskingKids,
    AskingMeals,
}

impl ConversationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Welcome => "welcome",
            ConversationState::MainMenu => "main_menu",
            ConversationState::AskingInterests => "asking_interests",
            ConversationState::AskingTime => "asking_time",
            ConversationState::AskingStartTime => "asking_start_time",
            ConversationState::AskingKids => "asking_kids",
            ConversationState::AskingMeals => "asking_meals",
        }
    }
}

/// Body for `POST /ask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
    /// Absent on first contact; the daemon issues a token and echoes it.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

/// Answer plus conversation position, returned by `/ask` and `/plan_trip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub state: ConversationState,
    pub session_id: Uuid,
}

/// Body for `POST /plan_trip` and `POST /reset`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

/// Returned by `POST /reset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub status: String,
    pub state: ConversationState,
    pub session_id: Uuid,
}

/// Structured user-input error, e.g. an empty question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Per-credential accounting, reported by `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyStatus {
    pub index: usize,
    pub usage: u64,
    pub errors: u64,
}

/// Service and credential health, returned by `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub current_key_index: usize,
    pub total_keys: usize,
    pub keys: Vec<KeyStatus>,
    pub active_sessions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_state_serializes_snake_case() {
        let json = serde_json::to_string(&ConversationState::AskingStartTime).unwrap();
        assert_eq!(json, "\"asking_start_time\"");

        let state: ConversationState = serde_json::from_str("\"main_menu\"").unwrap();
        assert_eq!(state, ConversationState::MainMenu);
    }

    #[test]
    fn ask_request_tolerates_missing_fields() {
        let req: AskRequest = serde_json::from_str("{}").unwrap();
        assert!(req.question.is_empty());
        assert!(req.session_id.is_none());
    }

    #[test]
    fn as_str_matches_wire_form() {
        for state in [
            ConversationState::Welcome,
            ConversationState::MainMenu,
            ConversationState::AskingInterests,
            ConversationState::AskingTime,
            ConversationState::AskingStartTime,
            ConversationState::AskingKids,
            ConversationState::AskingMeals,
        ] {
            let wire = serde_json::to_string(&state).unwrap();
            assert_eq!(wire, format!("\"{}\"", state.as_str()));
        }
    }
}
