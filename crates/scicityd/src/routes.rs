//! API routes for scicityd.
//!
//! JSON in/out. Empty questions are rejected before they reach the
//! conversation machine; provider failures never surface as HTTP errors
//! because the gateway absorbs them into fallback text.

use crate::conversation::{frame_plan, Framing, Session, TurnOutcome};
use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use scicity_common::rpc::{
    AskRequest, AskResponse, ErrorResponse, ResetResponse, SessionRequest, StatusResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

type AppStateArc = Arc<AppState>;

const CHAT_PAGE: &str = include_str!("../assets/chat.html");

// ============================================================================
// Page Routes
// ============================================================================

#[derive(Debug, Deserialize)]
struct PageQuery {
    session_id: Option<Uuid>,
}

pub fn page_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(index))
}

/// Serve the chat page. A returning visitor's token in the query string
/// resets that conversation to `Welcome`, matching a fresh page load.
async fn index(State(state): State<AppStateArc>, Query(query): Query<PageQuery>) -> Html<&'static str> {
    if let Some(id) = query.session_id {
        state.sessions.save(id, Session::new()).await;
    }
    Html(CHAT_PAGE)
}

// ============================================================================
// Chat Routes
// ============================================================================

pub fn chat_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/ask", post(ask))
        .route("/plan_trip", post(plan_trip))
        .route("/reset", post(reset))
}

async fn ask(
    State(state): State<AppStateArc>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ErrorResponse>)> {
    if req.question.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No question provided".to_string(),
            }),
        ));
    }

    let session_id = req.session_id.unwrap_or_else(Uuid::new_v4);
    let mut session = state.sessions.load(session_id).await;
    info!("[{}] question in state {}", session_id, session.state.as_str());

    let answer = match session.advance(&req.question, &state.venue) {
        TurnOutcome::Reply(text) => text,
        TurnOutcome::Generate { prompt, framing } => {
            let completion = state.gateway.complete(&prompt).await;
            match framing {
                Framing::Answer => completion,
                Framing::Plan => frame_plan(&completion),
            }
        }
    };

    let current = session.state;
    state.sessions.save(session_id, session).await;

    Ok(Json(AskResponse {
        answer,
        state: current,
        session_id,
    }))
}

/// Force the session into the planning dialogue, bypassing the main menu.
async fn plan_trip(
    State(state): State<AppStateArc>,
    Json(req): Json<SessionRequest>,
) -> Json<AskResponse> {
    let session_id = req.session_id.unwrap_or_else(Uuid::new_v4);
    let mut session = state.sessions.load(session_id).await;
    let first_question = session.start_planning();

    let current = session.state;
    state.sessions.save(session_id, session).await;
    info!("[{}] planning started", session_id);

    Json(AskResponse {
        answer: first_question,
        state: current,
        session_id,
    })
}

async fn reset(
    State(state): State<AppStateArc>,
    Json(req): Json<SessionRequest>,
) -> Json<ResetResponse> {
    let session_id = req.session_id.unwrap_or_else(Uuid::new_v4);
    let session = Session::new();
    let current = session.state;
    state.sessions.save(session_id, session).await;
    info!("[{}] session reset", session_id);

    Json(ResetResponse {
        status: "reset".to_string(),
        state: current,
        session_id,
    })
}

// ============================================================================
// Status Routes
// ============================================================================

pub fn status_routes() -> Router<AppStateArc> {
    Router::new().route("/status", get(status))
}

async fn status(State(state): State<AppStateArc>) -> Json<StatusResponse> {
    let (current_key_index, keys) = state.gateway.pool_snapshot().await;
    let active_sessions = state.sessions.active_count().await;

    Json(StatusResponse {
        status: "active".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        current_key_index,
        total_keys: keys.len(),
        keys,
        active_sessions,
    })
}
