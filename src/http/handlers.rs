use super::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use serde::Serialize;
use tracing::{debug, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub presence: bool,
    pub presence_message: String,
}

/// Query string as ordered pairs; the first occurrence of a key wins
type QueryPairs = Vec<(String, String)>;

fn first_value<'a>(pairs: &'a QueryPairs, key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Render the available page (with the meeting link) or the away page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let presence = state.presence.snapshot().await;

    if presence.present {
        Html(state.templates.available.render(&state.meeting_url))
    } else {
        Html(state.templates.away.render(&presence.message))
    }
}

/// GET /dashboard/state
pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let presence = state.presence.snapshot().await;

    Json(StateResponse {
        presence: presence.present,
        presence_message: presence.message,
    })
}

/// GET /dashboard/presence?presence=true
/// `true` is a heartbeat; any other value or no value marks the meeting away
pub async fn set_presence(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> impl IntoResponse {
    let present = first_value(&query, "presence") == Some("true");

    let was_present = state.presence.set_present(present).await;

    if present != was_present {
        info!("Presence changed: {}", present);
    } else {
        debug!("Presence heartbeat: {}", present);
    }

    (StatusCode::OK, format!("Present: {}", present))
}

/// GET /dashboard/awayreason?awayreason=...
/// Absent or empty value clears the reason
pub async fn set_away_reason(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> StatusCode {
    let reason = first_value(&query, "awayreason").unwrap_or_default();

    debug!("Away reason set to {:?}", reason);
    state.presence.set_message(reason).await;

    StatusCode::OK
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
