//! HTTP dashboard server
//!
//! Routes:
//! - GET / - Available or away page, depending on presence
//! - GET /dashboard/state - Presence as JSON
//! - GET /dashboard/presence?presence=true - Heartbeat / presence toggle
//! - GET /dashboard/awayreason?awayreason=... - Set or clear the away reason
//! - GET /dashboard/* - Static assets
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::StateResponse;
pub use routes::create_router;
pub use state::AppState;
