pub mod config;
pub mod http;
pub mod presence;
pub mod templates;

pub use config::Config;
pub use http::{create_router, AppState, StateResponse};
pub use presence::{PresenceState, PresenceStore, TickOutcome, Watchdog, WatchdogConfig};
pub use templates::{Template, TemplateError, Templates};
