use crate::presence::PresenceStore;
use crate::templates::Templates;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Presence flag and away reason, shared with the watchdog
    pub presence: PresenceStore,

    /// Parsed available/away pages
    pub templates: Arc<Templates>,

    /// Meeting link rendered into the available page
    pub meeting_url: Arc<str>,

    /// Directory served under `/dashboard/`
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        presence: PresenceStore,
        templates: Templates,
        meeting_url: impl Into<Arc<str>>,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            presence,
            templates: Arc::new(templates),
            meeting_url: meeting_url.into(),
            static_dir: static_dir.into(),
        }
    }
}
