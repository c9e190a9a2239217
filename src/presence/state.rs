use super::watchdog::{TickOutcome, WatchdogConfig};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Snapshot of the dashboard presence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceState {
    /// Whether the meeting is currently available
    pub present: bool,

    /// Away reason shown on the away page (empty when unset)
    pub message: String,

    /// Consecutive watchdog ticks without a heartbeat.
    /// Only meaningful while `present` is true.
    pub fail_count: u32,

    /// When the last `presence=true` heartbeat arrived
    pub last_heartbeat: Option<DateTime<Utc>>,
}

impl PresenceState {
    /// Apply one watchdog tick to this state
    pub fn tick(&mut self, config: &WatchdogConfig) -> TickOutcome {
        if !self.present {
            return TickOutcome::Idle;
        }

        self.fail_count += 1;
        if self.fail_count < config.threshold {
            return TickOutcome::Pending {
                fail_count: self.fail_count,
                threshold: config.threshold,
            };
        }

        self.present = false;
        self.fail_count = 0;
        self.message = config.timeout_message.clone();
        TickOutcome::Expired {
            last_heartbeat: self.last_heartbeat,
        }
    }
}

/// Process-wide presence store shared by the watchdog and HTTP handlers.
///
/// Every read and write goes through the same lock, so a heartbeat and a
/// concurrent watchdog tick are always applied one after the other.
#[derive(Debug, Clone, Default)]
pub struct PresenceStore {
    inner: Arc<RwLock<PresenceState>>,
}

impl PresenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only copy of the current state
    pub async fn snapshot(&self) -> PresenceState {
        self.inner.read().await.clone()
    }

    /// Set presence. `true` counts as a heartbeat and restarts the countdown;
    /// `false` leaves the message untouched. Returns the previous flag.
    pub async fn set_present(&self, present: bool) -> bool {
        let mut state = self.inner.write().await;
        let was_present = std::mem::replace(&mut state.present, present);
        if present {
            state.fail_count = 0;
            state.last_heartbeat = Some(Utc::now());
        }
        was_present
    }

    /// Set the away reason. Empty text clears it.
    pub async fn set_message(&self, text: impl Into<String>) {
        self.inner.write().await.message = text.into();
    }

    /// Run one watchdog tick under the store lock
    pub async fn tick(&self, config: &WatchdogConfig) -> TickOutcome {
        self.inner.write().await.tick(config)
    }
}
