use super::state::PresenceStore;
use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Message set on the away page when presence expires
pub const DEFAULT_TIMEOUT_MESSAGE: &str = "Session timed out.";

/// Expiry watchdog settings, fixed for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchdogConfig {
    /// Time between ticks
    pub interval: Duration,

    /// Ticks without a heartbeat before presence expires
    pub threshold: u32,

    /// Away message set on expiry
    pub timeout_message: String,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            threshold: 3,
            timeout_message: DEFAULT_TIMEOUT_MESSAGE.to_string(),
        }
    }
}

impl WatchdogConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.interval.is_zero(), "watchdog interval must be positive");
        ensure!(self.threshold >= 1, "watchdog threshold must be at least 1");
        Ok(())
    }
}

/// Result of a single watchdog tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Presence is away; nothing to count
    Idle,

    /// Heartbeat missed but threshold not reached yet
    Pending { fail_count: u32, threshold: u32 },

    /// Threshold reached; presence flipped to away
    Expired {
        last_heartbeat: Option<DateTime<Utc>>,
    },
}

/// Background task that expires presence after missed heartbeats
pub struct Watchdog {
    store: PresenceStore,
    config: WatchdogConfig,
}

impl Watchdog {
    pub fn new(store: PresenceStore, config: WatchdogConfig) -> Self {
        Self { store, config }
    }

    /// Spawn the ticker. It runs until `shutdown` changes or its sender is dropped.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            info!(
                "Presence watchdog started (interval={}s, threshold={})",
                self.config.interval.as_secs(),
                self.config.threshold
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.tick().await;
                    }
                    _ = shutdown.changed() => {
                        info!("Presence watchdog stopped");
                        return;
                    }
                }
            }
        })
    }

    async fn tick(&self) -> TickOutcome {
        let outcome = self.store.tick(&self.config).await;
        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Pending {
                fail_count,
                threshold,
            } => {
                warn!(
                    "Failed to receive heartbeat in allotted time: {}/{}",
                    fail_count, threshold
                );
            }
            TickOutcome::Expired { last_heartbeat } => match last_heartbeat {
                Some(at) => info!("Marking as away (last heartbeat at {})", at.to_rfc3339()),
                None => info!("Marking as away (no heartbeat received)"),
            },
        }
        outcome
    }
}
