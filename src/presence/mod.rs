//! Presence tracking
//!
//! This module holds the shared presence state and the expiry watchdog:
//! - `PresenceStore` - lock-guarded state read and written by HTTP handlers
//! - `Watchdog` - periodic task that flips presence to away after missed heartbeats

mod state;
mod watchdog;

pub use state::{PresenceState, PresenceStore};
pub use watchdog::{TickOutcome, Watchdog, WatchdogConfig, DEFAULT_TIMEOUT_MESSAGE};
