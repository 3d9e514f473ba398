//! Background eviction sweep.
//!
//! Runs on its own timer, decoupled from request handling, and talks to
//! the handlers only through the shared store. Failures stay inside the
//! task; there is no caller to surface them to.

use parlor_core::Registry;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::debug;

/// Spawn the periodic sweep task.
pub fn spawn(registry: Registry, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        // The first tick fires immediately; skip it.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let evicted = registry.sweep().await;
            for _ in &evicted {
                crate::metrics::record_eviction();
            }
            if !evicted.is_empty() {
                debug!(count = evicted.len(), "Sweeper evicted stale participants");
            }
        }
    })
}
