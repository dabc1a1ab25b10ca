use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::warn;

use fleetcmd_model::TargetId;

const DEFAULT_MAX_IN_FLIGHT: usize = 32;
const DEFAULT_PACE_MS: u64 = 200;

/// Admission settings for a batch dispatch.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum number of targets in flight at once.
    pub max_in_flight: usize,
    /// Pause held inside the admission slot after each target finishes,
    /// rate-limiting dispatch against the remote API.
    pub pace: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            pace: Duration::from_millis(DEFAULT_PACE_MS),
        }
    }
}

/// Fans per-target work out under a global admission cap.
pub struct Dispatcher {
    slots: Arc<Semaphore>,
    pace: Duration,
}

impl Dispatcher {
    pub fn new(cfg: DispatchConfig) -> Self {
        // a zero cap would never admit anything
        let capacity = cfg.max_in_flight.max(1);
        Self {
            slots: Arc::new(Semaphore::new(capacity)),
            pace: cfg.pace,
        }
    }

    /// Admission slots currently free.
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Run `work` once per target, at most `max_in_flight` at a time.
    ///
    /// Each run holds its admission slot until the work finishes and the
    /// pacing pause elapses; the slot is released on every exit path,
    /// including a panic inside `work`. Returns once every launched run has
    /// completed. Completion means "all attempts finished": outcomes are
    /// not aggregated, and completion order is arbitrary.
    pub async fn run_all<F, Fut>(&self, targets: Vec<TargetId>, work: F)
    where
        F: Fn(TargetId) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut running: Vec<(TargetId, JoinHandle<()>)> = Vec::with_capacity(targets.len());

        for target in targets {
            let slot = match Arc::clone(&self.slots).acquire_owned().await {
                Ok(slot) => slot,
                // the semaphore is never closed; stop admitting if it somehow is
                Err(_) => break,
            };

            let pace = self.pace;
            let run = work(target.clone());
            let handle = tokio::spawn(async move {
                let _slot = slot;
                run.await;
                // still inside the slot window: pace the next admission
                tokio::time::sleep(pace).await;
            });
            running.push((target, handle));
        }

        for (target, handle) in running {
            if handle.await.is_err() {
                warn!(host = %target, "target run aborted");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
