//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::{Cache, ExpiringCache};

// == Sweep Handle ==
/// Owns a running sweep task.
///
/// Dropping the handle signals the task to stop; [`SweepHandle::shutdown`]
/// additionally waits for it to finish.
#[derive(Debug)]
pub struct SweepHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

impl SweepHandle {
    /// Signals the task to stop without waiting for it.
    pub fn stop(mut self) {
        self.signal();
    }

    /// Signals the task to stop and waits until it has exited.
    pub async fn shutdown(mut self) {
        self.signal();
        let join = &mut self.join;
        if let Err(err) = join.await {
            warn!("Sweep task ended abnormally: {}", err);
        }
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    fn signal(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        self.signal();
    }
}

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The first sweep runs one `period` after spawning. The task holds only a
/// weak reference, so it also exits once every strong reference to the
/// cache is gone. Must be called from within a tokio runtime.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(ExpiringCache::<String>::new());
/// let sweeper = spawn_sweep_task(&cache, Duration::from_secs(60));
/// // Later, during shutdown:
/// sweeper.shutdown().await;
/// ```
pub fn spawn_sweep_task<V>(cache: &Arc<ExpiringCache<V>>, period: Duration) -> SweepHandle
where
    V: Clone + Send + Sync + 'static,
{
    let cache: Weak<ExpiringCache<V>> = Arc::downgrade(cache);
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let join = tokio::spawn(async move {
        info!("Starting expiry sweep task with interval of {:?}", period);

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut stop_rx => {
                    info!("Expiry sweep task stopped");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let Some(cache) = cache.upgrade() else {
                debug!("Cache dropped, ending expiry sweep task");
                break;
            };

            let removed = cache.remove_expired_entries();
            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    });

    SweepHandle {
        stop_tx: Some(stop_tx),
        join,
    }
}
