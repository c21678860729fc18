//! Default Cache
//!
//! Lazily constructed process-wide cache used when no cache is supplied.
//! Only the composition root should reach for it; everything else takes a
//! cache explicitly.

use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::cache::ExpiringCache;
use crate::tasks::spawn_sweep_task;

/// Sweep period of the default cache.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

// == Default Sweeper ==
/// Sweep task running on a dedicated thread with its own runtime, so it
/// outlives whichever context first asked for the default cache.
struct DefaultSweeper {
    stop_tx: oneshot::Sender<()>,
    thread: JoinHandle<()>,
}

impl DefaultSweeper {
    fn start(cache: &Arc<ExpiringCache<String>>, period: Duration) -> std::io::Result<Self> {
        let cache: Weak<ExpiringCache<String>> = Arc::downgrade(cache);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let thread = thread::Builder::new()
            .name("otp-cache-sweep".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        warn!("Failed to build sweep runtime: {}", err);
                        return;
                    }
                };

                runtime.block_on(async move {
                    let Some(cache) = cache.upgrade() else {
                        return;
                    };
                    let sweeper = spawn_sweep_task(&cache, period);
                    drop(cache);

                    let _ = stop_rx.await;
                    sweeper.shutdown().await;
                });
            })?;

        Ok(Self { stop_tx, thread })
    }

    fn is_running(&self) -> bool {
        !self.thread.is_finished()
    }

    fn stop(self) {
        let _ = self.stop_tx.send(());
        if self.thread.join().is_err() {
            warn!("Default sweep thread panicked");
        }
    }
}

struct SharedCache {
    cache: Arc<ExpiringCache<String>>,
    sweeper: Mutex<Option<DefaultSweeper>>,
}

static DEFAULT_CACHE: OnceLock<SharedCache> = OnceLock::new();

/// Returns the default cache, creating it on first call.
///
/// Creation also starts a background sweep with [`DEFAULT_SWEEP_INTERVAL`].
/// The sweep runs on its own thread and does not require the caller to be
/// inside a tokio runtime.
pub fn default_cache() -> Arc<ExpiringCache<String>> {
    let shared = DEFAULT_CACHE.get_or_init(|| {
        let cache = Arc::new(ExpiringCache::new());

        let sweeper = match DefaultSweeper::start(&cache, DEFAULT_SWEEP_INTERVAL) {
            Ok(sweeper) => Some(sweeper),
            Err(err) => {
                warn!("Failed to start default cache sweeper: {}", err);
                None
            }
        };

        info!("Default cache initialized");
        SharedCache {
            cache,
            sweeper: Mutex::new(sweeper),
        }
    });

    Arc::clone(&shared.cache)
}

/// Returns true while the default cache's sweeper is alive.
pub fn default_sweeper_running() -> bool {
    DEFAULT_CACHE.get().is_some_and(|shared| {
        shared
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(DefaultSweeper::is_running)
    })
}

/// Stops the default cache's sweep and waits for its thread to exit.
///
/// Returns `true` if a sweeper was running.
pub fn stop_default_sweeper() -> bool {
    let Some(shared) = DEFAULT_CACHE.get() else {
        return false;
    };

    let sweeper = shared
        .sweeper
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();

    match sweeper {
        Some(sweeper) => {
            let was_running = sweeper.is_running();
            sweeper.stop();
            info!("Default cache sweeper stopped");
            was_running
        }
        None => false,
    }
}
