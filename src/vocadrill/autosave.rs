//! Auto-save timer: a background thread that invokes a persist callback on
//! a fixed interval. The tick is idempotent (it re-persists state that is
//! already in memory), so there is no cancellation token — just a stop flag
//! checked between short sleeps so shutdown never waits out a full
//! interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Production interval between auto-save ticks.
pub const AUTO_SAVE_INTERVAL: Duration = Duration::from_secs(30);

const POLL_SLICE: Duration = Duration::from_millis(100);

/// Handle to a running auto-save timer. Dropping the handle stops the
/// thread; at most one handle should be live per coordinator, and callers
/// must stop the old one before starting a new one.
pub struct AutoSaveHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl AutoSaveHandle {
    pub fn start<F>(interval: Duration, tick: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let thread = thread::spawn(move || {
            let mut elapsed = Duration::ZERO;
            loop {
                if stop_flag.load(Ordering::Relaxed) {
                    return;
                }
                let slice = POLL_SLICE.min(interval);
                thread::sleep(slice);
                elapsed += slice;
                if elapsed >= interval {
                    elapsed = Duration::ZERO;
                    tick();
                }
            }
        });

        Self {
            stop,
            thread: Some(thread),
        }
    }

    /// Signal the thread and wait for it to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for AutoSaveHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
