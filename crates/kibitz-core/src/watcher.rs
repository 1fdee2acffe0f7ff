//! Navigation watcher.
//!
//! The site is a single-page application: moving between games changes the
//! location without a full reload. The watcher polls the page's location,
//! owns the last-known value, and on every change bumps the shared context
//! generation and emits an event. Continuations scheduled under an older
//! generation see the bump and discard themselves.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::page::GamePage;

/// How often the location is polled.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// A discrete navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEvent {
    /// The new location path.
    pub path: String,
    /// Generation assigned to this navigation.
    pub generation: u64,
}

/// Polls the page location and emits [`NavEvent`]s.
pub struct NavWatcher {
    page: Arc<dyn GamePage>,
    generation: Arc<AtomicU64>,
    poll_interval: Duration,
}

impl NavWatcher {
    pub fn new(page: Arc<dyn GamePage>, generation: Arc<AtomicU64>) -> Self {
        Self {
            page,
            generation,
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Override the poll interval (tests).
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Start watching. The initial location counts as the first navigation,
    /// so a page that is already on a game gets a cycle at startup.
    pub fn spawn(self) -> (mpsc::Receiver<NavEvent>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(8);

        let handle = tokio::spawn(async move {
            let mut last: Option<String> = None;
            loop {
                match self.page.current_path().await {
                    Ok(path) => {
                        if last.as_deref() != Some(path.as_str()) {
                            let generation =
                                self.generation.fetch_add(1, Ordering::SeqCst) + 1;
                            debug!(%path, generation, "location changed");
                            last = Some(path.clone());
                            if tx.send(NavEvent { path, generation }).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        // Mid-navigation the page can be briefly unreachable.
                        trace!("location poll failed: {}", e);
                    }
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        });

        (rx, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    #[tokio::test(start_paused = true)]
    async fn test_initial_location_is_an_event() {
        let page = Arc::new(FakePage::new("/abcd1234"));
        let generation = Arc::new(AtomicU64::new(0));
        let (mut rx, handle) = NavWatcher::new(page, generation.clone()).spawn();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, "/abcd1234");
        assert_eq!(event.generation, 1);
        assert_eq!(generation.load(Ordering::SeqCst), 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_bumps_generation() {
        let page = Arc::new(FakePage::new("/abcd1234"));
        let generation = Arc::new(AtomicU64::new(0));
        let (mut rx, handle) =
            NavWatcher::new(page.clone(), generation.clone()).spawn();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.generation, 1);

        page.set_path("/wxyz9876/black");
        let second = rx.recv().await.unwrap();
        assert_eq!(second.path, "/wxyz9876/black");
        assert_eq!(second.generation, 2);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stable_location_emits_nothing_further() {
        let page = Arc::new(FakePage::new("/abcd1234"));
        let generation = Arc::new(AtomicU64::new(0));
        let (mut rx, handle) = NavWatcher::new(page, generation.clone()).spawn();

        rx.recv().await.unwrap();

        // Let several poll rounds pass; the generation must not move.
        tokio::time::sleep(POLL_INTERVAL * 5).await;
        assert_eq!(generation.load(Ordering::SeqCst), 1);
        assert!(rx.try_recv().is_err());

        handle.abort();
    }
}
