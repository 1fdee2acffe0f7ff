//! The trigger orchestrator: one cycle per navigation, a bounded strategy
//! chain per cycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::context::game_path;
use crate::error::PageError;
use crate::fallback::AnalysisBackend;
use crate::notify::BANNER_TEXT;
use crate::page::{GamePage, selectors};

/// Settle time after a navigation before probing the page.
pub const SETTLE_DELAY: Duration = Duration::from_millis(2000);
/// Delay between retried attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(1000);
/// Delay before verifying that a direct click took effect.
pub const VERIFY_DELAY: Duration = Duration::from_millis(1500);
/// Delay before reloading after a successful API request.
pub const RELOAD_DELAY: Duration = Duration::from_millis(2000);
/// Retry ceiling for the menu and keyboard strategies.
pub const MAX_RETRIES: u32 = 5;
/// Site keyboard shortcut that toggles analysis.
pub const SHORTCUT_KEY: &str = "a";

/// Outcome of one navigation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A newer navigation superseded this cycle.
    Stale,
    /// Location does not denote a game page.
    NotGamePage,
    /// The game already has analysis.
    AlreadyActivated,
    /// Auto-trigger is switched off.
    Disabled,
    /// The chain claimed an action (click verified or fallback dispatched).
    Requested,
    /// Every strategy ran out without effect.
    Exhausted,
}

/// Outcome of one strategy chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOutcome {
    Triggered,
    Exhausted,
    Stale,
}

/// Explicit retry state for one chain. Reset per chain, never shared.
struct AttemptState {
    max: u32,
    used: u32,
}

impl AttemptState {
    fn new(max: u32) -> Self {
        Self { max, used: 0 }
    }

    fn can_retry(&self) -> bool {
        self.used < self.max
    }

    fn record_retry(&mut self) {
        self.used += 1;
    }
}

/// Whether the page is in the activated (analysis available) state.
///
/// The toggle marker is probed for diagnostics but the verdict is gated by
/// the evaluation gauge alone: a page that renders the gauge has analysis
/// even if the toggle marker drifts.
pub async fn is_activated(page: &dyn GamePage) -> Result<bool, PageError> {
    let toggle = page.has(selectors::ANALYSIS_TOGGLE).await?;
    let gauge = page.has(selectors::EVAL_GAUGE).await?;
    if gauge && !toggle {
        debug!("eval gauge present but analysis toggle marker absent");
    }
    Ok(gauge)
}

/// Drives the strategy chain against one page.
pub struct Orchestrator {
    page: Arc<dyn GamePage>,
    backend: Arc<dyn AnalysisBackend>,
    /// Current context generation, shared with the navigation watcher.
    generation: Arc<AtomicU64>,
}

impl Orchestrator {
    pub fn new(
        page: Arc<dyn GamePage>,
        backend: Arc<dyn AnalysisBackend>,
        generation: Arc<AtomicU64>,
    ) -> Self {
        Self {
            page,
            backend,
            generation,
        }
    }

    /// Run one full cycle for a navigation that happened under `generation`.
    ///
    /// Waits for the page to settle, checks qualification and activation,
    /// honors the auto-trigger preference, then runs the strategy chain.
    pub async fn run_cycle(
        &self,
        generation: u64,
        auto_trigger: bool,
    ) -> Result<CycleOutcome, PageError> {
        if !self.pause(SETTLE_DELAY, generation).await {
            return Ok(CycleOutcome::Stale);
        }

        let path = self.page.current_path().await?;
        let Some(game_id) = game_path(&path) else {
            debug!(%path, "not a game page, staying inactive");
            return Ok(CycleOutcome::NotGamePage);
        };

        if is_activated(&*self.page).await? {
            debug!(game_id, "game already has analysis");
            return Ok(CycleOutcome::AlreadyActivated);
        }

        if !auto_trigger {
            debug!(game_id, "auto-trigger disabled");
            return Ok(CycleOutcome::Disabled);
        }

        info!(game_id, "requesting analysis");
        match self.attempt_chain(game_id, generation).await? {
            ChainOutcome::Triggered => Ok(CycleOutcome::Requested),
            ChainOutcome::Exhausted => Ok(CycleOutcome::Exhausted),
            ChainOutcome::Stale => Ok(CycleOutcome::Stale),
        }
    }

    /// The strategy chain. Strategies are evaluated in strict priority
    /// order and at most one acts per iteration; retried iterations are
    /// bounded by [`MAX_RETRIES`], so the chain always terminates.
    pub async fn attempt_chain(
        &self,
        game_id: &str,
        generation: u64,
    ) -> Result<ChainOutcome, PageError> {
        let mut state = AttemptState::new(MAX_RETRIES);

        loop {
            debug!(
                attempt = state.used + 1,
                max = state.max,
                "attempting to trigger analysis"
            );

            // Strategy 1: the request button itself.
            if self.page.has(selectors::REQUEST_BUTTON).await?
                && !is_activated(&*self.page).await?
            {
                if !self.page.click(selectors::REQUEST_BUTTON).await? {
                    debug!("request button vanished before click");
                }
                if !self.pause(VERIFY_DELAY, generation).await {
                    return Ok(ChainOutcome::Stale);
                }
                if is_activated(&*self.page).await? {
                    info!("analysis requested via request button");
                    self.page.show_banner(BANNER_TEXT).await?;
                    return Ok(ChainOutcome::Triggered);
                }
                info!("click not confirmed, trying direct API request");
                return Ok(self.request_via_api(game_id, generation).await);
            }

            // Strategy 2: the button may be hidden in a collapsed menu.
            if self.page.has(selectors::MENU_TOGGLE).await? && state.can_retry() {
                info!("opening analysis menu");
                self.page.click(selectors::MENU_TOGGLE).await?;
                if !self.pause(RETRY_DELAY, generation).await {
                    return Ok(ChainOutcome::Stale);
                }
                state.record_retry();
                continue;
            }

            // Strategy 3: the site keyboard shortcut.
            if state.can_retry() {
                debug!("trying keyboard shortcut");
                self.page.press_key(SHORTCUT_KEY).await?;
                if !self.pause(RETRY_DELAY, generation).await {
                    return Ok(ChainOutcome::Stale);
                }
                if is_activated(&*self.page).await? {
                    info!("analysis requested via keyboard shortcut");
                    return Ok(ChainOutcome::Triggered);
                }
                state.record_retry();
                continue;
            }

            warn!(
                retries = state.used,
                "could not find a way to request analysis"
            );
            return Ok(ChainOutcome::Exhausted);
        }
    }

    /// Fire the credentialed POST fallback. Failures are logged and
    /// absorbed; this path never feeds back into the chain.
    async fn request_via_api(&self, game_id: &str, generation: u64) -> ChainOutcome {
        match self.backend.request_analysis(game_id).await {
            Ok(()) => {
                info!(game_id, "analysis requested via API");
                if let Err(e) = self.page.show_banner(BANNER_TEXT).await {
                    warn!("failed to show banner: {}", e);
                }
                if !self.pause(RELOAD_DELAY, generation).await {
                    return ChainOutcome::Stale;
                }
                if let Err(e) = self.page.reload().await {
                    warn!("reload after API request failed: {}", e);
                }
                ChainOutcome::Triggered
            }
            Err(e) => {
                warn!(game_id, "API analysis request failed: {}", e);
                ChainOutcome::Triggered
            }
        }
    }

    /// Sleep, then check that this cycle's generation is still current.
    /// `false` means a navigation superseded us and no further effect may
    /// be applied.
    async fn pause(&self, delay: Duration, generation: u64) -> bool {
        tokio::time::sleep(delay).await;
        self.generation.load(Ordering::SeqCst) == generation
    }
}


#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
