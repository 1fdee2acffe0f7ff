//! # Kibitz Core
//!
//! The analysis trigger orchestrator. Given a chess game page, Kibitz tries
//! a short chain of strategies to reach the "analysis available" state:
//! click the request button directly, open the analysis menu first, or fall
//! back to the site's keyboard shortcut — each attempt verified against the
//! page and bounded by a retry ceiling. If a direct click does not take, a
//! credentialed POST to the site's analysis endpoint is the last resort.
//!
//! The page is reached through the [`GamePage`] trait, the fallback request
//! through [`AnalysisBackend`], so the whole chain runs against fakes in
//! tests. Navigation is observed by [`NavWatcher`], which owns the
//! last-known location and bumps a generation counter on every change;
//! every delay in a running chain re-checks the generation afterwards, so
//! work scheduled before a navigation goes inert instead of poking at the
//! wrong page.

mod cdp_page;
mod context;
mod driver;
mod error;
mod fallback;
mod notify;
mod orchestrator;
mod page;
mod watcher;

#[cfg(test)]
pub(crate) mod testing;

pub use cdp_page::CdpPage;
pub use context::game_path;
pub use driver::{Driver, PreferenceSource};
pub use error::{FallbackError, PageError};
pub use fallback::{AnalysisBackend, HttpAnalysisBackend};
pub use notify::{BANNER_LIFETIME_MS, BANNER_TEXT, banner_script};
pub use orchestrator::{
    ChainOutcome, CycleOutcome, MAX_RETRIES, Orchestrator, is_activated,
};
pub use page::{GamePage, selectors};
pub use watcher::{NavEvent, NavWatcher, POLL_INTERVAL};
