//! Page capability trait and the DOM contract with the site.

use async_trait::async_trait;

use crate::error::PageError;

/// Structural markers on the game page. These belong to the site and may
/// change shape; absence of any of them is normal flow, not an error.
pub mod selectors {
    /// Analysis toggle in the tools pane.
    pub const ANALYSIS_TOGGLE: &str = ".computer-analysis";
    /// Evaluation gauge next to the board; its presence marks an analysed game.
    pub const EVAL_GAUGE: &str = ".eval-gauge";
    /// The "request computer analysis" button.
    pub const REQUEST_BUTTON: &str = "button.computer-analysis";
    /// Toggle that opens the collapsed analysis menu.
    pub const MENU_TOGGLE: &str = "button.fbt.analysis-menu";
}

/// Operations the orchestrator needs from a game page.
///
/// Implemented by [`crate::CdpPage`] for a live tab and by a fake in tests.
#[async_trait]
pub trait GamePage: Send + Sync {
    /// Current location path (e.g. `/abcd1234/white`).
    async fn current_path(&self) -> Result<String, PageError>;

    /// Whether any element matches the selector.
    async fn has(&self, selector: &str) -> Result<bool, PageError>;

    /// Click the first element matching the selector. Returns `false` if
    /// the element disappeared between probe and click.
    async fn click(&self, selector: &str) -> Result<bool, PageError>;

    /// Dispatch a synthetic key press to the page.
    async fn press_key(&self, key: &str) -> Result<(), PageError>;

    /// Show the transient success banner.
    async fn show_banner(&self, text: &str) -> Result<(), PageError>;

    /// Reload the page.
    async fn reload(&self) -> Result<(), PageError>;
}
