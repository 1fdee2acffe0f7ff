//! Hand-rolled fakes shared by the core tests.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{FallbackError, PageError};
use crate::fallback::AnalysisBackend;
use crate::page::GamePage;

/// Every page mutation a test run performed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Click(String),
    Key(String),
    Banner,
    Reload,
}

/// In-memory page: a set of present selectors plus reveal rules that
/// simulate the site reacting to clicks and key presses.
pub(crate) struct FakePage {
    path: Mutex<String>,
    present: Mutex<HashSet<&'static str>>,
    actions: Mutex<Vec<Action>>,
    /// (clicked, revealed): clicking the first makes the second present.
    reveal_on_click: Mutex<Vec<(&'static str, &'static str)>>,
    /// Selector that becomes present after any key press.
    reveal_on_key: Mutex<Option<&'static str>>,
}

impl FakePage {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            path: Mutex::new(path.to_string()),
            present: Mutex::new(HashSet::new()),
            actions: Mutex::new(Vec::new()),
            reveal_on_click: Mutex::new(Vec::new()),
            reveal_on_key: Mutex::new(None),
        }
    }

    pub(crate) fn add(&self, selector: &'static str) {
        self.present.lock().insert(selector);
    }

    pub(crate) fn set_path(&self, path: &str) {
        *self.path.lock() = path.to_string();
    }

    pub(crate) fn reveal_on_click(&self, clicked: &'static str, revealed: &'static str) {
        self.reveal_on_click.lock().push((clicked, revealed));
    }

    pub(crate) fn reveal_on_key(&self, revealed: &'static str) {
        *self.reveal_on_key.lock() = Some(revealed);
    }

    pub(crate) fn actions(&self) -> Vec<Action> {
        self.actions.lock().clone()
    }

    pub(crate) fn clicks_of(&self, selector: &str) -> usize {
        self.actions
            .lock()
            .iter()
            .filter(|a| matches!(a, Action::Click(s) if s.as_str() == selector))
            .count()
    }

    pub(crate) fn count_of(&self, action: &Action) -> usize {
        self.actions.lock().iter().filter(|a| a == &action).count()
    }
}

#[async_trait]
impl GamePage for FakePage {
    async fn current_path(&self) -> Result<String, PageError> {
        Ok(self.path.lock().clone())
    }

    async fn has(&self, selector: &str) -> Result<bool, PageError> {
        Ok(self.present.lock().contains(selector))
    }

    async fn click(&self, selector: &str) -> Result<bool, PageError> {
        self.actions.lock().push(Action::Click(selector.to_string()));
        let present = self.present.lock().contains(selector);
        if present {
            for (clicked, revealed) in self.reveal_on_click.lock().iter() {
                if *clicked == selector {
                    self.present.lock().insert(revealed);
                }
            }
        }
        Ok(present)
    }

    async fn press_key(&self, key: &str) -> Result<(), PageError> {
        self.actions.lock().push(Action::Key(key.to_string()));
        if let Some(revealed) = *self.reveal_on_key.lock() {
            self.present.lock().insert(revealed);
        }
        Ok(())
    }

    async fn show_banner(&self, _text: &str) -> Result<(), PageError> {
        self.actions.lock().push(Action::Banner);
        Ok(())
    }

    async fn reload(&self) -> Result<(), PageError> {
        self.actions.lock().push(Action::Reload);
        Ok(())
    }
}

/// Backend fake recording requested game ids.
pub(crate) struct FakeBackend {
    pub(crate) calls: Mutex<Vec<String>>,
    succeed: bool,
}

impl FakeBackend {
    pub(crate) fn succeeding() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            succeed: true,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            succeed: false,
        }
    }
}

#[async_trait]
impl AnalysisBackend for FakeBackend {
    async fn request_analysis(&self, game_id: &str) -> Result<(), FallbackError> {
        self.calls.lock().push(game_id.to_string());
        if self.succeed {
            Ok(())
        } else {
            Err(FallbackError::Rejected {
                status: reqwest::StatusCode::NOT_FOUND,
            })
        }
    }
}
