//! [`GamePage`] backed by a live CDP page session.

use std::sync::Arc;

use async_trait::async_trait;
use kibitz_cdp::{CdpError, PageSession};

use crate::error::PageError;
use crate::notify::banner_script;
use crate::page::GamePage;

impl From<CdpError> for PageError {
    fn from(e: CdpError) -> Self {
        PageError::Backend(e.to_string())
    }
}

/// Live game page in an attached browser tab.
pub struct CdpPage {
    session: Arc<PageSession>,
}

impl CdpPage {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl GamePage for CdpPage {
    async fn current_path(&self) -> Result<String, PageError> {
        let value = self.session.evaluate("window.location.pathname").await?;
        Ok(value.as_str().unwrap_or("").to_string())
    }

    async fn has(&self, selector: &str) -> Result<bool, PageError> {
        Ok(self.session.has_selector(selector).await?)
    }

    async fn click(&self, selector: &str) -> Result<bool, PageError> {
        Ok(self.session.click_selector(selector).await?)
    }

    async fn press_key(&self, key: &str) -> Result<(), PageError> {
        Ok(self.session.press_key(key).await?)
    }

    async fn show_banner(&self, text: &str) -> Result<(), PageError> {
        self.session.evaluate(&banner_script(text)).await?;
        Ok(())
    }

    async fn reload(&self) -> Result<(), PageError> {
        Ok(self.session.reload().await?)
    }
}
