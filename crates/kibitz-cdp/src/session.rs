//! Page session: commands scoped to one attached tab.

use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::client::Transport;
use crate::error::CdpError;
use crate::protocol::KeyEventType;

/// A session attached to a single tab.
pub struct PageSession {
    target_id: String,
    session_id: String,
    transport: Transport,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Transport) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    /// Target ID of the attached tab.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Send a CDP command to this tab.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Enable the CDP domains the session uses.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        debug!("enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        trace!("evaluate: {}", expression);
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["text"].as_str().unwrap_or("unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Whether any element matches the selector.
    pub async fn has_selector(&self, selector: &str) -> Result<bool, CdpError> {
        let expr = format!("document.querySelector({}) !== null", js_string(selector));
        let value = self.evaluate(&expr).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Click the first element matching the selector.
    ///
    /// Returns `false` if no element matched. The click goes through the
    /// element's own `.click()`, the same event path a page script would
    /// take, so hidden menu entries stay clickable.
    pub async fn click_selector(&self, selector: &str) -> Result<bool, CdpError> {
        let expr = format!(
            "(() => {{ const el = document.querySelector({}); if (!el) return false; el.click(); return true; }})()",
            js_string(selector)
        );
        let value = self.evaluate(&expr).await?;
        let clicked = value.as_bool().unwrap_or(false);
        if clicked {
            debug!("clicked {}", selector);
        }
        Ok(clicked)
    }

    /// Dispatch a key press (down then up) to the page.
    pub async fn press_key(&self, key: &str) -> Result<(), CdpError> {
        for event_type in [KeyEventType::KeyDown, KeyEventType::KeyUp] {
            self.call(
                "Input.dispatchKeyEvent",
                Some(json!({
                    "type": event_type,
                    "key": key,
                })),
            )
            .await?;
        }
        debug!("pressed key {:?}", key);
        Ok(())
    }

    /// Current location href.
    pub async fn current_url(&self) -> Result<String, CdpError> {
        let value = self.evaluate("window.location.href").await?;
        Ok(value.as_str().unwrap_or("").to_string())
    }

    /// Reload the page. Does not wait for the load to finish.
    pub async fn reload(&self) -> Result<(), CdpError> {
        self.call("Page.reload", None).await?;
        Ok(())
    }
}

/// Quote a string as a JavaScript string literal.
pub fn js_string(s: &str) -> String {
    // JSON string syntax is valid JS string syntax.
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}
