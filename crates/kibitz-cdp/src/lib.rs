//! Minimal Chrome DevTools Protocol client for Kibitz.
//!
//! Connects to an already-running Chrome/Chromium over its remote debugging
//! port and exposes just the page operations the analysis orchestrator needs:
//! selector presence checks, element clicks, synthetic key input, the current
//! location, and reloads.
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │     kibitz      │ ◄──────────────► │  Chrome/Chromium │
//! │  (this crate)   │       CDP        │ (user's browser) │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! Start the browser with `--remote-debugging-port=9222` so existing logins
//! (and with them the site session cookies) stay available.

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::{BrowserVersion, PageInfo};
pub use session::PageSession;
