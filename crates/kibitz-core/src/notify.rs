//! Success banner injected into the page.

/// Fixed success message. There is no error variant.
pub const BANNER_TEXT: &str = "✓ Computer analysis requested!";

/// How long the banner stays up before removing itself.
pub const BANNER_LIFETIME_MS: u64 = 3000;

/// Build the script that inserts a self-dismissing banner.
///
/// The removal timer lives in the page, so the banner disappears on
/// schedule even if Kibitz detaches right after showing it.
pub fn banner_script(text: &str) -> String {
    let quoted = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "(() => {{\
         const n = document.createElement('div');\
         n.style.cssText = 'position: fixed; top: 20px; right: 20px; \
         background: #759900; color: white; padding: 15px 20px; \
         border-radius: 5px; z-index: 10000; font-family: sans-serif; \
         box-shadow: 0 4px 6px rgba(0,0,0,0.2);';\
         n.textContent = {quoted};\
         document.body.appendChild(n);\
         setTimeout(() => n.remove(), {BANNER_LIFETIME_MS});\
         }})()"
    )
}
