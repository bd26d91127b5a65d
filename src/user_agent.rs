//! Shared User-Agent string for listing and download HTTP clients.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/workbook-dl";

/// Default User-Agent for every request the crate issues.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("workbook-dl/{version} (+{PROJECT_UA_URL})")
}
