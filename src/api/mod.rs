pub mod ipinfo;
pub mod locator;
pub mod nominatim;
pub mod overpass;

pub use locator::Locator;
pub use overpass::{OverpassResponse, SearchMode, build_query, fetch_elements};

use std::time::Duration;

/// Blocking client with a fixed User-Agent and per-call timeout.
/// Every lookup builds its own client; nothing is shared between steps.
pub(crate) fn http_client(
    user_agent: &str,
    timeout: Duration,
) -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}
