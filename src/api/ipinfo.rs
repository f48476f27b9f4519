use serde::Deserialize;
use std::time::Duration;

use super::http_client;
use crate::error::LocateError;

const SERVICE: &str = "IP geolocation";

#[derive(Debug, Deserialize)]
struct IpInfo {
    #[serde(default)]
    loc: Option<String>,
}

/// Locate the caller by public IP. The service reports `"loc": "<lat>,<lon>"`.
pub fn lookup(url: &str, user_agent: &str, timeout: Duration) -> Result<(f64, f64), LocateError> {
    let client = http_client(user_agent, timeout).map_err(|source| LocateError::Transport {
        service: SERVICE,
        source,
    })?;

    tracing::debug!(url, "looking up location by IP");

    let response = client
        .get(url)
        .send()
        .map_err(|source| LocateError::Transport {
            service: SERVICE,
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LocateError::Status {
            service: SERVICE,
            status,
        });
    }

    let info: IpInfo = response.json().map_err(|e| LocateError::Decode {
        service: SERVICE,
        detail: e.to_string(),
    })?;

    parse_loc(info.loc.as_deref())
}

/// Parse a `"lat,lon"` pair. A missing or malformed value is an error.
fn parse_loc(loc: Option<&str>) -> Result<(f64, f64), LocateError> {
    let invalid = || LocateError::MissingIpLocation(loc.map(str::to_string));

    let (lat, lon) = loc.and_then(|l| l.split_once(',')).ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    Ok((lat, lon))
}
