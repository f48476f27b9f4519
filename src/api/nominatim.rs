use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use super::http_client;
use crate::error::LocateError;

const SERVICE: &str = "Nominatim";

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Geocode free text to latitude/longitude coordinates.
///
/// Issues a single `search` request with `limit=1` and takes the first hit.
/// A contact email, when known, is sent as the `email` parameter as the
/// Nominatim usage policy asks.
///
/// # Returns
/// * `Ok((lat, lon))` - Coordinates of the first result
/// * `Err(LocateError::NotFound)` - No result for `query`
/// * `Err(LocateError::Forbidden)` - The provider rejected the client (HTTP 403)
pub fn geocode(
    url: &str,
    query: &str,
    email: Option<&str>,
    user_agent: &str,
    timeout: Duration,
) -> Result<(f64, f64), LocateError> {
    let client = http_client(user_agent, timeout).map_err(|source| LocateError::Transport {
        service: SERVICE,
        source,
    })?;

    let mut params = vec![("q", query), ("format", "json"), ("limit", "1")];
    if let Some(email) = email {
        params.push(("email", email));
    }

    tracing::debug!(url, query, "geocoding via Nominatim");

    let response = client
        .get(url)
        .query(&params)
        .send()
        .map_err(|source| LocateError::Transport {
            service: SERVICE,
            source,
        })?;

    check_status(response.status())?;

    let results: Vec<NominatimResult> = response.json().map_err(|e| LocateError::Decode {
        service: SERVICE,
        detail: e.to_string(),
    })?;

    first_coordinates(results, query)
}

fn check_status(status: StatusCode) -> Result<(), LocateError> {
    if status == StatusCode::FORBIDDEN {
        return Err(LocateError::Forbidden);
    }
    if !status.is_success() {
        return Err(LocateError::Status {
            service: SERVICE,
            status,
        });
    }
    Ok(())
}

fn first_coordinates(results: Vec<NominatimResult>, query: &str) -> Result<(f64, f64), LocateError> {
    let result = results
        .into_iter()
        .next()
        .ok_or_else(|| LocateError::NotFound(query.to_string()))?;

    if let Some(name) = &result.display_name {
        tracing::debug!(name, "Nominatim match");
    }

    let parse = |v: &str, what: &str| {
        v.trim().parse::<f64>().map_err(|e| LocateError::Decode {
            service: SERVICE,
            detail: format!("invalid {} {:?}: {}", what, v, e),
        })
    };

    Ok((parse(&result.lat, "latitude")?, parse(&result.lon, "longitude")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominatim_response() {
        let json = r#"[{"lat":"23.7104","lon":"90.4074","display_name":"Dhaka, Bangladesh"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();

        let (lat, lon) = first_coordinates(results, "Dhaka").unwrap();
        assert_eq!(lat, 23.7104);
        assert_eq!(lon, 90.4074);
    }

    #[test]
    fn test_empty_response_is_not_found() {
        let err = first_coordinates(Vec::new(), "Nowhere Town").unwrap_err();
        assert!(matches!(err, LocateError::NotFound(ref q) if q == "Nowhere Town"));
        assert_eq!(err.to_string(), "Location not found via Nominatim: Nowhere Town");
    }

    #[test]
    fn test_bad_coordinate_is_decode_error() {
        let results: Vec<NominatimResult> =
            serde_json::from_str(r#"[{"lat":"north","lon":"90.4"}]"#).unwrap();
        assert!(matches!(
            first_coordinates(results, "x"),
            Err(LocateError::Decode { .. })
        ));
    }

    #[test]
    fn test_status_mapping() {
        assert!(check_status(StatusCode::OK).is_ok());

        let err = check_status(StatusCode::FORBIDDEN).unwrap_err();
        assert!(matches!(err, LocateError::Forbidden));
        assert!(err.to_string().contains("OSM_EMAIL"));

        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY),
            Err(LocateError::Status { status, .. }) if status == StatusCode::BAD_GATEWAY
        ));
    }
}
