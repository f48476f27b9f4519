use std::time::Duration;

use super::{ipinfo, nominatim};
use crate::config::Settings;
use crate::error::LocateError;

/// Used when no location, latitude or longitude is given at all (Dhaka)
pub const DEFAULT_CENTER: (f64, f64) = (23.6899938, 90.4256277);

/// Where the search center comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    /// `--lat` and `--lon` both given
    Explicit(f64, f64),
    /// Nothing given, use [`DEFAULT_CENTER`]
    Default,
    /// Geocode the text, or look up by IP when there is none
    Lookup(Option<String>),
}

impl Origin {
    /// Pick the origin: explicit coordinates, then the hardcoded default when
    /// nothing was given, then a lookup. `force_ip` skips the default.
    /// A blank location string looks up by IP.
    pub fn choose(
        location: Option<&str>,
        lat: Option<f64>,
        lon: Option<f64>,
        force_ip: bool,
    ) -> Self {
        match (location, lat, lon) {
            (_, Some(lat), Some(lon)) => Origin::Explicit(lat, lon),
            (None, None, None) if !force_ip => Origin::Default,
            (location, lat, lon) => {
                if lat.is_some() || lon.is_some() {
                    tracing::warn!("--lat and --lon must be given together; ignoring the lone coordinate");
                }
                let location = location.map(str::trim).filter(|l| !l.is_empty());
                Origin::Lookup(location.map(str::to_string))
            }
        }
    }
}

/// Resolves a location string, or the caller's IP, to coordinates
#[derive(Debug, Clone)]
pub struct Locator {
    pub nominatim_url: String,
    pub ip_lookup_url: String,
    pub user_agent: String,
    pub contact_email: Option<String>,
    pub geocode_timeout: Duration,
    pub ip_lookup_timeout: Duration,
}

impl Locator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            nominatim_url: settings.endpoints.nominatim.clone(),
            ip_lookup_url: settings.endpoints.ip_lookup.clone(),
            user_agent: settings.user_agent(),
            contact_email: settings.contact_email.clone(),
            geocode_timeout: Duration::from_secs(settings.timeouts.geocode_secs),
            ip_lookup_timeout: Duration::from_secs(settings.timeouts.ip_lookup_secs),
        }
    }

    /// Geocode `location` when given, otherwise fall back to IP geolocation
    pub fn resolve(&self, location: Option<&str>) -> Result<(f64, f64), LocateError> {
        match location {
            Some(text) => nominatim::geocode(
                &self.nominatim_url,
                text,
                self.contact_email.as_deref(),
                &self.user_agent,
                self.geocode_timeout,
            ),
            None => ipinfo::lookup(&self.ip_lookup_url, &self.user_agent, self.ip_lookup_timeout),
        }
    }
}
