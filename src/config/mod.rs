use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::SearchMode;
use crate::export::OutputFormat;

const USER_AGENT_BASE: &str = "NearbyInstitutesScraper/1.0";
const CONTACT_ENV: &str = "OSM_EMAIL";

pub const DEFAULT_RADIUS: u32 = 2000;
pub const DEFAULT_OUTPUT: &str = "results.csv";

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}
fn default_ip_lookup_url() -> String {
    "https://ipinfo.io/json".to_string()
}
fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}
fn default_geocode_secs() -> u64 {
    15
}
fn default_ip_lookup_secs() -> u64 {
    10
}
fn default_overpass_secs() -> u64 {
    60
}

/// Settings read from `nearby-institutes.toml`. CLI flags override every field.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Settings {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub radius: Option<u32>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub mode: Option<SearchMode>,
    /// Contact address sent to Nominatim; `OSM_EMAIL` is used when unset
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub timeouts: Timeouts,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Endpoints {
    #[serde(default = "default_nominatim_url")]
    pub nominatim: String,
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup: String,
    #[serde(default = "default_overpass_url")]
    pub overpass: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            nominatim: default_nominatim_url(),
            ip_lookup: default_ip_lookup_url(),
            overpass: default_overpass_url(),
        }
    }
}

/// Per-request timeouts in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct Timeouts {
    #[serde(default = "default_geocode_secs")]
    pub geocode_secs: u64,
    #[serde(default = "default_ip_lookup_secs")]
    pub ip_lookup_secs: u64,
    #[serde(default = "default_overpass_secs")]
    pub overpass_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            geocode_secs: default_geocode_secs(),
            ip_lookup_secs: default_ip_lookup_secs(),
            overpass_secs: default_overpass_secs(),
        }
    }
}

impl Settings {
    /// Load from an explicit path, or search the usual locations.
    /// Falls back to defaults when no file is found.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let settings = match explicit {
            Some(path) => Self::from_path(path)?,
            None => Self::load().unwrap_or_default(),
        };
        Ok(settings.with_env_contact(std::env::var(CONTACT_ENV).ok()))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// First parseable config file among the search paths
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config file");
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    fn with_env_contact(mut self, env_value: Option<String>) -> Self {
        if self.contact_email.as_deref().is_none_or(str::is_empty) {
            self.contact_email = env_value.filter(|v| !v.trim().is_empty());
        }
        self
    }

    /// User-Agent identifying this tool, with the contact address when known
    pub fn user_agent(&self) -> String {
        match self.contact_email.as_deref() {
            Some(email) if !email.is_empty() => format!("{} ({})", USER_AGENT_BASE, email),
            _ => format!("{} (+https://example.com)", USER_AGENT_BASE),
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("nearby-institutes.toml"));
    paths.push(PathBuf::from(".nearby-institutes.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("nearby-institutes").join("config.toml"));
        paths.push(config_dir.join("nearby-institutes.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".nearby-institutes.toml"));
    }

    paths
}
