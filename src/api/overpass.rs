use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::Deserialize;
use std::time::Duration;

use super::http_client;
use crate::domain::RawRecord;

/// `amenity` values accepted in strict mode
pub const STRICT_AMENITIES: &[&str] = &[
    "school",
    "college",
    "university",
    "kindergarten",
    "library",
    "research",
];
/// `building` values accepted in strict mode
pub const STRICT_BUILDINGS: &[&str] = &["school", "college", "university"];
/// `office` values accepted in both modes
pub const EDUCATION_OFFICES: &[&str] = &["education", "training"];

const LOOSE_AMENITIES: &[&str] = &[
    "school",
    "college",
    "university",
    "kindergarten",
    "training",
    "research",
    "library",
];
const LOOSE_BUILDINGS: &[&str] = &["school", "college", "university", "training"];
const LOOSE_NAME_KEYWORDS: &[&str] = &[
    "Institute",
    "Academy",
    "Center",
    "Centre",
    "Training",
    "College",
    "University",
    "School",
];

const ELEMENT_KINDS: [&str; 3] = ["node", "way", "relation"];

/// Query and filter breadth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Only explicit institution tags
    #[default]
    Strict,
    /// Wider tag lists plus name keywords
    Loose,
}

/// Raw Overpass API response
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<RawRecord>,
}

/// Build an Overpass QL query for institutions around a point.
///
/// Each tag filter is applied to nodes, ways and relations. The output
/// clause asks for centroids so ways and relations carry coordinates.
pub fn build_query(lat: f64, lon: f64, radius_m: u32, mode: SearchMode) -> String {
    let mut filters: Vec<(&str, String)> = Vec::new();

    match mode {
        SearchMode::Strict => {
            filters.push(("amenity", STRICT_AMENITIES.join("|")));
            filters.push(("building", STRICT_BUILDINGS.join("|")));
            filters.push(("office", EDUCATION_OFFICES.join("|")));
        }
        SearchMode::Loose => {
            filters.push(("amenity", LOOSE_AMENITIES.join("|")));
            filters.push(("building", LOOSE_BUILDINGS.join("|")));
            filters.push(("office", EDUCATION_OFFICES.join("|")));
            filters.push(("name", LOOSE_NAME_KEYWORDS.join("|")));
        }
    }

    let mut query = String::from("[out:json][timeout:45];(");
    for (key, pattern) in &filters {
        for kind in ELEMENT_KINDS {
            query.push_str(&format!(
                "{kind}[\"{key}\"~\"{pattern}\"](around:{radius_m},{lat},{lon});"
            ));
        }
    }
    query.push_str(");out center tags;");
    query
}

/// POST a query to the Overpass interpreter and return its raw elements
pub fn fetch_elements(
    url: &str,
    query: &str,
    user_agent: &str,
    timeout: Duration,
) -> Result<Vec<RawRecord>> {
    let client = http_client(user_agent, timeout).context("Failed to create HTTP client")?;

    tracing::debug!(url, bytes = query.len(), "posting Overpass query");

    // Overpass expects the query as form field `data`
    let response = client
        .post(url)
        .form(&[("data", query)])
        .send()
        .context("Failed to send request to Overpass API")?;

    if !response.status().is_success() {
        bail!("Overpass API returned error status: {}", response.status());
    }

    let result: OverpassResponse = response
        .json()
        .context("Failed to parse Overpass JSON response")?;

    Ok(result.elements)
}
