use std::collections::HashSet;

use crate::api::SearchMode;
use crate::api::overpass::{EDUCATION_OFFICES, STRICT_AMENITIES, STRICT_BUILDINGS};
use crate::domain::{CanonicalRecord, RawRecord};
use crate::extract::{address_from_tags, phone_from_tags};

/// Parse raw Overpass elements into institution records
///
/// # Algorithm
/// 1. Drop repeated `(type, id)` pairs, keeping the first occurrence
/// 2. Drop elements without a non-empty `name` tag
/// 3. In strict mode, keep only elements whose `amenity`, `building` or
///    `office` tag (lower-cased) is an explicit institution value
/// 4. Take coordinates from the element, or from its centroid
///
/// Output keeps input order.
pub fn parse_elements(elements: &[RawRecord], mode: SearchMode) -> Vec<CanonicalRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for element in elements {
        let key = element.dedup_key();
        if !seen.insert(key) {
            tracing::debug!(
                osm_type = element.osm_type(),
                osm_id = ?element.osm_id(),
                "skipping duplicate element"
            );
            continue;
        }

        let name = match element.tag_text("name") {
            Some(n) => n,
            None => continue,
        };

        if mode == SearchMode::Strict && !has_institution_tag(element) {
            tracing::debug!(name, "skipping element without institution tags");
            continue;
        }

        records.push(CanonicalRecord {
            osm_type: element.osm_type().map(str::to_string),
            osm_id: element.osm_id(),
            name: name.to_string(),
            address: address_from_tags(&element.tags),
            phone: phone_from_tags(&element.tags),
            lat: element.lat(),
            lon: element.lon(),
            tags: element.tags.clone(),
        });
    }

    records
}

fn has_institution_tag(element: &RawRecord) -> bool {
    let tag_in = |key: &str, allowed: &[&str]| {
        element
            .tag(key)
            .map(str::to_lowercase)
            .is_some_and(|v| allowed.contains(&v.as_str()))
    };

    tag_in("amenity", STRICT_AMENITIES)
        || tag_in("building", STRICT_BUILDINGS)
        || tag_in("office", EDUCATION_OFFICES)
}
