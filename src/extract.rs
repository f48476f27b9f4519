//! Field extraction over heterogeneous records.
//!
//! Every field resolves to a string; unknown or missing fields resolve to `""`.

use crate::domain::{RawRecord, Tags, classify};
use crate::domain::record::value_to_string;

/// Address tag parts, joined in this order
const ADDRESS_PARTS: [&str; 5] = [
    "addr:housenumber",
    "addr:street",
    "addr:city",
    "addr:postcode",
    "addr:country",
];

/// Single-value address fallbacks when no part is present
const ADDRESS_FALLBACKS: [&str; 2] = ["addr:full", "contact:address"];

const PHONE_KEYS: [&str; 3] = ["phone", "contact:phone", "telephone"];

/// A column requested from the table exporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Name,
    Address,
    Phone,
    Category,
    Lat,
    Lon,
    OsmId,
    OsmType,
    Other(String),
}

impl Field {
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "name" => Field::Name,
            "address" => Field::Address,
            "phone" => Field::Phone,
            "category" => Field::Category,
            "lat" => Field::Lat,
            "lon" => Field::Lon,
            "osm_id" => Field::OsmId,
            "osm_type" => Field::OsmType,
            other => Field::Other(other.to_string()),
        }
    }

    /// Parse a comma-separated field list, skipping blank entries
    pub fn parse_list(list: &str) -> Vec<Field> {
        list.split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(Field::parse)
            .collect()
    }

    pub fn as_str(&self) -> &str {
        match self {
            Field::Name => "name",
            Field::Address => "address",
            Field::Phone => "phone",
            Field::Category => "category",
            Field::Lat => "lat",
            Field::Lon => "lon",
            Field::OsmId => "osm_id",
            Field::OsmType => "osm_type",
            Field::Other(name) => name,
        }
    }
}

/// Resolve `field` on `record` to a display string
pub fn extract(record: &RawRecord, field: &Field) -> String {
    match field {
        Field::Name => record_name(record),
        Field::Address => record
            .text("address")
            .unwrap_or_else(|| address_from_tags(&record.tags)),
        Field::Phone => record
            .text("phone")
            .unwrap_or_else(|| phone_from_tags(&record.tags)),
        Field::Category => classify(record).to_string(),
        Field::Lat | Field::Lon | Field::OsmId | Field::OsmType => record
            .value(field.as_str())
            .map(value_to_string)
            .unwrap_or_default(),
        Field::Other(key) => record
            .text(key)
            .or_else(|| record.tag_text(key).map(str::to_string))
            .unwrap_or_default(),
    }
}

/// Top-level `name`, else `tags.name`, else empty
pub fn record_name(record: &RawRecord) -> String {
    record
        .text("name")
        .or_else(|| record.tag("name").map(str::to_string))
        .unwrap_or_default()
}

/// Build an address from `addr:*` tags.
///
/// Present parts are joined with `", "`. Without any part, `addr:full` and
/// then `contact:address` are used as-is.
pub fn address_from_tags(tags: &Tags) -> String {
    let parts: Vec<&str> = ADDRESS_PARTS
        .iter()
        .filter_map(|key| tags.get(*key))
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect();

    if !parts.is_empty() {
        return parts.join(", ");
    }

    ADDRESS_FALLBACKS
        .iter()
        .filter_map(|key| tags.get(*key))
        .find(|v| !v.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// First present phone tag. A present-but-empty tag still wins.
pub fn phone_from_tags(tags: &Tags) -> String {
    PHONE_KEYS
        .iter()
        .find_map(|key| tags.get(*key))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn record(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_address_from_parts() {
        let t = tags(&[("addr:city", "Dhaka"), ("addr:street", "Main St")]);
        assert_eq!(address_from_tags(&t), "Main St, Dhaka");

        let t = tags(&[
            ("addr:country", "BD"),
            ("addr:housenumber", "12"),
            ("addr:postcode", "1000"),
            ("addr:full", "ignored"),
        ]);
        assert_eq!(address_from_tags(&t), "12, 1000, BD");
    }

    #[test]
    fn test_address_fallbacks() {
        let t = tags(&[("addr:full", "House 5, Road 2, Dhanmondi")]);
        assert_eq!(address_from_tags(&t), "House 5, Road 2, Dhanmondi");

        let t = tags(&[("addr:full", ""), ("contact:address", "Mirpur 10")]);
        assert_eq!(address_from_tags(&t), "Mirpur 10");

        assert_eq!(address_from_tags(&Tags::new()), "");
    }

    #[test]
    fn test_phone_first_present_key() {
        let t = tags(&[("telephone", "3"), ("contact:phone", "2")]);
        assert_eq!(phone_from_tags(&t), "2");

        let t = tags(&[("phone", ""), ("contact:phone", "2")]);
        assert_eq!(phone_from_tags(&t), "");
    }

    #[test]
    fn test_top_level_fields_win() {
        let r = record(json!({
            "name": "Top",
            "address": "Top Address",
            "phone": "+880 1",
            "tags": {"name": "Tag", "addr:city": "Dhaka", "phone": "+880 2"}
        }));
        assert_eq!(extract(&r, &Field::Name), "Top");
        assert_eq!(extract(&r, &Field::Address), "Top Address");
        assert_eq!(extract(&r, &Field::Phone), "+880 1");

        let r = record(json!({"name": "", "address": "", "tags": {"name": "Tag", "addr:city": "Dhaka"}}));
        assert_eq!(extract(&r, &Field::Name), "Tag");
        assert_eq!(extract(&r, &Field::Address), "Dhaka");
        assert_eq!(extract(&r, &Field::Phone), "");
    }

    #[test]
    fn test_coordinate_and_id_fields() {
        let r = record(json!({"osm_type": "way", "osm_id": 123, "lat": 0, "lon": null}));
        assert_eq!(extract(&r, &Field::OsmType), "way");
        assert_eq!(extract(&r, &Field::OsmId), "123");
        assert_eq!(extract(&r, &Field::Lat), "0");
        assert_eq!(extract(&r, &Field::Lon), "");
    }

    #[test]
    fn test_generic_field() {
        let r = record(json!({"website": "https://a.example", "tags": {"operator": "Govt", "isced:level": ""}}));
        assert_eq!(extract(&r, &Field::parse("website")), "https://a.example");
        assert_eq!(extract(&r, &Field::parse("operator")), "Govt");
        assert_eq!(extract(&r, &Field::parse("isced:level")), "");
        assert_eq!(extract(&r, &Field::parse("nonexistent")), "");

        let r = record(json!({"capacity": 450}));
        assert_eq!(extract(&r, &Field::parse("capacity")), "450");

        let r = record(json!({"tags": {"levels": 0, "building:levels": 3}}));
        assert_eq!(extract(&r, &Field::parse("levels")), "");
        assert_eq!(extract(&r, &Field::parse("building:levels")), "3");
    }

    #[test]
    fn test_category_field() {
        let r = record(json!({"name": "Dhaka College"}));
        assert_eq!(extract(&r, &Field::Category), "college");
    }

    #[test]
    fn test_parse_list() {
        let fields = Field::parse_list(" name, address,,category ,");
        assert_eq!(fields, vec![Field::Name, Field::Address, Field::Category]);
        assert_eq!(fields[2].as_str(), "category");
        assert_eq!(Field::parse("website"), Field::Other("website".to_string()));
    }
}
