use super::record::RawRecord;
use crate::extract::record_name;
use serde::Serialize;
use std::fmt;

/// Institution category derived from tags and name keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    School,
    College,
    Madrasa,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::School => "school",
            Category::College => "college",
            Category::Madrasa => "madrasa",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latin and Bangla spellings of "madrasa"
const MADRASA_KEYWORDS: &[&str] = &[
    "madrasa",
    "madrash",
    "\u{09AE}\u{09BE}\u{09A6}\u{09CD}\u{09B0}\u{09BE}\u{09B8}\u{09BE}",
];

/// "school" keywords, including both encodings of Bangla "bidyaloy"
/// (nukta sequence and precomposed YYA)
const SCHOOL_KEYWORDS: &[&str] = &[
    "school",
    "schooling",
    "\u{09AC}\u{09BF}\u{09A6}\u{09CD}\u{09AF}\u{09BE}\u{09B2}\u{09AF}\u{09BC}",
    "\u{09AC}\u{09BF}\u{09A6}\u{09CD}\u{09AF}\u{09BE}\u{09B2}\u{09DF}",
    "primary",
    "secondary",
];

/// "college" keywords, Bangla "kolej" and "bishwobidyaloy" included
const COLLEGE_KEYWORDS: &[&str] = &[
    "college",
    "university",
    "institute",
    "institute of",
    "\u{0995}\u{09B2}\u{09C7}\u{099C}",
    "\u{09AC}\u{09BF}\u{09B6}\u{09CD}\u{09AC}\u{09AC}\u{09BF}\u{09A6}\u{09CD}\u{09AF}\u{09BE}\u{09B2}\u{09AF}\u{09BC}",
];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

/// Classify a record into a [`Category`].
///
/// First match wins:
/// 1. `amenity=school`
/// 2. `amenity` or `building` is college/university
/// 3. madrasa keyword in the name
/// 4. `madrasa` tag set, or a muslim religion tag with "madrasa" in the name
/// 5. school keyword in the name
/// 6. college keyword in the name
/// 7. `office=education|training` or `building=school`
///
/// Anything else is [`Category::Other`].
pub fn classify(record: &RawRecord) -> Category {
    let lower_tag = |key: &str| record.tag(key).unwrap_or_default().to_lowercase();
    let amenity = lower_tag("amenity");
    let building = lower_tag("building");
    let office = lower_tag("office");
    let name = record_name(record).to_lowercase();

    if amenity == "school" {
        return Category::School;
    }
    if matches!(amenity.as_str(), "college" | "university")
        || matches!(building.as_str(), "college" | "university")
    {
        return Category::College;
    }

    if contains_any(&name, MADRASA_KEYWORDS) {
        return Category::Madrasa;
    }
    if record.tag_text("madrasa").is_some()
        || (record.tag("religion") == Some("muslim") && name.contains("madrasa"))
    {
        return Category::Madrasa;
    }

    if contains_any(&name, SCHOOL_KEYWORDS) {
        return Category::School;
    }
    if contains_any(&name, COLLEGE_KEYWORDS) {
        return Category::College;
    }

    if matches!(office.as_str(), "education" | "training") || building == "school" {
        return Category::School;
    }

    Category::Other
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn classify_json(value: Value) -> Category {
        classify(&serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_amenity_school_wins_over_name() {
        assert_eq!(
            classify_json(json!({"name": "Tamirul Millat Madrasa", "tags": {"amenity": "school"}})),
            Category::School
        );
        assert_eq!(
            classify_json(json!({"name": "City College", "tags": {"amenity": "SCHOOL"}})),
            Category::School
        );
    }

    #[test]
    fn test_college_tags() {
        assert_eq!(
            classify_json(json!({"name": "Some School", "tags": {"building": "university"}})),
            Category::College
        );
        assert_eq!(
            classify_json(json!({"tags": {"name": "X", "amenity": "college"}})),
            Category::College
        );
    }

    #[test]
    fn test_madrasa_by_name() {
        assert_eq!(classify_json(json!({"name": "Jamia MADRASA"})), Category::Madrasa);
        assert_eq!(classify_json(json!({"name": "Darul Madrasha School"})), Category::Madrasa);
        assert_eq!(
            classify_json(json!({"tags": {"name": "\u{09A2}\u{09BE}\u{0995}\u{09BE} \u{09AE}\u{09BE}\u{09A6}\u{09CD}\u{09B0}\u{09BE}\u{09B8}\u{09BE}"}})),
            Category::Madrasa
        );
    }

    #[test]
    fn test_madrasa_tag() {
        assert_eq!(
            classify_json(json!({"name": "Noorani Talimul Quran", "tags": {"madrasa": "yes"}})),
            Category::Madrasa
        );
        assert_eq!(
            classify_json(json!({"name": "Noorani Talimul Quran", "tags": {"madrasa": false}})),
            Category::Other
        );
        assert_eq!(
            classify_json(json!({"name": "Baitul Mosque", "tags": {"religion": "muslim"}})),
            Category::Other
        );
    }

    #[test]
    fn test_name_keywords() {
        assert_eq!(classify_json(json!({"name": "Mirpur Primary"})), Category::School);
        assert_eq!(
            classify_json(json!({"name": "\u{0986}\u{09A6}\u{09B0}\u{09CD}\u{09B6} \u{09AC}\u{09BF}\u{09A6}\u{09CD}\u{09AF}\u{09BE}\u{09B2}\u{09DF}"})),
            Category::School
        );
        assert_eq!(classify_json(json!({"name": "Dhaka College"})), Category::College);
        assert_eq!(
            classify_json(json!({"name": "Institute of Business Administration"})),
            Category::College
        );
        // school keywords are checked before college keywords
        assert_eq!(
            classify_json(json!({"name": "University Laboratory School"})),
            Category::School
        );
    }

    #[test]
    fn test_office_and_building_fallbacks() {
        assert_eq!(
            classify_json(json!({"name": "BRAC Learning Centre", "tags": {"office": "Training"}})),
            Category::School
        );
        assert_eq!(
            classify_json(json!({"name": "Annex", "tags": {"building": "school"}})),
            Category::School
        );
        assert_eq!(classify_json(json!({"name": "Gulshan Club"})), Category::Other);
        assert_eq!(classify_json(json!({})), Category::Other);
    }
}
