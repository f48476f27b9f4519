use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Free-form OSM tags. Scalar values are coerced to strings, anything else is dropped.
pub type Tags = BTreeMap<String, String>;

/// Centroid reported by Overpass for ways and relations (`out center`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// OSM element id. Overpass sends numbers; arbitrary JSON may carry strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OsmId {
    Num(u64),
    Text(String),
}

impl fmt::Display for OsmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsmId::Num(n) => write!(f, "{}", n),
            OsmId::Text(s) => f.write_str(s),
        }
    }
}

/// A record as it arrives from Overpass or from an arbitrary JSON file.
///
/// `tags` and `center` are decoded leniently into typed values; every other
/// top-level key stays in `fields` and is read through the accessors below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Tags,
    #[serde(default, deserialize_with = "lenient_center")]
    pub center: Option<Center>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    /// Raw top-level value, `None` for missing keys and JSON nulls
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Top-level value as text, only when it is truthy
    pub fn text(&self, key: &str) -> Option<String> {
        self.value(key).filter(|v| is_truthy(v)).map(value_to_string)
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Tag value, only when non-empty
    pub fn tag_text(&self, key: &str) -> Option<&str> {
        self.tag(key).filter(|v| !v.is_empty())
    }

    /// Element kind (`node`, `way`, `relation`)
    pub fn osm_type(&self) -> Option<&str> {
        self.value("type").and_then(Value::as_str)
    }

    pub fn osm_id(&self) -> Option<OsmId> {
        match self.value("id")? {
            Value::Number(n) => n
                .as_u64()
                .map(OsmId::Num)
                .or_else(|| Some(OsmId::Text(n.to_string()))),
            Value::String(s) => Some(OsmId::Text(s.clone())),
            _ => None,
        }
    }

    /// Identity used for de-duplication within a single parse pass
    pub fn dedup_key(&self) -> (Option<String>, Option<OsmId>) {
        (self.osm_type().map(str::to_string), self.osm_id())
    }

    /// Top-level latitude, falling back to the centroid
    pub fn lat(&self) -> Option<f64> {
        self.value("lat")
            .and_then(value_to_f64)
            .or_else(|| self.center.map(|c| c.lat))
    }

    /// Top-level longitude, falling back to the centroid
    pub fn lon(&self) -> Option<f64> {
        self.value("lon")
            .and_then(value_to_f64)
            .or_else(|| self.center.map(|c| c.lon))
    }
}

/// Normalized institution record produced by the element parser
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub osm_type: Option<String>,
    pub osm_id: Option<OsmId>,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub tags: Tags,
}

impl CanonicalRecord {
    /// Columns written by the scraper's tabular outputs
    pub const COLUMNS: [&'static str; 5] = ["name", "address", "phone", "lat", "lon"];

    /// Render the record as one table row in `COLUMNS` order
    pub fn row(&self) -> Vec<String> {
        let coord = |v: Option<f64>| v.map(format_float).unwrap_or_default();
        vec![
            self.name.clone(),
            self.address.clone(),
            self.phone.clone(),
            coord(self.lat),
            coord(self.lon),
        ]
    }
}

/// JSON truthiness: null, false, 0, "" and empty containers are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Stringify a JSON value for a table cell
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => format_float(f),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Float formatting that keeps a trailing `.0` on integral values
pub fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Tags, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(map)) = value else {
        return Ok(Tags::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(s) => Some((k, s)),
            // false and 0 carry no value, like an absent tag
            Value::Number(_) | Value::Bool(_) if is_truthy(&v) => {
                Some((k, value_to_string(&v)))
            }
            _ => None,
        })
        .collect())
}

fn lenient_center<'de, D>(deserializer: D) -> Result<Option<Center>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(map)) = value else {
        return Ok(None);
    };

    let lat = map.get("lat").and_then(value_to_f64);
    let lon = map.get("lon").and_then(value_to_f64);
    Ok(match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Center { lat, lon }),
        _ => None,
    })
}
