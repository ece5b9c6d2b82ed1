use crate::utils::validation::is_valid_key;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

pub const PRICE_THRESHOLD: f64 = 10.0;
pub const POPULAR_RATING: f64 = 4.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub reviewer: String,
    pub rating: Option<f64>,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nanny {
    pub id: String,
    pub name: String,
    pub location: String,
    pub price_per_hour: Option<f64>,
    pub rating: Option<f64>,
    pub birthday: Option<NaiveDate>,
    pub experience: String,
    pub kids_age: String,
    pub characters: Vec<String>,
    pub education: String,
    pub about: String,
    pub avatar_url: String,
    pub reviews: Vec<Review>,
}

/// Why a stored record was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRejection {
    InvalidId,
    NotAnObject,
    MissingName,
}

impl fmt::Display for RecordRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "record id is not a valid key"),
            Self::NotAnObject => write!(f, "record is not an object"),
            Self::MissingName => write!(f, "record has no name"),
        }
    }
}

impl Nanny {
    /// Builds a typed record from the loosely shaped JSON stored under
    /// `nannies/<id>`. Malformed optional fields are defaulted; a record
    /// without a usable name is rejected.
    pub fn from_snapshot(id: &str, value: &Value) -> Result<Self, RecordRejection> {
        if !is_valid_key(id) {
            return Err(RecordRejection::InvalidId);
        }
        let obj = value.as_object().ok_or(RecordRejection::NotAnObject)?;

        let name = text(obj, "name");
        if name.trim().is_empty() {
            return Err(RecordRejection::MissingName);
        }

        let reviews = obj
            .get("reviews")
            .map(items)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|v| {
                let review = v.as_object()?;
                let reviewer = text(review, "reviewer");
                if reviewer.trim().is_empty() {
                    return None;
                }
                Some(Review {
                    reviewer,
                    rating: number(review, "rating").map(clamp_rating),
                    comment: text(review, "comment"),
                })
            })
            .collect();

        let characters = obj
            .get("characters")
            .map(items)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();

        Ok(Self {
            id: id.to_string(),
            name,
            location: text(obj, "location"),
            price_per_hour: number(obj, "price_per_hour"),
            rating: number(obj, "rating").map(clamp_rating),
            birthday: obj.get("birthday").and_then(Value::as_str).and_then(parse_birthday),
            experience: text(obj, "experience"),
            kids_age: text(obj, "kids_age"),
            characters,
            education: text(obj, "education"),
            about: text(obj, "about"),
            avatar_url: text(obj, "avatar_url"),
            reviews,
        })
    }
}

fn text(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

// The database stores lists either as JSON arrays or as objects keyed by index.
fn items(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(values) => values.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    }
}

fn clamp_rating(rating: f64) -> f64 {
    rating.clamp(0.0, MAX_RATING)
}

/// Accepts `YYYY-MM-DD` with an optional trailing time part.
pub fn parse_birthday(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// View selector applied to a nanny collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOption {
    SortAsc,
    SortDesc,
    PriceLessThanTen,
    PriceGreaterThanTen,
    Popular,
    Unpopular,
    #[default]
    All,
}

impl SortOption {
    pub const ALL: [SortOption; 7] = [
        SortOption::SortAsc,
        SortOption::SortDesc,
        SortOption::PriceLessThanTen,
        SortOption::PriceGreaterThanTen,
        SortOption::Popular,
        SortOption::Unpopular,
        SortOption::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SortAsc => "sort-asc",
            Self::SortDesc => "sort-desc",
            Self::PriceLessThanTen => "price-less-10",
            Self::PriceGreaterThanTen => "price-greater-10",
            Self::Popular => "popular",
            Self::Unpopular => "unpopular",
            Self::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SortAsc => "A to Z",
            Self::SortDesc => "Z to A",
            Self::PriceLessThanTen => "Less than $10",
            Self::PriceGreaterThanTen => "Greater than $10",
            Self::Popular => "Popular",
            Self::Unpopular => "Not popular",
            Self::All => "Show All",
        }
    }

    /// Never fails: anything unrecognised selects `All`.
    pub fn parse_lenient(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|opt| opt.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or_else(|| {
                tracing::debug!("Unknown sort option {:?}, showing all", raw);
                Self::All
            })
    }
}

impl From<&str> for SortOption {
    fn from(raw: &str) -> Self {
        Self::parse_lenient(raw)
    }
}

impl From<String> for SortOption {
    fn from(raw: String) -> Self {
        Self::parse_lenient(&raw)
    }
}

impl From<SortOption> for String {
    fn from(opt: SortOption) -> Self {
        opt.as_str().to_string()
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed-in user. Passed explicitly to anything that touches user data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub id_token: Option<String>,
}

impl Session {
    pub fn new(uid: impl Into<String>, id_token: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            id_token,
        }
    }
}

pub type FavoriteSet = BTreeSet<String>;

/// Reads the `nannies` node. Objects are keyed by id; arrays use the index as
/// id and may contain `null` holes. Rejected records are logged and skipped.
pub fn collection_from_snapshot(node: &Value) -> Vec<Nanny> {
    let entries: Vec<(String, &Value)> = match node {
        Value::Object(map) => {
            let mut entries: Vec<(String, &Value)> =
                map.iter().map(|(id, v)| (id.clone(), v)).collect();
            entries.sort_by(|(a, _), (b, _)| key_order(a, b));
            entries
        }
        Value::Array(values) => values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!("Unexpected nannies node type: {}", type_name(other));
            Vec::new()
        }
    };

    let mut rejected = 0usize;
    let nannies: Vec<Nanny> = entries
        .into_iter()
        .filter_map(|(id, value)| match Nanny::from_snapshot(&id, value) {
            Ok(nanny) => Some(nanny),
            Err(reason) => {
                tracing::warn!("Skipping nanny {}: {}", id, reason);
                rejected += 1;
                None
            }
        })
        .collect();

    if rejected > 0 {
        tracing::info!("Accepted {} nannies, rejected {}", nannies.len(), rejected);
    }
    nannies
}

/// Reads `users/<uid>/favorites`: every key whose value is not `null`/`false`.
pub fn favorites_from_snapshot(node: &Value) -> FavoriteSet {
    match node {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !matches!(v, Value::Null | Value::Bool(false)))
            .map(|(id, _)| id.clone())
            .collect(),
        _ => FavoriteSet::new(),
    }
}

/// Object key order used by the database and by JS object iteration:
/// array-index keys first in numeric order, then the rest by string order.
fn key_order(a: &str, b: &str) -> Ordering {
    match (array_index(a), array_index(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

// canonical decimal below 2^32 - 1, no sign or leading zeros
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|&i| i != u32::MAX)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
