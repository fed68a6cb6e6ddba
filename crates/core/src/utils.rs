//! Null-safe coercions for loosely typed API documents.
//!
//! Every helper here is total: bad or missing input gives `None`, never an error.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::ExtractError;

const SMUGGLE_KEY: &str = "__youtubedl_smuggle";

/// A JSON scalar whose type the API does not keep stable (`"3"` vs `3`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    /// Arrays and objects where a scalar was expected.
    Other(serde_json::Value),
}

// US MPAA ratings
static US_RATINGS: &[(&str, u8)] = &[("G", 0), ("PG", 10), ("PG-13", 13), ("R", 16), ("NC", 18)];

// US TV parental guidelines, keyed by the part after "TV-"
static TV_PARENTAL_GUIDELINES: &[(&str, u8)] = &[
    ("Y", 0),
    ("Y7", 7),
    ("G", 0),
    ("PG", 0),
    ("14", 14),
    ("MA", 17),
];

static RE_AGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,2})\+?$").unwrap());

static RE_TV_RATING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TV[_-]?(Y7|Y|G|PG|14|MA)$").unwrap());

fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// Integer view of a scalar. Floats truncate, strings must parse fully.
pub fn int_or_none(v: Option<&Scalar>) -> Option<i64> {
    match v? {
        Scalar::Int(i) => Some(*i),
        Scalar::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Scalar::Str(s) => parse_int(s),
        _ => None,
    }
}

/// String view of a scalar.
pub fn str_or_none(v: Option<&Scalar>) -> Option<String> {
    match v? {
        Scalar::Int(i) => Some(i.to_string()),
        // Keep the fractional part ("3.0"), it counts toward prefix lengths.
        Scalar::Float(f) => Some(format!("{f:?}")),
        Scalar::Str(s) => Some(s.clone()),
        Scalar::Bool(b) => Some(b.to_string()),
        Scalar::Other(_) => None,
    }
}

/// Deserialize a text field, treating any non-string value as absent.
///
/// Use with `#[serde(default, deserialize_with = "lenient_string")]`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// JSON formatter with `", "` and `": "` separators.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        writer.write_all(b": ")
    }
}

fn to_spaced_json(value: &serde_json::Value) -> String {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    // Writing a Value into a Vec cannot fail.
    if serde::Serialize::serialize(value, &mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// Parse an ISO-8601 date-time into Unix epoch seconds.
///
/// Accepts `T` or a space as separator, optional fractional seconds, and
/// `Z`, `±HH:MM` or `±HHMM` offsets. A missing offset is read as UTC.
pub fn parse_iso8601(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }

    let normalized = s.replacen(' ', "T", 1);
    if let Ok(dt) = DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.timestamp());
    }

    let naive = normalized.strip_suffix('Z').unwrap_or(&normalized);
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ndt| ndt.and_utc().timestamp())
}

/// Minimum viewer age for a broadcast content rating.
///
/// Handles bare ages (`"14"`, `"14+"`), MPAA ratings and TV parental
/// guidelines (`TV-14`, `TV_MA`, `TVPG`). Unknown ratings give `None`.
pub fn parse_age_limit(rating: &str) -> Option<u8> {
    if let Some(c) = RE_AGE.captures(rating) {
        return c[1].parse().ok();
    }

    let upper = rating.to_uppercase();
    if let Some((_, age)) = US_RATINGS.iter().find(|(r, _)| *r == upper) {
        return Some(*age);
    }

    let c = RE_TV_RATING.captures(&upper)?;
    TV_PARENTAL_GUIDELINES
        .iter()
        .find(|(r, _)| *r == &c[1])
        .map(|(_, age)| *age)
}

/// Set query parameters on a URL.
///
/// An existing key keeps its position and loses any repeated values; new keys
/// are appended. Values are form-encoded, so `+` becomes `%2B`.
pub fn update_url_query(url: &str, query: &[(&str, &str)]) -> Result<String, ExtractError> {
    let mut parsed = Url::parse(url)?;
    let mut pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();

    for (key, value) in query {
        let mut seen = false;
        pairs.retain_mut(|(k, v)| {
            if k.as_str() != *key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            *v = value.to_string();
            true
        });
        if !seen {
            pairs.push((key.to_string(), value.to_string()));
        }
    }

    if pairs.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(&pairs);
    }
    Ok(parsed.to_string())
}

/// Attach data to a URL in its fragment so it travels with the URL to the
/// next extractor. Data already smuggled into `url` takes precedence.
pub fn smuggle_url(url: &str, data: &serde_json::Map<String, serde_json::Value>) -> String {
    let (base, existing) = unsmuggle_url(url);
    let mut merged = data.clone();
    if let Some(existing) = existing {
        merged.extend(existing);
    }

    let json = to_spaced_json(&serde_json::Value::Object(merged));
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(SMUGGLE_KEY, &json)
        .finish();
    format!("{base}#{encoded}")
}

/// Inverse of [`smuggle_url`]. Returns the plain URL and the data, if any.
pub fn unsmuggle_url(url: &str) -> (String, Option<serde_json::Map<String, serde_json::Value>>) {
    if !url.contains(&format!("#{SMUGGLE_KEY}")) {
        return (url.to_string(), None);
    }
    let Some((base, fragment)) = url.rsplit_once('#') else {
        return (url.to_string(), None);
    };

    let data = url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(k, _)| k == SMUGGLE_KEY)
        .and_then(|(_, v)| serde_json::from_str::<serde_json::Value>(&v).ok())
        .and_then(|v| match v {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        });

    (base.to_string(), data)
}
