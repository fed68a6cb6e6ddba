use serde::{Deserialize, Serialize, Serializer};

use crate::utils::{smuggle_url, unsmuggle_url};

/// Kind of record handed back to the downloader, stored in `_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Directly playable record.
    Video,
    /// Bare URL to be resolved by another extractor.
    Url,
    /// Like `Url`, but fields set here override the ones the next extractor finds.
    UrlTransparent,
}

impl ResultType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Url => "url",
            Self::UrlTransparent => "url_transparent",
        }
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Video GUID as captured from a page URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flags passed along to the downstream stream resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegationHints {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_smil_url: bool,
}

/// Playback URL plus the hints the next resolver needs to handle it.
///
/// Serializes to the smuggled string form
/// `<url>#__youtubedl_smuggle=<urlencoded json>` the downloader expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatedUrl {
    pub url: String,
    pub hints: DelegationHints,
}

impl DelegatedUrl {
    pub fn new(url: impl Into<String>, hints: DelegationHints) -> Self {
        Self {
            url: url.into(),
            hints,
        }
    }

    pub fn to_smuggled(&self) -> String {
        let data = match serde_json::to_value(&self.hints) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        smuggle_url(&self.url, &data)
    }

    /// Split a smuggled URL back into its plain form and hints.
    ///
    /// Unknown or malformed smuggled data yields default hints.
    pub fn from_smuggled(smuggled: &str) -> Self {
        let (url, data) = unsmuggle_url(smuggled);
        let hints = data
            .and_then(|map| serde_json::from_value(serde_json::Value::Object(map)).ok())
            .unwrap_or_default();
        Self { url, hints }
    }
}

impl Serialize for DelegatedUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_smuggled())
    }
}

/// Normalized media descriptor consumed by the downloader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaDescriptor {
    #[serde(rename = "_type")]
    pub result_type: ResultType,
    pub id: VideoId,
    pub title: String,
    pub url: DelegatedUrl,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub series: Option<String>,
    pub season_number: Option<i64>,
    pub episode_number: Option<i64>,
    /// Unix epoch seconds.
    pub timestamp: Option<i64>,
    pub age_limit: Option<u8>,
    /// Name of the extractor that resolves `url`.
    pub ie_key: String,
    pub thumbnail: Option<String>,
}
