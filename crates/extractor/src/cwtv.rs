//! CW (cwtv.com, cwtvpr.com, cwseed.com) video extractor.
//!
//! Metadata comes from the mobile app feed; playback is delegated to the
//! ThePlatform extractor through a `url_transparent` result.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use cwfetch_core::utils::{
    Scalar, int_or_none, lenient_string, parse_age_limit, parse_iso8601, str_or_none,
    update_url_query,
};
use cwfetch_core::{
    DelegatedUrl, DelegationHints, ExtractError, MediaDescriptor, ResultType, VideoId,
};

use crate::ExtractorConfig;
use crate::extractor::Extractor;

pub const IE_KEY: &str = "CWTV";
/// Extractor that turns the delegated URL into stream manifests.
pub const DELEGATE_IE_KEY: &str = "ThePlatform";

const VIDEO_META_PATH: &str = "/feed/mobileapp/video-meta/apiversion_12";

static RE_VALID_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://(?:www\.)?cw(?:tv(?:pr)?|seed)\.com/(?:shows/)?(?:[^/]+/)+[^?]*\?.*\b(?:play|watch)=(?P<id>[a-z0-9]{8}-[a-z0-9]{4}-[a-z0-9]{4}-[a-z0-9]{4}-[a-z0-9]{12})",
    )
    .unwrap()
});

/// Top-level video-meta response.
///
/// `video` stays raw until `result` says "ok"; error responses carry
/// whatever the feed puts there.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    pub result: Option<Scalar>,
    pub msg: Option<Scalar>,
    pub video: Option<serde_json::Value>,
}

/// Video object of a successful response. Text fields of the wrong type
/// read as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoMeta {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description_long: Option<String>,
    pub duration_secs: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub series_name: Option<String>,
    pub season: Option<Scalar>,
    pub episode: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    pub rating: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub large_thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mpx_url: Option<String>,
}

pub struct CwtvExtractor {
    config: ExtractorConfig,
    client: reqwest::Client,
}

impl CwtvExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Use a shared client; timeouts and proxies are its concern.
    pub fn with_client(config: ExtractorConfig, client: reqwest::Client) -> Self {
        Self {
            config: config.normalize(),
            client,
        }
    }

    /// Extract the video GUID from a page URL.
    pub fn match_id(url: &str) -> Option<VideoId> {
        RE_VALID_URL
            .captures(url)
            .and_then(|c| c.name("id"))
            .map(|m| VideoId::new(m.as_str()))
    }

    pub fn api_url(&self, id: &VideoId) -> String {
        format!("{}{VIDEO_META_PATH}/guid_{id}", self.config.api_base)
    }

    /// Fetch the metadata document for `id` and map it to a descriptor.
    pub async fn resolve(&self, id: &VideoId) -> Result<MediaDescriptor, ExtractError> {
        let doc = self.get_json(&self.api_url(id)).await?;
        build_descriptor(id, &doc, &self.config)
    }

    async fn get_json(&self, url: &str) -> Result<ApiResponse, ExtractError> {
        debug!(url = %url, "CWTV video-meta request");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ExtractError::Http {
                status: resp.status().as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ExtractError::Network(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| ExtractError::Json(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Extractor for CwtvExtractor {
    fn name(&self) -> &str {
        IE_KEY
    }

    fn suitable(&self, url: &str) -> bool {
        RE_VALID_URL.is_match(url)
    }

    async fn extract(&self, url: &str) -> Result<MediaDescriptor, ExtractError> {
        let id = Self::match_id(url).ok_or_else(|| ExtractError::Unsupported(url.to_string()))?;
        self.resolve(&id).await
    }
}

/// Check the API status and map the video object.
pub fn build_descriptor(
    id: &VideoId,
    doc: &ApiResponse,
    config: &ExtractorConfig,
) -> Result<MediaDescriptor, ExtractError> {
    if str_or_none(doc.result.as_ref()).as_deref() != Some("ok") {
        let msg = str_or_none(doc.msg.as_ref()).unwrap_or_else(|| "unknown error".to_string());
        return Err(ExtractError::Expected(msg));
    }
    let video = match &doc.video {
        None | Some(serde_json::Value::Null) => return Err(ExtractError::MissingField("video")),
        Some(raw) => VideoMeta::deserialize(raw).map_err(|e| ExtractError::Json(e.to_string()))?,
    };
    map_video(id, &video, &config.fallback_media_base)
}

/// Map a video object into a `url_transparent` descriptor.
pub fn map_video(
    id: &VideoId,
    video: &VideoMeta,
    fallback_media_base: &str,
) -> Result<MediaDescriptor, ExtractError> {
    let title = video
        .title
        .clone()
        .ok_or(ExtractError::MissingField("title"))?;

    let media_url = match video.mpx_url.as_deref() {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => format!("{fallback_media_base}/{id}"),
    };
    let media_url = update_url_query(&media_url, &[("formats", "M3U+none")])?;

    let season = str_or_none(video.season.as_ref());
    let episode = str_or_none(video.episode.as_ref()).map(|ep| match &season {
        Some(s) => strip_season_prefix(&ep, s),
        None => ep,
    });

    Ok(MediaDescriptor {
        result_type: ResultType::UrlTransparent,
        id: id.clone(),
        title,
        url: DelegatedUrl::new(
            media_url,
            DelegationHints {
                force_smil_url: true,
            },
        ),
        description: video.description_long.clone(),
        duration: int_or_none(video.duration_secs.as_ref()),
        series: video.series_name.clone(),
        season_number: season.and_then(|s| int_or_none(Some(&Scalar::Str(s)))),
        episode_number: episode.and_then(|e| int_or_none(Some(&Scalar::Str(e)))),
        timestamp: video.start_time.as_deref().and_then(parse_iso8601),
        age_limit: age_limit(video.rating.as_ref()),
        ie_key: DELEGATE_IE_KEY.to_string(),
        thumbnail: video.large_thumbnail.clone(),
    })
}

/// Episodes come season-prefixed ("301" in season "3"): drop as many leading
/// characters as the season string has.
fn strip_season_prefix(episode: &str, season: &str) -> String {
    episode.chars().skip(season.chars().count()).collect()
}

// Unrated content (no rating at all) is open to everyone.
fn age_limit(rating: Option<&Scalar>) -> Option<u8> {
    match rating {
        None => Some(0),
        Some(Scalar::Str(s)) if s.trim().is_empty() => Some(0),
        Some(Scalar::Int(i)) => u8::try_from(*i).ok().filter(|age| *age <= 21),
        Some(other) => str_or_none(Some(other)).and_then(|s| parse_age_limit(&s)),
    }
}
