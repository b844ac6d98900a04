//! Episode records, view models and the normalization pipeline.

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

pub mod duration;
pub mod error;
pub mod normalizer;
pub mod page;

pub use duration::convert_duration_to_time_string;
pub use normalizer::normalize;
pub use page::EpisodePage;

/// Episode as returned by the episode API. Nothing in here is trusted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RawEpisodeRecord {
    pub id: String,
    pub title: String,
    /// Image url of the episode cover.
    pub thumbnail: String,
    /// Participant names, e.g., "Diego e Richard".
    pub members: String,
    /// ISO-8601 date-time, e.g., "2021-01-22 11:24:23".
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub published_at: String,
    #[serde(default)]
    pub description: Option<String>,
    pub file: RawEpisodeFile,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RawEpisodeFile {
    /// Media url of the episode audio.
    pub url: String,
    /// MIME type, e.g., "audio/x-m4a".
    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,
    /// Length in seconds. Some API versions send it as a string.
    #[serde(default)]
    pub duration: Option<RawDuration>,
}

/// Duration value exactly as it arrived on the wire.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawDuration {
    Number(serde_json::Number),
    Text(String),
    /// Anything else, e.g., `true` or `{}`. Rejected during normalization.
    Other(Value),
}

impl std::fmt::Display for RawDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawDuration::Number(n) => write!(f, "{n}"),
            RawDuration::Text(s) => write!(f, "{s:?}"),
            RawDuration::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Keeps strings as-is and renders any other JSON value as text, so a wrongly typed field
/// surfaces as a format error on its record instead of failing the whole response.
fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Display-ready episode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub members: String,
    /// Localized publish date, e.g., "8 jan 21".
    pub published_at: String,
    /// Length in seconds.
    pub duration: u64,
    /// Length formatted as "HH:MM:SS".
    pub duration_as_string: String,
    /// Media url of the episode audio.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
