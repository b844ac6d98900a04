//! Conversion of raw API records into display-ready episodes.

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Locale;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;

use crate::episode::Episode;
use crate::episode::RawDuration;
use crate::episode::RawEpisodeRecord;
use crate::episode::duration::convert_duration_to_time_string;
use crate::episode::error::FormatError;

/// Day of month, abbreviated month and 2-digit year, e.g., "8 jan 21".
const PUBLISHED_AT_FORMAT: &str = "%-d %b %y";
const PUBLISHED_AT_LOCALE: Locale = Locale::pt_BR;

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Normalizes one raw record. Pure; the same record always yields the same episode.
pub fn normalize(raw: &RawEpisodeRecord) -> Result<Episode, FormatError> {
    let published_at = format_published_at(&raw.id, &raw.published_at)?;
    let duration = coerce_duration(&raw.id, raw.file.duration.as_ref())?;

    Ok(Episode {
        id: raw.id.clone(),
        title: raw.title.clone(),
        thumbnail: raw.thumbnail.clone(),
        members: raw.members.clone(),
        published_at,
        duration,
        duration_as_string: convert_duration_to_time_string(duration),
        url: raw.file.url.clone(),
        description: raw.description.clone(),
    })
}

fn format_published_at(episode_id: &str, value: &str) -> Result<String, FormatError> {
    let published = parse_published_at(value).ok_or_else(|| FormatError::InvalidPublishedAt {
        episode_id: episode_id.to_string(),
        value: value.to_string(),
    })?;

    Ok(published
        .format_localized(PUBLISHED_AT_FORMAT, PUBLISHED_AT_LOCALE)
        .to_string())
}

/// Accepts RFC 3339, naive date-times with either `T` or a space as separator, and plain dates.
/// Values with an offset keep their own calendar date; naive values are read as-is.
fn parse_published_at(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(published) = DateTime::parse_from_rfc3339(value) {
        return Some(published);
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

fn coerce_duration(episode_id: &str, value: Option<&RawDuration>) -> Result<u64, FormatError> {
    let value = value.ok_or_else(|| FormatError::MissingDuration {
        episode_id: episode_id.to_string(),
    })?;

    let seconds = match value {
        RawDuration::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(floor_seconds)),
        RawDuration::Text(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(floor_seconds))
        }
        RawDuration::Other(_) => None,
    };

    seconds.ok_or_else(|| FormatError::InvalidDuration {
        episode_id: episode_id.to_string(),
        value: value.to_string(),
    })
}

fn floor_seconds(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 {
        Some(value.floor() as u64)
    } else {
        None
    }
}
