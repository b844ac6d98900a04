#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("Invalid published_at `{value}` for episode (ID: {episode_id}).")]
    InvalidPublishedAt { episode_id: String, value: String },

    #[error("Invalid duration {value} for episode (ID: {episode_id}).")]
    InvalidDuration { episode_id: String, value: String },

    #[error("Missing file.duration for episode (ID: {episode_id}).")]
    MissingDuration { episode_id: String },
}
