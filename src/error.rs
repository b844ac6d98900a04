#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Invalid config value `{value}` for key \"{key}\"")]
    InvalidConfig { key: String, value: String },

    #[error("Configuration error: {msg}")]
    ConfigurationError { msg: String },
}
