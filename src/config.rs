use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_REQUESTS_PER_MINUTE: NonZeroU32 = NonZeroU32::new(60).unwrap();

#[derive(Clone, Debug)]
pub struct Config {
    /// Base url of the episode API.
    pub api_url: String,
    /// Episodes requested per fetch cycle.
    pub page_limit: usize,
    /// Episodes shown in the "latest" section.
    pub latest_count: usize,
    /// Minimum time between two scheduled fetch cycles.
    pub revalidate_interval: Duration,
    pub requests_per_minute: NonZeroU32,
    pub logs_path: PathBuf,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_url: "http://localhost:3333".to_string(),
            page_limit: 12,
            latest_count: 2,
            revalidate_interval: Duration::from_secs(60 * 60 * 8),
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            logs_path: PathBuf::from("logs"),
        }
    }

    /// Overrides the defaults with environment variables.
    pub fn load(&mut self) -> Result<(), AppError> {
        self.load_from(|key| std::env::var(key).ok())
    }

    fn load_from(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), AppError> {
        if let Some(api_url) = var("API_URL") {
            self.api_url = api_url;
        }
        if let Some(v) = var("PAGE_LIMIT") {
            self.page_limit = parse_positive::<usize>("PAGE_LIMIT", &v)?;
        }
        if let Some(v) = var("LATEST_COUNT") {
            self.latest_count = parse::<usize>("LATEST_COUNT", &v)?;
        }
        if let Some(v) = var("REVALIDATE_INTERVAL") {
            self.revalidate_interval =
                Duration::from_secs(parse_positive::<u64>("REVALIDATE_INTERVAL", &v)?);
        }
        if let Some(v) = var("REQUESTS_PER_MINUTE") {
            self.requests_per_minute = parse::<NonZeroU32>("REQUESTS_PER_MINUTE", &v)?;
        }
        if let Some(v) = var("LOGS_PATH") {
            self.logs_path = PathBuf::from(v);
        }

        if self.latest_count > self.page_limit {
            return Err(AppError::InvalidConfig {
                key: "LATEST_COUNT".to_string(),
                value: self.latest_count.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value.trim().parse::<T>().map_err(|_| AppError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr + Default + PartialEq,
{
    let parsed = parse::<T>(key, value)?;
    if parsed == T::default() {
        return Err(AppError::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = Config::new();
        config.load_from(|key| vars.get(key).cloned())?;
        Ok(config)
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url, "http://localhost:3333");
        assert_eq!(config.page_limit, 12);
        assert_eq!(config.latest_count, 2);
        assert_eq!(config.revalidate_interval, Duration::from_secs(28800));
        assert_eq!(config.requests_per_minute.get(), 60);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("API_URL", "http://api.test"),
            ("PAGE_LIMIT", "20"),
            ("LATEST_COUNT", "4"),
            ("REVALIDATE_INTERVAL", "60"),
            ("REQUESTS_PER_MINUTE", "5"),
            ("LOGS_PATH", "/tmp/podcastr"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "http://api.test");
        assert_eq!(config.page_limit, 20);
        assert_eq!(config.latest_count, 4);
        assert_eq!(config.revalidate_interval, Duration::from_secs(60));
        assert_eq!(config.requests_per_minute.get(), 5);
        assert_eq!(config.logs_path, PathBuf::from("/tmp/podcastr"));
    }

    #[test]
    fn test_invalid_values() {
        for vars in [
            [("PAGE_LIMIT", "0")],
            [("PAGE_LIMIT", "many")],
            [("REVALIDATE_INTERVAL", "0")],
            [("REQUESTS_PER_MINUTE", "0")],
            [("LATEST_COUNT", "13")],
        ] {
            assert!(
                matches!(load(&vars), Err(AppError::InvalidConfig { .. })),
                "{vars:?}"
            );
        }
    }
}
