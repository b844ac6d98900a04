//! json-server style episode API client.

use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::Quota;
use governor::RateLimiter;
use governor::clock::QuantaClock;
use governor::state::InMemoryState;
use governor::state::direct::NotKeyed;
use log::debug;
use log::info;
use wreq::Url;

use crate::episode::RawEpisodeRecord;
use crate::source::BaseSource;
use crate::source::EpisodeQuery;
use crate::source::EpisodeSource;
use crate::source::SourceInfo;
use crate::source::error::FetchError;

/// Episode API serving `GET /episodes?_limit=&_sort=&_order=`.
pub struct EpisodeApi {
    pub base: BaseSource,
    client: wreq::Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, QuantaClock>,
}

impl EpisodeApi {
    /// Creates a client for the API at `api_url`, allowing at most `requests_per_minute`.
    pub fn new(api_url: &str, requests_per_minute: NonZeroU32) -> Result<Self, FetchError> {
        let info = SourceInfo {
            name: "Podcastr API".to_string(),
            api_url: api_url.to_string(),
            episodes_path: "episodes".to_string(),
        };
        let client = wreq::Client::builder().build()?;
        let limiter = RateLimiter::direct(Quota::per_minute(requests_per_minute));

        Ok(Self {
            base: BaseSource::new(info),
            client,
            limiter,
        })
    }

    fn build_url(&self, query: &EpisodeQuery) -> Result<Url, FetchError> {
        let url = self.base.episodes_url();
        Url::parse_with_params(&url, query.to_params()).map_err(|_| FetchError::InvalidUrl { url })
    }

    async fn send(&self, url: Url) -> Result<wreq::Response, wreq::Error> {
        if self.limiter.check().is_err() {
            info!("Source {} is ratelimited. Waiting...", self.base.info.name);
        }
        self.limiter.until_ready().await;

        debug!("Making request to: {url}");
        self.client.get(url).send().await
    }
}

#[async_trait]
impl EpisodeSource for EpisodeApi {
    async fn fetch_episodes(
        &self,
        query: &EpisodeQuery,
    ) -> Result<Vec<RawEpisodeRecord>, FetchError> {
        debug!(
            "Fetching {} episodes from {} sorted by {} {}",
            query.limit,
            self.base.info.name,
            query.sort,
            query.order.as_str()
        );
        let url = self.build_url(query)?;
        let response = self.send(url.clone()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let records: Vec<RawEpisodeRecord> = serde_json::from_str(&body)?;

        info!(
            "Fetched {} episodes from {}.",
            records.len(),
            self.base.info.name
        );
        Ok(records)
    }

    fn get_base(&self) -> &BaseSource {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(api_url: &str) -> EpisodeApi {
        EpisodeApi::new(api_url, NonZeroU32::new(60).unwrap()).unwrap()
    }

    #[test]
    fn test_build_url_has_query_params() {
        let url = api("http://localhost:3333")
            .build_url(&EpisodeQuery::latest(12))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3333/episodes?_limit=12&_sort=published_at&_order=desc"
        );
    }

    #[test]
    fn test_build_url_rejects_invalid_base() {
        let err = api("not a url").build_url(&EpisodeQuery::latest(12)).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
