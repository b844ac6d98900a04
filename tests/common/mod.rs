//! Common test utilities and mock implementations.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use podcastr::episode::RawDuration;
use podcastr::episode::RawEpisodeFile;
use podcastr::episode::RawEpisodeRecord;
use podcastr::source::BaseSource;
use podcastr::source::EpisodeQuery;
use podcastr::source::EpisodeSource;
use podcastr::source::SourceInfo;
use podcastr::source::error::FetchError;

/// Builds a raw record with a valid date and duration.
#[allow(dead_code)]
pub fn raw_record(id: &str, duration_secs: u64) -> RawEpisodeRecord {
    RawEpisodeRecord {
        id: id.to_string(),
        title: format!("Episode {id}"),
        thumbnail: format!("https://example.com/{id}.jpg"),
        members: "Diego Fernandes e Richard Pessoa".to_string(),
        published_at: "2021-01-22 11:24:23".to_string(),
        description: None,
        file: RawEpisodeFile {
            url: format!("https://example.com/{id}.m4a"),
            mime_type: Some("audio/x-m4a".to_string()),
            duration: Some(RawDuration::Number(duration_secs.into())),
        },
    }
}

// MOCK SOURCE

/// Mock episode source that replays queued responses.
#[derive(Clone)]
#[allow(dead_code)]
pub struct MockSource {
    pub base: BaseSource,
    pub state: Arc<RwLock<MockSourceState>>,
}

/// State for the mock source.
#[derive(Default)]
#[allow(dead_code)]
pub struct MockSourceState {
    pub responses: VecDeque<Result<Vec<RawEpisodeRecord>, FetchError>>,
    pub queries: Vec<EpisodeQuery>,
    /// How long each fetch takes.
    pub delay: Option<Duration>,
    pub in_flight: usize,
    pub max_in_flight: usize,
}

#[allow(dead_code)]
impl MockSource {
    pub fn new() -> Self {
        let info = SourceInfo {
            name: "MockSource".to_string(),
            api_url: "https://api.podcastr.test".to_string(),
            episodes_path: "episodes".to_string(),
        };
        Self {
            base: BaseSource::new(info),
            state: Arc::new(RwLock::new(MockSourceState::default())),
        }
    }

    /// Queues the result of the next fetch.
    pub fn push_response(&self, response: Result<Vec<RawEpisodeRecord>, FetchError>) {
        self.state.write().unwrap().responses.push_back(response);
    }

    /// Makes every fetch take `delay`.
    pub fn set_delay(&self, delay: Duration) {
        self.state.write().unwrap().delay = Some(delay);
    }

    /// Highest number of fetches that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.state.read().unwrap().max_in_flight
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<EpisodeQuery> {
        self.state.read().unwrap().queries.clone()
    }
}

#[async_trait]
impl EpisodeSource for MockSource {
    async fn fetch_episodes(
        &self,
        query: &EpisodeQuery,
    ) -> Result<Vec<RawEpisodeRecord>, FetchError> {
        let delay = {
            let mut state = self.state.write().unwrap();
            state.queries.push(query.clone());
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state.delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().unwrap();
        state.in_flight -= 1;
        state.responses.pop_front().unwrap_or_else(|| {
            Err(FetchError::UnexpectedStatus {
                status: 404,
                url: self.base.episodes_url(),
            })
        })
    }

    fn get_base(&self) -> &BaseSource {
        &self.base
    }
}
