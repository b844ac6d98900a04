//! Episode API integration.

use async_trait::async_trait;

use crate::episode::RawEpisodeRecord;
use crate::source::error::FetchError;

pub mod episode_api;
pub mod error;

/// Static information about an episode API.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    /// The name of the source, e.g., "Podcastr API".
    pub name: String,
    /// Base url of the API, e.g., "http://localhost:3333".
    pub api_url: String,
    /// Collection path under `api_url`, e.g., "episodes".
    pub episodes_path: String,
}

/// Common state shared by source implementations.
#[derive(Clone, Debug)]
pub struct BaseSource {
    pub info: SourceInfo,
}

impl BaseSource {
    pub fn new(info: SourceInfo) -> Self {
        Self { info }
    }

    /// Url of the episode collection, e.g., "http://localhost:3333/episodes".
    pub fn episodes_url(&self) -> String {
        format!(
            "{}/{}",
            self.info.api_url.trim_end_matches('/'),
            self.info.episodes_path.trim_matches('/')
        )
    }

    /// Url of a single episode resource.
    pub fn episode_url(&self, id: &str) -> String {
        format!("{}/{}", self.episodes_url(), id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Parameters of one episode listing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpisodeQuery {
    pub limit: usize,
    /// Field to sort by, e.g., "published_at".
    pub sort: String,
    pub order: SortOrder,
}

impl EpisodeQuery {
    /// Newest `limit` episodes first.
    pub fn latest(limit: usize) -> Self {
        Self {
            limit,
            sort: "published_at".to_string(),
            order: SortOrder::Desc,
        }
    }

    /// Query string pairs in the json-server convention.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("_limit", self.limit.to_string()),
            ("_sort", self.sort.clone()),
            ("_order", self.order.as_str().to_string()),
        ]
    }
}

#[async_trait]
pub trait EpisodeSource: Send + Sync {
    /// Fetches one listing of raw records, in the order the API returns them.
    async fn fetch_episodes(&self, query: &EpisodeQuery)
    -> Result<Vec<RawEpisodeRecord>, FetchError>;

    fn get_base(&self) -> &BaseSource;

    /// Returns the API url of an episode given its ID.
    fn get_episode_url_from_id(&self, id: &str) -> String {
        self.get_base().episode_url(id)
    }
}
