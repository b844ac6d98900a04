//! Episode page fetch cycle.

use std::sync::Arc;

use log::debug;
use log::info;

use crate::episode::EpisodePage;
use crate::service::error::ServiceError;
use crate::source::EpisodeQuery;
use crate::source::EpisodeSource;

/// Runs fetch cycles against an episode source: one read, normalize all, partition.
pub struct EpisodePageService {
    pub source: Arc<dyn EpisodeSource>,
    /// Number of episodes requested per cycle.
    pub limit: usize,
    /// Number of episodes that go into `latest_episodes`.
    pub cut_point: usize,
}

impl EpisodePageService {
    pub fn new(source: Arc<dyn EpisodeSource>, limit: usize, cut_point: usize) -> Self {
        Self {
            source,
            limit,
            cut_point,
        }
    }

    /// Runs a fetch cycle with the configured limit and cut point.
    pub async fn fetch_default_page(&self) -> Result<EpisodePage, ServiceError> {
        self.fetch_episode_page(self.limit, self.cut_point).await
    }

    /// Fetches the newest `limit` episodes and splits them at `cut_point`.
    ///
    /// Episodes keep the order the API returned them in. Any fetch or format failure
    /// fails the whole cycle; no partial page is ever returned.
    #[tracing::instrument(skip(self), fields(source = %self.source.get_base().info.name))]
    pub async fn fetch_episode_page(
        &self,
        limit: usize,
        cut_point: usize,
    ) -> Result<EpisodePage, ServiceError> {
        Self::validate_request(limit, cut_point)?;

        let query = EpisodeQuery::latest(limit);
        let records = self.source.fetch_episodes(&query).await?;
        debug!("Normalizing {} episode records.", records.len());

        let page = EpisodePage::from_records(&records, cut_point)?;
        info!(
            "Built episode page with {} latest and {} other episodes.",
            page.latest_episodes.len(),
            page.all_episodes.len()
        );
        Ok(page)
    }

    fn validate_request(limit: usize, cut_point: usize) -> Result<(), ServiceError> {
        if limit == 0 {
            return Err(ServiceError::InvalidRequest {
                message: "limit must be positive".to_string(),
            });
        }
        if cut_point > limit {
            return Err(ServiceError::InvalidRequest {
                message: format!("cut point {cut_point} exceeds limit {limit}"),
            });
        }
        Ok(())
    }
}
