use serde::Serialize;

use crate::episode::Episode;
use crate::episode::RawEpisodeRecord;
use crate::episode::error::FormatError;
use crate::episode::normalizer::normalize;

/// Result of one fetch cycle, split into the newest episodes and the rest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodePage {
    pub latest_episodes: Vec<Episode>,
    pub all_episodes: Vec<Episode>,
}

impl EpisodePage {
    /// Splits `episodes` at `cut_point`, keeping their order.
    ///
    /// A cut point past the end puts everything into `latest_episodes`.
    pub fn partition(mut episodes: Vec<Episode>, cut_point: usize) -> Self {
        let cut_point = cut_point.min(episodes.len());
        let all_episodes = episodes.split_off(cut_point);

        Self {
            latest_episodes: episodes,
            all_episodes,
        }
    }

    /// Normalizes every record in order and partitions the result.
    ///
    /// The first record that fails normalization fails the whole page.
    pub fn from_records(
        records: &[RawEpisodeRecord],
        cut_point: usize,
    ) -> Result<Self, FormatError> {
        let episodes = records
            .iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::partition(episodes, cut_point))
    }

    /// All episodes in their original order, latest first.
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.latest_episodes.iter().chain(self.all_episodes.iter())
    }

    /// Owned copy of [`Self::episodes`], as handed to the player.
    pub fn episode_list(&self) -> Vec<Episode> {
        self.episodes().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.latest_episodes.len() + self.all_episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
