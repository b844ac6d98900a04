//! Playback queue state.
//!
//! The player is an explicit handle owned by whoever drives playback. Presentation code hands
//! it the flattened episode list of a page plus the index the listener picked.

use crate::episode::Episode;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PlayerError {
    #[error("Episode index {index} is out of range for a list of {len} episodes.")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Clone, Debug, Default)]
pub struct Player {
    episode_list: Vec<Episode>,
    current_episode_index: usize,
    is_playing: bool,
    is_looping: bool,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the queue with a single episode and starts playing it.
    pub fn play(&mut self, episode: Episode) {
        self.episode_list = vec![episode];
        self.current_episode_index = 0;
        self.is_playing = true;
    }

    /// Replaces the queue with `list` and starts playing at `index`.
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) -> Result<(), PlayerError> {
        if index >= list.len() {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }
        self.episode_list = list;
        self.current_episode_index = index;
        self.is_playing = true;
        Ok(())
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_list.get(self.current_episode_index)
    }

    pub fn current_episode_index(&self) -> usize {
        self.current_episode_index
    }

    pub fn episode_list(&self) -> &[Episode] {
        &self.episode_list
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
    }

    /// Syncs the playing flag with the audio element's actual state.
    pub fn set_playing(&mut self, state: bool) {
        self.is_playing = state;
    }

    pub fn has_previous(&self) -> bool {
        self.current_episode_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_episode_index + 1 < self.episode_list.len()
    }

    /// Moves to the next episode. With looping on, the last episode wraps to the first.
    pub fn play_next(&mut self) {
        if self.has_next() {
            self.current_episode_index += 1;
        } else if self.is_looping && !self.episode_list.is_empty() {
            self.current_episode_index = 0;
        }
    }

    pub fn play_previous(&mut self) {
        if self.has_previous() {
            self.current_episode_index -= 1;
        }
    }

    /// Empties the queue and stops playback.
    pub fn clear(&mut self) {
        self.episode_list.clear();
        self.current_episode_index = 0;
        self.is_playing = false;
    }
}
