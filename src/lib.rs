//! podcastr - Episode listing back end for a podcast web front-end.
//!
//! This crate provides:
//! - Normalization of raw episode API records into display-ready episodes
//! - Partitioning of a fetched page into latest and remaining episodes
//! - A revalidation task that rebuilds the page on a fixed schedule
//! - An explicit playback queue handle

pub mod config;
pub mod episode;
pub mod error;
pub mod logging;
pub mod player;
pub mod service;
pub mod source;
pub mod task;
