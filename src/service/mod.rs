pub mod episode_page_service;
pub mod error;
