//! Background task that rebuilds the episode page once per revalidation window.

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use log::debug;
use log::error;
use log::info;
use tokio::sync::Mutex;

use crate::episode::EpisodePage;
use crate::service::episode_page_service::EpisodePageService;
use crate::service::error::ServiceError;

#[derive(Default)]
struct CachedPage {
    page: Option<Arc<EpisodePage>>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Holds the last good episode page and refreshes it on a fixed schedule.
///
/// A failed refresh leaves the previous page in place. Fetch cycles never overlap.
pub struct PageRevalidator {
    service: Arc<EpisodePageService>,
    revalidate_interval: Duration,
    running: AtomicBool,
    /// Bumped on every start and stop; a loop exits once it no longer owns the current value.
    generation: AtomicU64,
    cycle_lock: Mutex<()>,
    cache: RwLock<CachedPage>,
}

impl PageRevalidator {
    pub fn new(service: Arc<EpisodePageService>, revalidate_interval: Duration) -> Arc<Self> {
        info!(
            "Initializing PageRevalidator with revalidate interval {:?}",
            revalidate_interval
        );
        Arc::new(Self {
            service,
            revalidate_interval,
            running: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            cycle_lock: Mutex::new(()),
            cache: RwLock::new(CachedPage::default()),
        })
    }

    /// Starts the revalidation loop.
    ///
    /// The first cycle runs immediately when no page is cached yet, otherwise one window later.
    pub fn start(self: Arc<Self>) -> anyhow::Result<()> {
        if !self.running.swap(true, Ordering::SeqCst) {
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            info!("Starting PageRevalidator loop (generation {generation}).");
            self.spawn_revalidate_loop(generation);
        }
        Ok(())
    }

    /// Stops the loop at its next tick.
    pub fn stop(self: Arc<Self>) -> anyhow::Result<()> {
        info!("Stopping PageRevalidator loop.");
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn spawn_revalidate_loop(self: Arc<Self>, generation: u64) {
        let first_tick = match self.current_page() {
            Some(_) => tokio::time::Instant::now() + self.revalidate_interval,
            None => tokio::time::Instant::now(),
        };
        let mut interval = tokio::time::interval_at(first_tick, self.revalidate_interval);
        tokio::spawn(async move {
            loop {
                interval.tick().await;
                if self.generation.load(Ordering::SeqCst) != generation {
                    info!("Stopping revalidate loop (generation {generation}).");
                    break;
                }
                // Errors are already logged; the stale page keeps being served.
                let _ = self.revalidate().await;
            }
        });
    }

    /// Runs one fetch cycle and swaps in the new page on success.
    ///
    /// Waits for any cycle already in flight, so a slower cycle cannot overwrite a newer page.
    pub async fn revalidate(&self) -> Result<Arc<EpisodePage>, ServiceError> {
        let _cycle = self.cycle_lock.lock().await;
        debug!("Revalidating episode page.");

        match self.service.fetch_default_page().await {
            Ok(page) => {
                let page = Arc::new(page);
                let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
                cache.page = Some(page.clone());
                cache.refreshed_at = Some(Utc::now());
                info!("Episode page revalidated with {} episodes.", page.len());
                Ok(page)
            }
            Err(e) => {
                if self.current_page().is_some() {
                    error!("Error revalidating episode page, serving stale page: {e}");
                } else {
                    error!("Error revalidating episode page, no page available: {e}");
                }
                Err(e)
            }
        }
    }

    /// The last successfully built page, if any.
    pub fn current_page(&self) -> Option<Arc<EpisodePage>> {
        self.cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .page
            .clone()
    }

    /// When the current page was built.
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .refreshed_at
    }

    /// Whether the page is missing or older than the revalidation window at `now`.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        let Some(refreshed_at) = self.last_refreshed() else {
            return true;
        };
        match chrono::Duration::from_std(self.revalidate_interval) {
            Ok(window) => now - refreshed_at >= window,
            Err(_) => false,
        }
    }
}
