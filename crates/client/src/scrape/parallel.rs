//! Bounded parallel scraping of article URLs.
//!
//! Every URL gets its own task; a semaphore keeps at most `max_concurrency`
//! of them fetching at once. All tasks are awaited, nothing is cancelled, and
//! the result maps every submitted URL to its text (empty on failure).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::Scraper;

/// Default ceiling on in-flight scrapes.
pub const DEFAULT_CONCURRENCY: usize = 6;

/// Scrape all `urls` with at most `max_concurrency` in flight.
///
/// Completion order is arbitrary; the returned map is keyed by URL so callers
/// can rebuild per-article text deterministically. Its key set always equals
/// the set of submitted URLs.
pub async fn fetch_all(scraper: Arc<dyn Scraper>, urls: &[String], max_concurrency: usize) -> HashMap<String, String> {
    let mut texts: HashMap<String, String> = urls.iter().map(|url| (url.clone(), String::new())).collect();

    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut join_set = JoinSet::new();

    for url in texts.keys().cloned().collect::<Vec<_>>() {
        let semaphore = semaphore.clone();
        let scraper = scraper.clone();

        join_set.spawn(async move {
            // NOTE: Hold permit for task duration to enforce concurrency limit
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return (url, String::new());
            };
            let text = scraper.scrape(&url).await.into_text();
            (url, text)
        });
    }

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((url, text)) => {
                texts.insert(url, text);
            }
            Err(e) => tracing::warn!(error = %e, "scrape task failed"),
        }
    }

    tracing::debug!(urls = texts.len(), "parallel scrape finished");
    texts
}
