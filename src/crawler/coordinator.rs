//! Crawler coordinator - crawl cycle orchestration
//!
//! This module drives one crawl cycle:
//! - Loading the checkpoint and choosing first-run or incremental mode
//! - Walking listing pages through the fetcher and parser
//! - Deduplicating against the checkpoint and deciding when to stop
//! - Advancing the checkpoint once the cycle is done

use crate::checkpoint::{CheckpointStore, FileCheckpoint};
use crate::config::{Config, CrawlConfig};
use crate::crawler::article::{Article, ListingEntry};
use crate::crawler::fetcher::{Fetcher, HttpTransport, Transport};
use crate::crawler::parser::parse_containers;
use crate::config::validate;
use crate::url::{link_base, page_url};
use crate::TideError;
use chrono::{DateTime, Utc};

/// Which branch a cycle took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// No checkpoint existed; only the first page was read
    FirstRun,
    /// A checkpoint existed; pages were read until caught up
    Incremental,
}

/// Why a cycle stopped reading pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// First run: the watermark was seeded from the listing
    Seeded,
    /// First run: the first page held nothing usable
    NothingToSeed,
    /// A page could not be fetched or held no article containers
    EndOfListing { page: u32 },
    /// A page held nothing newer than the checkpoint
    CaughtUp { page: u32 },
    /// `max_pages` pages were read
    PageLimit,
}

/// Outcome of one crawl cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub mode: RunMode,
    /// Newly found articles in discovery order
    pub articles: Vec<Article>,
    pub pages_fetched: u32,
    pub checkpoint_before: Option<u64>,
    pub checkpoint_after: Option<u64>,
    pub stop_reason: StopReason,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CycleReport {
    fn start(mode: RunMode, checkpoint: Option<u64>) -> Self {
        let now = Utc::now();
        Self {
            mode,
            articles: Vec::new(),
            pages_fetched: 0,
            checkpoint_before: checkpoint,
            checkpoint_after: checkpoint,
            stop_reason: StopReason::PageLimit,
            started_at: now,
            finished_at: now,
        }
    }

    /// True if the cycle moved the watermark forward
    pub fn advanced(&self) -> bool {
        self.checkpoint_after > self.checkpoint_before
    }
}

/// Main crawler coordinator structure
///
/// Owns the checkpoint for its listing; only one cycle should run against a
/// given checkpoint at a time.
pub struct Coordinator<T, C> {
    site_url: String,
    crawl: CrawlConfig,
    fetcher: Fetcher<T>,
    checkpoint: C,
}

impl Coordinator<HttpTransport, FileCheckpoint> {
    /// Builds an HTTP-backed coordinator with a file checkpoint
    ///
    /// The config is validated first, since it may have been built in code
    /// rather than loaded from a file.
    pub fn from_config(config: &Config) -> Result<Self, TideError> {
        validate(config)?;
        let fetcher = Fetcher::from_config(&config.fetch)?;
        let checkpoint = FileCheckpoint::new(&config.checkpoint.path);
        Ok(Self::new(
            config.site.url.clone(),
            config.crawl.clone(),
            fetcher,
            checkpoint,
        ))
    }
}

impl<T: Transport, C: CheckpointStore> Coordinator<T, C> {
    pub fn new(
        site_url: impl Into<String>,
        crawl: CrawlConfig,
        fetcher: Fetcher<T>,
        checkpoint: C,
    ) -> Self {
        Self {
            site_url: site_url.into(),
            crawl,
            fetcher,
            checkpoint,
        }
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn checkpoint(&self) -> &C {
        &self.checkpoint
    }

    pub fn fetcher(&self) -> &Fetcher<T> {
        &self.fetcher
    }

    /// Fetches the articles published since the last checkpoint
    ///
    /// Never fails: network and parse problems only shrink the result.
    pub async fn fetch_latest_articles(&self) -> Vec<Article> {
        self.run_cycle().await.articles
    }

    /// Runs one crawl cycle and reports what happened
    pub async fn run_cycle(&self) -> CycleReport {
        tracing::info!("Checking {} for new articles", self.site_url);

        let mut report = match self.checkpoint.load() {
            None => self.first_run().await,
            Some(checkpoint) => self.incremental_run(checkpoint).await,
        };
        report.finished_at = Utc::now();

        tracing::info!(
            "Cycle finished: {} new article(s), {} page(s) fetched, stop: {:?}, checkpoint {:?} -> {:?}",
            report.articles.len(),
            report.pages_fetched,
            report.stop_reason,
            report.checkpoint_before,
            report.checkpoint_after
        );
        report
    }

    /// Seeds the checkpoint from the first listing page
    ///
    /// The leading `first_run_skip` entries are passed over (the top slot is
    /// usually a pinned post) and the next one becomes the watermark.
    async fn first_run(&self) -> CycleReport {
        let mut report = CycleReport::start(RunMode::FirstRun, None);
        report.stop_reason = StopReason::NothingToSeed;
        tracing::info!("No checkpoint found, seeding from the first page only");

        let entries = match self.fetch_page(1).await {
            Some(entries) => entries,
            None => return report,
        };
        report.pages_fetched = 1;

        if entries.is_empty() {
            tracing::warn!("First page held no articles, nothing to seed");
            return report;
        }

        let skip = self.crawl.first_run_skip;
        let Some(entry) = entries.into_iter().nth(skip) else {
            tracing::warn!(
                "First page has no entry at position {}, nothing to seed",
                skip
            );
            return report;
        };

        let article = match entry.into_article() {
            Ok(article) => article,
            Err(reason) => {
                tracing::error!("Cannot seed from entry at position {}: {}", skip, reason);
                return report;
            }
        };

        if self.persist(article.id) {
            report.checkpoint_after = Some(article.id);
        }
        tracing::info!("First run complete, checkpoint seeded at {}", article.id);

        report.stop_reason = StopReason::Seeded;
        report.articles.push(article);
        report
    }

    /// Reads pages until one has nothing newer than `checkpoint`
    async fn incremental_run(&self, checkpoint: u64) -> CycleReport {
        let mut report = CycleReport::start(RunMode::Incremental, Some(checkpoint));
        let mut high_watermark = checkpoint;
        let max_pages = self.crawl.max_pages;

        for page in 1..=max_pages {
            let entries = match self.fetch_page(page).await {
                Some(entries) if !entries.is_empty() => entries,
                Some(_) => {
                    report.pages_fetched += 1;
                    tracing::info!("Page {} has no articles, stopping", page);
                    report.stop_reason = StopReason::EndOfListing { page };
                    break;
                }
                None => {
                    report.stop_reason = StopReason::EndOfListing { page };
                    break;
                }
            };
            report.pages_fetched += 1;

            let accepted = accept_new(entries, checkpoint);
            if accepted.is_empty() {
                tracing::info!("Page {} has no new articles, stopping", page);
                report.stop_reason = StopReason::CaughtUp { page };
                break;
            }

            for article in &accepted {
                tracing::info!("New article: {} (id={})", article.title, article.id);
                high_watermark = high_watermark.max(article.id);
            }
            report.articles.extend(accepted);

            if page < max_pages {
                tokio::time::sleep(self.crawl.politeness_delay()).await;
            }
        }

        if high_watermark > checkpoint && self.persist(high_watermark) {
            report.checkpoint_after = Some(high_watermark);
        }
        report
    }

    /// Fetches and parses one listing page; `None` if the fetch failed
    async fn fetch_page(&self, page: u32) -> Option<Vec<ListingEntry>> {
        let url = page_url(&self.site_url, page);
        tracing::info!("Fetching page {}: {}", page, url);

        let body = self.fetcher.fetch(&url).await?;
        let base = link_base(&self.site_url, page);
        let entries = parse_containers(&body, base.as_ref());
        tracing::debug!("Page {} has {} article containers", page, entries.len());
        Some(entries)
    }

    /// Writes the checkpoint, logging instead of failing
    fn persist(&self, id: u64) -> bool {
        match self.checkpoint.save(id) {
            Ok(()) => {
                tracing::info!("Checkpoint advanced to {}", id);
                true
            }
            Err(e) => {
                tracing::error!("Failed to save checkpoint {}: {}", id, e);
                false
            }
        }
    }
}

/// Keeps the entries that are valid articles newer than `checkpoint`
fn accept_new(entries: Vec<ListingEntry>, checkpoint: u64) -> Vec<Article> {
    entries
        .into_iter()
        .filter_map(|entry| match entry.into_article() {
            Ok(article) if article.id > checkpoint => Some(article),
            Ok(_) => None,
            Err(reason) => {
                tracing::debug!("Skipping listing entry: {}", reason);
                None
            }
        })
        .collect()
}
