use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Browser user agent sent with every listing request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Main configuration structure for Listing-Tide
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub checkpoint: CheckpointConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Builds a configuration for `site_url` with every other value defaulted
    pub fn for_site(site_url: impl Into<String>) -> Self {
        Self {
            site: SiteConfig {
                url: site_url.into(),
            },
            crawl: CrawlConfig::default(),
            fetch: FetchConfig::default(),
            checkpoint: CheckpointConfig::default(),
            schedule: ScheduleConfig::default(),
        }
    }
}

/// The listing being watched
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the listing; page 1 lives here
    pub url: String,
}

/// Pagination behavior
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of listing pages fetched per incremental cycle
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Number of leading entries skipped when choosing the first-run article
    #[serde(rename = "first-run-skip", default = "default_first_run_skip")]
    pub first_run_skip: usize,

    /// Pause between successive page fetches (milliseconds)
    #[serde(rename = "politeness-delay-ms", default = "default_politeness_delay_ms")]
    pub politeness_delay_ms: u64,
}

impl CrawlConfig {
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            first_run_skip: default_first_run_skip(),
            politeness_delay_ms: default_politeness_delay_ms(),
        }
    }
}

/// HTTP retry and timeout settings
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Total attempts per request, including the first
    #[serde(default = "default_retry")]
    pub retry: u32,

    /// Base backoff delay in seconds; doubles after each failed attempt
    #[serde(rename = "retry-delay-secs", default = "default_retry_delay_secs")]
    pub retry_delay_secs: f64,

    /// Overall per-attempt timeout covering connect and body read
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Overrides the browser user agent
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

impl FetchConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.retry_delay_secs).unwrap_or(Duration::ZERO)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retry: default_retry(),
            retry_delay_secs: default_retry_delay_secs(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

/// Where the watermark lives
#[derive(Debug, Clone, Deserialize)]
pub struct CheckpointConfig {
    /// Path to the file holding the highest delivered article id
    #[serde(default = "default_checkpoint_path")]
    pub path: PathBuf,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            path: default_checkpoint_path(),
        }
    }
}

/// Periodic run settings
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Minutes between crawl cycles
    #[serde(rename = "check-interval-minutes", default = "default_check_interval")]
    pub check_interval_minutes: u64,
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_minutes.saturating_mul(60))
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            check_interval_minutes: default_check_interval(),
        }
    }
}

fn default_max_pages() -> u32 {
    3
}

fn default_first_run_skip() -> usize {
    1
}

fn default_politeness_delay_ms() -> u64 {
    3000
}

fn default_retry() -> u32 {
    3
}

fn default_retry_delay_secs() -> f64 {
    1.0
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_checkpoint_path() -> PathBuf {
    PathBuf::from("latest_id.txt")
}

fn default_check_interval() -> u64 {
    360
}
