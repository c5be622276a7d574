use crate::config::types::{CheckpointConfig, Config, CrawlConfig, FetchConfig, ScheduleConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_url(&config.site.url)?;
    validate_crawl_config(&config.crawl)?;
    validate_fetch_config(&config.fetch)?;
    validate_checkpoint_config(&config.checkpoint)?;
    validate_schedule_config(&config.schedule)?;
    Ok(())
}

/// The listing URL must be absolute HTTP(S)
fn validate_site_url(site_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(site_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site url '{}': {}", site_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Site url '{}' must use http or https",
            site_url
        )));
    }

    Ok(())
}

fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.retry < 1 {
        return Err(ConfigError::Validation(format!(
            "retry must be >= 1, got {}",
            config.retry
        )));
    }

    if !config.retry_delay_secs.is_finite() || config.retry_delay_secs < 0.0 {
        return Err(ConfigError::Validation(format!(
            "retry-delay-secs must be a non-negative number, got {}",
            config.retry_delay_secs
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if let Some(agent) = &config.user_agent {
        if agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agent cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_checkpoint_config(config: &CheckpointConfig) -> Result<(), ConfigError> {
    if config.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "checkpoint path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_schedule_config(config: &ScheduleConfig) -> Result<(), ConfigError> {
    if config.check_interval_minutes < 1 {
        return Err(ConfigError::Validation(format!(
            "check-interval-minutes must be >= 1, got {}",
            config.check_interval_minutes
        )));
    }

    Ok(())
}
