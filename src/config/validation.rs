use crate::config::types::{Config, CrawlerConfig, SearchConfig, SeedSection, UserAgentConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Deepest crawl the configuration accepts
const MAX_ALLOWED_DEPTH: u32 = 5;

/// Longest re-crawl interval the configuration accepts (one year)
const MAX_RECRAWL_INTERVAL_HOURS: u64 = 24 * 365;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_domain_prefix(&config.site.domain_prefix)?;
    validate_search_config(&config.search)?;
    validate_sections(&config.sections)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth > MAX_ALLOWED_DEPTH {
        return Err(ConfigError::Validation(format!(
            "max_depth must be at most {}, got {}",
            MAX_ALLOWED_DEPTH, config.max_depth
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.recrawl_interval_hours < 1
        || config.recrawl_interval_hours > MAX_RECRAWL_INTERVAL_HOURS
    {
        return Err(ConfigError::Validation(format!(
            "recrawl_interval_hours must be between 1 and {}, got {}",
            MAX_RECRAWL_INTERVAL_HOURS, config.recrawl_interval_hours
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates the link prefix used to keep the crawl on the documentation site
fn validate_domain_prefix(prefix: &str) -> Result<(), ConfigError> {
    let url = Url::parse(prefix)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid domain_prefix '{}': {}", prefix, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "domain_prefix '{}' must use HTTP or HTTPS",
            prefix
        )));
    }

    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.context_limit < 1 || config.result_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "search limits must be >= 1, got context_limit={} result_limit={}",
            config.context_limit, config.result_limit
        )));
    }
    Ok(())
}

/// Validates seed sections
fn validate_sections(sections: &[SeedSection]) -> Result<(), ConfigError> {
    if sections.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[sections]] entry is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for section in sections {
        if section.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "section with url '{}' must have a name",
                section.url
            )));
        }

        let url = Url::parse(&section.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid section URL '{}': {}", section.url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Section URL '{}' must use HTTP or HTTPS",
                section.url
            )));
        }

        if !seen.insert(url.to_string()) {
            return Err(ConfigError::Validation(format!(
                "Section URL '{}' is listed more than once",
                section.url
            )));
        }
    }

    Ok(())
}
