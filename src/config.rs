use std::time::Duration;

use clap::ValueEnum;
use reqwest::Url;

use crate::error::ConfigError;
use crate::parser::DEFAULT_MARKETPLACE_DOMAIN;

pub const DEFAULT_API_BASE: &str = "https://app.rakuten.co.jp/services/api/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_USER_AGENT: &str = "rakuten-summary/0.1";

/// Which upstream entrypoint the resolver queries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LookupMode {
    /// Extract `shop:item` from the URL and query by item code. No fallback.
    #[default]
    ItemCode,
    /// Query by the raw URL, then fall back to a keyword search.
    ItemUrl,
}

/// Everything the resolver needs, resolved once at startup and passed in
/// explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub application_id: String,
    pub lookup_mode: LookupMode,
    pub timeout: Duration,
    pub api_base: Url,
    pub marketplace_domain: String,
    pub user_agent: String,
}

impl Config {
    /// Config with production defaults for everything but the credential.
    pub fn new(application_id: &str) -> Result<Self, ConfigError> {
        ConfigBuilder::new(application_id).build()
    }

    pub fn builder(application_id: &str) -> ConfigBuilder {
        ConfigBuilder::new(application_id)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    application_id: String,
    lookup_mode: LookupMode,
    timeout_secs: u64,
    api_base: String,
    marketplace_domain: String,
    user_agent: String,
}

impl ConfigBuilder {
    fn new(application_id: &str) -> Self {
        Self {
            application_id: application_id.to_owned(),
            lookup_mode: LookupMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_base: DEFAULT_API_BASE.to_owned(),
            marketplace_domain: DEFAULT_MARKETPLACE_DOMAIN.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    #[must_use]
    pub fn lookup_mode(mut self, mode: LookupMode) -> Self {
        self.lookup_mode = mode;
        self
    }

    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn api_base(mut self, base: &str) -> Self {
        base.clone_into(&mut self.api_base);
        self
    }

    #[must_use]
    pub fn marketplace_domain(mut self, domain: &str) -> Self {
        domain.clone_into(&mut self.marketplace_domain);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, ua: &str) -> Self {
        ua.clone_into(&mut self.user_agent);
        self
    }

    /// Validates and produces the final [`Config`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingApplicationId`] if the credential is blank.
    /// - [`ConfigError::InvalidBaseUrl`] if the API base does not parse.
    /// - [`ConfigError::InvalidDomain`] if the marketplace domain is blank.
    pub fn build(self) -> Result<Config, ConfigError> {
        let application_id = self.application_id.trim().to_owned();
        if application_id.is_empty() {
            return Err(ConfigError::MissingApplicationId);
        }

        // Exactly one trailing slash, so joining endpoint paths appends
        // instead of replacing the last segment.
        let normalised = format!("{}/", self.api_base.trim().trim_end_matches('/'));
        let api_base = Url::parse(&normalised).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api_base.clone(),
            reason: e.to_string(),
        })?;

        let marketplace_domain = self.marketplace_domain.trim().to_owned();
        if marketplace_domain.is_empty() {
            return Err(ConfigError::InvalidDomain(marketplace_domain));
        }

        Ok(Config {
            application_id,
            lookup_mode: self.lookup_mode,
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            api_base,
            marketplace_domain,
            user_agent: self.user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = Config::new("app-123").unwrap();
        assert_eq!(config.application_id, "app-123");
        assert_eq!(config.lookup_mode, LookupMode::ItemCode);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.api_base.as_str(), DEFAULT_API_BASE);
        assert_eq!(config.marketplace_domain, "rakuten.co.jp");
    }

    #[test]
    fn blank_application_id_is_rejected() {
        assert!(matches!(
            Config::new("   "),
            Err(ConfigError::MissingApplicationId)
        ));
    }

    #[test]
    fn api_base_gets_single_trailing_slash() {
        let config = Config::builder("id")
            .api_base("http://127.0.0.1:9999/api//")
            .build()
            .unwrap();
        assert_eq!(config.api_base.as_str(), "http://127.0.0.1:9999/api/");
    }

    #[test]
    fn invalid_api_base_is_rejected() {
        let err = Config::builder("id").api_base("not a url").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = Config::builder("id").timeout_secs(0).build().unwrap();
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
