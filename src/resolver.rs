//! Turns product page URLs into [`ProductRecord`]s.
//!
//! Queries run one at a time, in input order. Every failure is captured in
//! the query's [`ResultEntry`]; a batch always yields one entry per input.

use crate::config::{Config, LookupMode};
use crate::error::{ConfigError, ResolutionError};
use crate::fetcher::ItemClient;
use crate::models::{ProductRecord, ResultEntry};
use crate::normalize::normalize_item;
use crate::parser::{Extractor, fallback_keyword};

pub struct Resolver {
    client: ItemClient,
    extractor: Extractor,
    mode: LookupMode,
}

impl Resolver {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the marketplace domain is unusable or
    /// the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            client: ItemClient::new(config)?,
            extractor: Extractor::new(&config.marketplace_domain)?,
            mode: config.lookup_mode,
        })
    }

    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    /// Resolves a single product page URL.
    ///
    /// # Errors
    ///
    /// Returns the [`ResolutionError`] describing why no record could be
    /// produced. Nothing is retried.
    pub fn resolve(&self, url: &str) -> Result<ProductRecord, ResolutionError> {
        let url = url.trim();
        let item = match self.mode {
            LookupMode::ItemCode => {
                let item_code = self.extractor.extract(url)?.item_code();
                self.client
                    .lookup_by_item_code(&item_code)?
                    .ok_or(ResolutionError::NotFound)?
            }
            LookupMode::ItemUrl => match self.client.lookup_by_item_url(url)? {
                Some(item) => item,
                None => {
                    let keyword = fallback_keyword(url).ok_or(ResolutionError::NotFound)?;
                    tracing::info!(url, keyword, "url lookup found nothing, trying keyword search");
                    self.client
                        .search_by_keyword(&keyword)?
                        .ok_or(ResolutionError::NotFoundAfterFallback)?
                }
            },
        };
        normalize_item(item)
    }

    /// Resolves every URL in order, one entry per input.
    pub fn resolve_batch<I, S>(&self, urls: I) -> Vec<ResultEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        urls.into_iter()
            .enumerate()
            .map(|(idx, url)| {
                let url = url.as_ref().trim();
                let outcome = self.resolve(url);
                match &outcome {
                    Ok(record) => tracing::info!(index = idx + 1, url, title = %record.title, "resolved"),
                    Err(error) => tracing::warn!(index = idx + 1, url, %error, "resolution failed"),
                }
                ResultEntry {
                    url: url.to_owned(),
                    outcome,
                }
            })
            .collect()
    }
}

/// Splits free-form text into URLs: one per line, trimmed, blank lines
/// dropped. An empty result is for the caller to report.
pub fn split_urls(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
