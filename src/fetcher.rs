use reqwest::blocking::Client;
use reqwest::{Url, redirect};

use crate::config::Config;
use crate::error::{ConfigError, FetchError};
use crate::types::{ApiErrorBody, ApiItem, ItemSearchResponse};

pub const ITEM_CODE_SEARCH_PATH: &str = "IchibaItem/ItemCodeSearch/20170628";
pub const ITEM_SEARCH_PATH: &str = "IchibaItem/Search/20220601";

const MAX_REDIRECTS: usize = 10;

/// Blocking client for the Ichiba item search API.
///
/// Each call issues exactly one GET and returns the first matching item, or
/// `None` when the response lists no items. No retries.
pub struct ItemClient {
    client: Client,
    application_id: String,
    base_url: Url,
}

impl ItemClient {
    /// # Errors
    ///
    /// Returns [`ConfigError::Http`] if the underlying client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let redirect_policy = redirect::Policy::custom(|attempt| {
            if attempt.previous().len() > MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else {
                attempt.follow()
            }
        });

        let client = Client::builder()
            .redirect(redirect_policy)
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            application_id: config.application_id.clone(),
            base_url: config.api_base.clone(),
        })
    }

    /// Looks an item up by its `shop:item` code.
    pub fn lookup_by_item_code(&self, item_code: &str) -> Result<Option<ApiItem>, FetchError> {
        tracing::debug!(item_code, "item code lookup");
        self.search(ITEM_CODE_SEARCH_PATH, &[("itemCode", item_code)])
    }

    /// Looks an item up by its product page URL.
    pub fn lookup_by_item_url(&self, item_url: &str) -> Result<Option<ApiItem>, FetchError> {
        tracing::debug!(item_url, "item url lookup");
        self.search(ITEM_SEARCH_PATH, &[("itemUrl", item_url)])
    }

    /// Keyword search limited to a single hit.
    pub fn search_by_keyword(&self, keyword: &str) -> Result<Option<ApiItem>, FetchError> {
        tracing::debug!(keyword, "keyword search");
        self.search(ITEM_SEARCH_PATH, &[("keyword", keyword), ("hits", "1")])
    }

    fn search(&self, path: &str, params: &[(&str, &str)]) -> Result<Option<ApiItem>, FetchError> {
        let url = self.build_url(path, params);
        let response: ItemSearchResponse = self.request_json(&url)?;
        Ok(response.into_first_item())
    }

    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.split('/'));
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("applicationId", &self.application_id);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("format", "json");
        }
        url
    }

    /// Sends the GET, requires a 2xx status and decodes the body.
    fn request_json<T: serde::de::DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|e| e.error_description.or(e.error));
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: redact(url),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Deserialize {
            context: redact(url),
            source,
        })
    }
}

/// Request URL without its query string, so the credential never lands in
/// error messages or archived sessions.
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
