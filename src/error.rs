use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single URL could not be turned into a product record.
///
/// Every failure inside the resolver is converted into one of these at the
/// per-query boundary; the `Display` text is what ends up in the artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ResolutionError {
    #[error("URLから商品コードを抽出できませんでした")]
    ExtractionFailure,

    #[error("商品が見つかりませんでした")]
    NotFound,

    #[error("商品が見つかりませんでした（URL検索とキーワード検索の両方で該当なし）")]
    NotFoundAfterFallback,

    #[error("通信エラー: {0}")]
    Transport(String),

    #[error("必須項目がありません: {0}")]
    FieldMissing(String),
}

impl From<FetchError> for ResolutionError {
    fn from(err: FetchError) -> Self {
        ResolutionError::Transport(err.to_string())
    }
}

/// Errors raised while talking to the item search API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}{}", detail_suffix(.detail))]
    Status {
        status: u16,
        url: String,
        detail: Option<String>,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

/// Startup configuration problems. These abort the process before any
/// query is attempted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("applicationId is not set (use --application-id or RAKUTEN_APPLICATION_ID)")]
    MissingApplicationId,

    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid marketplace domain '{0}'")]
    InvalidDomain(String),

    #[error("HTTP client construction failed: {0}")]
    Http(#[from] reqwest::Error),
}
