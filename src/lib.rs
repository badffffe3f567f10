//! Resolves Rakuten Ichiba product page URLs into product records and
//! renders them as a Markdown summary and a pasteable HTML fragment.

pub mod archiver;
pub mod config;
pub mod display;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod html;
pub mod markdown;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod resolver;
pub mod types;

pub use config::{Config, LookupMode};
pub use error::{ConfigError, FetchError, ResolutionError};
pub use html::render_html;
pub use markdown::render_markdown;
pub use models::{ItemIdentifier, ProductRecord, Reported, ResultEntry};
pub use parser::Extractor;
pub use resolver::Resolver;
