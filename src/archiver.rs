use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ResultEntry;

pub const DEFAULT_SESSION_FILE: &str = ".rakuten_session.json";

/// The last generated batch, kept between CLI invocations so the HTML
/// fragment can be produced later without querying again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ResultEntry>,
    pub markdown: String,
}

impl Session {
    pub fn new(entries: Vec<ResultEntry>, markdown: String) -> Self {
        Self {
            generated_at: Utc::now(),
            entries,
            markdown,
        }
    }

    pub fn has_products(&self) -> bool {
        self.entries.iter().any(|e| e.product().is_some())
    }
}

pub fn save_session(session: &Session, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(session)?;
    write_text(path, &json)
}

pub fn load_session(path: &Path) -> Result<Session> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("no saved session at {}; run `generate` first", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("corrupt session file {}", path.display()))
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolutionError;
    use crate::models::{ProductRecord, Reported};

    fn sample_entries() -> Vec<ResultEntry> {
        vec![
            ResultEntry {
                url: "https://item.rakuten.co.jp/shopA/item123/".to_owned(),
                outcome: Ok(ProductRecord {
                    title: "Widget".to_owned(),
                    price: Reported::unknown(),
                    review_average: Reported::Known(4.5),
                    review_count: Reported::Known(10),
                    image_url: "https://img.test/w.jpg".to_owned(),
                    detail_url: "https://item.rakuten.co.jp/shopA/item123/".to_owned(),
                }),
            },
            ResultEntry {
                url: "nope".to_owned(),
                outcome: Err(ResolutionError::ExtractionFailure),
            },
        ]
    }

    #[test]
    fn session_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let session = Session::new(sample_entries(), "# doc\n".to_owned());

        save_session(&session, &path).unwrap();
        let loaded = load_session(&path).unwrap();

        assert_eq!(loaded, session);
        assert!(loaded.has_products());
    }

    #[test]
    fn missing_session_mentions_generate() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_session(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("generate"));
    }

    #[test]
    fn failures_only_session_has_no_products() {
        let entries = sample_entries().into_iter().skip(1).collect();
        assert!(!Session::new(entries, String::new()).has_products());
    }
}
