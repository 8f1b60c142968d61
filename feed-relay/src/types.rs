use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_SITE_TITLE: &str = "Wapuugotchi RSS";

/// Newest item of a provider's feed, as parsed from the upstream document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub description: String,
    /// `content:encoded` body, when the feed carries one.
    pub encoded: String,
    pub categories: Vec<String>,
}

/// Recorded entry. Fields missing from an older `entries.json` decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub link: String,
    pub content: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

/// Last identity seen per provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationState {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub latest: BTreeMap<String, String>,
}

/// Channel metadata. Keys absent from `site.json` keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMetadata {
    pub title: String,
    pub link: String,
    pub description: String,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_SITE_TITLE.to_string(),
            link: String::new(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub accept: String,
    pub timeout_seconds: u64,
    pub rate_limit_retry_delay_seconds: u64,
    pub rate_limit_retries: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept: "application/rss+xml, application/xml;q=0.9, text/xml;q=0.8, */*;q=0.7".to_string(),
            timeout_seconds: 15,
            rate_limit_retry_delay_seconds: 2,
            rate_limit_retries: 1,
        }
    }
}

/// Locations of the persisted artifacts and the generated feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayPaths {
    pub site: PathBuf,
    pub state: PathBuf,
    pub entries: PathBuf,
    pub feed: PathBuf,
}

impl RelayPaths {
    pub fn from_root(root: &Path) -> Self {
        let data_dir = root.join("data");
        Self {
            site: data_dir.join("site.json"),
            state: data_dir.join("state.json"),
            entries: data_dir.join("entries.json"),
            feed: root.join("feed.xml"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{label} api status: {status}")]
    Status { label: String, status: reqwest::StatusCode },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("XML write error: {0}")]
    Xml(String),

    #[error("Corrupt state file {}: {reason}", path.display())]
    CorruptState { path: PathBuf, reason: String },

    #[error("All {count} providers failed, first error: {first}")]
    AllProvidersFailed { count: usize, first: Box<RelayError> },
}

pub type Result<T> = std::result::Result<T, RelayError>;
