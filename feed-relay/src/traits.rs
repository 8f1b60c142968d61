use crate::types::Result;
use async_trait::async_trait;

/// Retrieves raw feed documents.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the document at `url`. `label` names the upstream in errors and logs.
    async fn fetch(&self, url: &str, label: &str) -> Result<Vec<u8>>;
}

/// Translates entry content before it is recorded.
#[async_trait]
pub trait Translator: Send + Sync {
    fn translator_name(&self) -> String;

    /// Translate `text`, which may contain HTML markup that must survive intact.
    async fn translate(&self, text: &str) -> Result<String>;
}
