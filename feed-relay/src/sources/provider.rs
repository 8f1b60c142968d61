use crate::parser::FeedParser;
use crate::traits::FeedSource;
use crate::types::{Item, Result};
use tracing::info;

/// How a provider's item content becomes entry content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRule {
    /// Use the plain description.
    Description,
    /// Prefer `content:encoded`, falling back to the description.
    EncodedOrDescription,
    /// Keep only the first embedded `<iframe>` of `content:encoded`, resized to fit.
    FirstIframe,
}

/// One upstream feed polled for its newest item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub name: String,
    pub url: String,
    pub label: String,
    pub translate: bool,
    pub content_rule: ContentRule,
}

impl Provider {
    pub fn new(name: &str, url: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            label: label.to_string(),
            translate: false,
            content_rule: ContentRule::Description,
        }
    }

    pub fn with_translation(mut self, translate: bool) -> Self {
        self.translate = translate;
        self
    }

    pub fn with_content_rule(mut self, rule: ContentRule) -> Self {
        self.content_rule = rule;
        self
    }

    pub async fn fetch_latest(&self, source: &dyn FeedSource) -> Result<Item> {
        let body = source.fetch(&self.url, &self.label).await?;
        let item = FeedParser::parse_latest(&body)?;
        info!("Latest item from {}: {:?}", self.name, item.title);
        Ok(item)
    }
}
