use crate::types::{Item, RelayError, Result};
use feed_rs::parser;
use tracing::debug;

/// Maps an RSS/Atom document onto the newest [`Item`] it carries.
pub struct FeedParser;

impl FeedParser {
    /// Parse `body` and return its first entry, or an empty item when the feed has none.
    pub fn parse_latest(body: &[u8]) -> Result<Item> {
        debug!("Parsing feed content ({} bytes)", body.len());

        let feed = parser::parse(body)
            .map_err(|e| RelayError::Parse(format!("Failed to parse feed: {}", e)))?;

        match feed.entries.into_iter().next() {
            Some(entry) => Ok(Self::to_item(entry)),
            None => {
                debug!("Feed has no entries");
                Ok(Item::default())
            }
        }
    }

    fn to_item(entry: feed_rs::model::Entry) -> Item {
        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();

        Item {
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            link,
            pub_date: entry.published.map(|dt| dt.to_rfc2822()).unwrap_or_default(),
            description: entry.summary.map(|s| s.content).unwrap_or_default(),
            encoded: entry.content.and_then(|c| c.body).unwrap_or_default(),
            categories: entry.categories.into_iter().map(|c| c.term).collect(),
        }
    }
}
