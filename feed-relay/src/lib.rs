pub mod types;
pub mod traits;
pub mod fetcher;
pub mod parser;
pub mod sources;
pub mod identity;
pub mod normalize;
pub mod reconciler;
pub mod feed_builder;
pub mod store;
pub mod translator;
pub mod relay;
pub mod rss_utils;

pub use types::*;
pub use traits::{FeedSource, Translator};
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use sources::{default_providers, ContentRule, Provider};
pub use identity::assign_identity;
pub use reconciler::{reconcile, Reconciliation};
pub use feed_builder::{build, FeedDocument, FeedItem};
pub use translator::{LlmTranslator, TranslatorConfig};
pub use relay::{FeedRelay, ProviderFailure, RunReport};
