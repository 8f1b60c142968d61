use crate::feed_builder;
use crate::reconciler::reconcile;
use crate::sources::Provider;
use crate::store::{load_json, save_json, Loaded};
use crate::traits::{FeedSource, Translator};
use crate::types::{Entry, ReconciliationState, RelayError, RelayPaths, Result, SiteMetadata};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{error, info};

/// A provider whose fetch or parse failed during a run.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: String,
    pub error: RelayError,
}

#[derive(Debug)]
pub struct RunReport {
    /// At least one new entry was recorded.
    pub updated: bool,
    pub succeeded: usize,
    pub failures: Vec<ProviderFailure>,
}

/// Polls every provider once and republishes the merged feed.
pub struct FeedRelay {
    paths: RelayPaths,
    providers: Vec<Provider>,
    source: Box<dyn FeedSource>,
    translator: Option<Box<dyn Translator>>,
    strict_state: bool,
}

impl FeedRelay {
    pub fn new(paths: RelayPaths, providers: Vec<Provider>, source: Box<dyn FeedSource>) -> Self {
        Self {
            paths,
            providers,
            source,
            translator: None,
            strict_state: false,
        }
    }

    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Refuse to run on a corrupt state or entries file instead of resetting it.
    pub fn with_strict_state(mut self, strict: bool) -> Self {
        self.strict_state = strict;
        self
    }

    pub fn paths(&self) -> &RelayPaths {
        &self.paths
    }

    /// Poll providers in order, then persist and rebuild the feed if any succeeded.
    ///
    /// Fails when every provider failed, or when persisting fails.
    pub async fn run(&self) -> Result<RunReport> {
        let site = load_json::<SiteMetadata>(&self.paths.site)?.or_default(&self.paths.site);
        let mut state: ReconciliationState = self.load_tracked(&self.paths.state)?;
        let mut entries: Vec<Entry> = self.load_tracked(&self.paths.entries)?;

        info!(
            "Polling {} providers ({} stored entries)",
            self.providers.len(),
            entries.len()
        );

        let mut report = RunReport {
            updated: false,
            succeeded: 0,
            failures: Vec::new(),
        };

        for provider in &self.providers {
            let item = match provider.fetch_latest(self.source.as_ref()).await {
                Ok(item) => item,
                Err(e) => {
                    error!("Failed to fetch provider {}: {}", provider.name, e);
                    report.failures.push(ProviderFailure {
                        provider: provider.name.clone(),
                        error: e,
                    });
                    continue;
                }
            };

            report.succeeded += 1;
            let outcome = reconcile(
                provider,
                &item,
                &mut entries,
                &mut state,
                self.translator.as_deref(),
            )
            .await;
            if outcome.created() {
                report.updated = true;
            }
        }

        if report.succeeded == 0 && !report.failures.is_empty() {
            let count = report.failures.len();
            let first = report.failures.remove(0).error;
            return Err(RelayError::AllProvidersFailed {
                count,
                first: Box::new(first),
            });
        }

        if report.succeeded > 0 {
            save_json(&self.paths.state, &state)?;
            save_json(&self.paths.entries, &entries)?;
            feed_builder::build(&site, &entries).write_to(&self.paths.feed)?;
        }

        info!(
            "Run finished: {} succeeded, {} failed, updated: {}",
            report.succeeded,
            report.failures.len(),
            report.updated
        );
        Ok(report)
    }

    fn load_tracked<T: DeserializeOwned + Default>(&self, path: &Path) -> Result<T> {
        let loaded: Loaded<T> = load_json(path)?;
        if self.strict_state {
            loaded.require_valid(path)
        } else {
            Ok(loaded.or_default(path))
        }
    }
}
