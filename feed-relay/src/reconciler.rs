use crate::identity::assign_identity;
use crate::normalize::{normalize, translate_content};
use crate::rss_utils::time::entry_created_at;
use crate::sources::Provider;
use crate::traits::Translator;
use crate::types::{Entry, Item, ReconciliationState};
use tracing::{debug, info};

/// What reconciling one provider's latest item did to the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing usable: no title, or no player for a video provider.
    Skipped,
    /// Already recorded; only the provider's latest marker was refreshed.
    Duplicate,
    /// Appended as a new entry.
    Created,
}

impl Reconciliation {
    pub fn created(self) -> bool {
        self == Reconciliation::Created
    }
}

/// Record `item` as a new entry unless an entry with the same identity exists.
///
/// `state.latest[provider]` is set whenever the item is usable. The
/// translator is consulted only for new entries of translatable providers.
pub async fn reconcile(
    provider: &Provider,
    item: &Item,
    entries: &mut Vec<Entry>,
    state: &mut ReconciliationState,
    translator: Option<&dyn Translator>,
) -> Reconciliation {
    if item.title.trim().is_empty() {
        debug!("{} yielded no item", provider.name);
        return Reconciliation::Skipped;
    }

    let normalized = normalize(item, provider.content_rule);
    if !normalized.is_usable(provider.content_rule) {
        info!("{}: no usable content in {:?}, skipping", provider.name, normalized.title);
        return Reconciliation::Skipped;
    }

    let id = assign_identity(&provider.name, item);
    if entries.iter().any(|entry| entry.id == id) {
        debug!("{}: {} already recorded", provider.name, id);
        state.latest.insert(provider.name.clone(), id);
        return Reconciliation::Duplicate;
    }

    let translator = if provider.translate { translator } else { None };
    let content = translate_content(&normalized.content, translator).await;

    entries.push(Entry {
        id: id.clone(),
        title: normalized.title,
        link: normalized.link,
        content,
        created_at: entry_created_at(&normalized.pub_date),
        categories: normalized.categories,
    });
    info!("{}: recorded new entry {}", provider.name, id);

    state.latest.insert(provider.name.clone(), id);
    Reconciliation::Created
}
