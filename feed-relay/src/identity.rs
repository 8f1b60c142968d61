use crate::types::Item;
use chrono::Utc;
use sha2::{Digest, Sha256};

/// Number of digest bytes kept in an identity (128 bits).
const IDENTITY_BYTES: usize = 16;

/// Stable identity of `item` within `provider`.
///
/// The basis is the publish date, else the link. Items with neither get a
/// timestamp basis and therefore a fresh identity on every call.
pub fn assign_identity(provider: &str, item: &Item) -> String {
    let basis = identity_basis(provider, item);
    hash_identity(&format!("{}|{}", provider, basis))
}

fn identity_basis(provider: &str, item: &Item) -> String {
    let pub_date = item.pub_date.trim();
    if !pub_date.is_empty() {
        return pub_date.to_string();
    }
    let link = item.link.trim();
    if !link.is_empty() {
        return link.to_string();
    }
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}-{}", provider, nanos)
}

fn hash_identity(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..IDENTITY_BYTES])
}
