use crate::sources::ContentRule;
use crate::traits::Translator;
use crate::types::Item;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static IFRAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe>").unwrap());
static IFRAME_WIDTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\swidth\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]*)"#).unwrap());
static IFRAME_HEIGHT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\sheight\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]*)"#).unwrap());

/// An item with its categories cleaned and its content selected.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub content: String,
    pub categories: Vec<String>,
}

impl NormalizedItem {
    /// The item is worth recording: it has a title and, for video providers, a player.
    pub fn is_usable(&self, rule: ContentRule) -> bool {
        if self.title.trim().is_empty() {
            return false;
        }
        rule != ContentRule::FirstIframe || !self.content.is_empty()
    }
}

pub fn normalize(item: &Item, rule: ContentRule) -> NormalizedItem {
    NormalizedItem {
        title: item.title.clone(),
        link: item.link.clone(),
        pub_date: item.pub_date.clone(),
        content: select_content(item, rule),
        categories: clean_categories(&item.categories),
    }
}

/// Trim labels and drop blank ones. Order and duplicates are kept.
pub fn clean_categories(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn select_content(item: &Item, rule: ContentRule) -> String {
    match rule {
        ContentRule::Description => item.description.trim().to_string(),
        ContentRule::EncodedOrDescription => {
            pick_encoded_or_description(&item.encoded, &item.description)
        }
        ContentRule::FirstIframe => extract_first_iframe(&item.encoded),
    }
}

fn pick_encoded_or_description(encoded: &str, description: &str) -> String {
    let encoded = encoded.trim();
    if !encoded.is_empty() {
        return encoded.to_string();
    }
    description.trim().to_string()
}

/// First `<iframe>…</iframe>` element of `value`, normalized; empty when there is none.
pub fn extract_first_iframe(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    match IFRAME_PATTERN.find(value) {
        Some(found) => normalize_iframe(found.as_str().trim()),
        None => {
            debug!("No iframe found in content");
            String::new()
        }
    }
}

/// Replace explicit sizing on the opening tag with a responsive one.
///
/// Everything after the opening tag is kept verbatim. Fragments without an
/// opening-tag boundary are returned unchanged.
pub fn normalize_iframe(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let Some(tag_end) = value.find('>') else {
        return value.to_string();
    };
    let (open_tag, rest) = value.split_at(tag_end);

    let open_tag = IFRAME_WIDTH_PATTERN.replace_all(open_tag, "");
    let open_tag = IFRAME_HEIGHT_PATTERN.replace_all(&open_tag, "");
    let open_tag = open_tag.trim();
    if !open_tag.to_ascii_lowercase().contains("<iframe") {
        return value.to_string();
    }

    format!(r#"{} width="100%" height="auto"{}"#, open_tag, rest)
}

pub fn contains_iframe(text: &str) -> bool {
    text.to_ascii_lowercase().contains("<iframe")
}

/// Translate `text` when a translator is given. Markup with embedded
/// players is never sent, and failures fall back to the original text.
pub async fn translate_content(text: &str, translator: Option<&dyn Translator>) -> String {
    let text = text.trim();
    let Some(translator) = translator else {
        return text.to_string();
    };
    if text.is_empty() || contains_iframe(text) {
        return text.to_string();
    }

    match translator.translate(text).await {
        Ok(translated) if !translated.trim().is_empty() => translated.trim().to_string(),
        Ok(_) => {
            warn!("{} returned an empty translation, keeping original", translator.translator_name());
            text.to_string()
        }
        Err(e) => {
            warn!("translation failed: {}", e);
            text.to_string()
        }
    }
}
