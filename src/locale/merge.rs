//! Append-only merge of extracted keys into a locale document.

use clap::ValueEnum;

use super::document::LocaleDocument;
use crate::extract::ExtractedKey;

/// How the default value of a key without an explicit value is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergeMode {
    /// Last key segment as-is: `settings.resetPassword` → `resetPassword`.
    Verbatim,
    /// Last key segment as words: `settings.resetPassword` → `Reset password`.
    Humanize,
}

impl MergeMode {
    /// The primary locale gets readable defaults, the others keep the raw
    /// segment so untranslated entries stand out.
    pub fn for_locale(locale: &str, primary_locale: &str) -> Self {
        if locale.eq_ignore_ascii_case(primary_locale) {
            MergeMode::Humanize
        } else {
            MergeMode::Verbatim
        }
    }
}

/// A stored value that differs from an explicit value found in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueMismatch {
    pub key: String,
    pub stored: String,
    pub extracted: String,
}

#[derive(Debug)]
pub struct MergeOutcome {
    pub document: LocaleDocument,
    /// Newly appended keys, in order.
    pub added: Vec<String>,
    /// Extracted keys that were already present.
    pub existing: Vec<String>,
    pub mismatches: Vec<ValueMismatch>,
}

/// Append every extracted key missing from `existing`.
///
/// Entries already in the document keep their value and position.
pub fn merge(
    existing: LocaleDocument,
    extracted: &[ExtractedKey],
    mode: MergeMode,
) -> MergeOutcome {
    let mut document = existing;
    let mut added = Vec::new();
    let mut present = Vec::new();
    let mut mismatches = Vec::new();

    for item in extracted {
        if document.contains_key(&item.key) {
            if let (Some(stored), Some(value)) = (document.get_str(&item.key), &item.value)
                && stored != value.as_str()
            {
                mismatches.push(ValueMismatch {
                    key: item.key.clone(),
                    stored: stored.to_string(),
                    extracted: value.clone(),
                });
            }
            present.push(item.key.clone());
            continue;
        }

        let value = match &item.value {
            Some(value) => value.clone(),
            None => default_value(&item.key, mode),
        };
        document.append(item.key.clone(), value);
        added.push(item.key.clone());
    }

    MergeOutcome {
        document,
        added,
        existing: present,
        mismatches,
    }
}

/// Default value derived from the last dot-delimited segment of `key`.
pub fn default_value(key: &str, mode: MergeMode) -> String {
    let segment = key.rsplit('.').next().unwrap_or(key);
    match mode {
        MergeMode::Verbatim => segment.to_string(),
        MergeMode::Humanize => humanize(segment),
    }
}

/// Turn an identifier-like segment into a sentence-cased phrase.
///
/// Splits on `_`, `-`, whitespace and before uppercase letters, then
/// lowercases and capitalizes the first letter:
/// `resetPassword`, `reset_password` and `ResetPassword` all become
/// `Reset password`.
pub fn humanize(segment: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in segment.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    let sentence = words.join(" ");
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
