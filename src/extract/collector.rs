//! Deduplicates extracted keys across files and enforces the conflict rule.

use std::collections::HashMap;

use super::{
    call::{ParsedCall, extract_key_and_value},
    scanner::CallScanner,
};
use crate::{
    error::{Error, Result},
    issues::Warning,
    source::{SourceFile, SourceLocation},
};

/// A translation key found in source, with its first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedKey {
    pub key: String,
    pub value: Option<String>,
    pub location: SourceLocation,
}

/// Result of scanning a set of files.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Unique keys in first-occurrence order.
    pub keys: Vec<ExtractedKey>,
    pub warnings: Vec<Warning>,
    pub files_scanned: usize,
}

/// Accumulates keys over many files, possibly from different roots.
#[derive(Debug, Default)]
pub struct KeyCollector {
    keys: Vec<ExtractedKey>,
    index: HashMap<String, usize>,
    warnings: Vec<Warning>,
    files_scanned: usize,
}

impl KeyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one file and record its keys.
    ///
    /// Fails on the first call site that cannot be parsed, is not valid
    /// UTF-8, or conflicts with a key seen earlier.
    pub fn collect(&mut self, scanner: &CallScanner, file: &SourceFile) -> Result<()> {
        self.files_scanned += 1;
        let line_index = file.line_index();

        let calls = scanner.scan(&file.content).map_err(|e| Error::Parse {
            location: file.location_at(&line_index, e.offset),
            reason: "unterminated translation call".to_string(),
        })?;

        for call in calls {
            let location = file.location_at(&line_index, call.offset);
            let parsed = match std::str::from_utf8(call.text) {
                Ok(raw) => extract_key_and_value(raw).map_err(|e| e.0),
                Err(source) if !call.in_comment => {
                    return Err(Error::Encoding { location, source });
                }
                Err(source) => Err(format!("invalid UTF-8: {}", source)),
            };

            // Commented-out code only warns; valid calls in comments still count.
            let parsed = match parsed {
                Ok(parsed) => parsed,
                Err(reason) if call.in_comment => {
                    self.warnings
                        .push(Warning::CommentedCall { location, reason });
                    continue;
                }
                Err(reason) => return Err(Error::Parse { location, reason }),
            };

            match parsed {
                ParsedCall::Literal { key, value } => self.record(key, value, location)?,
                ParsedCall::Dynamic { expression } => {
                    self.warnings.push(Warning::DynamicKey {
                        location,
                        expression,
                    });
                }
                ParsedCall::Interpolated { key } => {
                    self.warnings
                        .push(Warning::InterpolatedKey { location, key });
                }
            }
        }

        Ok(())
    }

    fn record(
        &mut self,
        key: String,
        value: Option<String>,
        location: SourceLocation,
    ) -> Result<()> {
        let Some(&idx) = self.index.get(&key) else {
            self.index.insert(key.clone(), self.keys.len());
            self.keys.push(ExtractedKey {
                key,
                value,
                location,
            });
            return Ok(());
        };

        let Some(value) = value else {
            return Ok(());
        };

        let existing = &mut self.keys[idx];
        if existing.value.is_none() {
            existing.value = Some(value);
            existing.location = location;
            return Ok(());
        }

        if let Some(previous) = &existing.value
            && *previous != value
        {
            return Err(Error::Conflict {
                key,
                value,
                previous: previous.clone(),
                location,
                previous_location: existing.location.clone(),
            });
        }

        Ok(())
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn finish(self) -> Extraction {
        Extraction {
            keys: self.keys,
            warnings: self.warnings,
            files_scanned: self.files_scanned,
        }
    }
}

/// Extract and deduplicate translation keys from `files`, in order.
pub fn extract(files: &[SourceFile], scanner: &CallScanner) -> Result<Extraction> {
    let mut collector = KeyCollector::new();
    for file in files {
        collector.collect(scanner, file)?;
    }
    Ok(collector.finish())
}
