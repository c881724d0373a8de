//! One extraction run over several source sets and locales.
//!
//! Load → Extract → Merge → Serialize → Write. Every locale is merged and
//! serialized before the first write, so a failure leaves all files as they
//! were.

use std::path::Path;

use colored::Colorize;

use crate::{
    config::SourceConfig,
    disk::Disk,
    error::{Error, Result},
    extract::{CallScanner, KeyCollector},
    issues::Warning,
    locale::{LocaleDocument, LocaleStore, MergeMode, merge},
    scanner::{ScanFilter, scan_sources},
};

/// A named root scanned with its own translation functions and filters.
#[derive(Debug)]
pub struct SourceSet {
    pub name: String,
    /// Root relative to the project, prepended to reported file paths.
    pub prefix: String,
    pub disk: Disk,
    pub scanner: CallScanner,
    pub filter: ScanFilter,
}

impl SourceSet {
    pub fn from_config(
        project_root: &Path,
        source: &SourceConfig,
        ignores: &[String],
    ) -> Result<Self> {
        Ok(Self {
            name: source.name.clone(),
            prefix: source.root.trim_end_matches('/').to_string(),
            disk: Disk::new(project_root.join(&source.root)),
            scanner: CallScanner::new(&source.functions)?,
            filter: source.scan_filter(ignores),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Locales to update, in order. Duplicates are ignored.
    pub locales: Vec<String>,
    pub primary_locale: String,
    pub indent: String,
    /// Forces one merge mode for every locale.
    pub mode: Option<MergeMode>,
    pub dry_run: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleReport {
    pub locale: String,
    pub mode: MergeMode,
    pub added: Vec<String>,
    /// Entries in the document after the merge.
    pub total: usize,
    /// Whether the file was (or, on a dry run, would be) written.
    pub changed: bool,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub files_scanned: usize,
    /// Files that could not be accessed during enumeration.
    pub files_skipped: usize,
    /// Source sets whose root does not exist.
    pub missing_roots: Vec<String>,
    pub keys_found: usize,
    pub locales: Vec<LocaleReport>,
    pub warnings: Vec<Warning>,
}

/// A run that stopped on `error`, with the warnings reported up to that point.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct RunFailure {
    pub error: Error,
    pub warnings: Vec<Warning>,
}

struct PendingWrite {
    locale: String,
    text: String,
}

/// Extract keys from `sources` and merge them into each locale in `store`.
pub fn run(
    sources: &[SourceSet],
    store: &dyn LocaleStore,
    options: &ExtractOptions,
) -> std::result::Result<RunReport, RunFailure> {
    let mut report = RunReport::default();
    match run_phases(sources, store, options, &mut report) {
        Ok(()) => Ok(report),
        Err(error) => Err(RunFailure {
            error,
            warnings: report.warnings,
        }),
    }
}

fn run_phases(
    sources: &[SourceSet],
    store: &dyn LocaleStore,
    options: &ExtractOptions,
    report: &mut RunReport,
) -> Result<()> {
    let mut collector = KeyCollector::new();

    for source in sources {
        if !source.disk.exists() {
            if options.verbose {
                eprintln!(
                    "{} Source '{}' skipped, '{}' does not exist",
                    "note:".bold(),
                    source.name,
                    source.prefix
                );
            }
            report.missing_roots.push(source.name.clone());
            continue;
        }

        let scanned = scan_sources(
            &source.disk,
            &source.filter,
            &source.prefix,
            options.verbose,
        )?;
        report.files_skipped += scanned.skipped_count;
        for file in &scanned.files {
            if let Err(err) = collector.collect(&source.scanner, file) {
                report.warnings.extend_from_slice(collector.warnings());
                return Err(err);
            }
        }
    }

    let extraction = collector.finish();
    report.files_scanned = extraction.files_scanned;
    report.keys_found = extraction.keys.len();
    report.warnings = extraction.warnings;

    let mut pending = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for locale in &options.locales {
        if seen.contains(&locale.as_str()) {
            continue;
        }
        seen.push(locale);

        let stored = store.load(locale)?;
        let document = LocaleDocument::parse(locale, stored.as_deref().unwrap_or(""))?;
        let mode = options
            .mode
            .unwrap_or_else(|| MergeMode::for_locale(locale, &options.primary_locale));

        let outcome = merge(document, &extraction.keys, mode);

        for key in outcome.existing {
            report.warnings.push(Warning::ExistingKey {
                locale: locale.clone(),
                key,
            });
        }
        for mismatch in outcome.mismatches {
            report.warnings.push(Warning::ValueMismatch {
                locale: locale.clone(),
                key: mismatch.key,
                stored: mismatch.stored,
                extracted: mismatch.extracted,
            });
        }

        let changed = stored.is_none() || !outcome.added.is_empty();
        if changed {
            let text = outcome
                .document
                .to_json_string(&options.indent)
                .map_err(|source| Error::Serialization {
                    locale: locale.clone(),
                    source,
                })?;
            pending.push(PendingWrite {
                locale: locale.clone(),
                text,
            });
        }

        report.locales.push(LocaleReport {
            locale: locale.clone(),
            mode,
            added: outcome.added,
            total: outcome.document.len(),
            changed,
        });
    }

    if !options.dry_run {
        for write in pending {
            store.save(&write.locale, &write.text)?;
        }
    }

    Ok(())
}
