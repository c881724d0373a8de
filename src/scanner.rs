//! Enumerates the source files of one root.

use colored::Colorize;
use glob::Pattern;

use crate::{
    disk::{Disk, EntryKind},
    error::{Error, Result},
    source::SourceFile,
};

/// Which files below a root are scanned.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    /// Allowed extensions without the dot. Empty allows every file.
    pub extensions: Vec<String>,
    /// Directory names skipped at any depth, e.g. `node_modules`.
    pub excluded_dirs: Vec<String>,
    /// Paths relative to the root: literal directory prefixes, or glob
    /// patterns when they contain `*` or `?`.
    pub ignores: Vec<String>,
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub struct ScanResult {
    /// Files in sorted path order.
    pub files: Vec<SourceFile>,
    pub skipped_count: usize,
}

/// Read every file below `disk`'s root that passes `filter`.
///
/// `prefix` is prepended to the reported file paths so diagnostics point
/// at paths relative to the project rather than to the root.
pub fn scan_sources(
    disk: &Disk,
    filter: &ScanFilter,
    prefix: &str,
    verbose: bool,
) -> Result<ScanResult> {
    let mut literal_ignores: Vec<&str> = Vec::new();
    let mut glob_ignores: Vec<Pattern> = Vec::new();
    for p in &filter.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_ignores.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignores.push(p.trim_end_matches('/'));
        }
    }

    let is_ignored = |path: &str| {
        literal_ignores
            .iter()
            .any(|ignore| path == *ignore || path.starts_with(&format!("{}/", ignore)))
            || glob_ignores.iter().any(|p| p.matches(path))
    };

    let entries = disk.list("", |dir| {
        let name = dir.rsplit('/').next().unwrap_or(dir);
        let excluded = filter.excluded_dirs.iter().any(|d| d == name) || is_ignored(dir);
        if excluded && verbose {
            eprintln!("{} Directory '{}' is excluded", "note:".bold(), dir);
        }
        !excluded
    });

    let mut files = Vec::new();
    let mut skipped_count = 0;

    for entry in entries {
        match entry.kind {
            EntryKind::File => {}
            EntryKind::Dir | EntryKind::Other => continue,
            EntryKind::Unreadable(reason) => {
                skipped_count += 1;
                if verbose {
                    eprintln!(
                        "{} Cannot access path: {}",
                        "warning:".bold().yellow(),
                        reason
                    );
                }
                continue;
            }
        }

        if is_ignored(&entry.path) || !has_allowed_extension(&entry.path, &filter.extensions) {
            continue;
        }

        let content = disk
            .read(&entry.path)?
            .ok_or_else(|| Error::io(disk.path(&entry.path), std::io::ErrorKind::NotFound.into()))?;
        let path = if prefix.is_empty() {
            entry.path
        } else {
            format!("{}/{}", prefix.trim_end_matches('/'), entry.path)
        };
        files.push(SourceFile::new(path, content));
    }

    Ok(ScanResult {
        files,
        skipped_count,
    })
}

fn has_allowed_extension(path: &str, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => extensions.iter().any(|e| e == ext),
        _ => false,
    }
}
