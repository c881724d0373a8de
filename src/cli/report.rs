//! Report formatting and printing utilities.
//!
//! Diagnostics are printed in cargo-style format: severity and message, a
//! clickable `path:line:col`, the source line and a caret under the call.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary};
use crate::{
    config::CONFIG_FILE_NAME, error::Error, issues::Warning, locale::MergeMode,
    source::SourceLocation,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warning,
}

struct Diagnostic<'a> {
    severity: Severity,
    message: String,
    rule: Option<String>,
    location: Option<&'a SourceLocation>,
    note: Option<String>,
}

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());

    if let Some(CommandSummary::Extract(summary)) = &result.summary {
        print_skipped_warning_to(summary.files_skipped, verbose, &mut io::stderr().lock());
    }
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    let mut diagnostics: Vec<Diagnostic> = result
        .warnings
        .iter()
        .filter(|w| verbose || !w.is_verbose_only())
        .map(warning_diagnostic)
        .collect();
    if let Some(failure) = &result.failure {
        diagnostics.push(failure_diagnostic(failure));
    }

    let max_line_width = diagnostics
        .iter()
        .filter_map(|d| d.location.map(|l| l.line))
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for diagnostic in &diagnostics {
        print_diagnostic(diagnostic, writer, max_line_width);
    }

    match &result.summary {
        Some(CommandSummary::Extract(summary)) => {
            let warning_count = diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Warning)
                .count();
            print_extract(summary, warning_count, verbose, writer);
        }
        Some(CommandSummary::Init(summary)) => print_init(summary, writer),
        None => {}
    }

    if result.failure.is_some() {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            "Extraction aborted, no locale files were written".red()
        );
    }
}

/// Print a warning about paths that could not be accessed.
pub fn print_skipped_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be accessed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn warning_diagnostic(warning: &Warning) -> Diagnostic<'_> {
    let note = match warning {
        Warning::InterpolatedKey { .. } => {
            Some("add the translation to the locale files by hand".to_string())
        }
        Warning::ValueMismatch { .. } => Some("the stored value is kept".to_string()),
        Warning::CommentedCall { .. } => Some("the call is inside a comment".to_string()),
        _ => None,
    };
    Diagnostic {
        severity: Severity::Warning,
        message: warning.message(),
        rule: Some(warning.rule().to_string()),
        location: warning.location(),
        note,
    }
}

fn failure_diagnostic(error: &Error) -> Diagnostic<'_> {
    let (message, note) = match error {
        Error::Parse { reason, .. } => (format!("cannot parse translation call: {}", reason), None),
        Error::Conflict {
            key,
            value,
            previous,
            previous_location,
            ..
        } => (
            format!("duplicate translation key \"{}\" with different values", key),
            Some(format!(
                "\"{}\" here, \"{}\" at {}",
                value, previous, previous_location
            )),
        ),
        Error::Encoding { source, .. } => {
            (format!("invalid UTF-8 in translation call: {}", source), None)
        }
        other => (other.to_string(), None),
    };
    Diagnostic {
        severity: Severity::Error,
        message,
        rule: None,
        location: error.location(),
        note,
    }
}

fn print_diagnostic<W: Write>(diagnostic: &Diagnostic, writer: &mut W, max_line_width: usize) {
    let severity_str = match diagnostic.severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    match &diagnostic.rule {
        Some(rule) => {
            let _ = writeln!(
                writer,
                "{}: {}  {}",
                severity_str,
                diagnostic.message,
                rule.dimmed().cyan()
            );
        }
        None => {
            let _ = writeln!(writer, "{}: {}", severity_str, diagnostic.message);
        }
    }

    let Some(location) = diagnostic.location else {
        if let Some(note) = &diagnostic.note {
            let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), note);
        }
        return;
    };

    // Clickable location: --> path:line:col
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);

    let caret_char = match diagnostic.severity {
        Severity::Error => "^".red(),
        Severity::Warning => "^".yellow(),
    };
    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        location.line.to_string().blue(),
        "|".blue(),
        location.source_line,
        width = max_line_width
    );

    // col is 1-based
    let prefix: String = location
        .source_line
        .chars()
        .take(location.col.saturating_sub(1))
        .collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret_char,
        width = max_line_width,
        padding = caret_padding
    );

    if let Some(note) = &diagnostic.note {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            note,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_extract<W: Write>(
    summary: &ExtractSummary,
    warning_count: usize,
    verbose: bool,
    writer: &mut W,
) {
    for locale in &summary.locales {
        let mode = match locale.mode {
            MergeMode::Humanize => "humanize",
            MergeMode::Verbatim => "verbatim",
        };
        let count = locale.added.len();
        let what = if count == 1 {
            "translation"
        } else {
            "translations"
        };
        let action = match (count, summary.is_dry_run) {
            (0, _) => "no new translations".to_string(),
            (_, true) => format!("{} new {} would be added", count, what),
            (_, false) => format!("{} new {} added", count, what),
        };
        let _ = writeln!(
            writer,
            "{} {}: {} {}",
            SUCCESS_MARK.green(),
            locale.locale.bold(),
            action,
            format!("[{}, total {}]", mode, locale.total).dimmed()
        );

        if summary.is_dry_run || verbose {
            for key in &locale.added {
                let _ = writeln!(writer, "    {} {}", "+".green(), key);
            }
        }
    }

    let mut line = format!(
        "Scanned {} source {}, found {} translation {}",
        summary.files_scanned,
        if summary.files_scanned == 1 {
            "file"
        } else {
            "files"
        },
        summary.keys_found,
        if summary.keys_found == 1 { "key" } else { "keys" }
    );
    if warning_count > 0 {
        line.push_str(&format!(
            ", {} {}",
            warning_count,
            if warning_count == 1 {
                "warning"
            } else {
                "warnings"
            }
        ));
    }
    if verbose && !summary.missing_roots.is_empty() {
        line.push_str(&format!(
            " (skipped missing: {})",
            summary.missing_roots.join(", ")
        ));
    }
    let _ = writeln!(writer, "{}", line);
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}
