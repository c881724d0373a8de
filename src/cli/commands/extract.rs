use std::{env, path::PathBuf};

use anyhow::{Context, Result};

use super::super::args::ExtractCommand;
use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::{
    config::load_config,
    disk::Disk,
    locale::DiskLocaleStore,
    pipeline::{self, ExtractOptions, SourceSet},
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let common = &cmd.common;
    let start_dir = match &common.source_root {
        Some(root) => root.clone(),
        None => env::current_dir().context("Failed to read current directory")?,
    };

    let loaded = load_config(&start_dir)?;
    let config = loaded.config;
    let project_root: PathBuf = loaded
        .path
        .as_deref()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or(start_dir);

    if common.verbose {
        match &loaded.path {
            Some(path) => eprintln!("Using config {}", path.display()),
            None => eprintln!("No config file found, using defaults"),
        }
    }

    let sources = config
        .sources
        .iter()
        .map(|source| SourceSet::from_config(&project_root, source, &config.ignores))
        .collect::<crate::error::Result<Vec<_>>>()?;

    let lang_root = common
        .lang_root
        .clone()
        .unwrap_or_else(|| project_root.join(&config.lang_root));
    let store = DiskLocaleStore::new(Disk::new(lang_root));

    let primary_locale = common
        .primary_locale
        .clone()
        .unwrap_or(config.primary_locale);
    let lang = cmd.lang.clone().unwrap_or(config.locale);

    let options = ExtractOptions {
        locales: vec![primary_locale.clone(), lang],
        primary_locale,
        indent: config.indent,
        mode: cmd.mode,
        dry_run: cmd.dry_run,
        verbose: common.verbose,
    };

    match pipeline::run(&sources, &store, &options) {
        Ok(report) => Ok(CommandResult::completed(
            CommandSummary::Extract(ExtractSummary {
                files_scanned: report.files_scanned,
                files_skipped: report.files_skipped,
                keys_found: report.keys_found,
                missing_roots: report.missing_roots,
                locales: report.locales,
                is_dry_run: cmd.dry_run,
            }),
            report.warnings,
        )),
        Err(failure) if failure.error.location().is_some() => {
            Ok(CommandResult::failed(failure.error, failure.warnings))
        }
        Err(failure) => Err(failure.error).with_context(|| {
            format!(
                "Extraction failed, no locale files were written in {}",
                store.disk().root().display()
            )
        }),
    }
}
