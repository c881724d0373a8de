use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::scanner::ScanFilter;

pub const CONFIG_FILE_NAME: &str = ".toolkitrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the `<locale>.json` files, relative to the project root.
    #[serde(default = "default_lang_root")]
    pub lang_root: String,
    /// Locale written with humanized default values.
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    /// Locale written next to the primary one when `--lang` is not given.
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_indent")]
    pub indent: String,
    /// Ignore patterns applied to every source set.
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

/// One scanned root and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    pub name: String,
    pub root: String,
    #[serde(default = "default_functions")]
    pub functions: Vec<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub excluded_dirs: Vec<String>,
}

impl SourceConfig {
    fn backend(name: &str, root: &str) -> Self {
        Self {
            name: name.to_string(),
            root: root.to_string(),
            functions: default_functions(),
            extensions: vec!["php".to_string()],
            excluded_dirs: Vec::new(),
        }
    }

    fn frontend(name: &str, root: &str) -> Self {
        Self {
            name: name.to_string(),
            root: root.to_string(),
            functions: vec!["$_".to_string()],
            extensions: ["vue", "js", "ts"].map(String::from).to_vec(),
            excluded_dirs: ["node_modules", "dist", "assets", "static", ".nuxt", ".output"]
                .map(String::from)
                .to_vec(),
        }
    }

    /// File filter for this source, with the global ignores added.
    pub fn scan_filter(&self, global_ignores: &[String]) -> ScanFilter {
        ScanFilter {
            extensions: self
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            excluded_dirs: self.excluded_dirs.clone(),
            ignores: global_ignores.to_vec(),
        }
    }
}

fn default_lang_root() -> String {
    "lang".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_locale() -> String {
    "cs".to_string()
}

fn default_indent() -> String {
    "    ".to_string()
}

fn default_functions() -> Vec<String> {
    vec!["__".to_string()]
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::backend("nova", "app/Nova"),
        SourceConfig::backend("livewire", "app/Livewire"),
        SourceConfig::backend("filament", "app/Filament"),
        SourceConfig::backend("views", "resources/views"),
        SourceConfig::frontend("frontend", "resources/nuxt/admin"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lang_root: default_lang_root(),
            primary_locale: default_primary_locale(),
            locale: default_locale(),
            indent: default_indent(),
            ignores: Vec::new(),
            sources: default_sources(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            bail!("'indent' may only contain spaces and tabs");
        }
        if self.primary_locale.trim().is_empty() {
            bail!("'primaryLocale' must not be empty");
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            if !names.insert(source.name.as_str()) {
                bail!("Duplicate source name: \"{}\"", source.name);
            }
            if source.functions.is_empty() {
                bail!("Source \"{}\" has no translation functions", source.name);
            }
            for function in &source.functions {
                if !is_function_name(function) {
                    bail!(
                        "Invalid translation function name in source \"{}\": \"{}\"",
                        source.name,
                        function
                    );
                }
            }
        }

        Ok(())
    }
}

fn is_function_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.lang_root, "lang");
        assert_eq!(config.primary_locale, "en");
        assert_eq!(config.sources.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "langRoot": "resources/lang",
              "locale": "de",
              "sources": [
                  { "name": "web", "root": "src", "functions": ["t", "$t"], "extensions": ["js"] }
              ]
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.lang_root, "resources/lang");
        assert_eq!(config.locale, "de");
        assert_eq!(config.primary_locale, "en");
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].functions, vec!["t", "$t"]);
        assert!(config.sources[0].excluded_dirs.is_empty());
    }

    #[test]
    fn test_source_functions_default() {
        let json = r#"{ "sources": [{ "name": "views", "root": "resources/views" }] }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.sources[0].functions, vec!["__"]);
    }

    #[test]
    fn test_scan_filter_strips_dots() {
        let source = SourceConfig {
            extensions: vec![".vue".to_string(), "ts".to_string()],
            ..SourceConfig::frontend("frontend", "web")
        };
        let filter = source.scan_filter(&["**/*.spec.ts".to_string()]);
        assert_eq!(filter.extensions, vec!["vue", "ts"]);
        assert_eq!(filter.ignores, vec!["**/*.spec.ts"]);
        assert!(filter.excluded_dirs.contains(&"node_modules".to_string()));
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("app").join("Nova");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "primaryLocale": "cs" }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert_eq!(result.path, Some(config_path));
        assert_eq!(result.config.primary_locale, "cs");
        assert_eq!(result.config.sources, default_sources());
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.path.is_none());
        assert_eq!(result.config.indent, "    ");
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_duplicate_source_names() {
        let config = Config {
            sources: vec![
                SourceConfig::backend("views", "a"),
                SourceConfig::backend("views", "b"),
            ],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_validate_function_names() {
        for bad in ["", "t(", "1t", "a.b"] {
            let config = Config {
                sources: vec![SourceConfig {
                    functions: vec![bad.to_string()],
                    ..SourceConfig::backend("views", "resources/views")
                }],
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{:?}", bad);
        }
        assert!(is_function_name("$_"));
        assert!(is_function_name("__"));
        assert!(is_function_name("trans_choice"));
    }

    #[test]
    fn test_validate_indent() {
        let config = Config {
            indent: "xx".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "ignores": ["[invalid"] }"#).unwrap();

        let result = load_config(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = default_config_json().unwrap();
        assert!(json.contains("langRoot"));
        assert!(json.contains("excludedDirs"));
        assert!(!json.contains("lang_root"));
    }
}
