//! Toolkit - translation key extraction for Laravel and Nuxt projects
//!
//! Toolkit scans PHP, Blade and Vue/JS/TS sources for translation calls such as
//! `__('user.name')` or `$_('menu.save', 'Save')`, and appends the keys it finds
//! to `<locale>.json` files without touching the entries already there.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `disk`: File access rooted at one directory
//! - `error`: Fatal error type shared by the library
//! - `extract`: Call-site scanning, key/value parsing and deduplication
//! - `issues`: Non-fatal warnings
//! - `locale`: Locale documents, the append-only merge and locale stores
//! - `pipeline`: One run over several source sets and locales
//! - `scanner`: Source file enumeration
//! - `source`: Source files and locations inside them

pub mod cli;
pub mod config;
pub mod disk;
pub mod error;
pub mod extract;
pub mod issues;
pub mod locale;
pub mod pipeline;
pub mod scanner;
pub mod source;
