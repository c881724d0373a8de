//! Non-fatal findings reported by an extraction run.
//!
//! Fatal problems are [`crate::error::Error`]s; everything here is printed
//! as a warning and processing continues.

use std::fmt;

use crate::source::SourceLocation;

/// Rule identifier for each warning kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    DynamicKey,
    InterpolatedKey,
    CommentedCall,
    ExistingKey,
    ValueMismatch,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::DynamicKey => write!(f, "dynamic-key"),
            Rule::InterpolatedKey => write!(f, "interpolated-key"),
            Rule::CommentedCall => write!(f, "commented-call"),
            Rule::ExistingKey => write!(f, "existing-key"),
            Rule::ValueMismatch => write!(f, "value-mismatch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// First argument is an expression, not a string literal: `__($name)`.
    DynamicKey {
        location: SourceLocation,
        expression: String,
    },
    /// Key (or template value) contains a variable and needs manual authoring.
    InterpolatedKey {
        location: SourceLocation,
        key: String,
    },
    /// Call inside a comment that could not be parsed; it is skipped.
    CommentedCall {
        location: SourceLocation,
        reason: String,
    },
    /// Key is already present in the locale file and was skipped.
    ExistingKey { locale: String, key: String },
    /// Source carries an explicit value that differs from the stored one.
    /// The stored value is kept.
    ValueMismatch {
        locale: String,
        key: String,
        stored: String,
        extracted: String,
    },
}

impl Warning {
    pub fn rule(&self) -> Rule {
        match self {
            Warning::DynamicKey { .. } => Rule::DynamicKey,
            Warning::InterpolatedKey { .. } => Rule::InterpolatedKey,
            Warning::CommentedCall { .. } => Rule::CommentedCall,
            Warning::ExistingKey { .. } => Rule::ExistingKey,
            Warning::ValueMismatch { .. } => Rule::ValueMismatch,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Warning::DynamicKey { expression, .. } => {
                format!("translation key is not a string literal: {}", expression)
            }
            Warning::InterpolatedKey { key, .. } => {
                format!("variable involved in translation '{}', manual review needed", key)
            }
            Warning::CommentedCall { reason, .. } => {
                format!("skipping unparsable translation call in comment: {}", reason)
            }
            Warning::ExistingKey { locale, key } => {
                format!("[{}] translation '{}' already exists, skipping", locale, key)
            }
            Warning::ValueMismatch {
                locale,
                key,
                stored,
                extracted,
            } => format!(
                "[{}] translation '{}' is stored as \"{}\" but source says \"{}\"",
                locale, key, stored, extracted
            ),
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Warning::DynamicKey { location, .. }
            | Warning::InterpolatedKey { location, .. }
            | Warning::CommentedCall { location, .. } => Some(location),
            Warning::ExistingKey { .. } | Warning::ValueMismatch { .. } => None,
        }
    }

    /// Routine notices only shown with `--verbose`.
    pub fn is_verbose_only(&self) -> bool {
        matches!(self, Warning::ExistingKey { .. })
    }
}
