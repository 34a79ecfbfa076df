// Error types for typed variable lookups

use std::fmt;
use thiserror::Error;

/// Error recorded against a single variable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("variable missing")]
    Missing,

    #[error("unparsable int: {0}")]
    UnparsableInt(String),

    #[error("unparsable bool: {0}")]
    UnparsableBool(String),

    #[error("unparsable float: {0}")]
    UnparsableFloat(String),

    /// Failure reported by a caller-supplied parse function, kept verbatim.
    #[error("{0}")]
    Custom(String),
}

impl ConfigError {
    /// Wrap any displayable parse failure without adding a prefix.
    pub fn custom(err: impl fmt::Display) -> Self {
        ConfigError::Custom(err.to_string())
    }

    /// Whether this error came from an absent variable.
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigError::Missing)
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Diagnostic text for a raw value that failed to convert.
pub(crate) fn syntax_diagnostic(raw: &str, reason: impl fmt::Display) -> String {
    format!("parsing {:?}: {}", raw, reason)
}

/// Aggregate of every variable that failed during a lookup pass.
///
/// Entries keep the order in which each variable first failed. The
/// `Display` output joins `"<key>: <error>"` pairs with `", "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupErrors {
    entries: Vec<(String, ConfigError)>,
}

impl LookupErrors {
    pub(crate) fn new(entries: Vec<(String, ConfigError)>) -> Self {
        Self { entries }
    }

    /// Iterate `(key, error)` pairs in first-failure order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigError)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Error recorded for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&ConfigError> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the failing variables.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl fmt::Display for LookupErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, err)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for LookupErrors {}

impl IntoIterator for LookupErrors {
    type Item = (String, ConfigError);
    type IntoIter = std::vec::IntoIter<(String, ConfigError)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
