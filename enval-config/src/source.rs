// Lookup sources for raw variable values

use std::collections::HashMap;
use std::env;

/// Source of raw key/value pairs.
///
/// Returns `None` when the key is not present. A present but empty value is
/// `Some("")`.
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Process environment source
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: Option<String>,
}

impl EnvSource {
    /// Read variables exactly as named.
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Read `<PREFIX>_<KEY>` instead of `<KEY>`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Fully qualified variable name for `key`.
    pub fn full_key(&self, key: &str) -> String {
        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix.trim_end_matches('_'), key),
            None => key.to_string(),
        }
    }
}

impl Lookup for EnvSource {
    fn lookup(&self, key: &str) -> Option<String> {
        // Non-unicode values are still present; keep them lossily.
        env::var_os(self.full_key(key)).map(|v| v.to_string_lossy().into_owned())
    }
}

/// Fixed in-memory source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    vars: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Lookup for MapSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl From<HashMap<String, String>> for MapSource {
    fn from(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
