// Typed lookups with deferred error reporting

use crate::error::{ConfigError, LookupErrors};
use crate::parse;
use crate::source::{EnvSource, Lookup};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Reads typed values from a [`Lookup`] source and records a failure per
/// variable instead of returning it.
///
/// Every accessor yields a usable value even on failure (the type's zero
/// value, an empty string, or `None`), so a whole configuration pass can
/// run before [`Lookuper::err`] reports everything that went wrong.
///
/// ```
/// use enval_config::{Lookuper, MapSource};
///
/// let source: MapSource = [("PORT", "8080"), ("DEBUG", "notabool")]
///     .into_iter()
///     .collect();
/// let mut env = Lookuper::with_source(source);
///
/// let port = env.int("PORT");
/// let debug = env.bool("DEBUG");
/// let host = env.string("HOST");
///
/// assert_eq!((port, debug, host.as_str()), (8080, false, ""));
/// let err = env.err().unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     r#"DEBUG: unparsable bool: parsing "notabool": invalid syntax, HOST: variable missing"#
/// );
/// ```
///
/// An instance covers one sequential configuration pass. Accessors take
/// `&mut self`, so concurrent use needs an external lock.
pub struct Lookuper<S = EnvSource> {
    source: S,
    errors: HashMap<String, ConfigError>,
    order: Vec<String>,
}

impl Lookuper<EnvSource> {
    /// Lookuper over the process environment.
    pub fn new() -> Self {
        Self::with_source(EnvSource::new())
    }
}

impl Default for Lookuper<EnvSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Lookup> Lookuper<S> {
    /// Lookuper over an arbitrary source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            errors: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Raw value, or an empty string with a missing error.
    pub fn string(&mut self, key: &str) -> String {
        self.required(key).unwrap_or_default()
    }

    /// Raw value, or `default` when absent.
    pub fn string_with_default(&mut self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Base-10 integer, or 0 on any failure.
    pub fn int(&mut self, key: &str) -> i64 {
        self.required_with(key, parse::parse_int).unwrap_or_default()
    }

    /// Integer, `default` when absent, 0 when present but invalid.
    pub fn int_with_default(&mut self, key: &str, default: i64) -> i64 {
        self.defaulted_with(key, default, parse::parse_int)
            .unwrap_or_default()
    }

    /// Boolean, or false on any failure.
    pub fn bool(&mut self, key: &str) -> bool {
        self.required_with(key, parse::parse_bool)
            .unwrap_or_default()
    }

    /// Boolean, `default` when absent, false when present but invalid.
    pub fn bool_with_default(&mut self, key: &str, default: bool) -> bool {
        self.defaulted_with(key, default, parse::parse_bool)
            .unwrap_or_default()
    }

    /// Float, or 0.0 on any failure.
    pub fn float(&mut self, key: &str) -> f64 {
        self.required_with(key, parse::parse_float)
            .unwrap_or_default()
    }

    /// Float, `default` when absent, 0.0 when present but invalid.
    pub fn float_with_default(&mut self, key: &str, default: f64) -> f64 {
        self.defaulted_with(key, default, parse::parse_float)
            .unwrap_or_default()
    }

    /// Value produced by `parse_fn`.
    ///
    /// Returns `None` when the variable is absent or `parse_fn` fails; the
    /// parse error's text is recorded as is.
    pub fn custom<T, E, F>(&mut self, key: &str, parse_fn: F) -> Option<T>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        self.required_with(key, |raw| parse_fn(raw).map_err(ConfigError::custom))
    }

    /// Like [`custom`](Self::custom), but yields `Some(default)` when the
    /// variable is absent. A present value that fails to parse still yields
    /// `None`.
    pub fn custom_with_default<T, E, F>(&mut self, key: &str, default: T, parse_fn: F) -> Option<T>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: fmt::Display,
    {
        self.defaulted_with(key, default, |raw| {
            parse_fn(raw).map_err(ConfigError::custom)
        })
    }

    /// Any [`FromStr`] type; parse errors are recorded verbatim.
    pub fn parse<T>(&mut self, key: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.custom(key, str::parse::<T>)
    }

    pub fn parse_with_default<T>(&mut self, key: &str, default: T) -> Option<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.custom_with_default(key, default, str::parse::<T>)
    }

    /// JSON-decoded value.
    #[cfg(feature = "json")]
    pub fn json<T: serde::de::DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        self.custom(key, parse::json::<T>)
    }

    #[cfg(feature = "json")]
    pub fn json_with_default<T: serde::de::DeserializeOwned>(
        &mut self,
        key: &str,
        default: T,
    ) -> Option<T> {
        self.custom_with_default(key, default, parse::json::<T>)
    }

    /// Aggregate of every recorded failure, in first-failure order.
    ///
    /// Does not clear anything; calling it twice gives the same result.
    pub fn err(&self) -> Result<(), LookupErrors> {
        if self.order.is_empty() {
            return Ok(());
        }

        debug!(count = self.order.len(), "configuration variables failed");

        let entries = self
            .order
            .iter()
            .filter_map(|key| {
                self.errors
                    .get(key)
                    .map(|err| (key.clone(), err.clone()))
            })
            .collect();

        Err(LookupErrors::new(entries))
    }

    /// Consume the lookuper and return its aggregate.
    pub fn into_result(self) -> Result<(), LookupErrors> {
        self.err()
    }

    pub fn has_errors(&self) -> bool {
        !self.order.is_empty()
    }

    /// Error recorded for `key`, if any.
    pub fn error(&self, key: &str) -> Option<&ConfigError> {
        self.errors.get(key)
    }

    /// Recorded `(key, error)` pairs in first-failure order.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &ConfigError)> {
        self.order
            .iter()
            .filter_map(|key| self.errors.get(key).map(|err| (key.as_str(), err)))
    }

    fn required(&mut self, key: &str) -> Option<String> {
        let value = self.source.lookup(key);
        if value.is_none() {
            self.record(key, ConfigError::Missing);
        }
        value
    }

    fn optional(&self, key: &str) -> Option<String> {
        let value = self.source.lookup(key);
        if value.is_none() {
            trace!(key, "variable absent, using default");
        }
        value
    }

    fn required_with<T, F>(&mut self, key: &str, parse_fn: F) -> Option<T>
    where
        F: FnOnce(&str) -> Result<T, ConfigError>,
    {
        let raw = self.required(key)?;
        self.convert(key, &raw, parse_fn)
    }

    fn defaulted_with<T, F>(&mut self, key: &str, default: T, parse_fn: F) -> Option<T>
    where
        F: FnOnce(&str) -> Result<T, ConfigError>,
    {
        match self.optional(key) {
            Some(raw) => self.convert(key, &raw, parse_fn),
            None => Some(default),
        }
    }

    fn convert<T, F>(&mut self, key: &str, raw: &str, parse_fn: F) -> Option<T>
    where
        F: FnOnce(&str) -> Result<T, ConfigError>,
    {
        match parse_fn(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                self.record(key, err);
                None
            }
        }
    }

    /// Last failure for a key wins; the key keeps its first position.
    fn record(&mut self, key: &str, err: ConfigError) {
        debug!(key, error = %err, "configuration variable failed");

        if self.errors.insert(key.to_string(), err).is_none() {
            self.order.push(key.to_string());
        }
    }
}

impl<S> fmt::Debug for Lookuper<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookuper")
            .field("failed", &self.order)
            .finish_non_exhaustive()
    }
}
