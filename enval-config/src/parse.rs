// Conversions from raw variable text

use crate::error::{ConfigError, Result, syntax_diagnostic};

/// Parse a base-10 signed integer.
pub fn parse_int(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|e| ConfigError::UnparsableInt(syntax_diagnostic(raw, e)))
}

/// Parse a boolean.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and
/// `0`, `f`, `F`, `FALSE`, `false`, `False`. Anything else is rejected,
/// including surrounding whitespace.
pub fn parse_bool(raw: &str) -> Result<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConfigError::UnparsableBool(syntax_diagnostic(
            raw,
            "invalid syntax",
        ))),
    }
}

/// Parse a 64-bit float.
pub fn parse_float(raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|e| ConfigError::UnparsableFloat(syntax_diagnostic(raw, e)))
}

/// Decode a JSON document. Usable as a parse function for
/// [`Lookuper::custom`](crate::Lookuper::custom).
#[cfg(feature = "json")]
pub fn json<T: serde::de::DeserializeOwned>(raw: &str) -> std::result::Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}
