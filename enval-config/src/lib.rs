//! Typed environment variable lookups with aggregated error reporting.
//!
//! A [`Lookuper`] wraps a [`Lookup`] source (the process environment by
//! default) and hands out strings, integers, booleans and caller-parsed
//! values. Failures are recorded per variable rather than returned, so a
//! startup routine can read everything it needs and then report every
//! misconfigured variable at once through [`Lookuper::err`].
//!
//! ```
//! use enval_config::{Lookuper, MapSource};
//!
//! let source: MapSource = [("PORT", "8080")].into_iter().collect();
//! let mut env = Lookuper::with_source(source);
//!
//! let port = env.int("PORT");
//! let workers = env.int_with_default("WORKERS", 4);
//!
//! assert!(env.err().is_ok());
//! assert_eq!((port, workers), (8080, 4));
//! ```

pub mod error;
pub mod lookuper;
pub mod parse;
pub mod source;

pub use error::{ConfigError, LookupErrors, Result};
pub use lookuper::Lookuper;
pub use source::{EnvSource, Lookup, MapSource};
