//! # linecfg
//!
//! A single-line configuration format: `key=value key2=value2 ...`.
//!
//! ## What is linecfg?
//!
//! linecfg encodes flat configuration into one line of text, which makes it easy
//! to copy and paste into an environment variable. A line maps onto a struct: each
//! key names a field, and each value is coerced into that field's type.
//!
//! ## Key Features
//!
//! - **Records**: Decode in place into any struct declared with [`record!`], and encode it back
//! - **Serde Compatible**: [`to_string`] and [`from_str`] work with `#[derive(Serialize, Deserialize)]`
//! - **Pluggable**: Any [`Consumer`] can take the place of the default [`FieldMapper`]
//! - **Precise Errors**: Every error names the offending field, key, value or type
//!
//! ## Quick Start
//!
//! ```rust
//! use linecfg::{decode, encode, record};
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Config {
//!     host: String,
//!     port: u16,
//!     timeout: Duration,
//!     verbose: bool,
//! }
//!
//! record!(Config {
//!     host,
//!     port,
//!     timeout as "connect_timeout",
//!     verbose,
//! });
//!
//! let mut config = Config::default();
//! decode("host=localhost port=8080 connect_timeout=5s", &mut config).unwrap();
//! assert_eq!(
//!     config,
//!     Config {
//!         host: "localhost".to_string(),
//!         port: 8080,
//!         timeout: Duration::from_secs(5),
//!         verbose: false,
//!     }
//! );
//!
//! // Zero-valued fields are left out
//! assert_eq!(encode(&config), "host=localhost port=8080 connect_timeout=5s");
//! ```
//!
//! ### Reading from the environment
//!
//! ```rust,no_run
//! # use linecfg::record;
//! # #[derive(Default)]
//! # struct Config { host: String }
//! # record!(Config { host });
//! let mut config = Config::default();
//! linecfg::decode_env("MY_CFG", &mut config)?;
//! # Ok::<(), linecfg::Error>(())
//! ```
//!
//! ### Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let line = linecfg::to_string(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(line, "x=1 y=2");
//! assert_eq!(linecfg::from_str::<Point>(&line).unwrap(), Point { x: 1, y: 2 });
//! ```
//!
//! ## Format
//!
//! See the [`format`] module for the grammar and the decoding rules.

pub mod de;
pub mod duration;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod record;
pub mod render;
pub mod scanner;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::LineMap;
pub use record::{FieldDescriptor, FieldMapper, Record};
pub use render::encode;
pub use scanner::{Consumer, Pairs};
pub use ser::Serializer;
pub use value::FieldValue;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::env::{self, VarError};
use std::io;
use tracing::debug;

/// Decodes `line` into `target`.
///
/// `target` is usually a [`Record`], decoded through the [`FieldMapper`]. Any
/// other [`Consumer`] receives the pairs directly.
///
/// Decoding stops at the first error. Fields set by earlier pairs keep their
/// new values.
///
/// # Examples
///
/// ```rust
/// use linecfg::{decode, record, Error};
///
/// #[derive(Default)]
/// struct Config {
///     known: u32,
/// }
///
/// record!(Config { known });
///
/// let mut config = Config::default();
/// let err = decode("known=1 unknown=2", &mut config).unwrap_err();
/// assert_eq!(err, Error::KeyNotFound { key: "unknown".to_string() });
/// assert_eq!(config.known, 1);
/// ```
///
/// # Errors
///
/// Returns [`Error::BadField`] for a field without `=`, and whatever the
/// consumer returns for a pair it rejects.
pub fn decode<C>(line: &str, target: &mut C) -> Result<()>
where
    C: Consumer + ?Sized,
{
    scanner::scan(line, target)
}

/// Decodes the value of the environment variable `name` into `target`.
///
/// An unset variable decodes as the empty line, leaving `target` untouched.
///
/// # Errors
///
/// Returns [`Error::NotUnicode`] if the variable is not valid Unicode, and any
/// error of [`decode`].
pub fn decode_env<C>(name: &str, target: &mut C) -> Result<()>
where
    C: Consumer + ?Sized,
{
    let line = read_env(name)?;
    decode(&line, target)
}

/// Deserializes a `T` from the environment variable `name`.
///
/// An unset variable is read as the empty line.
///
/// # Errors
///
/// Returns [`Error::NotUnicode`] if the variable is not valid Unicode, and any
/// error of [`from_str`].
pub fn from_env<T>(name: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let line = read_env(name)?;
    from_str(&line)
}

fn read_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(line) => Ok(line),
        Err(VarError::NotPresent) => {
            debug!(name, "environment variable not set, decoding empty line");
            Ok(String::new())
        }
        Err(VarError::NotUnicode(_)) => Err(Error::NotUnicode {
            name: name.to_string(),
        }),
    }
}

/// Serialize any `T: Serialize` struct or map to a line.
///
/// # Examples
///
/// ```rust
/// use linecfg::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Config { foo: String, bar: i32 }
///
/// let line = to_string(&Config { foo: String::new(), bar: 0 }).unwrap();
/// assert_eq!(line, "");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidType`] if `value` is not a struct or map, and
/// [`Error::UnsupportedType`] if a field holds a nested value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new();
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` struct or map to a writer as a line.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let line = to_string(value)?;
    writer
        .write_all(line.as_bytes())
        .map_err(|e| Error::custom(format!("write failed: {}", e)))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a line.
///
/// # Examples
///
/// ```rust
/// use linecfg::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x=1 y=2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the line is malformed, names an unknown field, or a
/// value cannot be coerced into its field's type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    T::deserialize(&mut deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, Default, PartialEq, Clone)]
    struct ExampleConfig {
        host: String,
        port: i32,
        connect_timeout: Duration,
        a: u32,
        b: f32,
        c: bool,
        unsupported: chrono::DateTime<chrono::Utc>,
    }

    crate::record!(ExampleConfig {
        host,
        port,
        connect_timeout,
        a,
        b,
        c,
        unsupported,
    });

    #[test]
    fn test_decode_happy_path() {
        let mut config = ExampleConfig::default();
        decode(
            "host=localhost port=8080 connect_timeout=5s A=3 B=4.5 C=1",
            &mut config,
        )
        .unwrap();
        assert_eq!(
            config,
            ExampleConfig {
                host: "localhost".to_string(),
                port: 8080,
                connect_timeout: Duration::from_secs(5),
                a: 3,
                b: 4.5,
                c: true,
                unsupported: Default::default(),
            }
        );
    }

    #[test]
    fn test_decode_error_messages() {
        let mut config = ExampleConfig::default();
        let err = decode("host=localhost random_key=444", &mut config).unwrap_err();
        assert_eq!(err.to_string(), "linecfg: unknown field 'random_key'");

        let err = decode("host =localhost port=8080", &mut config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "linecfg: bad field 'host' in 'host =localhost port=8080'"
        );

        let err = decode("unsupported=5", &mut config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "linecfg: cannot unmarshal 5 into value of type DateTime<Utc>"
        );
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let config = ExampleConfig {
            host: "db.internal".to_string(),
            port: -1,
            connect_timeout: Duration::from_millis(2500),
            a: 0,
            b: 0.25,
            c: true,
            unsupported: Default::default(),
        };
        let line = encode(&config);
        assert_eq!(
            line,
            "host=db.internal port=-1 connect_timeout=2.5s b=0.25 c=true"
        );

        let mut back = ExampleConfig::default();
        decode(&line, &mut back).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_decode_env_unset_is_empty_line() {
        let mut config = ExampleConfig {
            port: 1,
            ..ExampleConfig::default()
        };
        decode_env("LINECFG_LIB_TEST_UNSET", &mut config).unwrap();
        assert_eq!(config.port, 1);
    }

    #[test]
    fn test_to_writer() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &LineMap::parse("a=1 b=").unwrap()).unwrap();
        assert_eq!(buffer, b"a=1 b=");
    }
}
