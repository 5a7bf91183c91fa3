//! Error types for linecfg decoding and encoding.
//!
//! Every failure is reported as a variant of the flat [`Error`] enum. Messages
//! always carry the offending field, key, value or type so that a person
//! editing a configuration line can find the mistake immediately.
//!
//! ## Error Categories
//!
//! - **Syntax**: [`Error::BadField`], a whitespace-delimited field without `=`
//! - **Matching**: [`Error::KeyNotFound`], a key that names no field
//! - **Coercion**: [`Error::UnmarshalType`], [`Error::ParseInt`], [`Error::ParseFloat`]
//! - **Shape**: [`Error::InvalidType`], [`Error::UnsupportedType`], values that are
//!   not records or cannot be written on a single line
//!
//! ## Examples
//!
//! ```rust
//! use linecfg::{decode, record, Error};
//!
//! #[derive(Default)]
//! struct Config {
//!     host: String,
//! }
//!
//! record!(Config { host });
//!
//! let mut config = Config::default();
//! let err = decode("host=localhost port=8080", &mut config).unwrap_err();
//! assert_eq!(err, Error::KeyNotFound { key: "port".to_string() });
//! assert_eq!(err.to_string(), "linecfg: unknown field 'port'");
//! ```

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Represents all possible errors that can occur while decoding or encoding a line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A field of the line lacked the `=` delimiter
    #[error("linecfg: bad field '{field}' in '{line}'")]
    BadField { line: String, field: String },

    /// A key matched no field of the target record
    #[error("linecfg: unknown field '{key}'")]
    KeyNotFound { key: String },

    /// The value handed to the codec is not a record
    #[error("linecfg: invalid type: {type_name}")]
    InvalidType { type_name: String },

    /// A value could not be coerced into the field's type, or the type is unsupported
    #[error("linecfg: cannot unmarshal {value} into value of type {type_name}")]
    UnmarshalType { value: String, type_name: String },

    /// Integer coercion failed
    #[error("linecfg: invalid {type_name} '{value}': {source}")]
    ParseInt {
        value: String,
        type_name: &'static str,
        #[source]
        source: ParseIntError,
    },

    /// Float coercion failed
    #[error("linecfg: invalid {type_name} '{value}': {source}")]
    ParseFloat {
        value: String,
        type_name: &'static str,
        #[source]
        source: ParseFloatError,
    },

    /// A field value is nested and cannot be written on one line
    #[error("linecfg: unsupported type: {0}")]
    UnsupportedType(String),

    /// An environment variable held bytes that are not valid Unicode
    #[error("linecfg: environment variable '{name}' is not valid unicode")]
    NotUnicode { name: String },

    /// Generic message
    #[error("linecfg: {0}")]
    Message(String),
}

impl Error {
    /// Creates a bad field error for `field` found in `line`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linecfg::Error;
    ///
    /// let err = Error::bad_field("a=1 b", "b");
    /// assert_eq!(err.to_string(), "linecfg: bad field 'b' in 'a=1 b'");
    /// ```
    pub fn bad_field(line: &str, field: &str) -> Self {
        Error::BadField {
            line: line.to_string(),
            field: field.to_string(),
        }
    }

    /// Creates an unknown key error.
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound {
            key: key.to_string(),
        }
    }

    /// Creates an invalid type error naming the rejected type.
    pub fn invalid_type(type_name: &str) -> Self {
        Error::InvalidType {
            type_name: type_name.to_string(),
        }
    }

    /// Creates an error for a value that cannot be coerced into `type_name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linecfg::Error;
    ///
    /// let err = Error::unmarshal_type("5", "DateTime<Utc>");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "linecfg: cannot unmarshal 5 into value of type DateTime<Utc>"
    /// );
    /// ```
    pub fn unmarshal_type(value: &str, type_name: &str) -> Self {
        Error::UnmarshalType {
            value: value.to_string(),
            type_name: type_name.to_string(),
        }
    }

    pub(crate) fn parse_int(value: &str, type_name: &'static str, source: ParseIntError) -> Self {
        Error::ParseInt {
            value: value.to_string(),
            type_name,
            source,
        }
    }

    pub(crate) fn parse_float(
        value: &str,
        type_name: &'static str,
        source: ParseFloatError,
    ) -> Self {
        Error::ParseFloat {
            value: value.to_string(),
            type_name,
            source,
        }
    }

    /// Creates an unsupported type error for values that cannot be written on one line.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
