//! Ordered, untyped view of a line.
//!
//! This module provides [`LineMap`], a wrapper around [`IndexMap`] that keeps
//! the pairs of a line in the order they were written. It is a [`Consumer`] in
//! its own right, so it can be used to inspect or rewrite a line without
//! declaring a record for it.
//!
//! ## Examples
//!
//! ```rust
//! use linecfg::LineMap;
//!
//! let mut map: LineMap = "host=localhost port=8080".parse().unwrap();
//! assert_eq!(map.get("port"), Some("8080"));
//!
//! map.insert("port", "9090");
//! map.insert("debug", "");
//! assert_eq!(map.to_string(), "host=localhost port=9090 debug=");
//! ```

use crate::scanner::{self, Consumer};
use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An insertion-ordered map of keys to raw values.
///
/// A key that appears twice in a line keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineMap(IndexMap<String, String>);

impl LineMap {
    /// Creates an empty `LineMap`.
    #[must_use]
    pub fn new() -> Self {
        LineMap(IndexMap::new())
    }

    /// Collects every pair of `line`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadField`](crate::Error::BadField) for a field without `=`.
    pub fn parse(line: &str) -> Result<Self> {
        let mut map = LineMap::new();
        scanner::scan(line, &mut map)?;
        Ok(map)
    }

    /// Inserts a pair, returning the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Removes `key`, keeping the order of the remaining pairs.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over pairs in line order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Consumer for LineMap {
    fn accept(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }
}

impl FromStr for LineMap {
    type Err = crate::Error;

    fn from_str(line: &str) -> Result<Self> {
        LineMap::parse(line)
    }
}

/// Writes the pairs as a line. Unlike record encoding, empty values are kept.
impl fmt::Display for LineMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for LineMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        LineMap(IndexMap::from_iter(iter))
    }
}

impl IntoIterator for LineMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
