//! Records and the field mapper.
//!
//! A [`Record`] exposes a static table of [`FieldDescriptor`]s, in declaration
//! order, and by-name access to its fields as [`FieldValue`] trait objects. The
//! [`record!`](crate::record!) macro writes the implementation.
//!
//! Decoding a pair into a record goes through the [`FieldMapper`], which
//! resolves the key to a single field and coerces the value. Keys are resolved
//! in three passes over the fields, first match wins:
//!
//! 1. exact match on the declared field name
//! 2. exact match on the override tag
//! 3. case-insensitive match on the declared field name
//!
//! ```rust
//! use linecfg::{decode, record};
//!
//! #[derive(Default)]
//! struct Config {
//!     host: String,
//!     port: u16,
//! }
//!
//! record!(Config { host, port as "listen_port" });
//!
//! let mut config = Config::default();
//! decode("HOST=example.org listen_port=443", &mut config).unwrap();
//! assert_eq!(config.host, "example.org");
//! assert_eq!(config.port, 443);
//! ```

use crate::scanner::Consumer;
use crate::value::FieldValue;
use crate::{Error, Result};
use std::borrow::Cow;
use tracing::debug;

/// Matching and rendering metadata for one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    tag: Option<&'static str>,
}

impl FieldDescriptor {
    /// Describes a field by its declared name.
    pub const fn new(name: &'static str) -> Self {
        FieldDescriptor { name, tag: None }
    }

    /// Adds an override name used for matching and as the encoded key.
    pub const fn with_tag(self, tag: &'static str) -> Self {
        FieldDescriptor {
            name: self.name,
            tag: Some(tag),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    /// The key written by the encoder: the tag if present, otherwise the
    /// lower-cased field name.
    ///
    /// ```rust
    /// use linecfg::FieldDescriptor;
    ///
    /// assert_eq!(FieldDescriptor::new("Host").key(), "host");
    /// assert_eq!(FieldDescriptor::new("timeout").with_tag("connect_timeout").key(), "connect_timeout");
    /// ```
    pub fn key(&self) -> Cow<'static, str> {
        match self.tag {
            Some(tag) => Cow::Borrowed(tag),
            None if self.name.chars().any(char::is_uppercase) => {
                Cow::Owned(self.name.to_lowercase())
            }
            None => Cow::Borrowed(self.name),
        }
    }
}

/// A structured value with a fixed, ordered set of named fields.
///
/// Implement with [`record!`](crate::record!). `field` and `field_mut` must
/// return `Some` for every name listed by `fields`.
pub trait Record {
    /// Field descriptors in declaration order.
    fn fields() -> &'static [FieldDescriptor];

    /// Shared access to the field declared as `name`.
    fn field(&self, name: &str) -> Option<&dyn FieldValue>;

    /// Mutable access to the field declared as `name`.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn FieldValue>;
}

/// Finds the descriptor that `key` addresses.
pub fn resolve<'f>(fields: &'f [FieldDescriptor], key: &str) -> Option<&'f FieldDescriptor> {
    if let Some(field) = fields.iter().find(|f| f.name == key) {
        return Some(field);
    }
    if let Some(field) = fields.iter().find(|f| f.tag == Some(key)) {
        return Some(field);
    }
    let field = fields.iter().find(|f| eq_fold(f.name, key))?;
    debug!(key, field = field.name, "resolved key case-insensitively");
    Some(field)
}

/// Case-insensitive comparison, one character at a time.
///
/// Two characters match when they are equal or share a lower-case or an
/// upper-case mapping, so `ſ` matches `s` and `K` (Kelvin) matches `k`.
/// Characters are never expanded across positions: `ß` does not match `ss`.
pub(crate) fn eq_fold(a: &str, b: &str) -> bool {
    let mut a = a.chars();
    let mut b = b.chars();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if fold_char(x, y) => {}
            _ => return false,
        }
    }
}

fn fold_char(x: char, y: char) -> bool {
    x == y || x.to_lowercase().eq(y.to_lowercase()) || x.to_uppercase().eq(y.to_uppercase())
}

/// The default [`Consumer`]: maps each pair onto a field of a record.
#[derive(Debug)]
pub struct FieldMapper<'a, R> {
    record: &'a mut R,
}

impl<'a, R> FieldMapper<'a, R>
where
    R: Record,
{
    pub fn new(record: &'a mut R) -> Self {
        FieldMapper { record }
    }
}

impl<R> Consumer for FieldMapper<'_, R>
where
    R: Record,
{
    fn accept(&mut self, key: &str, value: &str) -> Result<()> {
        let descriptor = resolve(R::fields(), key).ok_or_else(|| Error::key_not_found(key))?;
        let field = self
            .record
            .field_mut(descriptor.name)
            .ok_or_else(|| Error::key_not_found(key))?;
        field.assign(value)
    }
}

impl<R> Consumer for R
where
    R: Record,
{
    fn accept(&mut self, key: &str, value: &str) -> Result<()> {
        FieldMapper::new(self).accept(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::new("Foo").with_tag("bar"),
        FieldDescriptor::new("bar"),
        FieldDescriptor::new("baz").with_tag("FOO"),
    ];

    #[test]
    fn test_exact_name_wins_over_tag() {
        assert_eq!(resolve(FIELDS, "bar").map(|f| f.name()), Some("bar"));
    }

    #[test]
    fn test_tag_wins_over_case_insensitive_name() {
        assert_eq!(resolve(FIELDS, "FOO").map(|f| f.name()), Some("baz"));
    }

    #[test]
    fn test_case_insensitive_fallback() {
        assert_eq!(resolve(FIELDS, "foo").map(|f| f.name()), Some("Foo"));
        assert_eq!(resolve(FIELDS, "BAZ").map(|f| f.name()), Some("baz"));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(resolve(FIELDS, "qux"), None);
        assert_eq!(resolve(&[], "foo"), None);
    }

    #[test]
    fn test_eq_fold() {
        assert!(eq_fold("ConnectTimeout", "connecttimeout"));
        assert!(eq_fold("ÉTÉ", "été"));
        assert!(!eq_fold("port", "ports"));
        assert!(!eq_fold("ports", "port"));
    }

    #[test]
    fn test_eq_fold_is_per_character() {
        assert!(eq_fold("host", "ho\u{017f}t"));
        assert!(eq_fold("keepalive", "\u{212a}eepalive"));
        assert!(eq_fold("stra\u{00df}e", "STRA\u{1e9e}E"));
        assert!(!eq_fold("strasse", "stra\u{00df}e"));

        let fields = [FieldDescriptor::new("host")];
        assert_eq!(
            resolve(&fields, "HO\u{017f}T").map(|f| f.name()),
            Some("host")
        );
    }

    #[test]
    fn test_key_derivation() {
        assert_eq!(FIELDS[0].key(), "bar");
        assert_eq!(FieldDescriptor::new("SomePort").key(), "someport");
        assert!(matches!(FieldDescriptor::new("host").key(), Cow::Borrowed("host")));
    }
}
