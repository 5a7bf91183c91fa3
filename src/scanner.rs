//! Line tokenizing and pair dispatch.
//!
//! A line is split on runs of whitespace into fields, and each field is split on
//! its first `=` into a key and a value. [`Pairs`] yields those pairs lazily and
//! [`scan`] feeds them, in order, to a [`Consumer`].
//!
//! Whitespace around `=` is never trimmed. `key= value` is the pair `key`/`""`
//! followed by the malformed field `value`.
//!
//! ```rust
//! use linecfg::scanner::pairs;
//!
//! let collected: Vec<_> = pairs("  a=1   b=x=y c= ")
//!     .collect::<linecfg::Result<_>>()
//!     .unwrap();
//! assert_eq!(collected, vec![("a", "1"), ("b", "x=y"), ("c", "")]);
//! ```

use crate::{Error, Result};
use std::str::SplitWhitespace;
use tracing::trace;

/// A recipient of decoded `key=value` pairs.
///
/// Every [`Record`](crate::Record) is a consumer through the
/// [`FieldMapper`](crate::FieldMapper). Implement this trait directly to take
/// over decoding for a custom layout. Implementations must copy `key` and
/// `value` if they keep them past the call.
pub trait Consumer {
    /// Accepts one pair. Returning an error aborts the scan.
    fn accept(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Lazy iterator over the pairs of a line, in input order.
///
/// Yields [`Error::BadField`] for the first field without `=` and stops.
#[derive(Debug, Clone)]
pub struct Pairs<'a> {
    line: &'a str,
    fields: SplitWhitespace<'a>,
    failed: bool,
}

impl<'a> Pairs<'a> {
    pub fn new(line: &'a str) -> Self {
        Pairs {
            line,
            fields: line.split_whitespace(),
            failed: false,
        }
    }

    /// The full line being tokenized.
    pub fn line(&self) -> &'a str {
        self.line
    }
}

impl<'a> Iterator for Pairs<'a> {
    type Item = Result<(&'a str, &'a str)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let field = self.fields.next()?;
        match field.split_once('=') {
            Some(pair) => Some(Ok(pair)),
            None => {
                self.failed = true;
                Some(Err(Error::bad_field(self.line, field)))
            }
        }
    }
}

impl std::iter::FusedIterator for Pairs<'_> {}

/// Tokenizes `line`.
pub fn pairs(line: &str) -> Pairs<'_> {
    Pairs::new(line)
}

/// Feeds every pair of `line` to `consumer`, stopping at the first error.
///
/// Pairs accepted before a failure stay applied.
pub fn scan<C>(line: &str, consumer: &mut C) -> Result<()>
where
    C: Consumer + ?Sized,
{
    for pair in pairs(line) {
        let (key, value) = pair?;
        trace!(key, value, "dispatching pair");
        consumer.accept(key, value)?;
    }
    Ok(())
}

/// Consumer built from a closure, see [`from_fn`].
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

impl<F> Consumer for FromFn<F>
where
    F: FnMut(&str, &str) -> Result<()>,
{
    fn accept(&mut self, key: &str, value: &str) -> Result<()> {
        (self.0)(key, value)
    }
}

/// Creates a consumer that calls `f` for every pair.
///
/// # Examples
///
/// ```rust
/// use linecfg::{decode, scanner};
///
/// let mut keys = Vec::new();
/// decode(
///     "host=localhost port=8080",
///     &mut scanner::from_fn(|key: &str, _value: &str| {
///         keys.push(key.to_string());
///         Ok(())
///     }),
/// )
/// .unwrap();
/// assert_eq!(keys, ["host", "port"]);
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&str, &str) -> Result<()>,
{
    FromFn(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(line: &str) -> Result<Vec<(&str, &str)>> {
        pairs(line).collect()
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(
            collect(" host=localhost  port=8080 \t connect_timeout=5s  ").unwrap(),
            vec![
                ("host", "localhost"),
                ("port", "8080"),
                ("connect_timeout", "5s")
            ]
        );
    }

    #[test]
    fn test_empty_line() {
        assert!(collect("").unwrap().is_empty());
        assert!(collect("   \t ").unwrap().is_empty());
    }

    #[test]
    fn test_empty_value_and_extra_separators() {
        assert_eq!(
            collect("a= b=c=d =e").unwrap(),
            vec![("a", ""), ("b", "c=d"), ("", "e")]
        );
    }

    #[test]
    fn test_missing_separator() {
        let err = collect("a=1 b").unwrap_err();
        assert_eq!(err, Error::bad_field("a=1 b", "b"));
    }

    #[test]
    fn test_space_after_separator_is_not_trimmed() {
        let line = "host= localhost port=8080";
        let mut iter = pairs(line);
        assert_eq!(iter.next(), Some(Ok(("host", ""))));
        assert_eq!(iter.next(), Some(Err(Error::bad_field(line, "localhost"))));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_space_before_separator() {
        let line = "host =localhost port=8080";
        assert_eq!(collect(line).unwrap_err(), Error::bad_field(line, "host"));
    }

    #[test]
    fn test_scan_stops_at_first_consumer_error() {
        let mut seen = Vec::new();
        let result = scan(
            "a=1 b=2 c=3",
            &mut from_fn(|key: &str, _: &str| {
                seen.push(key.to_string());
                if key == "b" {
                    Err(Error::key_not_found(key))
                } else {
                    Ok(())
                }
            }),
        );
        assert_eq!(result, Err(Error::key_not_found("b")));
        assert_eq!(seen, ["a", "b"]);
    }

    #[test]
    fn test_scan_dispatches_before_bad_field() {
        let mut seen = Vec::new();
        let result = scan(
            "a=1 b",
            &mut from_fn(|key: &str, value: &str| {
                seen.push((key.to_string(), value.to_string()));
                Ok(())
            }),
        );
        assert_eq!(result, Err(Error::bad_field("a=1 b", "b")));
        assert_eq!(seen, [("a".to_string(), "1".to_string())]);
    }
}
