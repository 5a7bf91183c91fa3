//! Line Format Reference
//!
//! This module documents the linecfg line format as implemented by this library.
//!
//! # Overview
//!
//! A linecfg line holds a flat set of `key=value` pairs on a single line. It is
//! meant to be pasted into places that only take one string, such as an
//! environment variable:
//!
//! ```text
//! MY_CFG="host=localhost port=8080 connect_timeout=5s"
//! ```
//!
//! # Grammar
//!
//! ```text
//! line       := field (whitespace+ field)*
//! field      := key "=" value
//! key        := non-whitespace-char+
//! value      := non-whitespace-char*
//! whitespace := any Unicode whitespace
//! ```
//!
//! **Rules**:
//! - Leading, trailing and repeated whitespace is ignored
//! - Only the first `=` of a field separates key and value: `a=b=c` is key `a`, value `b=c`
//! - Values may be empty: `debug=`
//! - A field without `=` is an error ([`Error::BadField`](crate::Error::BadField))
//! - Whitespace around `=` is not trimmed: `key= value` is the pair `key=` followed by
//!   the malformed field `value`
//!
//! There is no quoting, escaping, nesting, array syntax or comment syntax. A value
//! cannot contain whitespace.
//!
//! # Keys
//!
//! When decoding into a [`Record`](crate::Record), a key addresses a field by
//! (in order of precedence):
//!
//! 1. the declared field name, exactly
//! 2. the field's override tag, exactly
//! 3. the declared field name, ignoring case
//!
//! A key that addresses no field fails the whole decode
//! ([`Error::KeyNotFound`](crate::Error::KeyNotFound)). Decoding is not
//! transactional: fields set by earlier pairs keep their new values. Decode into
//! a fresh record and swap it in on success when that matters.
//!
//! When encoding, the key is the tag if one is declared, otherwise the lower-cased
//! field name.
//!
//! # Values
//!
//! | Type | Example | Notes |
//! |------|---------|-------|
//! | String | `host=localhost` | verbatim |
//! | Boolean | `verbose=` | presence means `true`; the text is ignored |
//! | Integer | `port=8080` | base 10, parsed into the field's width |
//! | Float | `ratio=0.75` | |
//! | Duration | `timeout=1m30s` | units `ns`, `us`/`µs`, `ms`, `s`, `m`, `h` |
//! | Optional | `retries=0` | sets the value even when it is zero |
//!
//! Encoding leaves out every field that holds its zero value (`""`, `0`,
//! `false`, zero duration, `None`), so a boolean can never be encoded as
//! `false`, and an all-default record encodes to the empty line.
//!
//! An `Option<bool>` holding `Some(false)` is not zero, so it is written as
//! `flag=false`. Decoding that line yields `Some(true)`: presence means true.
//! Use a plain `bool` when the value has to survive a round trip.
//!
//! # Serde
//!
//! [`from_str`](crate::from_str) coerces serde primitives with the table above.
//! Any other type whose `Deserialize` impl reads a string, such as
//! `chrono::DateTime<Utc>`, receives the raw value and parses it itself. The
//! record path has no such hook and rejects timestamp fields with
//! [`Error::UnmarshalType`](crate::Error::UnmarshalType).
