//! Serde deserialization from a line.
//!
//! This module provides the [`Deserializer`] implementation that reads a line
//! into any `Deserialize` struct or map. Pairs are produced by the
//! [`scanner`](crate::scanner) and decoded with the same rules as the
//! [`FieldMapper`](crate::FieldMapper):
//!
//! - struct keys match a serde field name exactly, then case-insensitively
//! - a key matching no field fails with [`Error::KeyNotFound`]
//! - a `bool` field is `true` whenever its key is present
//! - integers and floats are parsed into the field's own width
//! - `Option` fields become `Some`
//! - strings borrow from the line
//! - types that deserialize from a string, such as `chrono::DateTime<Utc>`,
//!   parse the raw value with their own `Deserialize` impl
//!
//! Fields missing from the line follow serde's usual rules, so use
//! `#[serde(default)]` for optional keys.
//!
//! ```rust
//! use linecfg::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config<'a> {
//!     host: &'a str,
//!     port: u16,
//!     #[serde(default)]
//!     verbose: bool,
//! }
//!
//! let config: Config = from_str("HOST=localhost port=8080").unwrap();
//! assert_eq!(config, Config { host: "localhost", port: 8080, verbose: false });
//! ```

use crate::record::eq_fold;
use crate::scanner::Pairs;
use crate::{Error, Result};
use serde::de::value::BorrowedStrDeserializer;
use serde::{de, forward_to_deserialize_any};
use tracing::debug;

/// The line deserializer.
///
/// Created via [`Deserializer::from_str`]. The top level must be a struct, a
/// map, or a newtype around one of those.
pub struct Deserializer<'de> {
    input: &'de str,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer { input }
    }
}

macro_rules! reject_top_level {
    ($($method:ident => $name:expr;)*) => {
        $(
            fn $method<V>(self, _visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                Err(Error::invalid_type($name))
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    reject_top_level! {
        deserialize_bool => "bool";
        deserialize_i8 => "i8";
        deserialize_i16 => "i16";
        deserialize_i32 => "i32";
        deserialize_i64 => "i64";
        deserialize_u8 => "u8";
        deserialize_u16 => "u16";
        deserialize_u32 => "u32";
        deserialize_u64 => "u64";
        deserialize_f32 => "f32";
        deserialize_f64 => "f64";
        deserialize_char => "char";
        deserialize_str => "str";
        deserialize_string => "string";
        deserialize_bytes => "bytes";
        deserialize_byte_buf => "bytes";
        deserialize_option => "option";
        deserialize_unit => "unit";
        deserialize_seq => "sequence";
        deserialize_identifier => "identifier";
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match Pairs::new(self.input).next() {
            None => visitor.visit_unit(),
            Some(Err(e)) => Err(e),
            Some(Ok((key, _))) => Err(Error::key_not_found(key)),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::invalid_type("tuple"))
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::invalid_type(name))
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(PairAccess::new(self.input, None))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(PairAccess::new(self.input, Some(fields)))
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::invalid_type(name))
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// Walks the pairs of a line as a serde map.
///
/// With a field list, keys are resolved against it and unknown keys fail.
/// Without one (plain maps) keys pass through untouched.
struct PairAccess<'de> {
    pairs: Pairs<'de>,
    fields: Option<&'static [&'static str]>,
    value: Option<&'de str>,
}

impl<'de> PairAccess<'de> {
    fn new(input: &'de str, fields: Option<&'static [&'static str]>) -> Self {
        PairAccess {
            pairs: Pairs::new(input),
            fields,
            value: None,
        }
    }

    fn resolve(&self, key: &'de str) -> Result<&'de str> {
        let Some(fields) = self.fields else {
            return Ok(key);
        };
        if let Some(field) = fields.iter().copied().find(|f| *f == key) {
            return Ok(field);
        }
        match fields.iter().copied().find(|f| eq_fold(f, key)) {
            Some(field) => {
                debug!(key, field, "resolved key case-insensitively");
                Ok(field)
            }
            None => Err(Error::key_not_found(key)),
        }
    }
}

impl<'de> de::MapAccess<'de> for PairAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let Some(pair) = self.pairs.next() else {
            return Ok(None);
        };
        let (key, value) = pair?;
        let field = self.resolve(key)?;
        self.value = Some(value);
        seed.deserialize(BorrowedStrDeserializer::new(field)).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }
}

/// Coerces the raw text of one value.
struct ValueDeserializer<'de> {
    raw: &'de str,
}

impl<'de> ValueDeserializer<'de> {
    fn new(raw: &'de str) -> Self {
        ValueDeserializer { raw }
    }

    fn unsupported(&self, type_name: &str) -> Error {
        Error::unmarshal_type(self.raw, type_name)
    }
}

macro_rules! deserialize_integer {
    ($($method:ident => $visit:ident($ty:ty);)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let parsed = self
                    .raw
                    .parse::<$ty>()
                    .map_err(|e| Error::parse_int(self.raw, stringify!($ty), e))?;
                visitor.$visit(parsed)
            }
        )*
    };
}

macro_rules! deserialize_float {
    ($($method:ident => $visit:ident($ty:ty);)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let parsed = self
                    .raw
                    .parse::<$ty>()
                    .map_err(|e| Error::parse_float(self.raw, stringify!($ty), e))?;
                visitor.$visit(parsed)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.raw)
    }

    // Presence of the key is the value.
    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(true)
    }

    deserialize_integer! {
        deserialize_i8 => visit_i8(i8);
        deserialize_i16 => visit_i16(i16);
        deserialize_i32 => visit_i32(i32);
        deserialize_i64 => visit_i64(i64);
        deserialize_i128 => visit_i128(i128);
        deserialize_u8 => visit_u8(u8);
        deserialize_u16 => visit_u16(u16);
        deserialize_u32 => visit_u32(u32);
        deserialize_u64 => visit_u64(u64);
        deserialize_u128 => visit_u128(u128);
    }

    deserialize_float! {
        deserialize_f32 => visit_f32(f32);
        deserialize_f64 => visit_f64(f64);
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut chars = self.raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(self.unsupported("char")),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.raw.is_empty() {
            visitor.visit_unit()
        } else {
            Err(self.unsupported("unit"))
        }
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.raw.is_empty() {
            visitor.visit_unit()
        } else {
            Err(self.unsupported(name))
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported("sequence"))
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported("tuple"))
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported(name))
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported("map"))
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.unsupported(name))
    }

    // Only unit variants can be written on a line, by name.
    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(BorrowedStrDeserializer::new(self.raw))
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        str string bytes byte_buf identifier
    }
}
