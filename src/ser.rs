//! Serde serialization into a line.
//!
//! This module provides the [`Serializer`] implementation that writes any
//! `Serialize` struct or map as a line. It follows the same rules as
//! [`encode`](crate::encode):
//!
//! - fields are written in declaration order as `key=value`
//! - zero scalars (`""`, `0`, `0.0`, `false`), `None` and unit are left out
//! - `Some(value)` is always written, even when `value` is zero
//! - unit enum variants are written by name
//!
//! Keys are the serde field names, so `#[serde(rename = "...")]` is the override
//! mechanism. Nested values (sequences, maps, structs) cannot be expressed on a
//! single line and are rejected with [`Error::UnsupportedType`].
//!
//! ```rust
//! use linecfg::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Config {
//!     foo: String,
//!     #[serde(rename = "override")]
//!     bar: i32,
//!     debug: bool,
//! }
//!
//! let config = Config { foo: "hello".to_string(), bar: 3, debug: false };
//! assert_eq!(to_string(&config).unwrap(), "foo=hello override=3");
//! ```

use crate::{Error, Result};
use serde::ser::{self, Impossible, Serialize};

/// The line serializer.
///
/// Accepts a struct, a map, a unit struct or a newtype around one of those at
/// the top level. Anything else is rejected with [`Error::InvalidType`].
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(64),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_pair(&mut self, key: &str, value: &str) {
        if !self.output.is_empty() {
            self.output.push(' ');
        }
        self.output.push_str(key);
        self.output.push('=');
        self.output.push_str(value);
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! reject_top_level {
    ($($method:ident($($arg:ty),*) => $name:expr;)*) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<Self::Ok> {
                Err(Error::invalid_type($name))
            }
        )*
    };
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = StructSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    reject_top_level! {
        serialize_bool(bool) => "bool";
        serialize_i8(i8) => "i8";
        serialize_i16(i16) => "i16";
        serialize_i32(i32) => "i32";
        serialize_i64(i64) => "i64";
        serialize_u8(u8) => "u8";
        serialize_u16(u16) => "u16";
        serialize_u32(u32) => "u32";
        serialize_u64(u64) => "u64";
        serialize_f32(f32) => "f32";
        serialize_f64(f64) => "f64";
        serialize_char(char) => "char";
        serialize_str(&str) => "str";
        serialize_bytes(&[u8]) => "bytes";
        serialize_none() => "none";
        serialize_unit() => "unit";
    }

    fn serialize_some<T>(self, _value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::invalid_type("option"))
    }

    // A struct without fields renders as the empty line.
    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok> {
        Err(Error::invalid_type(name))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::invalid_type(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::invalid_type("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::invalid_type("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::invalid_type(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::invalid_type(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer {
            ser: self,
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(StructSerializer { ser: self })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::invalid_type(name))
    }
}

pub struct StructSerializer<'a> {
    ser: &'a mut Serializer,
}

impl<'a> ser::SerializeStruct for StructSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(text) = value.serialize(ValueSerializer::omitting_zero(key))? {
            self.ser.write_pair(key, &text);
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

pub struct MapSerializer<'a> {
    ser: &'a mut Serializer,
    current_key: Option<String>,
}

impl<'a> ser::SerializeMap for MapSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = key
            .serialize(ValueSerializer::keeping_zero("map key"))?
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::unsupported_type("empty map key"))?;
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        // Map entries keep zero values.
        if let Some(text) = value.serialize(ValueSerializer::keeping_zero(&key))? {
            self.ser.write_pair(&key, &text);
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

/// Renders one field value. `Ok(None)` means the value is omitted.
struct ValueSerializer<'k> {
    key: &'k str,
    omit_zero: bool,
}

impl<'k> ValueSerializer<'k> {
    fn omitting_zero(key: &'k str) -> Self {
        ValueSerializer {
            key,
            omit_zero: true,
        }
    }

    fn keeping_zero(key: &'k str) -> Self {
        ValueSerializer {
            key,
            omit_zero: false,
        }
    }

    fn text(&self, text: String, is_zero: bool) -> Result<Option<String>> {
        if self.omit_zero && is_zero {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn nested(&self, kind: &str) -> Error {
        Error::unsupported_type(&format!("{} in field '{}'", kind, self.key))
    }
}

impl<'k> ser::Serializer for ValueSerializer<'k> {
    type Ok = Option<String>;
    type Error = Error;

    type SerializeSeq = Impossible<Option<String>, Error>;
    type SerializeTuple = Impossible<Option<String>, Error>;
    type SerializeTupleStruct = Impossible<Option<String>, Error>;
    type SerializeTupleVariant = Impossible<Option<String>, Error>;
    type SerializeMap = Impossible<Option<String>, Error>;
    type SerializeStruct = Impossible<Option<String>, Error>;
    type SerializeStructVariant = Impossible<Option<String>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.text(v.to_string(), !v)
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.text(v.to_string(), v == 0)
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        self.text(v.to_string(), v == 0)
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.text(v.to_string(), v == 0)
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        self.text(v.to_string(), v == 0)
    }

    // Not widened: 0.1f32 as f64 prints as 0.10000000149011612.
    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.text(v.to_string(), v == 0.0)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.text(v.to_string(), v == 0.0)
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.text(v.to_string(), false)
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.text(v.to_string(), v.is_empty())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok> {
        Err(self.nested("bytes"))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(ValueSerializer::keeping_zero(self.key))
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.text(variant.to_string(), false)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(self.nested(variant))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(self.nested("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(self.nested("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(self.nested(name))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(self.nested(variant))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(self.nested("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(self.nested(name))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(self.nested(variant))
    }
}
