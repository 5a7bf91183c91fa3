//! Field value coercion and rendering.
//!
//! [`FieldValue`] is implemented by every type a [`Record`](crate::Record) field
//! may have. It knows how to coerce the text of a pair into the field, whether
//! the field currently holds its zero value, and how to write it back out.
//!
//! | Type | Decoding | Zero value |
//! |------|----------|------------|
//! | `String` | stored verbatim | `""` |
//! | `bool` | set to `true` whenever the key is present | `false` |
//! | `i8`..`i64`, `isize` | base-10 signed integer | `0` |
//! | `u8`..`u64`, `usize` | base-10 unsigned integer | `0` |
//! | `f32`, `f64` | decimal float | `0.0` |
//! | [`Duration`] | [duration literal](crate::duration) | zero duration |
//! | `Option<T>` | allocates `T::default()` when unset, then decodes into it | `None` |
//! | `DateTime<Utc>`, `SystemTime` | unsupported, always fails | the Unix epoch |

use crate::duration;
use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;
use std::time::{Duration, SystemTime};

/// A type that can be stored in a record field.
pub trait FieldValue {
    /// Coerces `raw` into this field, replacing its value.
    fn assign(&mut self, raw: &str) -> Result<()>;

    /// Returns `true` when the field holds its type's zero value and is left
    /// out of encoded lines.
    fn is_zero(&self) -> bool;

    /// Appends the text form of the value to `out`.
    fn render(&self, out: &mut String);

    /// Short type name used in error messages.
    fn type_name(&self) -> &'static str;
}

impl FieldValue for String {
    fn assign(&mut self, raw: &str) -> Result<()> {
        self.clear();
        self.push_str(raw);
        Ok(())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn render(&self, out: &mut String) {
        out.push_str(self);
    }

    fn type_name(&self) -> &'static str {
        "String"
    }
}

impl FieldValue for bool {
    // Presence of the key is the value; `flag=false` still sets the flag.
    fn assign(&mut self, _raw: &str) -> Result<()> {
        *self = true;
        Ok(())
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn render(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }

    fn type_name(&self) -> &'static str {
        "bool"
    }
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn assign(&mut self, raw: &str) -> Result<()> {
                    *self = raw
                        .parse::<$ty>()
                        .map_err(|e| Error::parse_int(raw, stringify!($ty), e))?;
                    Ok(())
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn render(&self, out: &mut String) {
                    let _ = write!(out, "{}", self);
                }

                fn type_name(&self) -> &'static str {
                    stringify!($ty)
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn assign(&mut self, raw: &str) -> Result<()> {
                    *self = raw
                        .parse::<$ty>()
                        .map_err(|e| Error::parse_float(raw, stringify!($ty), e))?;
                    Ok(())
                }

                fn is_zero(&self) -> bool {
                    *self == 0.0
                }

                fn render(&self, out: &mut String) {
                    let _ = write!(out, "{}", self);
                }

                fn type_name(&self) -> &'static str {
                    stringify!($ty)
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl FieldValue for Duration {
    fn assign(&mut self, raw: &str) -> Result<()> {
        *self = duration::parse(raw)?;
        Ok(())
    }

    fn is_zero(&self) -> bool {
        Duration::is_zero(self)
    }

    fn render(&self, out: &mut String) {
        duration::write_duration(out, *self);
    }

    fn type_name(&self) -> &'static str {
        "Duration"
    }
}

impl<T> FieldValue for Option<T>
where
    T: FieldValue + Default,
{
    fn assign(&mut self, raw: &str) -> Result<()> {
        self.get_or_insert_with(T::default).assign(raw)
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn render(&self, out: &mut String) {
        if let Some(value) = self {
            value.render(out);
        }
    }

    fn type_name(&self) -> &'static str {
        "Option"
    }
}

impl FieldValue for DateTime<Utc> {
    fn assign(&mut self, raw: &str) -> Result<()> {
        Err(Error::unmarshal_type(raw, FieldValue::type_name(self)))
    }

    fn is_zero(&self) -> bool {
        *self == DateTime::<Utc>::UNIX_EPOCH
    }

    fn render(&self, out: &mut String) {
        out.push_str(&self.to_rfc3339_opts(SecondsFormat::AutoSi, true));
    }

    fn type_name(&self) -> &'static str {
        "DateTime<Utc>"
    }
}

impl FieldValue for SystemTime {
    fn assign(&mut self, raw: &str) -> Result<()> {
        Err(Error::unmarshal_type(raw, FieldValue::type_name(self)))
    }

    fn is_zero(&self) -> bool {
        *self == SystemTime::UNIX_EPOCH
    }

    fn render(&self, out: &mut String) {
        DateTime::<Utc>::from(*self).render(out);
    }

    fn type_name(&self) -> &'static str {
        "SystemTime"
    }
}
