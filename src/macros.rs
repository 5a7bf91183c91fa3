/// Implements [`Record`](crate::Record) for a struct.
///
/// List the fields in the order they should be encoded. Append `as "tag"` to a
/// field to give it an override name, used both for matching keys and as the
/// encoded key. Every listed field's type must implement
/// [`FieldValue`](crate::FieldValue).
///
/// ```rust
/// use linecfg::{decode, encode, record};
/// use std::time::Duration;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Config {
///     host: String,
///     port: u16,
///     timeout: Duration,
/// }
///
/// record!(Config {
///     host,
///     port,
///     timeout as "connect_timeout",
/// });
///
/// let mut config = Config::default();
/// decode("host=localhost port=8080 connect_timeout=5s", &mut config).unwrap();
/// assert_eq!(config.timeout, Duration::from_secs(5));
/// assert_eq!(encode(&config), "host=localhost port=8080 connect_timeout=5s");
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ident { $($field:ident $(as $tag:literal)?),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields() -> &'static [$crate::FieldDescriptor] {
                const FIELDS: &[$crate::FieldDescriptor] = &[
                    $($crate::FieldDescriptor::new(stringify!($field)) $(.with_tag($tag))?),*
                ];
                FIELDS
            }

            fn field(&self, name: &str) -> ::std::option::Option<&dyn $crate::FieldValue> {
                match name {
                    $(stringify!($field) => ::std::option::Option::Some(&self.$field),)*
                    _ => ::std::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::std::option::Option<&mut dyn $crate::FieldValue> {
                match name {
                    $(stringify!($field) => ::std::option::Option::Some(&mut self.$field),)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}
