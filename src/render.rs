//! Record encoding.

use crate::record::Record;

/// Renders a record as a line.
///
/// Fields are written in declaration order as `key=value`, separated by single
/// spaces. The key is the field's tag if it has one, otherwise its lower-cased
/// name. Fields holding their zero value are left out.
///
/// # Examples
///
/// ```rust
/// use linecfg::{encode, record};
///
/// #[derive(Default)]
/// struct Config {
///     foo: String,
///     bar: i32,
/// }
///
/// record!(Config { foo, bar as "override" });
///
/// let config = Config { foo: "hello".to_string(), bar: 3 };
/// assert_eq!(encode(&config), "foo=hello override=3");
/// assert_eq!(encode(&Config::default()), "");
/// ```
pub fn encode<R>(record: &R) -> String
where
    R: Record,
{
    let mut line = String::with_capacity(64);
    for descriptor in R::fields() {
        let Some(value) = record.field(descriptor.name()) else {
            continue;
        };
        if value.is_zero() {
            continue;
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&descriptor.key());
        line.push('=');
        value.render(&mut line);
    }
    line
}
