//! Decoding of literal token images into JSON values.

use serde_json::{Number, Value};

use crate::grammar::cst::Atomic;

/// Number image as the narrowest JSON number: `i64`, then `u64`, then `f64`.
///
/// The lexer rejects images without a finite value; any other decodes to `null`.
pub(crate) fn number(image: &str) -> Value {
    if let Ok(n) = image.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(n) = image.parse::<u64>() {
        return Value::from(n);
    }
    image
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

/// Number image as a JSON number, `None` when it has no finite value.
pub(crate) fn json_number(image: &str) -> Option<Number> {
    match number(image) {
        Value::Number(n) => Some(n),
        _ => None,
    }
}

/// Boolean image, case-insensitive.
pub(crate) fn boolean(image: &str) -> bool {
    image.eq_ignore_ascii_case("true")
}

/// String image with the quotes removed and escapes kept verbatim.
pub(crate) fn unquoted(image: &str) -> String {
    image
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(image)
        .to_owned()
}

/// String image with JSON escapes decoded.
pub(crate) fn json_string(image: &str) -> String {
    serde_json::from_str::<String>(image).unwrap_or_else(|_| unquoted(image))
}

/// Expression operand value.
pub(crate) fn atomic(value: &Atomic) -> Value {
    match value {
        Atomic::Number(image) => number(image),
        Atomic::String(image) => Value::String(unquoted(image)),
        Atomic::Boolean(image) => Value::Bool(boolean(image)),
    }
}
