//! Argument codec
//!
//! The host transport only carries primitives and strings, so structured
//! data crosses it JSON-encoded. Inbound arguments are decoded here before
//! listeners see them; outbound arguments are encoded before they reach the
//! host.

use serde_json::Value;

/// Outcome of decoding a single string
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The string held JSON; this is the parsed value
    Parsed(Value),
    /// Not a string, or not JSON; this is the original value
    Passthrough(Value),
}

impl Decoded {
    /// The resulting value either way
    pub fn into_value(self) -> Value {
        match self {
            Decoded::Parsed(value) | Decoded::Passthrough(value) => value,
        }
    }

    /// Whether the string was decoded
    pub fn is_parsed(&self) -> bool {
        matches!(self, Decoded::Parsed(_))
    }
}

/// Try to decode a string value as JSON
///
/// Never fails: malformed input comes back as [`Decoded::Passthrough`].
pub fn decode_argument(value: Value) -> Decoded {
    match value {
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(parsed) => Decoded::Parsed(parsed),
            Err(_) => Decoded::Passthrough(Value::String(text)),
        },
        other => Decoded::Passthrough(other),
    }
}

/// Normalize one inbound argument
///
/// - strings are JSON-decoded when possible, otherwise kept
/// - arrays and objects are normalized element by element
/// - everything else is returned unchanged
pub fn parse_argument(value: Value) -> Value {
    match value {
        Value::String(_) => decode_argument(value).into_value(),
        Value::Array(items) => Value::Array(items.into_iter().map(parse_argument).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, parse_argument(item)))
                .collect(),
        ),
        other => other,
    }
}

/// Normalize an inbound argument list, preserving positions
pub fn parse_all_arguments(args: Vec<Value>) -> Vec<Value> {
    args.into_iter().map(parse_argument).collect()
}

/// Encode one outbound argument for the host transport
///
/// Arrays and objects become JSON strings; primitives are unchanged.
pub fn encode_argument(value: Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => Value::String(value.to_string()),
        other => other,
    }
}
