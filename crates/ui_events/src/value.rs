//! Normalization of decoded host values.
//!
//! The wire decoder skips allocating one-character strings and hands them
//! over as their Unicode code point instead. Any field that may carry text
//! must therefore accept a number and turn it back into a string.

use anyhow::{anyhow, Result};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde_json::Value;
use std::fmt;

/// Text carried by `value`, converting a code point number back to its
/// one-character string. `None` for anything else.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n.as_u64().and_then(code_point).map(String::from),
        _ => None,
    }
}

fn code_point(value: u64) -> Option<char> {
    u32::try_from(value).ok().and_then(char::from_u32)
}

/// Positional argument `index` of an event tuple.
pub fn arg<'a>(tuple: &'a [Value], index: usize, what: &str) -> Result<&'a Value> {
    tuple
        .get(index)
        .ok_or_else(|| anyhow!("missing {what} (argument {index})"))
}

pub fn text_arg(tuple: &[Value], index: usize, what: &str) -> Result<String> {
    let value = arg(tuple, index, what)?;
    text(value).ok_or_else(|| anyhow!("{what} is not text: {value}"))
}

pub fn int_arg(tuple: &[Value], index: usize, what: &str) -> Result<i64> {
    let value = arg(tuple, index, what)?;
    value
        .as_i64()
        .ok_or_else(|| anyhow!("{what} is not an integer: {value}"))
}

pub fn uint_arg(tuple: &[Value], index: usize, what: &str) -> Result<u64> {
    let value = arg(tuple, index, what)?;
    value
        .as_u64()
        .ok_or_else(|| anyhow!("{what} is not an unsigned integer: {value}"))
}

pub fn array_arg<'a>(tuple: &'a [Value], index: usize, what: &str) -> Result<&'a [Value]> {
    let value = arg(tuple, index, what)?;
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| anyhow!("{what} is not an array: {value}"))
}

/// Serde adapter for text fields inside structured payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Text(pub String);

impl From<Text> for String {
    fn from(text: Text) -> Self {
        text.0
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TextVisitor;

        impl Visitor<'_> for TextVisitor {
            type Value = Text;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or a unicode code point")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Text, E> {
                Ok(Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Text, E> {
                Ok(Text(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Text, E> {
                code_point(v)
                    .map(|c| Text(c.to_string()))
                    .ok_or_else(|| E::custom(format!("invalid code point {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Text, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("invalid code point {v}")))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!("echo"), Some("echo") ; "plain string")]
    #[test_case(json!(58), Some(":") ; "colon code point")]
    #[test_case(json!(47), Some("/") ; "slash code point")]
    #[test_case(json!(0x1F600), Some("😀") ; "astral code point")]
    #[test_case(json!(0xD800), None ; "surrogate")]
    #[test_case(json!(-1), None ; "negative")]
    #[test_case(json!(null), None ; "null")]
    #[test_case(json!([1]), None ; "array")]
    fn normalizes_text(value: Value, expected: Option<&str>) {
        assert_eq!(text(&value).as_deref(), expected);
    }

    #[test]
    fn text_deserializes_from_either_form() {
        let parsed: Vec<Text> = serde_json::from_value(json!(["block", 110])).unwrap();
        assert_eq!(parsed, vec![Text("block".into()), Text("n".into())]);
    }

    #[test]
    fn text_rejects_invalid_code_point() {
        let parsed: Result<Text, _> = serde_json::from_value(json!(0x110000));
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_argument_names_the_field() {
        let err = text_arg(&[], 0, "mode name").unwrap_err();
        assert!(err.to_string().contains("mode name"));
    }

    proptest! {
        #[test]
        fn any_code_point_round_trips_to_its_char(c in any::<char>()) {
            let value = json!(c as u32);
            prop_assert_eq!(text(&value), Some(c.to_string()));

            let parsed: Text = serde_json::from_value(value).unwrap();
            prop_assert_eq!(String::from(parsed), c.to_string());
        }
    }
}
