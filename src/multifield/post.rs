use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use serde_json::Value;
use tracing::debug;

use super::row::RowModel;

/// Decode a form-urlencoded component: `+` is a space, `%XX` a byte.
///
/// Byte sequences that are not UTF-8 are read as Latin-1.
pub fn url_decode(input: &str) -> String {
    let spaced: Cow<'_, str> = if input.contains('+') {
        Cow::Owned(input.replace('+', " "))
    } else {
        Cow::Borrowed(input)
    };
    let bytes: Vec<u8> = percent_decode_str(&spaced).collect();
    normalize_encoding(bytes)
}

fn normalize_encoding(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Undo backslash escaping applied by the transport: `\x` becomes `x`,
/// `\0` a NUL character, and a trailing lone backslash is dropped.
pub fn strip_slashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('\0'),
            Some(next) => out.push(next),
            None => {}
        }
    }
    out
}

/// Parse the posted payload into its top-level JSON array.
///
/// The slash-stripped form is tried first; payloads that were never escaped
/// still parse as sent. Anything else yields `None`.
fn parse_payload(raw: &str) -> Option<Vec<Value>> {
    let parsed = serde_json::from_str::<Value>(&strip_slashes(raw))
        .or_else(|_| serde_json::from_str::<Value>(raw));
    match parsed {
        Ok(Value::Array(items)) => Some(items),
        Ok(other) => {
            debug!(kind = json_kind(&other), "posted multifield payload is not an array");
            None
        }
        Err(err) => {
            debug!(error = %err, "discarding malformed multifield payload");
            None
        }
    }
}

/// Clean one posted cell value.
///
/// Strings and scalars are URL-decoded and lose embedded line breaks, which
/// the client grid inserts into long cell text. Nested values pass through.
pub fn clean_value(value: &Value) -> Value {
    let text = match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(flag) => Cow::Borrowed(if *flag { "1" } else { "" }),
        Value::Number(number) => Cow::Owned(number.to_string()),
        Value::Array(_) | Value::Object(_) => return value.clone(),
    };
    Value::String(url_decode(&text).replace('\n', ""))
}

/// Rebuild rows from a posted payload, one `make()` instance per object.
pub fn decode_rows<T, F>(raw: &str, mut make: F) -> Vec<T>
where
    T: RowModel,
    F: FnMut() -> T,
{
    let Some(items) = parse_payload(raw) else {
        return Vec::new();
    };
    let mut rows = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let Value::Object(map) = item else {
            debug!(index = idx, "skipping non-object multifield row");
            continue;
        };
        let mut row = make();
        for (key, value) in &map {
            row.set_property(key, clean_value(value));
        }
        rows.push(row);
    }
    rows
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
