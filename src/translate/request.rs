use serde_json::{Map, Value};

/// Field name callers send (OpenAI dialect).
pub const ENCODING_FORMAT: &str = "encoding_format";
/// Field name the upstream expects (Jina dialect).
pub const EMBEDDING_TYPE: &str = "embedding_type";

/// Move `encoding_format` to `embedding_type`, leaving every other key in place.
/// Returns true when a rename happened.
pub fn rename_encoding_format(body: &mut Map<String, Value>) -> bool {
    match body.shift_remove(ENCODING_FORMAT) {
        Some(value) => {
            body.insert(EMBEDDING_TYPE.to_string(), value);
            true
        }
        None => false,
    }
}

/// Translate a parsed caller request into the upstream dialect.
/// Only objects carry fields; any other JSON document is forwarded as is.
pub fn translate_request(mut body: Value) -> Value {
    if let Some(map) = body.as_object_mut() {
        rename_encoding_format(map);
    }
    body
}

/// Parse, translate and re-serialize a raw caller body. A `null` document has
/// no fields to read and is rejected like unparseable input.
pub fn translate_request_body(raw: &[u8]) -> serde_json::Result<Vec<u8>> {
    let parsed: Value = serde_json::from_slice(raw)?;
    if parsed.is_null() {
        return Err(serde::de::Error::custom(
            "expected a JSON object, got null",
        ));
    }
    serde_json::to_vec(&translate_request(parsed))
}
