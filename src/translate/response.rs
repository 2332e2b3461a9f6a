use super::types::{EmbeddingsResponse, EmbeddingsUsage};
use crate::error::{RelayError, Result};
use serde_json::{Map, Value};

/// Take a field out of the upstream object, treating `null` as absent.
fn take_present(obj: &mut Map<String, Value>, key: &str) -> Option<Value> {
    obj.remove(key).filter(|v| !v.is_null())
}

/// Translate a Jina embeddings response into the OpenAI shape.
/// Unknown upstream fields are dropped. A document that is JSON but not an
/// object carries none of the fields and maps to the defaults; only `null`
/// is rejected.
pub fn translate_response(upstream: Value) -> Result<EmbeddingsResponse> {
    let mut obj = match upstream {
        Value::Object(map) => map,
        Value::Null => {
            return Err(RelayError::conversion(
                "upstream returned null instead of a JSON object",
            ))
        }
        _ => Map::new(),
    };

    let total_tokens = obj
        .get("usage")
        .and_then(|usage| usage.get("total_tokens"))
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or_else(|| Value::from(0));

    Ok(EmbeddingsResponse {
        object: take_present(&mut obj, "object").unwrap_or_else(|| Value::from("list")),
        data: take_present(&mut obj, "data").unwrap_or_else(|| Value::Array(Vec::new())),
        model: obj.remove("model").unwrap_or(Value::Null),
        usage: EmbeddingsUsage::from_total(total_tokens),
    })
}

/// Parse, translate and serialize a raw upstream body. The returned buffer is
/// exactly what goes on the wire, so its length is the `content-length`.
pub fn translate_response_body(raw: &[u8]) -> Result<Vec<u8>> {
    let parsed: Value = serde_json::from_slice(raw).map_err(RelayError::conversion)?;
    let translated = translate_response(parsed)?;
    serde_json::to_vec(&translated).map_err(RelayError::conversion)
}
