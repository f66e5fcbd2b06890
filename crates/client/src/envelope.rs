//! Decoding and unwrapping of the vendor response envelope.
//!
//! The upstream answers in one of three observed shapes:
//! - `{"Response":{"Code":0,"Message":"OK","Data":{<Key>: payload}}}`
//! - `{<Key>: payload}` with no wrapper at all (the stand-in backend)
//! - an XML document carrying the same `<Response><Data>` structure
//!
//! Decoding is a tagged step: content type and a sniff of the leading
//! characters select exactly one decoder. Everything downstream works on
//! `serde_json::Value`.

use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::xml::xml_to_value;

/// Decode a response body into a JSON value.
///
/// JSON is chosen when the content type says so or when the body parses as
/// JSON despite a missing content type (the upstream routinely omits it).
/// XML is chosen by sniffing the leading characters. Anything else is a
/// malformed response.
pub fn decode_body(content_type: Option<&str>, body: &str) -> Result<Value> {
    let content_type = content_type.unwrap_or_default();
    if content_type.contains("application/json") || content_type.contains("text/json") {
        return serde_json::from_str(body)
            .map_err(|e| ClientError::MalformedResponse(format!("invalid JSON body: {e}")));
    }

    let trimmed = body.trim_start();
    if trimmed.starts_with("<?xml") || trimmed.starts_with("<Response") {
        return xml_to_value(body);
    }

    serde_json::from_str(body).map_err(|_| {
        ClientError::MalformedResponse(format!(
            "unsupported response format (content-type {:?})",
            content_type
        ))
    })
}

/// Protocol status code embedded in the body, if any. The upstream reports
/// authentication failures this way even on HTTP 200.
pub fn response_code(value: &Value) -> Option<i64> {
    value
        .pointer("/Response/Code")
        .or_else(|| value.get("Code"))
        .and_then(Value::as_i64)
}

/// Unwrap the vendor envelope to obtain the inner payload.
///
/// Prefers `Response.Data[key]`, falling back to the whole `Response.Data`
/// object when the key is absent, then to `body[key]` for unwrapped
/// replies, and finally to the raw body when no envelope is detected.
pub fn extract_payload(value: Value, data_key: Option<&str>) -> Value {
    if let Some(data) = value.pointer("/Response/Data") {
        if let Some(key) = data_key
            && let Some(inner) = data.get(key)
        {
            return inner.clone();
        }
        return data.clone();
    }
    if let Some(key) = data_key
        && let Some(inner) = value.get(key)
    {
        return inner.clone();
    }
    value
}

/// Extract `sessionId` and `nonce` from a session-creation reply.
///
/// Accepts the standard wrapped shape, a bare `{ID, NOnce}` object, and the
/// `{Session: {...}}` variant; `Nonce` is accepted alongside `NOnce`.
pub fn extract_session(value: &Value) -> Result<(u64, String)> {
    let session = value
        .pointer("/Response/Data/Session")
        .or_else(|| value.get("Session"))
        .unwrap_or(value);

    let session_id = session.get("ID").and_then(|id| match id {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    });
    // The XML decoder coerces digit-only leaves to numbers, so a nonce that
    // happens to be all digits still has to round-trip as a string.
    let nonce = session
        .get("NOnce")
        .or_else(|| session.get("Nonce"))
        .and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

    match (session_id, &nonce) {
        (Some(id), Some(n)) if !n.is_empty() => Ok((id, n.clone())),
        _ => Err(ClientError::SessionCreation(format!(
            "missing session id or nonce (id {}, nonce {})",
            if session_id.is_some() { "found" } else { "missing" },
            if nonce.is_some() { "found" } else { "missing" },
        ))),
    }
}
