//! Reply validation for chat-completions bodies.
//!
//! Only `choices[0].message.content` is consumed. The body is walked one
//! field at a time so the error names the first field that is missing,
//! never a downstream one.

use serde_json::Value;

use chatterm_types::error::MalformedResponse;

/// Extract the assistant text from a raw response body.
///
/// Checks, in order: the body is a JSON object; it has a `choices` list;
/// the list is non-empty; the first choice has a `message`; the message
/// has string `content`. The content is returned unmodified.
pub fn extract_reply(body: &str) -> Result<String, MalformedResponse> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| MalformedResponse::InvalidJson(e.to_string()))?;
    extract_reply_value(value)
}

fn extract_reply_value(value: Value) -> Result<String, MalformedResponse> {
    let Value::Object(mut object) = value else {
        return Err(MalformedResponse::NotAnObject);
    };

    let Some(Value::Array(choices)) = object.remove("choices") else {
        return Err(MalformedResponse::MissingChoices);
    };

    let Some(first) = choices.into_iter().next() else {
        return Err(MalformedResponse::EmptyChoices);
    };

    let Some(message) = first.get("message").filter(|m| m.is_object()) else {
        return Err(MalformedResponse::MissingMessage);
    };

    match message.get("content") {
        Some(Value::String(content)) => Ok(content.clone()),
        _ => Err(MalformedResponse::MissingContent),
    }
}
