use chatlens_types::ConversationPayload;
use serde_json::Value;

use crate::{Error, Result};

/// Split an analysis request into its items.
///
/// A single `{conversation, messages}` object yields one item, an array
/// yields one item per element. Any other JSON value is rejected before
/// anything is computed.
pub fn split_input(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(vec![value]),
        other => Err(Error::InvalidInput(format!(
            "expected an object or an array of objects, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Validate one item and decode it into a [`ConversationPayload`].
///
/// Missing top-level keys are reported by name; they are checked before
/// serde so the caller gets `missing 'messages'` rather than a generic
/// decode error.
pub fn parse_payload(value: Value) -> Result<ConversationPayload> {
    let Value::Object(map) = &value else {
        return Err(Error::InvalidInput(format!(
            "conversation item must be an object, got {}",
            json_type_name(&value)
        )));
    };

    if !map.contains_key("conversation") {
        return Err(Error::MissingField("conversation"));
    }
    if !map.contains_key("messages") {
        return Err(Error::MissingField("messages"));
    }

    Ok(serde_json::from_value(value)?)
}

/// Best-effort conversation id of a raw item, for error reports.
pub fn peek_conversation_id(value: &Value) -> Option<String> {
    let conv = value.get("conversation")?;
    conv.get("_id")
        .or_else(|| conv.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
