use crate::content_graph::domain::{FailedUpload, FailureKind, ItemRef, UploadResponse};
use serde_json::Value;

/// Longest message taken verbatim from a response body
const MAX_MESSAGE_LENGTH: usize = 2048;

/// Turns a platform response that is not a plain success into a failure record
///
/// The raw body is kept on the record; `additional_info` carries the most
/// specific message found in it.
pub fn parse_upload_response(item: ItemRef, response: &UploadResponse) -> FailedUpload {
    FailedUpload {
        item,
        kind: FailureKind::Rejected,
        status: Some(response.status),
        response_body: response.body.clone(),
        additional_info: extract_message(&response.body)
            .unwrap_or_else(|| format!("Platform responded with status {}", response.status)),
    }
}

fn extract_message(body: &Value) -> Option<String> {
    let message = match body {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Object(map) => ["error", "message", "detail", "errors"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(extract_message),
        Value::Array(entries) => {
            let messages: Vec<String> = entries.iter().filter_map(extract_message).collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }?;

    Some(truncate(message))
}

fn truncate(mut message: String) -> String {
    if message.len() > MAX_MESSAGE_LENGTH {
        let mut end = MAX_MESSAGE_LENGTH;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
        message.push_str("...");
    }
    message
}
