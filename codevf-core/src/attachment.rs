//! Attachment normalization
//!
//! Attachments arrive from agent frameworks in loose shapes: structured
//! objects or JSON mappings using either snake_case or camelCase keys. They
//! are validated here against one closed schema and serialized to the wire
//! shape (`fileName`/`mimeType`/`content`/`base64`) before any network call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// A file attached to a review request
///
/// Exactly one of `content` / `base64` is expected to carry the payload.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Attachment {
    /// File name shown to the reviewer
    #[serde(alias = "file_name")]
    pub file_name: String,
    /// MIME type of the payload
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    /// Plain-text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Base64-encoded payload, passed through without decoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}

impl Attachment {
    /// Attachment carrying a plain-text payload
    pub fn text(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content: Some(content.into()),
            base64: None,
        }
    }

    /// Attachment carrying a base64-encoded payload
    pub fn base64(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        base64: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content: None,
            base64: Some(base64.into()),
        }
    }

    /// Validate a loose JSON value against the attachment schema
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::Attachment(format!(
                "expected an attachment object, got {}",
                json_type_name(value)
            )));
        }
        serde_json::from_value(value.clone()).map_err(|e| Error::Attachment(e.to_string()))
    }
}

/// Normalize a loose attachment list into canonical attachments
///
/// An empty or absent list yields `None` so the caller can omit the field
/// entirely. Any value that does not satisfy the attachment schema fails
/// with [`Error::Attachment`] before any network call.
pub fn normalize_attachments(values: Option<Vec<Value>>) -> Result<Option<Vec<Attachment>>> {
    let values = match values {
        Some(values) if !values.is_empty() => values,
        _ => return Ok(None),
    };

    let attachments = values
        .iter()
        .map(Attachment::from_value)
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(attachments))
}

/// Collapse an already-typed attachment list, mapping empty to "no attachments"
pub fn coalesce_attachments(attachments: Vec<Attachment>) -> Option<Vec<Attachment>> {
    if attachments.is_empty() {
        None
    } else {
        Some(attachments)
    }
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
