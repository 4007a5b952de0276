use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::FieldErrors;

/// Structured data attached to an error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Field-level messages of a validation failure
    Validation { messages: FieldErrors },
}

/// Where an exception was raised
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugTrace {
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Debug trace nested under a configurable key
///
/// Serializes as `{ "<key>": { "class": .., "file": .., "line": .. } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugBlock {
    pub key: String,
    pub trace: DebugTrace,
}

impl Serialize for DebugBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.trace)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_block_nests_under_key() {
        let block = DebugBlock {
            key: "trace".to_owned(),
            trace: DebugTrace {
                class: "HttpException".to_owned(),
                file: Some("src/routes.rs".to_owned()),
                line: Some(42),
            },
        };

        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            serde_json::json!({
                "trace": { "class": "HttpException", "file": "src/routes.rs", "line": 42 }
            })
        );
    }

    #[test]
    fn validation_payload_wraps_messages() {
        let payload = Payload::Validation {
            messages: FieldErrors::new().with("email", "required"),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({ "messages": { "email": ["required"] } })
        );
    }
}
