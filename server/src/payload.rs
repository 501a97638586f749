//! Request and response bodies.
//!
//! Mutation bodies are decoded into a `Decoded` value instead of going through
//! axum's `Json` extractor, because a malformed body must not reject the
//! request: handlers fall back to the zero payload and carry on.

use std::fmt;

use serde::{
    de::{DeserializeOwned, IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

/// Body of create and update requests.
///
/// The `description` key is matched without regard to ASCII case, and
/// unknown keys are skipped. When the key repeats, the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodoPayload {
    pub description: String,
}

impl<'de> Deserialize<'de> for TodoPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PayloadVisitor;

        impl<'de> Visitor<'de> for PayloadVisitor {
            type Value = TodoPayload;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a todo payload object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TodoPayload, A::Error> {
                let mut payload = TodoPayload::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("description") {
                        payload.description = map.next_value()?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(payload)
            }
        }

        deserializer.deserialize_map(PayloadVisitor)
    }
}

/// `{"message": ...}` envelope used by the greeting, every mutation and every
/// error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Query string of `GET /api/todos`.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub completed: Option<String>,
}

impl ListQuery {
    /// Keep the first `completed` value; later repeats and other keys are
    /// ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let completed = pairs
            .into_iter()
            .find(|(key, _)| key == "completed")
            .map(|(_, value)| value);
        Self { completed }
    }

    /// The status filter, if the query names one. Only the literal strings
    /// `true` and `false` filter; anything else lists everything.
    pub fn status(&self) -> Option<bool> {
        match self.completed.as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }
}

/// Outcome of decoding a JSON request body. Only the first JSON value is
/// read; anything after it is ignored.
#[derive(Debug)]
pub enum Decoded<T> {
    Parsed(T),
    /// The body held no JSON value at all.
    Empty,
    Malformed(serde_json::Error),
}

impl<T: DeserializeOwned> Decoded<T> {
    pub fn from_slice(bytes: &[u8]) -> Self {
        match serde_json::Deserializer::from_slice(bytes).into_iter::<T>().next() {
            Some(Ok(value)) => Decoded::Parsed(value),
            Some(Err(err)) => Decoded::Malformed(err),
            None => Decoded::Empty,
        }
    }
}

impl<T: Default> Decoded<T> {
    /// The parsed value, or `T::default()` for an empty or malformed body.
    pub fn unwrap_or_default(self) -> T {
        match self {
            Decoded::Parsed(value) => value,
            Decoded::Empty | Decoded::Malformed(_) => T::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Decoded<TodoPayload> {
        Decoded::from_slice(bytes)
    }

    #[test]
    fn payload_reads_description() {
        let decoded = decode(br#"{"description":"Buy milk"}"#);
        assert!(matches!(decoded, Decoded::Parsed(_)));
        assert_eq!(decoded.unwrap_or_default().description, "Buy milk");
    }

    #[test]
    fn payload_without_description_is_empty() {
        let decoded = decode(br#"{"title":"ignored","extra":[1,{"a":null}]}"#);
        assert!(matches!(decoded, Decoded::Parsed(_)));
        assert_eq!(decoded.unwrap_or_default(), TodoPayload::default());
    }

    #[test]
    fn payload_key_ignores_case() {
        assert_eq!(
            decode(br#"{"Description":"Caps"}"#).unwrap_or_default().description,
            "Caps"
        );
        assert_eq!(
            decode(br#"{"DESCRIPTION":"Loud"}"#).unwrap_or_default().description,
            "Loud"
        );
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let decoded = decode(br#"{"description":"a","Description":"b"}"#);
        assert_eq!(decoded.unwrap_or_default().description, "b");
    }

    #[test]
    fn trailing_data_after_first_value_is_ignored() {
        let decoded = decode(br#"{"description":"a"} trailing"#);
        assert!(matches!(decoded, Decoded::Parsed(_)));
        assert_eq!(decoded.unwrap_or_default().description, "a");
    }

    #[test]
    fn malformed_payload_falls_back_to_default() {
        let decoded = decode(b"{not json");
        assert!(matches!(decoded, Decoded::Malformed(_)));
        assert_eq!(decoded.unwrap_or_default().description, "");
    }

    #[test]
    fn blank_body_is_empty() {
        assert!(matches!(decode(b""), Decoded::Empty));
        assert!(matches!(decode(b"  \n"), Decoded::Empty));
        assert_eq!(decode(b"").unwrap_or_default(), TodoPayload::default());
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let decoded = decode(br#"{"description":5}"#);
        assert!(matches!(decoded, Decoded::Malformed(_)));
        assert_eq!(decoded.unwrap_or_default().description, "");
    }

    #[test]
    fn non_object_body_is_malformed() {
        assert!(matches!(decode(b"[1,2]"), Decoded::Malformed(_)));
    }

    #[test]
    fn list_query_only_filters_on_literal_booleans() {
        let query = |value: Option<&str>| ListQuery {
            completed: value.map(str::to_string),
        };
        assert_eq!(query(Some("true")).status(), Some(true));
        assert_eq!(query(Some("false")).status(), Some(false));
        assert_eq!(query(Some("TRUE")).status(), None);
        assert_eq!(query(Some("1")).status(), None);
        assert_eq!(query(None).status(), None);
    }

    #[test]
    fn list_query_keeps_first_completed_value() {
        let pairs = vec![
            ("page".to_string(), "2".to_string()),
            ("completed".to_string(), "true".to_string()),
            ("completed".to_string(), "false".to_string()),
        ];
        assert_eq!(ListQuery::from_pairs(pairs).status(), Some(true));
        assert_eq!(ListQuery::from_pairs(Vec::new()).status(), None);
    }

    #[test]
    fn message_serializes_as_envelope() {
        let json = serde_json::to_string(&Message::new("Successfully added")).unwrap();
        assert_eq!(json, r#"{"message":"Successfully added"}"#);
    }
}
