use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JOSE header of a token
///
/// Decoded once from the first segment and never mutated afterwards.
/// Parameters without a dedicated field are preserved in [`Header::extra`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm used for signing
    ///
    /// A header without `alg` decodes to the empty string, which never
    /// matches the name of a real algorithm.
    #[serde(rename = "alg", default)]
    pub algorithm: String,

    /// Token type (typically "JWT")
    #[serde(rename = "typ", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Content type of the claims segment
    #[serde(rename = "cty", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Key ID (for key selection by a resolver)
    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    /// Any other registered or private header parameters
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Header {
    /// Get algorithm as string
    pub fn algorithm_str(&self) -> &str {
        &self.algorithm
    }

    /// Get key ID if present
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// Look up a header parameter that has no dedicated field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_registered_fields() {
        let header: Header =
            serde_json::from_str(r#"{"alg":"HS256","typ":"JWT","cty":"JWT","kid":"k1"}"#)
                .unwrap();
        assert_eq!(header.algorithm_str(), "HS256");
        assert_eq!(header.token_type.as_deref(), Some("JWT"));
        assert_eq!(header.content_type.as_deref(), Some("JWT"));
        assert_eq!(header.key_id(), Some("k1"));
        assert!(header.extra.is_empty());
    }

    #[test]
    fn test_preserves_unregistered_fields() {
        let header: Header =
            serde_json::from_str(r#"{"alg":"HS256","x5t":"abc","crit":["exp"]}"#).unwrap();
        assert_eq!(header.get("x5t"), Some(&Value::String("abc".into())));
        assert!(header.get("crit").is_some_and(Value::is_array));
        assert_eq!(header.get("kid"), None);
    }

    #[test]
    fn test_missing_alg_is_empty() {
        let header: Header = serde_json::from_str(r#"{"typ":"JWT"}"#).unwrap();
        assert_eq!(header.algorithm_str(), "");
    }

    #[test]
    fn test_non_object_header_fails() {
        assert!(serde_json::from_str::<Header>(r#"["HS256"]"#).is_err());
        assert!(serde_json::from_str::<Header>(r#"{"alg":256}"#).is_err());
    }
}
