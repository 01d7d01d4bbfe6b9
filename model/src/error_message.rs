use serde::{Deserialize, Serialize};

/// Error body returned by the platform on non-2xx responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    /// Transaction id; a number or a string, depending on platform version.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<serde_json::Value>,
}

impl ErrorMessage {
    pub fn new(error: String) -> ErrorMessage {
        ErrorMessage {
            error: Some(error),
            code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_codes_both_parse() {
        let numeric: ErrorMessage =
            serde_json::from_str(r#"{"error": "The requested resource does not exist.", "code": 12102}"#)
                .unwrap();
        assert_eq!(numeric.code, Some(serde_json::json!(12102)));

        let stringy: ErrorMessage =
            serde_json::from_str(r#"{"error": "whoops", "code": "ze21Hj3ka"}"#).unwrap();
        assert_eq!(stringy.code, Some(serde_json::json!("ze21Hj3ka")));
    }

    #[test]
    fn empty_body_parses_to_defaults() {
        let empty: ErrorMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ErrorMessage { error: None, code: None });
    }
}
