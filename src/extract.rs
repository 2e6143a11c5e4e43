use serde_json::Value;

use crate::error::LlmError;

const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";
const TEXT_PATH: &str = "candidates[0].content.parts[0].text";

/// Pull the generated text out of a `generateContent` response body.
///
/// The text is returned as-is; callers decide whether to trim.
pub fn extract_text(body: &str) -> Result<String, LlmError> {
    let json: Value = serde_json::from_str(body).map_err(LlmError::MalformedResponse)?;

    json.pointer(TEXT_POINTER)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(LlmError::UnexpectedShape { path: TEXT_PATH })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_first_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Paris is sunny, 18°C"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Paris is sunny, 18°C");
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":" YES\n"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), " YES\n");
    }

    #[test]
    fn ignores_later_candidates_and_parts() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"first"},{"text":"second"}]}},
            {"content":{"parts":[{"text":"other"}]}}
        ]}"#;
        assert_eq!(extract_text(body).unwrap(), "first");
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = extract_text("<html>oops</html>").unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn missing_segments_are_unexpected_shape() {
        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#,
            r#"{"candidates":{"content":{}}}"#,
        ] {
            let err = extract_text(body).unwrap_err();
            assert!(
                matches!(err, LlmError::UnexpectedShape { .. }),
                "body {body} gave {err:?}"
            );
        }
    }

    #[test]
    fn non_string_text_is_unexpected_shape() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":42}]}}]}"#;
        assert!(matches!(
            extract_text(body).unwrap_err(),
            LlmError::UnexpectedShape { .. }
        ));
    }
}
