//! Request payloads for the Gemini `generateContent` endpoint and the fixed
//! prompts this tool sends.

use serde::Serialize;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

// Menu number -> what the question asks about. Ordered so the menu prints 1..3.
pub static QUERY_TOPICS: phf::OrderedMap<u8, &'static str> = phf::phf_ordered_map! {
    1u8 => "weather",
    2u8 => "time",
    3u8 => "population",
};

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

impl GenerateRequest {
    /// One user message with one text part, the question verbatim.
    pub fn new(model: &str, question: &str) -> Self {
        Self {
            model: model.to_string(),
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: question.to_string(),
                }],
            }],
        }
    }
}

pub fn verification_prompt(city: &str) -> String {
    format!(
        "Is {city} an existing city? Answer with *only* 'YES' or 'NO'. \
         Do not include any other text, punctuation, or quotation marks."
    )
}

/// Question for menu entry `choice`, or `None` when the number is not on the menu.
pub fn query_prompt(choice: u8, city: &str) -> Option<String> {
    QUERY_TOPICS
        .get(&choice)
        .map(|topic| format!("What is the current {topic} in {city} ?"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_has_model_and_single_user_part() {
        let req = GenerateRequest::new("gemini-2.5-flash", "Is Paris an existing city?");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "gemini-2.5-flash",
                "contents": [
                    { "role": "user", "parts": [{ "text": "Is Paris an existing city?" }] }
                ]
            })
        );
    }

    #[test]
    fn question_text_is_left_to_the_serializer() {
        let req = GenerateRequest::new("m", "say \"hi\"\n");
        let body = serde_json::to_string(&req).unwrap();
        assert!(body.contains(r#""text":"say \"hi\"\n""#));
    }

    #[test]
    fn query_prompts_follow_menu_numbers() {
        assert_eq!(
            query_prompt(1, "Lima").as_deref(),
            Some("What is the current weather in Lima ?")
        );
        assert_eq!(
            query_prompt(2, "Tokyo").as_deref(),
            Some("What is the current time in Tokyo ?")
        );
        assert_eq!(
            query_prompt(3, "Oslo").as_deref(),
            Some("What is the current population in Oslo ?")
        );
        assert_eq!(query_prompt(0, "Oslo"), None);
        assert_eq!(query_prompt(4, "Oslo"), None);
    }

    #[test]
    fn menu_is_ordered() {
        let numbers: Vec<u8> = QUERY_TOPICS.keys().copied().collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn verification_prompt_demands_bare_answer() {
        let prompt = verification_prompt("Atlantis");
        assert!(prompt.starts_with("Is Atlantis an existing city?"));
        assert!(prompt.contains("'YES' or 'NO'"));
    }
}
