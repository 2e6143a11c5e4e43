use crate::client::GeminiClient;
use crate::error::LlmError;
use crate::prompt::verification_prompt;

/// Ask the model whether `city` exists.
///
/// `Ok(false)` means the model did not answer YES. Transport and parsing
/// failures are returned as errors so the caller can tell them apart from a
/// negative answer.
pub async fn check_city(client: &GeminiClient, city: &str) -> Result<bool, LlmError> {
    let answer = client.ask(&verification_prompt(city)).await?;
    let verdict = is_affirmative(answer.trim());
    log::info!("city check for {city:?}: model said {:?} -> {verdict}", answer.trim());
    Ok(verdict)
}

/// Keep only ASCII letters and digits.
pub fn normalize_answer(text: &str) -> String {
    text.chars().filter(char::is_ascii_alphanumeric).collect()
}

pub fn is_affirmative(text: &str) -> bool {
    normalize_answer(text).eq_ignore_ascii_case("YES")
}
