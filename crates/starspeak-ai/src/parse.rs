use serde::de::DeserializeOwned;
use starspeak_core::generator::GenerateError;

/// Outermost `{...}` span, for model output wrapped in prose or code fences
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Decode a proxy body, tolerating text around the JSON object
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, GenerateError> {
    if let Ok(value) = serde_json::from_str::<T>(body) {
        return Ok(value);
    }

    let object = extract_json_object(body)
        .ok_or_else(|| GenerateError::Malformed("no JSON object in response".to_string()))?;

    serde_json::from_str(object)
        .map_err(|e| GenerateError::Malformed(format!("Failed to parse response: {e}")))
}
