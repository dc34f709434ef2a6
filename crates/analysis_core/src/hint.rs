//! Provider error hints
//!
//! Maps the text of a failed Gemini call to a short actionable hint for the
//! user. Classification is by case-insensitive substring match because the
//! API reports these conditions as free-form messages; the patterns track
//! the provider's current wording and are checked in priority order.

/// Hint appended when the API key is rejected.
pub const HINT_API_KEY: &str =
    "Please check if your GOOGLE_API_KEY is configured correctly.";

/// Hint appended when the input tripped the provider's safety filters.
pub const HINT_SAFETY: &str = "The input may have triggered Google's safety filters.";

/// Hint appended when the request quota is exhausted.
pub const HINT_QUOTA: &str = "API quota likely exceeded. Check your usage limits.";

/// Hint appended when the request timed out.
pub const HINT_TIMEOUT: &str = "The request timed out. Try again later.";

/// Select the hint matching a provider error message, if any.
///
/// First match wins: credential, safety block, quota, timeout.
pub fn hint_for(error_text: &str) -> Option<&'static str> {
    let lower = error_text.to_lowercase();

    if lower.contains("api key not valid") {
        Some(HINT_API_KEY)
    } else if lower.contains("content has been blocked") || lower.contains("safety settings") {
        Some(HINT_SAFETY)
    } else if lower.contains("resource has been exhausted") || lower.contains("quota") {
        Some(HINT_QUOTA)
    } else if lower.contains("deadline exceeded") {
        Some(HINT_TIMEOUT)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_hint() {
        assert_eq!(hint_for("400: API key not valid"), Some(HINT_API_KEY));
        assert_eq!(hint_for("api KEY NOT valid, etc"), Some(HINT_API_KEY));
    }

    #[test]
    fn test_safety_hint() {
        assert_eq!(
            hint_for("The content has been blocked by policy"),
            Some(HINT_SAFETY)
        );
        assert_eq!(hint_for("blocked by SAFETY SETTINGS"), Some(HINT_SAFETY));
    }

    #[test]
    fn test_quota_hint() {
        assert_eq!(
            hint_for("429: Resource has been exhausted"),
            Some(HINT_QUOTA)
        );
        assert_eq!(hint_for("Quota exceeded for project"), Some(HINT_QUOTA));
    }

    #[test]
    fn test_timeout_hint() {
        assert_eq!(
            hint_for("Deadline exceeded while waiting"),
            Some(HINT_TIMEOUT)
        );
    }

    #[test]
    fn test_no_hint_for_unknown_errors() {
        assert_eq!(hint_for("connection reset by peer"), None);
        assert_eq!(hint_for(""), None);
    }

    #[test]
    fn test_priority_order() {
        // Credential match outranks a quota match in the same message
        assert_eq!(
            hint_for("API key not valid; quota check skipped"),
            Some(HINT_API_KEY)
        );
        // Safety outranks timeout
        assert_eq!(
            hint_for("safety settings rejected input before deadline exceeded"),
            Some(HINT_SAFETY)
        );
    }
}
