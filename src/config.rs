//! Configuration constants for the importer.

/// Maximum length of a generated question display name, in characters.
pub const MAX_NAME_LENGTH: usize = 80;

/// Number of response field lines for imported essay questions.
pub const ESSAY_RESPONSE_FIELD_LINES: u32 = 15;

/// Penalty factor applied to imported embedded-answer questions.
///
/// Fixed at one third, matching the legacy importer exactly (including its
/// seven-digit truncation).
pub const EMBEDDED_PENALTY: f64 = 0.3333333;

/// Root element expected in a Blackboard V5/V6 export document.
pub const DOCUMENT_ROOT: &str = "questestinterop";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_penalty_is_legacy_third() {
        // The legacy value is a truncated literal, not 1.0 / 3.0.
        assert!(EMBEDDED_PENALTY < 1.0 / 3.0);
        assert!((EMBEDDED_PENALTY - 1.0 / 3.0).abs() < 1e-7);
    }
}
