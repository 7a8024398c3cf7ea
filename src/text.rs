//! Text cleaning and display-name generation.
//!
//! The export carries HTML fragments of wildly varying quality; imported
//! question bodies keep their markup (minus anything unsafe) and are tagged
//! as HTML, while display names are plain text derived from the body.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::config::MAX_NAME_LENGTH;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EVENT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SCRIPT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(href|src)\s*=\s*["']?\s*javascript:[^"'>\s]*["']?"#).expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Display format of a cleaned text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    Html,
    Plain,
}

/// A sanitized text field with its display format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedText {
    pub text: String,
    pub format: TextFormat,
}

/// Sanitize raw markup for storage.
///
/// Applies NFC normalization and strips unsafe constructs (script and style
/// blocks, inline event handlers, `javascript:` URLs). The surviving markup
/// is kept and the field is tagged as HTML.
#[must_use]
pub fn clean_text(raw: &str) -> CleanedText {
    let text: String = raw.nfc().collect();
    let text = SCRIPT_BLOCK.replace_all(&text, "");
    let text = STYLE_BLOCK.replace_all(&text, "");
    let text = EVENT_ATTR.replace_all(&text, "");
    let text = SCRIPT_URL.replace_all(&text, r#"$1="""#);

    CleanedText {
        text: text.trim().to_string(),
        format: TextFormat::Html,
    }
}

/// Remove all markup tags from a text fragment.
#[must_use]
pub fn strip_tags(text: &str) -> String {
    TAG.replace_all(text, "").into_owned()
}

/// Decode the handful of entities that commonly appear in exported text.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Derive a display name from question text.
///
/// The name is the tag-stripped, whitespace-collapsed body truncated to
/// [`MAX_NAME_LENGTH`] characters. When nothing printable survives, the
/// numbered `fallback` label is used instead.
#[must_use]
pub fn default_question_name(text: &str, fallback: &str) -> String {
    let stripped = decode_entities(&strip_tags(text));
    let collapsed = WHITESPACE.replace_all(stripped.trim(), " ");

    if collapsed.is_empty() {
        return fallback.to_string();
    }
    collapsed.chars().take(MAX_NAME_LENGTH).collect::<String>().trim_end().to_string()
}
