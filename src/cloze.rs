//! Embedded-answer ("cloze") text parsing.
//!
//! Dropdown-select items are imported by synthesizing a cloze-formatted
//! body with one multichoice placeholder and handing it to this parser,
//! which turns placeholders into structured sub-answers and rewrites each
//! one as `{#N}` in the body.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+):MULTICHOICE:([^{}]*)\}").expect("valid regex"));

/// One weighted alternative inside an embedded answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedOption {
    /// Alternative text.
    pub text: String,

    /// Score weight in 0..1 (negative weights are possible in the format
    /// but do not occur in synthesized dropdown-select bodies).
    pub fraction: f64,
}

/// One embedded answer extracted from a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedAnswer {
    /// Placeholder position (the `N` in `{N:MULTICHOICE:...}`).
    pub position: u32,

    /// Alternatives in declaration order.
    pub options: Vec<EmbeddedOption>,
}

/// Structured result of parsing a cloze-formatted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedQuestion {
    /// Body text with each placeholder replaced by `{#N}`.
    pub text: String,

    /// Embedded answers in placeholder order.
    pub answers: Vec<EmbeddedAnswer>,
}

/// Parse a cloze-formatted text into a structured embedded-answer record.
///
/// Only the `MULTICHOICE` placeholder form is recognized; that is the only
/// form this importer synthesizes. Text without placeholders yields an
/// unchanged body and no answers.
#[must_use]
pub fn extract_embedded_question(text: &str) -> EmbeddedQuestion {
    let mut answers = Vec::new();

    let body = PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        let position: u32 = caps[1].parse().unwrap_or(0);
        answers.push(EmbeddedAnswer {
            position,
            options: parse_options(&caps[2]),
        });
        format!("{{#{position}}}")
    });

    EmbeddedQuestion {
        text: body.into_owned(),
        answers,
    }
}

/// Parse the `~`-separated alternatives of one placeholder payload.
fn parse_options(payload: &str) -> Vec<EmbeddedOption> {
    payload
        .split('~')
        .filter(|part| !part.is_empty())
        .map(|part| {
            if let Some(rest) = part.strip_prefix('=') {
                EmbeddedOption {
                    text: rest.to_string(),
                    fraction: 1.0,
                }
            } else if let Some(rest) = part.strip_prefix('%') {
                match rest.split_once('%') {
                    Some((weight, text)) => EmbeddedOption {
                        text: text.to_string(),
                        fraction: weight.parse::<f64>().unwrap_or(0.0) / 100.0,
                    },
                    None => EmbeddedOption {
                        text: part.to_string(),
                        fraction: 0.0,
                    },
                }
            } else {
                EmbeddedOption {
                    text: part.to_string(),
                    fraction: 0.0,
                }
            }
        })
        .collect()
}
