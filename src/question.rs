//! Normalized output question records.
//!
//! One closed enum covers the archetypes this importer can produce; every
//! variant is independently serializable for the YAML writer.

use serde::Serialize;

use crate::cloze::EmbeddedAnswer;
use crate::text::TextFormat;

/// One answer option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Sanitized answer text.
    pub text: String,

    /// Score weight snapped to the supported grade-fraction set.
    pub fraction: f64,

    /// Per-answer feedback. Always empty for imported items: feedback
    /// blocks are extracted from the source but intentionally not wired
    /// into individual answers.
    pub feedback: String,
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultipleChoiceQuestion {
    pub name: String,
    pub text: String,
    pub format: TextFormat,
    /// Whether only one answer may be selected.
    pub single: bool,
    pub answers: Vec<Answer>,
}

/// An embedded-answer (cloze) question synthesized from a dropdown-select
/// item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedAnswerQuestion {
    pub name: String,
    pub text: String,
    pub format: TextFormat,
    /// Number of embedded answers; always one for imported items.
    pub length: u32,
    pub penalty: f64,
    pub answers: Vec<EmbeddedAnswer>,
}

/// A free-text essay question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EssayQuestion {
    pub name: String,
    pub text: String,
    pub format: TextFormat,
    pub defaultmark: f64,
    /// Final score weight; always zero for imported essays.
    pub fraction: f64,
    pub responseformat: String,
    pub responsefieldlines: u32,
    pub responserequired: bool,
    pub attachments: u32,
    pub attachmentsrequired: u32,
    pub graderinfo: String,
    pub responsetemplate: String,
}

/// A text-only description item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionQuestion {
    pub name: String,
    pub text: String,
    pub format: TextFormat,
    pub defaultmark: f64,
    pub length: u32,
}

/// A finalized question, tagged by host question type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "qtype")]
pub enum Question {
    #[serde(rename = "multichoice")]
    MultipleChoice(MultipleChoiceQuestion),
    #[serde(rename = "multianswer")]
    Embedded(EmbeddedAnswerQuestion),
    #[serde(rename = "essay")]
    Essay(EssayQuestion),
    #[serde(rename = "description")]
    Description(DescriptionQuestion),
}

impl Question {
    /// Display name of the question.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::MultipleChoice(q) => &q.name,
            Self::Embedded(q) => &q.name,
            Self::Essay(q) => &q.name,
            Self::Description(q) => &q.name,
        }
    }

    /// Host question-type tag.
    #[must_use]
    pub fn qtype(&self) -> &'static str {
        match self {
            Self::MultipleChoice(_) => "multichoice",
            Self::Embedded(_) => "multianswer",
            Self::Essay(_) => "essay",
            Self::Description(_) => "description",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_is_internally_tagged() {
        let question = Question::Description(DescriptionQuestion {
            name: "Intro".to_string(),
            text: "<p>Welcome</p>".to_string(),
            format: TextFormat::Html,
            defaultmark: 0.0,
            length: 0,
        });

        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["qtype"], "description");
        assert_eq!(value["name"], "Intro");
        assert_eq!(value["format"], "html");
    }

    #[test]
    fn test_qtype_tags() {
        let question = Question::Essay(EssayQuestion {
            name: "n".to_string(),
            text: "t".to_string(),
            format: TextFormat::Html,
            defaultmark: 1.0,
            fraction: 0.0,
            responseformat: "editor".to_string(),
            responsefieldlines: 15,
            responserequired: true,
            attachments: 0,
            attachmentsrequired: 0,
            graderinfo: String::new(),
            responsetemplate: String::new(),
        });
        assert_eq!(question.qtype(), "essay");
        assert_eq!(question.name(), "n");
    }
}
