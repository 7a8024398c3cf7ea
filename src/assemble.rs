//! Per-archetype finalization of raw records into output questions.

use indexmap::IndexMap;

use crate::cloze::extract_embedded_question;
use crate::config::{EMBEDDED_PENALTY, ESSAY_RESPONSE_FIELD_LINES};
use crate::grade::match_grade_option;
use crate::question::{
    Answer, DescriptionQuestion, EmbeddedAnswerQuestion, EssayQuestion, MultipleChoiceQuestion,
    Question,
};
use crate::raw::{RawQuestion, ResponseTitle};
use crate::text::{clean_text, default_question_name, CleanedText, TextFormat};

/// Numbered fallback label for items whose question text yields no name.
fn fallback_label(id: &str) -> String {
    format!("Imported question {id}")
}

/// Shared preprocessing: display name from the question text, body from the
/// question text with a non-empty comment appended (space-joined).
fn common_parts(raw: &RawQuestion) -> (String, CleanedText) {
    let question_text = raw.question_text();
    let name = default_question_name(question_text, &fallback_label(&raw.id));

    let mut body = question_text.to_string();
    if let Some(comment) = &raw.comment {
        if !comment.text().is_empty() {
            body.push(' ');
            body.push_str(comment.text());
        }
    }

    (name, clean_text(&body))
}

/// Finalize a multiple-choice item.
///
/// Only the first ident-group of each correct response contributes to the
/// correct-answer mapping; additional groups in the same response are not
/// consulted. Each correct choice's weight is its mark divided by the sum
/// of all correct marks, snapped to the supported grade-fraction set.
#[must_use]
pub fn assemble_mc(raw: &RawQuestion) -> Question {
    let (name, body) = common_parts(raw);
    let single = raw.responsemax <= 1;

    let mut correct: IndexMap<&str, f64> = IndexMap::new();
    for response in &raw.responses {
        if response.title == ResponseTitle::Correct {
            if let Some(group) = response.identgroups.first() {
                for ident in group {
                    correct.insert(ident.as_str(), response.mark);
                }
            }
        }
    }
    let total: f64 = correct.values().sum();

    let answers = raw
        .choices
        .iter()
        .map(|choice| {
            let fraction = match correct.get(choice.ident.as_str()) {
                Some(&mark) if total > 0.0 => match_grade_option(mark / total),
                _ => 0.0,
            };
            Answer {
                text: clean_text(choice.text.trim()).text,
                fraction,
                feedback: String::new(),
            }
        })
        .collect();

    Question::MultipleChoice(MultipleChoiceQuestion {
        name,
        text: body.text,
        format: body.format,
        single,
        answers,
    })
}

/// Finalize a dropdown-select item as an embedded-answer question.
///
/// The body is followed by a single multichoice placeholder listing every
/// choice as a weighted alternative, where each weight is the choice's mark
/// as a percentage of the largest mark. The synthesized text goes through
/// the embedded-answer parser; format, penalty and length are then fixed by
/// this builder. The display name comes from the question text before
/// synthesis, so the rewritten `{#N}` marker stays out of it.
#[must_use]
pub fn assemble_select(raw: &RawQuestion) -> Question {
    let (name, body) = common_parts(raw);
    let body = body.text;

    let mut max = 0.0;
    let mut marks: IndexMap<&str, f64> = IndexMap::new();
    for response in &raw.responses {
        if response.mark > max {
            max = response.mark;
        }
        if let Some(group) = response.identgroups.first() {
            for ident in group {
                marks.insert(ident.as_str(), response.mark);
            }
        }
    }

    let mut cloze = format!("{body}<p>{{1:MULTICHOICE:");
    for choice in &raw.choices {
        let mark = marks.get(choice.ident.as_str()).copied().unwrap_or(0.0);
        let percentage = if max > 0.0 {
            (mark / max * 100.0).round() as i64
        } else {
            0
        };
        let choice_text = clean_text(&choice.text).text;
        cloze.push_str(&format!("~%{percentage}%{choice_text}"));
    }
    cloze.push_str("}</p>");

    let parsed = extract_embedded_question(&cloze);

    Question::Embedded(EmbeddedAnswerQuestion {
        name,
        text: parsed.text,
        format: TextFormat::Html,
        length: 1,
        penalty: EMBEDDED_PENALTY,
        answers: parsed.answers,
    })
}

/// Finalize an essay item with the fixed free-text configuration.
#[must_use]
pub fn assemble_essay(raw: &RawQuestion) -> Question {
    let (name, body) = common_parts(raw);

    Question::Essay(EssayQuestion {
        name,
        text: body.text,
        format: body.format,
        defaultmark: 1.0,
        // The legacy importer first assigns weight one and immediately
        // supersedes it; the final value is always zero.
        fraction: 0.0,
        responseformat: "editor".to_string(),
        responsefieldlines: ESSAY_RESPONSE_FIELD_LINES,
        responserequired: true,
        attachments: 0,
        attachmentsrequired: 0,
        graderinfo: String::new(),
        responsetemplate: String::new(),
    })
}

/// Finalize a description item.
#[must_use]
pub fn assemble_description(raw: &RawQuestion) -> Question {
    let (name, body) = common_parts(raw);

    Question::Description(DescriptionQuestion {
        name,
        text: body.text,
        format: body.format,
        defaultmark: 0.0,
        length: 0,
    })
}
