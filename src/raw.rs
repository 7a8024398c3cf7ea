//! Intermediate per-item record assembly.
//!
//! A [`RawQuestion`] is not an importable question yet: it is the transient
//! bag of everything one `<item>` subtree yields, consumed immediately by
//! the assembler and never shared across items.

use indexmap::IndexMap;

use crate::block::{walk_block, Block};
use crate::classify::{classify_item, ItemType};
use crate::diagnostics::DiagnosticSink;
use crate::path::{float_at, has, int_at, node_at, nodes_at, text_at, Seg};
use crate::tree::TreeNode;

/// One selectable option belonging to a question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choice {
    /// Identifier, either the element's own ident attribute or a key
    /// derived from a nested response label (multiple-answer shape).
    pub ident: String,

    /// Display text.
    pub text: String,
}

/// Correctness tag of a response condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseTitle {
    Correct,
    #[default]
    Incorrect,
}

/// A rule associating selected choice identifiers with a mark.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseCondition {
    /// Ordered ident-sets, each an ordered sequence of raw matched values.
    pub identgroups: Vec<Vec<String>>,

    /// Ident of the referenced feedback block, if any.
    pub feedbackref: Option<String>,

    /// Mark awarded when the condition matches.
    pub mark: f64,

    /// Correctness derived from the mark.
    pub title: ResponseTitle,
}

/// One feedback block keyed by ident.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackBlock {
    pub ident: String,
    pub text: String,
}

/// Everything extracted from one item, pre-normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuestion {
    /// Item identifier from the presentation's label attribute.
    pub id: String,

    /// Classified archetype.
    pub qtype: ItemType,

    /// Question text block. Present even when the text itself was missing
    /// (degraded, empty) so the item can still be imported.
    pub question: Option<Block>,

    /// Comment text block, only when it actually carried text.
    pub comment: Option<Block>,

    /// Response-identifier-group id from the presentation block.
    pub choicesid: String,

    /// Choices in encounter order. Duplicate idents are not rejected here;
    /// uniqueness is a contract of the upstream data.
    pub choices: Vec<Choice>,

    /// Response conditions in document order.
    pub responses: Vec<ResponseCondition>,

    /// Feedback blocks keyed by ident; later entries replace earlier ones.
    pub feedback: IndexMap<String, FeedbackBlock>,

    /// Maximum mark from the outcomes declaration.
    pub maxmark: f64,

    /// Minimum number of selectable responses (choice/slider renders).
    pub responsemin: i64,

    /// Maximum number of selectable responses (choice render).
    pub responsemax: i64,

    /// Slider lower bound (slider render).
    pub lowerbound: i64,

    /// Slider upper bound (slider render).
    pub upperbound: i64,
}

impl RawQuestion {
    fn new(id: String, qtype: ItemType) -> Self {
        Self {
            id,
            qtype,
            question: None,
            comment: None,
            choicesid: String::new(),
            choices: Vec::new(),
            responses: Vec::new(),
            feedback: IndexMap::new(),
            maxmark: 0.0,
            responsemin: 0,
            responsemax: 0,
            lowerbound: 0,
            upperbound: 0,
        }
    }

    /// Question text, or an empty string.
    #[must_use]
    pub fn question_text(&self) -> &str {
        self.question.as_ref().map(Block::text).unwrap_or("")
    }
}

/// Build the raw record for one `<item>` subtree.
///
/// Missing question text is reported as a diagnostic but does not stop the
/// item; the record is produced in a degraded state instead.
pub fn build_raw_question(item: &TreeNode, sink: &mut DiagnosticSink) -> RawQuestion {
    use Seg::{Attr, Child, Nth, Text};

    let qtype = classify_item(item);
    let id = text_at(item, &[Child("presentation"), Nth(0), Attr("label")], "").to_string();
    let mut raw = RawQuestion::new(id, qtype);

    for pblock in nodes_at(item, &[Child("presentation"), Nth(0), Child("flow")]) {
        for material in nodes_at(pblock, &[Child("material")]) {
            match text_at(material, &[Attr("label")], "") {
                "question" => {
                    let mut block = Block::new();
                    if has(material, &[Child("mattext")]) {
                        block.text = Some(
                            text_at(material, &[Child("mattext"), Nth(0), Text], "").to_string(),
                        );
                    } else {
                        sink.missing_field("Missing question text", &raw.id);
                    }
                    raw.question = Some(block);
                }
                "comment" => {
                    if has(material, &[Child("mattext")]) {
                        let mut block = Block::new();
                        block.text = Some(
                            text_at(material, &[Child("mattext"), Nth(0), Text], "").to_string(),
                        );
                        raw.comment = Some(block);
                    }
                }
                _ => {}
            }
        }

        raw.choicesid =
            text_at(pblock, &[Child("response_lid"), Nth(0), Attr("ident")], "").to_string();

        match qtype {
            ItemType::MultipleChoice => {
                let render = [Child("response_lid"), Nth(0), Child("render_choice"), Nth(0)];
                raw.responsemax =
                    int_at(pblock, &with_seg(&render, Attr("maxnumber")), 0);
                raw.responsemin =
                    int_at(pblock, &with_seg(&render, Attr("minnumber")), 0);
                raw.choices =
                    extract_choices(nodes_at(pblock, &with_seg(&render, Child("response_label"))));
            }
            ItemType::DropdownSelect => {
                let render = [Child("response_lid"), Nth(0), Child("render_slider"), Nth(0)];
                raw.responsemin =
                    int_at(pblock, &with_seg(&render, Attr("minnumber")), 0);
                raw.lowerbound =
                    int_at(pblock, &with_seg(&render, Attr("lowerbound")), 0);
                raw.upperbound =
                    int_at(pblock, &with_seg(&render, Attr("upperbound")), 0);
                raw.choices =
                    extract_choices(nodes_at(pblock, &with_seg(&render, Child("response_label"))));
            }
            // Short-answer choice extraction is not implemented; the item is
            // reported as unsupported downstream.
            ItemType::ShortAnswer
            | ItemType::Essay
            | ItemType::Description
            | ItemType::Matching
            | ItemType::Unknown => {}
        }
    }

    if qtype != ItemType::Description {
        if let Some(resprocessing) = nodes_at(item, &[Child("resprocessing")]).first() {
            raw.maxmark = float_at(
                resprocessing,
                &[Child("outcomes"), Nth(0), Child("decvar"), Nth(0), Attr("maxvalue")],
                0.0,
            );
            // A matching-specific response extraction would slot in here,
            // but the classifier never emits the matching archetype.
            raw.responses = extract_responses(nodes_at(resprocessing, &[Child("respcondition")]));
        }
    }

    raw.feedback = extract_feedback(nodes_at(item, &[Child("itemfeedback")]));
    raw
}

/// Append one segment to a path prefix.
fn with_seg<'p>(prefix: &[Seg<'p>], last: Seg<'p>) -> Vec<Seg<'p>> {
    let mut path = prefix.to_vec();
    path.push(last);
    path
}

/// Extract the ordered choice set from candidate choice elements.
pub fn extract_choices(elements: &[TreeNode]) -> Vec<Choice> {
    use Seg::{Attr, Child, Nth};

    let mut choices = Vec::with_capacity(elements.len());
    for element in elements {
        let mut block = Block::new();
        if has(element, &[Attr("ident")]) {
            block.ident = Some(text_at(element, &[Attr("ident")], "").to_string());
        } else {
            // Multiple-answer shape: the key comes from the nested label.
            block.ident = Some(
                text_at(element, &[Child("response_label"), Nth(0), Attr("ident")], "")
                    .to_string(),
            );
        }

        if let Some(sub) = node_at(element, &[Child("flow_mat"), Nth(0)]) {
            walk_block(sub, &mut block);
        } else {
            walk_block(element, &mut block);
        }

        choices.push(Choice {
            ident: block.ident.clone().unwrap_or_default(),
            text: block.text.clone().unwrap_or_default(),
        });
    }
    choices
}

/// Extract response conditions in document order.
pub fn extract_responses(conditions: &[TreeNode]) -> Vec<ResponseCondition> {
    use Seg::{Attr, Child, Nth, Text};

    let mut responses = Vec::with_capacity(conditions.len());
    for condition in conditions {
        let mut response = ResponseCondition::default();

        let children = if has(condition, &[Child("conditionvar"), Nth(0), Child("not")]) {
            nodes_at(condition, &[Child("conditionvar"), Nth(0), Child("not")])
        } else {
            nodes_at(condition, &[Child("conditionvar")])
        };
        for child in children {
            let group: Vec<String> = nodes_at(child, &[Child("varequal")])
                .iter()
                .map(|v| v.text().to_string())
                .collect();
            response.identgroups.push(group);
            if response.feedbackref.is_none() && !child.attributes.is_empty() {
                response.feedbackref =
                    Some(text_at(child, &[Attr("respident")], "").to_string());
            }
        }

        if has(condition, &[Child("setvar"), Nth(0), Text]) {
            response.mark = float_at(condition, &[Child("setvar"), Nth(0), Text], 0.0);
            response.title = if response.mark > 0.0 {
                ResponseTitle::Correct
            } else {
                ResponseTitle::Incorrect
            };
        }
        // No setvar payload: keep mark 0 / incorrect. An approximation, not
        // verified against every input shape.

        responses.push(response);
    }
    responses
}

/// Extract feedback blocks into an ident-keyed mapping; last entry wins on
/// duplicate idents.
pub fn extract_feedback(elements: &[TreeNode]) -> IndexMap<String, FeedbackBlock> {
    use Seg::{Attr, Child, Nth};

    let mut feedbacks = IndexMap::new();
    for element in elements {
        let ident = text_at(element, &[Attr("ident")], "").to_string();
        let mut block = Block::new();

        if has(element, &[Child("flow_mat"), Nth(0)]) {
            if let Some(sub) = node_at(element, &[Child("flow_mat"), Nth(0)]) {
                walk_block(sub, &mut block);
            }
        } else if has(
            element,
            &[
                Child("solution"),
                Nth(0),
                Child("solutionmaterial"),
                Nth(0),
                Child("flow_mat"),
                Nth(0),
            ],
        ) {
            if let Some(sub) = node_at(
                element,
                &[
                    Child("solution"),
                    Nth(0),
                    Child("solutionmaterial"),
                    Nth(0),
                    Child("flow_mat"),
                    Nth(0),
                ],
            ) {
                walk_block(sub, &mut block);
            }
        }

        feedbacks.insert(
            ident.clone(),
            FeedbackBlock {
                ident,
                text: block.text.unwrap_or_default(),
            },
        );
    }
    feedbacks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{node_at, Seg::Child, Seg::Nth};
    use pretty_assertions::assert_eq;

    fn item(xml: &str) -> TreeNode {
        let tree = TreeNode::parse(xml).unwrap();
        node_at(&tree, &[Child("item"), Nth(0)]).unwrap().clone()
    }

    const MC_ITEM: &str = r#"<item>
        <presentation label="QST1">
            <flow>
                <material label="question"><mattext>Pick one</mattext></material>
                <material label="comment"><mattext>Hint</mattext></material>
                <response_lid ident="RESP1">
                    <render_choice maxnumber="1" minnumber="1">
                        <response_label ident="A">
                            <flow_mat><material><mattext>Alpha</mattext></material></flow_mat>
                        </response_label>
                        <response_label ident="B">
                            <flow_mat><material><mattext>Beta</mattext></material></flow_mat>
                        </response_label>
                    </render_choice>
                </response_lid>
            </flow>
        </presentation>
        <resprocessing>
            <outcomes><decvar maxvalue="10" minvalue="0"/></outcomes>
            <respcondition title="correct">
                <conditionvar><varequal respident="RESP1">A</varequal></conditionvar>
                <setvar>10</setvar>
                <displayfeedback linkrefid="fb_a"/>
            </respcondition>
            <respcondition title="incorrect">
                <conditionvar><varequal respident="RESP1">B</varequal></conditionvar>
                <setvar>0</setvar>
            </respcondition>
        </resprocessing>
        <itemfeedback ident="fb_a">
            <flow_mat><material><mattext>Right!</mattext></material></flow_mat>
        </itemfeedback>
    </item>"#;

    #[test]
    fn test_build_multiplechoice_record() {
        let mut sink = DiagnosticSink::new();
        let raw = build_raw_question(&item(MC_ITEM), &mut sink);

        assert!(sink.is_empty());
        assert_eq!(raw.id, "QST1");
        assert_eq!(raw.qtype, ItemType::MultipleChoice);
        assert_eq!(raw.question_text(), "Pick one");
        assert_eq!(raw.comment.as_ref().map(Block::text), Some("Hint"));
        assert_eq!(raw.choicesid, "RESP1");
        assert_eq!(raw.responsemax, 1);
        assert_eq!(raw.responsemin, 1);
        assert_eq!(
            raw.choices,
            vec![
                Choice { ident: "A".to_string(), text: "Alpha".to_string() },
                Choice { ident: "B".to_string(), text: "Beta".to_string() },
            ]
        );
        assert!((raw.maxmark - 10.0).abs() < f64::EPSILON);
        assert_eq!(raw.responses.len(), 2);
        assert_eq!(raw.responses[0].title, ResponseTitle::Correct);
        assert_eq!(raw.responses[0].identgroups, vec![vec!["A".to_string()]]);
        assert_eq!(raw.responses[1].title, ResponseTitle::Incorrect);
        assert_eq!(raw.feedback["fb_a"].text, "Right!");
    }

    #[test]
    fn test_missing_question_text_degrades_but_continues() {
        let xml = r#"<item>
            <presentation label="QST2">
                <flow><material label="question"/></flow>
            </presentation>
        </item>"#;
        let mut sink = DiagnosticSink::new();
        let raw = build_raw_question(&item(xml), &mut sink);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.entries()[0].item.as_deref(), Some("QST2"));
        assert!(raw.question.is_some());
        assert_eq!(raw.question_text(), "");
    }

    #[test]
    fn test_comment_without_text_is_omitted() {
        let xml = r#"<item>
            <presentation label="QST3">
                <flow>
                    <material label="question"><mattext>Q</mattext></material>
                    <material label="comment"/>
                </flow>
            </presentation>
        </item>"#;
        let mut sink = DiagnosticSink::new();
        let raw = build_raw_question(&item(xml), &mut sink);
        assert!(raw.comment.is_none());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_slider_bounds_extracted() {
        let xml = r#"<item>
            <presentation label="QST4">
                <flow>
                    <material label="question"><mattext>Rate it</mattext></material>
                    <response_lid ident="RESP2">
                        <render_slider minnumber="1" lowerbound="0" upperbound="100">
                            <response_label ident="S1">
                                <flow_mat><material><mattext>Low</mattext></material></flow_mat>
                            </response_label>
                        </render_slider>
                    </response_lid>
                </flow>
            </presentation>
            <resprocessing>
                <outcomes><decvar maxvalue="5"/></outcomes>
            </resprocessing>
        </item>"#;
        let mut sink = DiagnosticSink::new();
        let raw = build_raw_question(&item(xml), &mut sink);

        assert_eq!(raw.qtype, ItemType::DropdownSelect);
        assert_eq!(raw.responsemin, 1);
        assert_eq!(raw.lowerbound, 0);
        assert_eq!(raw.upperbound, 100);
        assert_eq!(raw.choices.len(), 1);
        assert_eq!(raw.choices[0].text, "Low");
    }

    #[test]
    fn test_choice_ident_from_nested_label() {
        let tree = TreeNode::parse(
            r#"<choices>
                <choice>
                    <response_label ident="NESTED">
                        <flow_mat><material><mattext>Multi</mattext></material></flow_mat>
                    </response_label>
                </choice>
            </choices>"#,
        )
        .unwrap();
        let elements = &tree.children["choices"][0].children["choice"];
        let choices = extract_choices(elements);

        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].ident, "NESTED");
        assert_eq!(choices[0].text, "Multi");
    }

    #[test]
    fn test_duplicate_choice_idents_are_permitted() {
        let tree = TreeNode::parse(
            r#"<choices>
                <c ident="A"><flow_mat><material><mattext>One</mattext></material></flow_mat></c>
                <c ident="A"><flow_mat><material><mattext>Two</mattext></material></flow_mat></c>
            </choices>"#,
        )
        .unwrap();
        let choices = extract_choices(&tree.children["choices"][0].children["c"]);
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0].ident, "A");
        assert_eq!(choices[1].ident, "A");
    }

    #[test]
    fn test_negated_condition_children() {
        let tree = TreeNode::parse(
            r#"<conds>
                <respcondition>
                    <conditionvar>
                        <not respident="RESP1">
                            <varequal>A</varequal>
                            <varequal>B</varequal>
                        </not>
                    </conditionvar>
                    <setvar>0</setvar>
                </respcondition>
            </conds>"#,
        )
        .unwrap();
        let responses =
            extract_responses(&tree.children["conds"][0].children["respcondition"]);

        assert_eq!(responses.len(), 1);
        assert_eq!(
            responses[0].identgroups,
            vec![vec!["A".to_string(), "B".to_string()]]
        );
        assert_eq!(responses[0].feedbackref.as_deref(), Some("RESP1"));
        assert_eq!(responses[0].title, ResponseTitle::Incorrect);
    }

    #[test]
    fn test_missing_setvar_defaults_to_incorrect_zero() {
        let tree = TreeNode::parse(
            r#"<conds>
                <respcondition>
                    <conditionvar><varequal>A</varequal></conditionvar>
                </respcondition>
            </conds>"#,
        )
        .unwrap();
        let responses =
            extract_responses(&tree.children["conds"][0].children["respcondition"]);
        assert_eq!(responses[0].mark, 0.0);
        assert_eq!(responses[0].title, ResponseTitle::Incorrect);
    }

    #[test]
    fn test_feedback_duplicate_ident_last_wins() {
        let tree = TreeNode::parse(
            r#"<fbs>
                <itemfeedback ident="fb">
                    <flow_mat><material><mattext>older</mattext></material></flow_mat>
                </itemfeedback>
                <itemfeedback ident="fb">
                    <flow_mat><material><mattext>newer</mattext></material></flow_mat>
                </itemfeedback>
            </fbs>"#,
        )
        .unwrap();
        let feedbacks = extract_feedback(&tree.children["fbs"][0].children["itemfeedback"]);
        assert_eq!(feedbacks.len(), 1);
        assert_eq!(feedbacks["fb"].text, "newer");
    }

    #[test]
    fn test_feedback_from_solution_path() {
        let tree = TreeNode::parse(
            r#"<fbs>
                <itemfeedback ident="sol">
                    <solution>
                        <solutionmaterial>
                            <flow_mat><material><mattext>Worked answer</mattext></material></flow_mat>
                        </solutionmaterial>
                    </solution>
                </itemfeedback>
            </fbs>"#,
        )
        .unwrap();
        let feedbacks = extract_feedback(&tree.children["fbs"][0].children["itemfeedback"]);
        assert_eq!(feedbacks["sol"].text, "Worked answer");
    }
}
