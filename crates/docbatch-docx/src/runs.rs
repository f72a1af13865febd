//! Run-level rewriting inside one paragraph.

use crate::replace::Replacements;
use crate::xml::{self, Element, Node};

const PARAGRAPH: &str = "w:p";
const RUN: &str = "w:r";
const RUN_PROPS: &str = "w:rPr";
const TEXT: &str = "w:t";
const PROOF_ERR: &str = "w:proofErr";

/// Elements inside a paragraph whose children are again runs.
const RUN_CONTAINERS: &[&str] = &[
    "w:hyperlink",
    "w:smartTag",
    "w:ins",
    "w:sdt",
    "w:sdtContent",
    "w:fldSimple",
];

/// Run properties that never make two runs look different.
const PROOFING_PROPS: &[&str] = &["w:lang", "w:noProof"];

/// Rewrite every paragraph under `element`. Returns the number of
/// placeholders replaced.
pub(crate) fn substitute_tree(element: &mut Element, replacements: &Replacements) -> usize {
    if element.is(PARAGRAPH) {
        return substitute_paragraph(element, replacements);
    }
    element
        .elements_mut()
        .map(|child| substitute_tree(child, replacements))
        .sum()
}

fn substitute_paragraph(paragraph: &mut Element, replacements: &Replacements) -> usize {
    if !replacements.occurs_in(&paragraph_text(paragraph)) {
        return 0;
    }
    substitute_container(paragraph, replacements)
}

fn substitute_container(container: &mut Element, replacements: &Replacements) -> usize {
    merge_runs(container);
    let mut replaced = 0;
    for child in container.elements_mut() {
        if is_container(child) {
            replaced += substitute_container(child, replacements);
        } else if child.is(RUN) {
            replaced += substitute_run(child, replacements);
        }
    }
    replaced
}

fn substitute_run(run: &mut Element, replacements: &Replacements) -> usize {
    if is_text_run(run) {
        let text = run_text(run);
        let (rewritten, count) = replacements.replace_bounded(&text);
        if count > 0 {
            set_run_text(run, rewritten);
        }
        return count;
    }

    // Runs with drawings, tabs or breaks: rewrite each text element alone.
    let mut replaced = 0;
    for t in run.elements_mut().filter(|child| child.is(TEXT)) {
        let (rewritten, count) = replacements.replace_literal(&t.text());
        if count > 0 {
            t.set_text(rewritten);
            t.set_attr("xml:space", "preserve");
            replaced += count;
        }
    }
    replaced
}

/// Flattened run text of a paragraph; drawing text boxes are not entered.
pub(crate) fn paragraph_text(paragraph: &Element) -> String {
    let mut text = String::new();
    collect_text(paragraph, &mut text);
    text
}

fn collect_text(container: &Element, out: &mut String) {
    for child in container.elements() {
        if is_container(child) {
            collect_text(child, out);
        } else if child.is(RUN) {
            for t in child.elements().filter(|el| el.is(TEXT)) {
                out.push_str(&t.text());
            }
        }
    }
}

fn is_container(element: &Element) -> bool {
    RUN_CONTAINERS.iter().any(|name| element.is(name))
}

/// A run holding only properties and text.
fn is_text_run(run: &Element) -> bool {
    run.is(RUN)
        && run.elements().any(|child| child.is(TEXT))
        && run
            .elements()
            .all(|child| child.is(TEXT) || child.is(RUN_PROPS))
}

fn run_text(run: &Element) -> String {
    run.elements()
        .filter(|child| child.is(TEXT))
        .map(Element::text)
        .collect()
}

/// Replace the text elements of a text run with one `w:t`, keeping `w:rPr`.
fn set_run_text(run: &mut Element, text: String) {
    run.children
        .retain(|node| !matches!(node, Node::Element(el) if el.is(TEXT)));
    let mut t = Element::new(TEXT);
    t.set_attr("xml:space", "preserve");
    t.children.push(Node::Text(text));
    run.children.push(Node::Element(t));
}

/// Formatting identity of a run: its properties without proofing markers.
fn format_key(run: &Element) -> String {
    let mut key = String::new();
    if let Some(props) = run.child(RUN_PROPS) {
        for prop in props.elements() {
            if !PROOFING_PROPS.iter().any(|name| prop.is(name)) {
                xml::write_node(&Node::Element(prop.clone()), &mut key);
            }
        }
    }
    key
}

fn is_gap(node: &Node) -> bool {
    match node {
        Node::Element(element) => element.is(PROOF_ERR),
        Node::Text(text) => text.trim().is_empty(),
        Node::Raw(_) => false,
    }
}

/// Merge adjacent text runs with identical formatting. Proofing markers and
/// whitespace between merged runs are dropped; the first run's properties
/// and attributes are kept.
pub(crate) fn merge_runs(container: &mut Element) {
    let children = std::mem::take(&mut container.children);
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    let mut gap: Vec<Node> = Vec::new();

    for node in children {
        let after_text_run = matches!(merged.last(), Some(Node::Element(prev)) if is_text_run(prev));
        if after_text_run && is_gap(&node) {
            gap.push(node);
            continue;
        }

        let mergeable = match (&node, merged.last()) {
            (Node::Element(run), Some(Node::Element(prev))) => {
                is_text_run(run) && is_text_run(prev) && format_key(prev) == format_key(run)
            }
            _ => false,
        };
        if mergeable {
            if let (Node::Element(run), Some(Node::Element(prev))) = (&node, merged.last_mut()) {
                let text = run_text(prev) + &run_text(run);
                set_run_text(prev, text);
            }
            gap.clear();
            continue;
        }

        merged.append(&mut gap);
        merged.push(node);
    }
    merged.append(&mut gap);
    container.children = merged;
}
