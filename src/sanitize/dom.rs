//! DOM walking over html5ever's RcDom
//!
//!     Parsing is left entirely to html5ever so malformed paste is recovered the way a browser
//!     would recover it. This module only walks and rewrites the resulting tree:
//!
//!     1. `Cleaner::clean_children` applies the rule set bottom-up (children before the
//!        parent's own pruning checks, so a span emptied by its children is pruned too).
//!     2. `group_inline_runs` wraps loose top-level text and inline elements in `<p>`, so the
//!        output always starts with an element and parses back into the same tree.
//!     3. `serialize_nodes` writes each top-level node and joins them with newlines.
//!
//!     html5ever's recovery can build trees no markup parses back to (a heading nested in a
//!     heading through a closed inline element, for one). Callers that need a fixed point
//!     re-run the whole parse, clean and serialize cycle until the output settles.

use crate::mapping::{is_event_handler, is_script_url};
use crate::sanitize::rules::{SanitizationRules, TagAction};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope,
    Attribute, LocalName, ParseOpts, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Inline elements that may be wrapped into a paragraph when found at the top level.
const PHRASING_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "big", "br", "cite", "code", "data", "del", "dfn", "em",
    "font", "i", "img", "ins", "kbd", "mark", "q", "s", "samp", "small", "span", "strike",
    "strong", "sub", "sup", "time", "tt", "u", "var", "wbr",
];

pub(crate) fn parse(markup: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default()).one(markup)
}

/// The `<body>` element of a parsed document.
pub(crate) fn find_body(document: &Handle) -> Option<Handle> {
    let html = child_element(document, "html")?;
    child_element(&html, "body")
}

fn child_element(parent: &Handle, tag: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| element_name(child).as_deref() == Some(tag))
        .cloned()
}

/// Lowercased local name of an element node.
pub(crate) fn element_name(node: &Node) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_ascii_lowercase().to_string()),
        _ => None,
    }
}

fn is_html_element(node: &Node, tag: &str) -> bool {
    match &node.data {
        NodeData::Element { name, .. } => name.ns == ns!(html) && &*name.local == tag,
        _ => false,
    }
}

/// Applies [`SanitizationRules`] to a subtree.
pub(crate) struct Cleaner<'a> {
    rules: &'a SanitizationRules,
}

impl<'a> Cleaner<'a> {
    pub(crate) fn new(rules: &'a SanitizationRules) -> Self {
        Cleaner { rules }
    }

    pub(crate) fn clean_children(&self, parent: &Handle) {
        let children = parent.children.take();
        let mut kept = Vec::with_capacity(children.len());
        for child in children {
            kept.extend(self.clean_node(child));
        }
        adopt(parent, &kept);
        *parent.children.borrow_mut() = kept;
    }

    /// Clean one node, returning what replaces it in its parent (possibly nothing).
    fn clean_node(&self, node: Handle) -> Vec<Handle> {
        let element = match &node.data {
            NodeData::Text { .. } => None,
            NodeData::Element { name, .. } => {
                Some((name.local.to_ascii_lowercase().to_string(), name.ns == ns!(html)))
            }
            // Comments, doctypes and processing instructions.
            _ => return Vec::new(),
        };
        let Some((tag, is_html)) = element else {
            return vec![node];
        };

        let rename = match self.rules.tag_action(&tag) {
            TagAction::Remove => {
                log::debug!("sanitize: removed <{tag}>");
                return Vec::new();
            }
            TagAction::Rename(alias) if is_html => Some(alias),
            _ => None,
        };

        self.clean_attributes(&node);
        self.clean_children(&node);

        let node = match rename {
            Some(alias) => {
                log::debug!("sanitize: renamed <{tag}> to <{alias}>");
                rename_element(&node, alias)
            }
            None => node,
        };

        if is_bare_empty_span(&node) {
            let children = node.children.take();
            if children.iter().all(is_phrasing) {
                return children;
            }
            log::debug!("sanitize: removed empty <span> wrapping block content");
            return Vec::new();
        }
        if is_blank_paragraph(&node) {
            return Vec::new();
        }
        vec![node]
    }

    fn clean_attributes(&self, node: &Handle) {
        let NodeData::Element { attrs, .. } = &node.data else {
            return;
        };
        let mut attrs = attrs.borrow_mut();
        let original = std::mem::take(&mut *attrs);
        for mut attr in original {
            let name = attr.name.local.to_ascii_lowercase().to_string();
            match name.as_str() {
                "style" => continue,
                "class" => match self.rules.filter_classes(&attr.value) {
                    Some(classes) => attr.value = classes.into(),
                    None => continue,
                },
                _ if is_event_handler(&name) => match self.rules.event_handlers.rewrite(&name) {
                    Some(inert) => {
                        attr.name = QualName::new(None, ns!(), LocalName::from(inert.as_str()))
                    }
                    None => {
                        log::debug!("sanitize: dropped event handler {name}");
                        continue;
                    }
                },
                _ if self.rules.strip_script_urls && is_script_url(&name, &attr.value) => {
                    log::debug!("sanitize: dropped script url in {name}");
                    continue;
                }
                _ => {}
            }
            attrs.push(attr);
        }
    }
}

/// A `<span>` with no attributes and no visible text is a paste artifact. Inline children
/// (whitespace, images, line breaks) are hoisted into the parent; anything else goes with it,
/// since a hoisted block could land where the parser would not have put it.
fn is_bare_empty_span(node: &Node) -> bool {
    let NodeData::Element { attrs, .. } = &node.data else {
        return false;
    };
    is_html_element(node, "span") && attrs.borrow().is_empty() && is_blank(&text_content(node))
}

fn is_blank_paragraph(node: &Node) -> bool {
    is_html_element(node, "p")
        && !node
            .children
            .borrow()
            .iter()
            .any(|child| matches!(child.data, NodeData::Element { .. }))
        && is_blank(&text_content(node).replace('\u{a0}', ""))
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn is_blank_text(node: &Handle) -> bool {
    match &node.data {
        NodeData::Text { contents } => is_blank(&contents.borrow()),
        _ => false,
    }
}

fn text_content(node: &Node) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Node, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

fn is_phrasing(node: &Handle) -> bool {
    match &node.data {
        NodeData::Text { .. } => true,
        NodeData::Element { name, .. } => {
            name.ns == ns!(html)
                && PHRASING_TAGS.contains(&&*name.local)
                && node.children.borrow().iter().all(is_phrasing)
        }
        _ => false,
    }
}

/// Take the children of `parent`, wrapping each run of inline content in a new `<p>`.
///
/// Whitespace-only text between blocks is dropped; the serializer puts newlines back.
pub(crate) fn group_inline_runs(parent: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    let mut run = Vec::new();
    for child in parent.children.take() {
        if is_phrasing(&child) {
            run.push(child);
            continue;
        }
        flush_run(&mut run, &mut out);
        if !is_blank_text(&child) {
            out.push(child);
        }
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut Vec<Handle>, out: &mut Vec<Handle>) {
    let start = run.iter().position(|node| !is_blank_text(node));
    let end = run.iter().rposition(|node| !is_blank_text(node));
    if let (Some(start), Some(end)) = (start, end) {
        let paragraph = new_element("p", Vec::new());
        let content: Vec<Handle> = run.drain(start..=end).collect();
        adopt(&paragraph, &content);
        *paragraph.children.borrow_mut() = content;
        out.push(paragraph);
    }
    run.clear();
}

fn rename_element(node: &Handle, tag: &str) -> Handle {
    let NodeData::Element { attrs, .. } = &node.data else {
        return node.clone();
    };
    let renamed = new_element(tag, attrs.take());
    let children = node.children.take();
    adopt(&renamed, &children);
    *renamed.children.borrow_mut() = children;
    renamed
}

fn adopt(parent: &Handle, children: &[Handle]) {
    for child in children {
        child.parent.set(Some(Rc::downgrade(parent)));
    }
}

/// Create an HTML element with the given attributes
fn new_element(tag: &str, attrs: Vec<Attribute>) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: QualName::new(None, ns!(html), LocalName::from(tag)),
            attrs: RefCell::new(attrs),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Elements whose first newline the parser swallows.
const LEADING_NEWLINE_TAGS: &[&str] = &["pre", "textarea", "listing"];

/// Put back the newline the parser drops after `<pre>`, `<textarea>` and `<listing>`.
///
/// The serializer does not, so without this a leading blank line inside them is lost on
/// every round trip.
fn restore_leading_newlines(node: &Handle) {
    let children = node.children.borrow();
    if LEADING_NEWLINE_TAGS
        .iter()
        .any(|tag| is_html_element(node, tag))
    {
        if let Some(NodeData::Text { contents }) = children.first().map(|child| &child.data) {
            let mut text = contents.borrow_mut();
            if text.starts_with('\n') {
                *text = StrTendril::from(format!("\n{}", &**text));
            }
        }
    }
    for child in children.iter() {
        restore_leading_newlines(child);
    }
}

/// Serialize each node (including itself) and join the results with newlines.
pub(crate) fn serialize_nodes(nodes: &[Handle]) -> String {
    for node in nodes {
        restore_leading_newlines(node);
    }
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    nodes
        .iter()
        .filter_map(|node| {
            let mut output = Vec::new();
            let serializable = SerializableHandle::from(node.clone());
            match serialize(&mut output, &serializable, opts.clone()) {
                Ok(()) => Some(String::from_utf8_lossy(&output).into_owned()),
                Err(err) => {
                    log::warn!("sanitize: failed to serialize node: {err}");
                    None
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
