use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;
use weft_dom::{Document, Element, Node};

use crate::{binder::Binder, path, store::Binding};

/// Directive attribute names recognized by the scanner.
///
/// The defaults are the conventional names; rebrand them when they collide
/// with something else in your markup.
#[derive(Clone, Debug)]
pub struct Directives {
    /// Content/placeholder directive: empty value scans the subtree for
    /// `{ label.prop }` placeholders, a non-empty value binds this
    /// element's content directly.
    pub bind: String,
    /// Attribute-list directive: `attr1[,attr2]:label.prop[;...]`.
    pub bind_to: String,
    /// Completion marker set once a declaration fully resolves; suppresses
    /// re-scanning.
    pub bound: String,
    /// Incomplete marker carried by placeholder wrappers pending
    /// resolution.
    pub pending: String,
}

impl Default for Directives {
    fn default() -> Self {
        Directives {
            bind: "data-bind".to_string(),
            bind_to: "data-bind-to".to_string(),
            bound: "data-bound".to_string(),
            pending: "data-bind-pending".to_string(),
        }
    }
}

/// A declaration the scanner cannot parse. Unresolved *references* are
/// silently deferred; a malformed declaration is the one loud failure.
#[derive(Debug, Error)]
pub enum DirectiveError {
    #[error("bind-to clause `{clause}` is missing the `:` separator")]
    MissingSeparator { clause: String },
    #[error("bind-to clause `{clause}` lists no target attributes")]
    EmptyAttrList { clause: String },
}

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\s*([\w$]+(?:\.[\w$]+)+)\s*\}").expect("placeholder pattern compiles")
});

const WRAPPER_TAG: &str = "span";

/// One scan cycle over the document: the attribute-binding pass, then the
/// placeholder wrap pass, then the resolve pass. Declarations whose labels
/// are not yet registered are left for a later cycle; nothing retries on
/// its own.
pub(crate) fn run(binder: &Binder, doc: &Document) -> Result<(), DirectiveError> {
    let directives = binder.directives();
    bind_to_pass(binder, doc, &directives)?;
    wrap_pass(doc, &directives);
    resolve_pass(binder, doc, &directives);
    Ok(())
}

fn bind_to_pass(binder: &Binder, doc: &Document, d: &Directives) -> Result<(), DirectiveError> {
    for el in doc.elements() {
        let Some(decl) = el.attr(&d.bind_to) else {
            continue;
        };
        if el.has_attr(&d.bound) {
            continue;
        }
        let mut complete = true;
        for clause in decl.split(';') {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }
            let (attr_list, path_str) =
                clause
                    .split_once(':')
                    .ok_or_else(|| DirectiveError::MissingSeparator {
                        clause: clause.to_string(),
                    })?;
            let attrs: Vec<String> = attr_list
                .split(',')
                .map(str::trim)
                .filter(|attr| !attr.is_empty())
                .map(String::from)
                .collect();
            if attrs.is_empty() {
                return Err(DirectiveError::EmptyAttrList {
                    clause: clause.to_string(),
                });
            }
            match path::resolve(binder, path_str.trim()) {
                Some((obj, prop)) => {
                    binder.bind(&obj, &prop, vec![Binding::new(&el, attrs)]);
                }
                None => complete = false,
            }
        }
        if complete {
            el.set_attr(&d.bound, "");
        }
    }
    Ok(())
}

/// Wrap each `{ label.prop }` placeholder found under an empty `bind`
/// directive in a marker element carrying the path as its own directive
/// plus the incomplete marker. The resolve pass then treats wrappers like
/// any other direct content binding.
fn wrap_pass(doc: &Document, d: &Directives) {
    for el in doc.elements() {
        match el.attr(&d.bind) {
            Some(value) if value.is_empty() => {}
            _ => continue,
        }
        for scope_el in el.subtree() {
            wrap_element(doc, &scope_el, d);
        }
    }
}

fn wrap_element(doc: &Document, el: &Element, d: &Directives) {
    if el.has_attr(&d.pending) {
        return;
    }
    let nodes = el.nodes();
    let mut rebuilt: Vec<Node> = Vec::with_capacity(nodes.len());
    let mut changed = false;
    for node in nodes {
        let text = match node {
            Node::Element(_) => {
                rebuilt.push(node);
                continue;
            }
            Node::Text(text) => text,
        };
        if !PLACEHOLDER.is_match(&text) {
            rebuilt.push(Node::Text(text));
            continue;
        }
        changed = true;
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(&text) {
            let m = caps.get(0).expect("whole match");
            if m.start() > last {
                rebuilt.push(Node::Text(text[last..m.start()].to_string()));
            }
            let wrapper = doc.create_element(WRAPPER_TAG);
            wrapper.set_attr(&d.bind, &caps[1]);
            wrapper.set_attr(&d.pending, "");
            rebuilt.push(Node::Element(wrapper));
            last = m.end();
        }
        if last < text.len() {
            rebuilt.push(Node::Text(text[last..].to_string()));
        }
    }
    // an unchanged child list is never rewritten: rewriting is what
    // invalidates references into the content, so it happens at most once
    // per element per scan
    if changed {
        el.set_nodes(rebuilt);
    }
}

fn resolve_pass(binder: &Binder, doc: &Document, d: &Directives) {
    let mut bound = 0usize;
    for el in doc.elements() {
        let Some(path_str) = el.attr(&d.bind) else {
            continue;
        };
        if path_str.is_empty() || el.has_attr(&d.bound) {
            continue;
        }
        // unknown labels are "not yet ready": skipped without marking, so a
        // later scan can pick them up
        let Some((obj, prop)) = path::resolve(binder, path_str.trim()) else {
            continue;
        };
        binder.bind(&obj, &prop, vec![Binding::text(&el)]);
        el.remove_attr(&d.pending);
        el.set_attr(&d.bound, "");
        bound += 1;
    }
    if bound > 0 {
        debug!(bound, "scan resolved content bindings");
    }
}
