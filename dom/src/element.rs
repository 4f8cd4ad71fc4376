use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::{
    dataset,
    document::{DocumentState, NodeId},
    event::{ElementEvent, Listener},
};

pub(crate) enum ChildNode {
    Text(String),
    Element(NodeId),
}

pub(crate) struct ElementData {
    pub(crate) tag: String,
    pub(crate) attrs: IndexMap<String, String>,
    pub(crate) children: Vec<ChildNode>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) listeners: SmallVec<[(ElementEvent, Listener); 2]>,
}

impl ElementData {
    pub(crate) fn new(tag: &str) -> Self {
        ElementData {
            tag: tag.to_string(),
            attrs: IndexMap::new(),
            children: Vec::new(),
            parent: None,
            listeners: SmallVec::new(),
        }
    }
}

/// A child of an element: either a run of text or another element.
pub enum Node {
    Text(String),
    Element(Element),
}

/// A handle to one element of a [`Document`](crate::Document).
///
/// Handles are cheap to clone and compare by arena identity: two handles are
/// equal exactly when they address the same element of the same document.
#[derive(Clone)]
pub struct Element {
    pub(crate) state: Rc<RefCell<DocumentState>>,
    pub(crate) id: NodeId,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state) && self.id == other.id
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {:?}>", self.tag(), self.id)
    }
}

impl Element {
    fn handle(&self, id: NodeId) -> Element {
        Element {
            state: self.state.clone(),
            id,
        }
    }

    pub fn tag(&self) -> String {
        self.state.borrow().nodes[self.id].tag.clone()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.state.borrow().nodes[self.id].attrs.get(name).cloned()
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.state.borrow().nodes[self.id].attrs.contains_key(name)
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.state.borrow_mut().nodes[self.id]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&self, name: &str) {
        self.state.borrow_mut().nodes[self.id].attrs.shift_remove(name);
    }

    /// Read a `data-*` attribute through the dataset sub-interface.
    /// The key is camelCase: `dataset_get("userName")` reads `data-user-name`.
    pub fn dataset_get(&self, key: &str) -> Option<String> {
        self.attr(&dataset::attr_name(key))
    }

    /// Write a `data-*` attribute through the dataset sub-interface.
    pub fn dataset_set(&self, key: &str, value: &str) {
        self.set_attr(&dataset::attr_name(key), value);
    }

    pub fn parent(&self) -> Option<Element> {
        let parent = self.state.borrow().nodes[self.id].parent;
        parent.map(|id| self.handle(id))
    }

    /// Element children, in order. Text children are skipped; use
    /// [`Element::nodes`] for the full child list.
    pub fn children(&self) -> Vec<Element> {
        let ids: Vec<NodeId> = self.state.borrow().nodes[self.id]
            .children
            .iter()
            .filter_map(|child| match child {
                ChildNode::Element(id) => Some(*id),
                ChildNode::Text(_) => None,
            })
            .collect();
        ids.into_iter().map(|id| self.handle(id)).collect()
    }

    /// The full child list, text runs included.
    pub fn nodes(&self) -> Vec<Node> {
        let children: Vec<ChildNode> = {
            let state = self.state.borrow();
            state.nodes[self.id]
                .children
                .iter()
                .map(|child| match child {
                    ChildNode::Text(text) => ChildNode::Text(text.clone()),
                    ChildNode::Element(id) => ChildNode::Element(*id),
                })
                .collect()
        };
        children
            .into_iter()
            .map(|child| match child {
                ChildNode::Text(text) => Node::Text(text),
                ChildNode::Element(id) => Node::Element(self.handle(id)),
            })
            .collect()
    }

    /// Replace the child list. Elements in the new list are re-parented
    /// here; elements dropped from the old list are detached.
    pub fn set_nodes(&self, nodes: Vec<Node>) {
        let mut state = self.state.borrow_mut();
        let old = std::mem::take(&mut state.nodes[self.id].children);
        for child in &old {
            if let ChildNode::Element(id) = child {
                state.nodes[*id].parent = None;
            }
        }
        let mut children = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                Node::Text(text) => children.push(ChildNode::Text(text)),
                Node::Element(el) => {
                    assert!(
                        Rc::ptr_eq(&el.state, &self.state),
                        "element belongs to another document"
                    );
                    assert!(el.id != self.id, "element cannot be its own child");
                    detach(&mut state, el.id);
                    state.nodes[el.id].parent = Some(self.id);
                    children.push(ChildNode::Element(el.id));
                }
            }
        }
        state.nodes[self.id].children = children;
    }

    /// Append a child element, moving it out of its current parent if any.
    pub fn append(&self, child: &Element) {
        assert!(
            Rc::ptr_eq(&child.state, &self.state),
            "element belongs to another document"
        );
        assert!(child.id != self.id, "element cannot be its own child");
        let mut state = self.state.borrow_mut();
        detach(&mut state, child.id);
        state.nodes[child.id].parent = Some(self.id);
        state.nodes[self.id].children.push(ChildNode::Element(child.id));
    }

    /// Concatenated text of the subtree.
    pub fn text(&self) -> String {
        let state = self.state.borrow();
        let mut out = String::new();
        collect_text(&state, self.id, &mut out);
        out
    }

    /// Replace all children with a single text run.
    pub fn set_text(&self, text: &str) {
        let mut state = self.state.borrow_mut();
        let old = std::mem::take(&mut state.nodes[self.id].children);
        for child in &old {
            if let ChildNode::Element(id) = child {
                state.nodes[*id].parent = None;
            }
        }
        state.nodes[self.id].children = vec![ChildNode::Text(text.to_string())];
    }

    /// Serialized inner markup: the children, without this element's tag.
    pub fn content(&self) -> String {
        let state = self.state.borrow();
        let mut out = String::new();
        serialize_children(&state, self.id, &mut out);
        out
    }

    /// Serialized outer markup, this element included.
    pub fn markup(&self) -> String {
        let state = self.state.borrow();
        let mut out = String::new();
        serialize(&state, self.id, &mut out);
        out
    }

    /// This element plus all descendants, in document order.
    pub fn subtree(&self) -> Vec<Element> {
        let ids = {
            let state = self.state.borrow();
            let mut ids = Vec::new();
            collect_subtree(&state, self.id, &mut ids);
            ids
        };
        ids.into_iter().map(|id| self.handle(id)).collect()
    }

    /// The `value` attribute, or the empty string when unset.
    pub fn value(&self) -> String {
        self.attr("value").unwrap_or_default()
    }

    pub fn set_value(&self, value: &str) {
        self.set_attr("value", value);
    }

    /// The `checked` attribute read as a boolean.
    pub fn checked(&self) -> bool {
        match self.attr("checked") {
            Some(value) => value != "false",
            None => false,
        }
    }

    pub fn set_checked(&self, checked: bool) {
        self.set_attr("checked", if checked { "true" } else { "false" });
    }

    /// Register a listener for `event`. Listeners run in registration order.
    pub fn add_listener(&self, event: ElementEvent, f: impl Fn(&Element) + 'static) {
        self.state.borrow_mut().nodes[self.id]
            .listeners
            .push((event, Rc::new(f)));
    }

    /// How many listeners are registered for `event`.
    pub fn listener_count(&self, event: ElementEvent) -> usize {
        self.state.borrow().nodes[self.id]
            .listeners
            .iter()
            .filter(|(ev, _)| *ev == event)
            .count()
    }

    /// Fire `event` on this element. The listener list is snapshotted before
    /// any listener runs, so listeners may freely mutate the document.
    /// Programmatic attribute and content writes never dispatch events.
    pub fn dispatch(&self, event: ElementEvent) {
        let listeners: Vec<Listener> = {
            let state = self.state.borrow();
            state.nodes[self.id]
                .listeners
                .iter()
                .filter(|(ev, _)| *ev == event)
                .map(|(_, f)| f.clone())
                .collect()
        };
        for listener in listeners {
            listener(self);
        }
    }
}

fn detach(state: &mut DocumentState, id: NodeId) {
    if let Some(parent) = state.nodes[id].parent.take() {
        state.nodes[parent]
            .children
            .retain(|child| !matches!(child, ChildNode::Element(child_id) if *child_id == id));
    }
}

fn collect_text(state: &DocumentState, id: NodeId, out: &mut String) {
    for child in &state.nodes[id].children {
        match child {
            ChildNode::Text(text) => out.push_str(text),
            ChildNode::Element(id) => collect_text(state, *id, out),
        }
    }
}

fn collect_subtree(state: &DocumentState, id: NodeId, out: &mut Vec<NodeId>) {
    out.push(id);
    for child in &state.nodes[id].children {
        if let ChildNode::Element(id) = child {
            collect_subtree(state, *id, out);
        }
    }
}

fn serialize(state: &DocumentState, id: NodeId, out: &mut String) {
    let data = &state.nodes[id];
    out.push('<');
    out.push_str(&data.tag);
    for (name, value) in &data.attrs {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
    out.push('>');
    serialize_children(state, id, out);
    out.push_str("</");
    out.push_str(&data.tag);
    out.push('>');
}

fn serialize_children(state: &DocumentState, id: NodeId, out: &mut String) {
    for child in &state.nodes[id].children {
        match child {
            ChildNode::Text(text) => out.push_str(text),
            ChildNode::Element(id) => serialize(state, *id, out),
        }
    }
}
