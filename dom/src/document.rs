use std::{cell::RefCell, rc::Rc};

use slotmap::{new_key_type, SlotMap};

use crate::element::{Element, ElementData};

new_key_type! {
    /// A stable identifier for an element in a document arena.
    pub struct NodeId;
}

pub(crate) struct DocumentState {
    pub(crate) nodes: SlotMap<NodeId, ElementData>,
    pub(crate) root: NodeId,
}

/// A headless document: a tree of elements over a central arena.
///
/// `Document` is a cheap handle; clones share the same tree. Elements are
/// created through the document and addressed by [`Element`] handles that
/// borrow the arena per operation, so there is no lifetime coupling between
/// handles and the tree they point into.
#[derive(Clone)]
pub struct Document {
    pub(crate) state: Rc<RefCell<DocumentState>>,
}

impl Document {
    /// Create an empty document rooted at a `<body>` element.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ElementData::new("body"));
        Document {
            state: Rc::new(RefCell::new(DocumentState { nodes, root })),
        }
    }

    /// The root element of the document.
    pub fn root(&self) -> Element {
        let root = self.state.borrow().root;
        Element {
            state: self.state.clone(),
            id: root,
        }
    }

    /// Create a detached element. It joins the tree once appended.
    pub fn create_element(&self, tag: &str) -> Element {
        let id = self.state.borrow_mut().nodes.insert(ElementData::new(tag));
        Element {
            state: self.state.clone(),
            id,
        }
    }

    /// All elements currently attached to the tree, in document order.
    pub fn elements(&self) -> Vec<Element> {
        self.root().subtree()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for Document {}
