use std::rc::Rc;

use crate::element::Element;

/// Events an element can dispatch to its listeners.
#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone)]
pub enum ElementEvent {
    /// The element's value changed while being edited.
    Input,
    /// The element's value was committed.
    Change,
}

impl ElementEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ElementEvent::Input => "input",
            ElementEvent::Change => "change",
        }
    }
}

pub(crate) type Listener = Rc<dyn Fn(&Element)>;
