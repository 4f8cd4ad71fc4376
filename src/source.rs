use bitflags::bitflags;
use tracing::trace;
use weft_dom::{Element, ElementEvent};

use crate::{
    binder::Binder,
    object::Object,
    value::Value,
};

bitflags! {
    /// The events that push an element-side change back into the model.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct Triggers: u8 {
        const CHANGE = 1 << 0;
        const INPUT = 1 << 1;
    }
}

/// Which element-side state a change source reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SourceRead {
    InputValue,
    Checked,
    TextContent,
}

struct SourceSpec {
    matches: fn(&Element) -> bool,
    triggers: Triggers,
    read: SourceRead,
}

fn is_checkbox(el: &Element) -> bool {
    el.tag() == "input" && el.attr("type").as_deref() == Some("checkbox")
}

fn is_text_entry(el: &Element) -> bool {
    matches!(el.tag().as_str(), "input" | "textarea")
}

fn is_editable(el: &Element) -> bool {
    el.has_attr("contenteditable")
}

/// Ordered classification table: the first matching row wins, so the
/// checkbox row must precede the general input row.
const SOURCES: &[SourceSpec] = &[
    SourceSpec {
        matches: is_checkbox,
        triggers: Triggers::CHANGE.union(Triggers::INPUT),
        read: SourceRead::Checked,
    },
    SourceSpec {
        matches: is_text_entry,
        triggers: Triggers::CHANGE.union(Triggers::INPUT),
        read: SourceRead::InputValue,
    },
    SourceSpec {
        matches: is_editable,
        triggers: Triggers::CHANGE.union(Triggers::INPUT),
        read: SourceRead::TextContent,
    },
];

fn classify(el: &Element) -> Option<&'static SourceSpec> {
    SOURCES.iter().find(|spec| (spec.matches)(el))
}

fn read_source(el: &Element, read: SourceRead) -> Value {
    match read {
        SourceRead::InputValue => Value::Str(el.value()),
        SourceRead::Checked => Value::Bool(el.checked()),
        SourceRead::TextContent => Value::Str(el.text()),
    }
}

/// Wire reverse propagation for a newly bound element. Elements matching no
/// row of the table stay one-way (model -> view only). Writes go through the
/// interceptor write path so the full propagate-and-notify cycle runs.
pub(crate) fn wire(binder: &Binder, obj: &Object, prop: &str, el: &Element) {
    let Some(spec) = classify(el) else {
        return;
    };
    for (event, trigger) in [
        (ElementEvent::Change, Triggers::CHANGE),
        (ElementEvent::Input, Triggers::INPUT),
    ] {
        if !spec.triggers.contains(trigger) {
            continue;
        }
        let weak = binder.downgrade();
        let obj = obj.clone();
        let prop = prop.to_string();
        let read = spec.read;
        el.add_listener(event, move |el| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let value = read_source(el, read);
            Binder::from_state(state).write(&obj, &prop, value);
        });
    }
    trace!(element = ?el, prop, "wired change source");
}
