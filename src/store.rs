use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use weft_dom::Element;

use crate::{binder::Watcher, id::ObjId, value::Value};

/// One view binding: a target element and the attributes that mirror the
/// property's value. The pseudo-attribute `"text"` targets the element's
/// content.
#[derive(Clone)]
pub struct Binding {
    pub element: Element,
    pub attrs: SmallVec<[String; 2]>,
}

impl Binding {
    pub fn new<I, S>(element: &Element, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Binding {
            element: element.clone(),
            attrs: attrs.into_iter().map(Into::into).collect(),
        }
    }

    /// Bind the element's content.
    pub fn text(element: &Element) -> Self {
        Binding::new(element, [crate::view::TEXT_ATTR])
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Binding");
        s.field("element", &self.element);
        s.field("attrs", &self.attrs);
        s.finish()
    }
}

/// The stored state for one (object, property) pair.
pub(crate) struct ModelEntry {
    pub(crate) value: Value,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) watchers: Vec<Watcher>,
}

/// The model store: (object id, property name) -> entry.
///
/// Entries are created lazily on first bind or watch and are never removed;
/// the table lives and dies with the binder that owns it.
#[derive(Default)]
pub(crate) struct ModelStore {
    entries: FxHashMap<ObjId, FxHashMap<String, ModelEntry>>,
}

impl ModelStore {
    /// No-op if the entry already exists.
    pub(crate) fn create_entry(&mut self, id: ObjId, prop: &str, initial: Value) {
        let props = self.entries.entry(id).or_default();
        if !props.contains_key(prop) {
            props.insert(
                prop.to_string(),
                ModelEntry {
                    value: initial,
                    bindings: Vec::new(),
                    watchers: Vec::new(),
                },
            );
        }
    }

    pub(crate) fn entry(&self, id: ObjId, prop: &str) -> Option<&ModelEntry> {
        self.entries.get(&id)?.get(prop)
    }

    pub(crate) fn entry_mut(&mut self, id: ObjId, prop: &str) -> Option<&mut ModelEntry> {
        self.entries.get_mut(&id)?.get_mut(prop)
    }

    pub(crate) fn get(&self, id: ObjId, prop: &str) -> Value {
        self.entry(id, prop)
            .map(|entry| entry.value.clone())
            .unwrap_or(Value::Null)
    }

    /// Pure store write: no view update, no notification. The interceptor
    /// write path layers those on top.
    pub(crate) fn set(&mut self, id: ObjId, prop: &str, value: Value) {
        if let Some(entry) = self.entry_mut(id, prop) {
            entry.value = value;
        }
    }

    /// Merge one binding into the entry. A binding against an element the
    /// entry already targets unions the attribute sets instead of appending
    /// a duplicate record. Returns whether the element was new for the
    /// entry, in which case the caller performs change-source wiring.
    pub(crate) fn merge_binding(&mut self, id: ObjId, prop: &str, binding: Binding) -> bool {
        let Some(entry) = self.entry_mut(id, prop) else {
            return false;
        };
        if let Some(existing) = entry
            .bindings
            .iter_mut()
            .find(|b| b.element == binding.element)
        {
            for attr in binding.attrs {
                if !existing.attrs.contains(&attr) {
                    existing.attrs.push(attr);
                }
            }
            false
        } else {
            entry.bindings.push(binding);
            true
        }
    }

    /// Append watchers. No de-duplication: registering the same callback
    /// twice notifies twice.
    pub(crate) fn merge_watchers(&mut self, id: ObjId, prop: &str, watchers: Vec<Watcher>) {
        if let Some(entry) = self.entry_mut(id, prop) {
            entry.watchers.extend(watchers);
        }
    }
}
