use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use indexmap::IndexMap;

use crate::{binder::BinderState, id::ObjId, value::Value, Binder};

/// Where a property's value currently lives.
///
/// A plain slot is ordinary storage. A bound slot is the installed accessor
/// pair: reads and writes delegate to the owning binder's model entry, and
/// the object caches nothing of its own.
enum Slot {
    Plain(Value),
    Bound(Weak<RefCell<BinderState>>),
}

struct ObjectInner {
    /// Hidden identifier: lives beside the property bag, never inside it,
    /// so enumeration does not see it. Set once, immutable afterwards.
    id: Cell<Option<ObjId>>,
    props: RefCell<IndexMap<String, Slot>>,
}

/// A dynamic object whose properties can be bound and watched.
///
/// `Object` is a handle: clones share identity and state, mirroring
/// reference semantics. Properties are read and written through [`get`]
/// and [`set`] rather than fields: the explicit rendition of a computed
/// accessor pair. Before a property is bound its value is stored locally;
/// once bound, both operations delegate to the binder's model entry.
///
/// [`get`]: Object::get
/// [`set`]: Object::set
pub struct Object {
    inner: Rc<ObjectInner>,
}

impl Clone for Object {
    fn clone(&self) -> Self {
        Object {
            inner: self.inner.clone(),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Object {}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Object");
        s.field("id", &self.inner.id.get());
        s.field("keys", &self.keys());
        s.finish()
    }
}

impl Object {
    pub fn new() -> Self {
        Object {
            inner: Rc::new(ObjectInner {
                id: Cell::new(None),
                props: RefCell::new(IndexMap::new()),
            }),
        }
    }

    /// Builder-style property set, for literal-like construction:
    ///
    /// ```rust
    /// use weft::Object;
    /// let person = Object::new().with("firstName", "Ada").with("age", 36);
    /// ```
    pub fn with(self, prop: &str, value: impl Into<Value>) -> Self {
        self.set(prop, value);
        self
    }

    /// The identifier, if this object has participated in binding.
    pub fn id(&self) -> Option<ObjId> {
        self.inner.id.get()
    }

    /// Assign an identifier on first participation. Idempotent.
    pub(crate) fn tag(&self) -> ObjId {
        if let Some(id) = self.inner.id.get() {
            return id;
        }
        let id = ObjId::next();
        self.inner.id.set(Some(id));
        id
    }

    /// Property names in insertion order. The identifier is not a property
    /// and never appears here.
    pub fn keys(&self) -> Vec<String> {
        self.inner.props.borrow().keys().cloned().collect()
    }

    /// Read a property. Unset properties read as [`Value::Null`]; bound
    /// properties read from their model entry.
    pub fn get(&self, prop: &str) -> Value {
        let binder = match self.inner.props.borrow().get(prop) {
            None => return Value::Null,
            Some(Slot::Plain(value)) => return value.clone(),
            Some(Slot::Bound(binder)) => binder.clone(),
        };
        let Some(id) = self.id() else {
            return Value::Null;
        };
        match binder.upgrade() {
            Some(state) => state.borrow().store.get(id, prop),
            None => Value::Null,
        }
    }

    /// Write a property. On a bound property this runs the full write path:
    /// model entry update, view sync, then watcher notification unless the
    /// new value equals the old one.
    pub fn set(&self, prop: &str, value: impl Into<Value>) {
        let value = value.into();
        let binder = {
            let mut props = self.inner.props.borrow_mut();
            match props.get(prop) {
                Some(Slot::Bound(binder)) => binder.clone(),
                _ => {
                    props.insert(prop.to_string(), Slot::Plain(value));
                    return;
                }
            }
        };
        match binder.upgrade() {
            Some(state) => Binder::from_state(state).write(self, prop, value),
            None => {
                // the binder is gone; the property reverts to plain storage
                self.inner
                    .props
                    .borrow_mut()
                    .insert(prop.to_string(), Slot::Plain(value));
            }
        }
    }

    /// The value held locally, ignoring any installed accessor. Used to seed
    /// a model entry from the pre-binding state.
    pub(crate) fn plain_value(&self, prop: &str) -> Value {
        match self.inner.props.borrow().get(prop) {
            Some(Slot::Plain(value)) => value.clone(),
            _ => Value::Null,
        }
    }

    /// Install the accessor pair for `prop`. A second install on the same
    /// property is caught and ignored.
    pub(crate) fn install(&self, prop: &str, binder: Weak<RefCell<BinderState>>) {
        let mut props = self.inner.props.borrow_mut();
        match props.get(prop) {
            Some(Slot::Bound(_)) => {}
            _ => {
                props.insert(prop.to_string(), Slot::Bound(binder));
            }
        }
    }

    /// The current property graph as JSON. Bound properties read through
    /// their model entries; nested objects recurse.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for key in self.keys() {
            let value = self.get(&key).to_json();
            map.insert(key, value);
        }
        serde_json::Value::Object(map)
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}
