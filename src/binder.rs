use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt,
    rc::{Rc, Weak},
};

use tracing::{debug, trace};
use weft_dom::Document;

use crate::{
    labels::LabelMap,
    object::Object,
    scan::{self, DirectiveError, Directives},
    source,
    store::{Binding, ModelStore},
    value::Value,
    view,
};

/// A watcher callback, invoked with `(new, old)` on every effective write.
pub type Watcher = Rc<dyn Fn(&Value, &Value)>;

pub(crate) struct BinderState {
    pub(crate) store: ModelStore,
    pub(crate) labels: LabelMap,
    document: Option<Document>,
    directives: Directives,
    pending: VecDeque<DeferredTask>,
}

enum DeferredTask {
    Scan,
}

/// The binding context: model store, name mapper, deferred work queue, and
/// the document (if any) that markup declarations are scanned from.
///
/// A `Binder` is an explicitly constructed object, not a process-wide
/// table: independent binders share nothing, so two tests (or two
/// application views) never leak bindings into each other. Dropping the
/// binder drops every model entry it accumulated; properties bound through
/// it revert to plain storage on their next write.
///
/// `Binder` is a cheap handle; clones share state.
#[derive(Clone)]
pub struct Binder {
    state: Rc<RefCell<BinderState>>,
}

impl Binder {
    /// A binder with no document: `watch` and programmatic `bind` work,
    /// `model` registers labels but never schedules a scan.
    pub fn new() -> Self {
        Binder::build(None)
    }

    /// A binder scanning the given document.
    pub fn with_document(document: Document) -> Self {
        Binder::build(Some(document))
    }

    fn build(document: Option<Document>) -> Self {
        Binder {
            state: Rc::new(RefCell::new(BinderState {
                store: ModelStore::default(),
                labels: LabelMap::default(),
                document,
                directives: Directives::default(),
                pending: VecDeque::new(),
            })),
        }
    }

    pub fn document(&self) -> Option<Document> {
        self.state.borrow().document.clone()
    }

    /// Replace the directive attribute names the scanner recognizes.
    pub fn set_directives(&self, directives: Directives) {
        self.state.borrow_mut().directives = directives;
    }

    pub(crate) fn directives(&self) -> Directives {
        self.state.borrow().directives.clone()
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<BinderState>> {
        Rc::downgrade(&self.state)
    }

    pub(crate) fn from_state(state: Rc<RefCell<BinderState>>) -> Binder {
        Binder { state }
    }

    pub(crate) fn resolve_label(&self, label: &str) -> Option<Object> {
        self.state.borrow().labels.resolve(label)
    }

    /// Bind `obj.prop` to view targets. See [`Binder::bind_with`].
    pub fn bind(&self, obj: &Object, prop: &str, bindings: Vec<Binding>) {
        self.bind_with(obj, prop, bindings, Vec::new());
    }

    /// The core bind operation: tag the object, create its model entry if
    /// absent (seeded from the property's current value), merge bindings
    /// and watchers, install the accessor pair, then sync every bound view
    /// from the current model value, so a newly bound view reflects
    /// existing state without waiting for a write.
    ///
    /// Binding is a merge, never a replacement: re-binding the same
    /// element unions attribute sets, and change-source wiring happens
    /// exactly once per element per entry.
    pub fn bind_with(
        &self,
        obj: &Object,
        prop: &str,
        bindings: Vec<Binding>,
        watchers: Vec<Watcher>,
    ) {
        let id = obj.tag();
        let initial = obj.plain_value(prop);
        let n_bindings = bindings.len();
        let n_watchers = watchers.len();
        let fresh = {
            let mut state = self.state.borrow_mut();
            state.store.create_entry(id, prop, initial);
            let mut fresh = Vec::new();
            for binding in bindings {
                let element = binding.element.clone();
                if state.store.merge_binding(id, prop, binding) {
                    fresh.push(element);
                }
            }
            state.store.merge_watchers(id, prop, watchers);
            fresh
        };
        for element in &fresh {
            source::wire(self, obj, prop, element);
        }
        obj.install(prop, self.downgrade());
        let (value, targets) = {
            let state = self.state.borrow();
            let value = state.store.get(id, prop);
            let targets = state
                .store
                .entry(id, prop)
                .map(|entry| entry.bindings.clone())
                .unwrap_or_default();
            (value, targets)
        };
        view::sync(&targets, &value);
        debug!(
            obj = ?id,
            prop,
            bindings = n_bindings,
            watchers = n_watchers,
            "bound property"
        );
    }

    /// Observe `obj.prop` without any view wiring. The watcher receives
    /// `(new, old)` once per write that actually changes the value; writes
    /// of an equal value are not notified.
    ///
    /// A watcher that writes back to the same property re-enters the write
    /// path synchronously; the equality short-circuit is the only guard, so
    /// a watcher that always changes the value recurses until the stack
    /// runs out.
    pub fn watch(&self, obj: &Object, prop: &str, watcher: impl Fn(&Value, &Value) + 'static) {
        self.bind_with(obj, prop, Vec::new(), vec![Rc::new(watcher)]);
    }

    /// Register labeled objects for markup addressing, and, when a
    /// document is attached, schedule one scan to run after the current
    /// synchronous phase, via [`Binder::drain_pending_work`]. Labels
    /// overwrite silently; the last registration wins.
    pub fn model<L, I>(&self, models: I)
    where
        I: IntoIterator<Item = (L, Object)>,
        L: Into<String>,
    {
        let mut registered = 0usize;
        let scheduled = {
            let mut state = self.state.borrow_mut();
            for (label, obj) in models {
                obj.tag();
                state.labels.define(label.into(), obj);
                registered += 1;
            }
            let scheduled = state.document.is_some();
            if scheduled {
                state.pending.push_back(DeferredTask::Scan);
            }
            scheduled
        };
        debug!(registered, scheduled, "registered model labels");
    }

    /// Scan the attached document for binding declarations now. A silent
    /// no-op without a document. Declarations referencing unregistered
    /// labels are skipped and only retried when the caller scans again.
    pub fn scan(&self) -> Result<(), DirectiveError> {
        let doc = self.state.borrow().document.clone();
        match doc {
            Some(doc) => scan::run(self, &doc),
            None => Ok(()),
        }
    }

    /// Run work deferred past the current synchronous phase; today that is
    /// only the scans scheduled by [`Binder::model`]. Fire-and-forget: a
    /// scan that finds nothing returns silently; a malformed declaration
    /// aborts the drain with the error.
    pub fn drain_pending_work(&self) -> Result<(), DirectiveError> {
        loop {
            let task = self.state.borrow_mut().pending.pop_front();
            match task {
                Some(DeferredTask::Scan) => self.scan()?,
                None => return Ok(()),
            }
        }
    }

    /// How many view-binding records the entry for `obj.prop` holds.
    pub fn binding_count(&self, obj: &Object, prop: &str) -> usize {
        let Some(id) = obj.id() else { return 0 };
        self.state
            .borrow()
            .store
            .entry(id, prop)
            .map(|entry| entry.bindings.len())
            .unwrap_or(0)
    }

    /// How many watchers the entry for `obj.prop` holds.
    pub fn watcher_count(&self, obj: &Object, prop: &str) -> usize {
        let Some(id) = obj.id() else { return 0 };
        self.state
            .borrow()
            .store
            .entry(id, prop)
            .map(|entry| entry.watchers.len())
            .unwrap_or(0)
    }

    /// The interceptor write path: store the value, sync the views, then
    /// notify watchers with `(new, old)` unless the values are equal. State
    /// is snapshotted and borrows released before any user callback runs,
    /// so watchers may write back synchronously.
    pub(crate) fn write(&self, obj: &Object, prop: &str, value: Value) {
        let Some(id) = obj.id() else { return };
        let (old, targets) = {
            let mut state = self.state.borrow_mut();
            let old = state.store.get(id, prop);
            state.store.set(id, prop, value.clone());
            let targets = state
                .store
                .entry(id, prop)
                .map(|entry| entry.bindings.clone())
                .unwrap_or_default();
            (old, targets)
        };
        view::sync(&targets, &value);
        if value != old {
            let watchers = {
                let state = self.state.borrow();
                state
                    .store
                    .entry(id, prop)
                    .map(|entry| entry.watchers.clone())
                    .unwrap_or_default()
            };
            trace!(obj = ?id, prop, "notifying watchers");
            for watcher in watchers {
                watcher(&value, &old);
            }
        }
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        let mut s = f.debug_struct("Binder");
        s.field("document", &state.document.is_some());
        s.field("pending", &state.pending.len());
        s.finish()
    }
}
