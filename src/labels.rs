use rustc_hash::FxHashMap;

use crate::object::Object;

/// The name mapper: external string labels -> live objects, so markup can
/// address objects it only knows by name.
#[derive(Default)]
pub(crate) struct LabelMap {
    map: FxHashMap<String, Object>,
}

impl LabelMap {
    /// Unconditional overwrite: the last registration wins.
    pub(crate) fn define(&mut self, label: String, obj: Object) {
        self.map.insert(label, obj);
    }

    pub(crate) fn resolve(&self, label: &str) -> Option<Object> {
        self.map.get(label).cloned()
    }
}
