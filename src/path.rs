use crate::{binder::Binder, object::Object, value::Value};

/// Resolve a dotted path (`label.prop`, `label.nested.prop`, …) to the
/// object owning the final segment plus that segment's name.
///
/// The first segment goes through the name mapper; every intermediate
/// segment must currently hold an object (plain or tracked). Any failure
/// (too few segments, an empty segment, an unknown label, a non-object in
/// the middle) resolves to `None`: "not yet ready" is a normal outcome
/// here, never an error.
pub(crate) fn resolve(binder: &Binder, path: &str) -> Option<(Object, String)> {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 || parts.iter().any(|part| part.is_empty()) {
        return None;
    }
    let mut obj = binder.resolve_label(parts[0])?;
    for segment in &parts[1..parts.len() - 1] {
        match obj.get(segment) {
            Value::Object(next) => obj = next,
            _ => return None,
        }
    }
    Some((obj, parts[parts.len() - 1].to_string()))
}
