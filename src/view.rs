use weft_dom::dataset;

use crate::{store::Binding, value::Value};

/// The pseudo-attribute targeting an element's content.
pub(crate) const TEXT_ATTR: &str = "text";

const DATA_PREFIX: &str = "data-";

/// Push `value` into every attribute of every binding.
///
/// A write is skipped when the element already holds the target string, so
/// repeated syncs and equal-value writes leave the tree untouched. `data-*`
/// attribute names route through the dataset sub-interface with the prefix
/// stripped and the remainder camel-cased.
pub(crate) fn sync(bindings: &[Binding], value: &Value) {
    if bindings.is_empty() {
        return;
    }
    let text = value.display_string();
    for binding in bindings {
        let el = &binding.element;
        for attr in binding.attrs.iter().map(String::as_str) {
            if attr == TEXT_ATTR {
                if el.content() != text {
                    el.set_text(&text);
                }
            } else if let Some(rest) = attr.strip_prefix(DATA_PREFIX) {
                let key = dataset::kebab_to_camel(rest);
                if el.dataset_get(&key).as_deref() != Some(text.as_str()) {
                    el.dataset_set(&key, &text);
                }
            } else if el.attr(attr).as_deref() != Some(text.as_str()) {
                el.set_attr(attr, &text);
            }
        }
    }
}
