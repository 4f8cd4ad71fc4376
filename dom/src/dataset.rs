//! The `data-*` attribute sub-interface.
//!
//! Dataset keys are camelCase; the backing attributes are kebab-case with a
//! `data-` prefix, so `userName` reads and writes `data-user-name`.

/// The attribute name backing a camelCase dataset key.
pub fn attr_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 5);
    out.push_str("data-");
    out.push_str(&camel_to_kebab(key));
    out
}

/// `fooBar` -> `foo-bar`
pub fn camel_to_kebab(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `foo-bar` -> `fooBar`
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_round_trips_through_kebab() {
        assert_eq!(camel_to_kebab("userName"), "user-name");
        assert_eq!(kebab_to_camel("user-name"), "userName");
        assert_eq!(camel_to_kebab("status"), "status");
        assert_eq!(kebab_to_camel("status"), "status");
        assert_eq!(kebab_to_camel(&camel_to_kebab("aLongKeyName")), "aLongKeyName");
    }

    #[test]
    fn attr_name_is_prefixed() {
        assert_eq!(attr_name("userName"), "data-user-name");
    }
}
