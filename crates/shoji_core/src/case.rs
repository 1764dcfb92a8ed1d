//! Case conversion between config keys (camelCase) and CSS names (kebab-case)

/// Convert `camelCase` to `kebab-case`.
///
/// A dash is inserted at every lower-to-upper boundary and the result is
/// lowercased. Already-kebab input passes through unchanged.
pub fn camel_to_kebab(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_lower = false;
    for c in input.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

/// Convert `kebab-case` back to `camelCase`.
pub fn kebab_to_camel(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;
    for c in input.chars() {
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
    fn camel_to_kebab_boundaries() {
        assert_eq!(camel_to_kebab("backgroundColor"), "background-color");
        assert_eq!(camel_to_kebab("breakPoint"), "break-point");
        assert_eq!(camel_to_kebab("barBackgroundHeight"), "bar-background-height");
        assert_eq!(camel_to_kebab("primary"), "primary");
    }

    #[test]
    fn kebab_to_camel_roundtrip() {
        assert_eq!(kebab_to_camel("background-color"), "backgroundColor");
        assert_eq!(kebab_to_camel(&camel_to_kebab("capHeightBaselineTop")), "capHeightBaselineTop");
    }
}
