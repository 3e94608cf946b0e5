//! Naming for generated locals.
//!
//! Every loop variable or temporary derives a stable lexical prefix from the
//! expression it serves, suffixed by purpose (`Count`, `Idx`, `Entry`,
//! `Transient`, `Temp`, `Length`). Nested expressions extend the prefix, so
//! nesting never collides.

/// Lower-camel prefix for locals serving `expr`.
///
/// Identifier segments of the expression are camel-joined: `Foo` → `foo`,
/// `Foo.Value` → `fooValue`, `foo[fooIdx]` → `fooFooIdx`.
pub fn local_prefix(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut boundary = false;
    for c in expr.chars() {
        if c.is_alphanumeric() || c == '_' {
            if boundary && !out.is_empty() {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            boundary = false;
        } else {
            boundary = true;
        }
    }
    if out.is_empty() {
        return "value".to_string();
    }
    let mut chars = out.chars();
    let first = chars.next().unwrap_or('v');
    first.to_lowercase().chain(chars).collect()
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn local_prefix___lowercases_simple_identifiers() {
        assert_eq!(local_prefix("Foo"), "foo");
        assert_eq!(local_prefix("fooEntry"), "fooEntry");
    }

    #[test]
    fn local_prefix___camel_joins_member_accesses() {
        assert_eq!(local_prefix("Foo.Value"), "fooValue");
    }

    #[test]
    fn local_prefix___extends_through_indexing() {
        // Nested element expressions keep extending the prefix, so the
        // inner loop's locals never collide with the outer loop's.
        assert_eq!(local_prefix("Foo[fooIdx]"), "fooFooIdx");
    }

    #[test]
    fn local_prefix___empty_expression_falls_back() {
        assert_eq!(local_prefix(""), "value");
    }
}
