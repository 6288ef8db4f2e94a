//! SQL identifier quoting.
//!
//! Column names emitted by the dynamic builders come from closed,
//! developer-supplied field maps, never from request input. Quoting keeps
//! camelCase and reserved-word columns valid and escapes embedded `"` as
//! `""` per the SQL standard.

/// Render a column name as a double-quoted identifier.
pub fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
    out
}
