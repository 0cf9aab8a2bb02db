//! HCL identifier rules.

/// Whether `s` is a valid HCL identifier (`[A-Za-z_][A-Za-z0-9_-]*`).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Turn an arbitrary name into a valid HCL identifier.
///
/// Characters outside `[A-Za-z0-9_-]` become `_`. Names that would start
/// with a digit or a dash, and empty names, get a leading `_`.
pub fn sanitize_identifier(s: &str) -> String {
    let mut out: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if !out.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        out.insert(0, '_');
    }
    out
}
