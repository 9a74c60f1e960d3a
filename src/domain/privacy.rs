//! Field-level redaction rules shared by talk and speaker projections.
//!
//! The email heuristic is intentionally loose. It must stay byte-for-byte
//! compatible with what the public index has always exposed, so changes here
//! are privacy-policy changes.

use super::foundation::{FieldMap, FieldValue};

/// True when a field name hints at an email address (case-insensitive).
pub fn is_email_field_name(name: &str) -> bool {
    name.to_lowercase().contains("email")
}

/// True when a string looks like an email address: an `@` with text before
/// it, and a `.` somewhere from the `@` onwards.
pub fn looks_like_email(s: &str) -> bool {
    match s.find('@') {
        Some(at) if at > 0 && at < s.len() - 1 => s[at..].contains('.'),
        _ => false,
    }
}

/// Public view of a field bag: email-named fields and email-looking text
/// values are dropped. Non-text values are only checked by name.
pub fn redact_public(data: &FieldMap) -> FieldMap {
    data.iter()
        .filter(|(name, _)| !is_email_field_name(name))
        .filter(|(_, value)| !matches!(value, FieldValue::Text(s) if looks_like_email(s)))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Private view of a field bag: public and private entries merged into one
/// map. On a key collision the private value wins.
pub fn merge_private(public: &FieldMap, private: &FieldMap) -> FieldMap {
    let mut merged = public.clone();
    merged.extend(private.iter().map(|(name, value)| (name.clone(), value.clone())));
    merged
}
