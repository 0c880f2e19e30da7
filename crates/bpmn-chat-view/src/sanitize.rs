//! Escaping for model output embedded in the generated page.
//!
//! Text nodes are escaped by the template engine. Payloads that land inside
//! a `<script>` element are JSON-encoded and then stripped of sequences that
//! could close the script or break a JavaScript string. Marker classes are
//! restricted to a plain CSS identifier charset.

use serde::Serialize;

/// Serialize `value` as a JavaScript literal safe to inline in `<script>`.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

/// Validate a marker class name (letters, digits, `-`, `_`; not starting
/// with a digit).
pub fn validate_css_class(value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    let Some(first) = trimmed.chars().next() else {
        return Err("Empty CSS class".to_string());
    };

    if first.is_ascii_digit() {
        return Err(format!("CSS class may not start with a digit: '{trimmed}'"));
    }

    for ch in trimmed.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '-' && ch != '_' {
            return Err(format!("Invalid character '{ch}' in CSS class: '{trimmed}'"));
        }
    }

    Ok(())
}
