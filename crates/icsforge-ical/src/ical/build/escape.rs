//! Text and parameter value escaping (RFC 5545 §3.3.11, §3.2).

/// ## Summary
/// Escapes a TEXT value.
///
/// Line endings are normalized first (CRLF and stray CR collapse to LF),
/// then `\`, `;`, `,` and LF are escaped.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "");
    let mut out = String::with_capacity(normalized.len() + normalized.len() / 8);
    for c in normalized.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// ## Summary
/// Turns user-typed `\n` sequences into real line breaks.
///
/// Applied to free-text fields before [`escape_text`], so both typed and
/// real breaks come out as the same escape.
#[must_use]
pub fn expand_escaped_newlines(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\N", "\n")
}

/// ## Summary
/// Removes CR and LF from a value that has no escape syntax of its own:
/// identifiers, URIs, enumerated tokens and recurrence rules.
#[must_use]
pub fn strip_line_breaks(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

/// ## Summary
/// Prepares a parameter value: double quotes and line breaks are dropped and
/// the value is quoted when it contains `:`, `;` or `,`.
#[must_use]
pub fn escape_param_value(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, '"' | '\r' | '\n'))
        .collect();
    if cleaned.contains([':', ';', ',']) {
        format!("\"{cleaned}\"")
    } else {
        cleaned
    }
}
