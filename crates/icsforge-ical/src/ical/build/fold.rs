//! Content line folding (RFC 5545 §3.1).

/// Maximum line length in octets (not characters) per RFC 5545.
pub const MAX_LINE_OCTETS: usize = 75;

/// ## Summary
/// Splits a logical line into segments of at most `limit` octets.
///
/// Segments end on UTF-8 character boundaries: characters are accumulated
/// until the next one would exceed the budget. Continuation segments get one
/// octet less so that, with the leading space added by [`fold_line`], every
/// physical line stays within `limit`. A character wider than the budget
/// gets a segment of its own. A limit of `0` disables splitting.
#[must_use]
pub fn fold_segments(line: &str, limit: usize) -> Vec<&str> {
    if limit == 0 || line.len() <= limit {
        return vec![line];
    }

    let continuation_budget = limit.saturating_sub(1).max(1);
    let mut segments = Vec::with_capacity(line.len() / continuation_budget + 1);
    let mut segment_start = 0;

    for (idx, c) in line.char_indices() {
        // Account for the space prefix on continuation lines
        let budget = if segments.is_empty() {
            limit
        } else {
            continuation_budget
        };
        if idx > segment_start && idx + c.len_utf8() - segment_start > budget {
            segments.push(&line[segment_start..idx]);
            segment_start = idx;
        }
    }
    segments.push(&line[segment_start..]);
    segments
}

/// ## Summary
/// Folds a logical line for output.
///
/// The first segment is written as-is, each following segment is prefixed
/// with a single space, and every segment ends in CRLF.
#[must_use]
pub fn fold_line(line: &str, limit: usize) -> String {
    let segments = fold_segments(line, limit);
    let mut result = String::with_capacity(line.len() + segments.len() * 3);

    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            result.push(' ');
        }
        result.push_str(segment);
        result.push_str("\r\n");
    }

    result
}
