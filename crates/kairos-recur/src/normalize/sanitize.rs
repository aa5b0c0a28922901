//! Free-text sanitization for submitted date strings.

/// ## Summary
/// Strips markup tags, turns control characters into spaces, collapses
/// whitespace runs and trims the result.
///
/// No format validation happens here; a sanitized value may still fail to
/// parse as a date at expansion time.
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    let mut stripped = String::with_capacity(input.len());
    let mut in_tag = false;

    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_control() => stripped.push(' '),
            c => stripped.push(c),
        }
    }

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
