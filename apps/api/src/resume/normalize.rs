/// Collapses extracted text into the canonical whitespace form used by every
/// downstream heuristic.
///
/// Carriage returns are dropped, tabs become spaces, runs of spaces collapse to a
/// single space, and the result is trimmed. Newlines are preserved so line-based
/// heuristics still see the document's line structure.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;

    for c in text.chars() {
        match c {
            '\r' => {}
            ' ' | '\t' => {
                if !last_was_space {
                    out.push(' ');
                }
                last_was_space = true;
            }
            _ => {
                out.push(c);
                last_was_space = false;
            }
        }
    }

    out.trim().to_string()
}

/// Splits normalized text into trimmed, non-empty lines.
pub fn non_empty_lines(normalized: &str) -> Vec<&str> {
    normalized
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
