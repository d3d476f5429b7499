//! Stacked rendering of multi-line free text (addresses, notes).
//!
//! Text is split on explicit line breaks only; nothing is re-wrapped.

/// Vertical distance between stacked lines, in points.
pub const LINE_HEIGHT: f64 = 15.0;

/// Split `text` on `\n`, `\r\n` or `\r`.
///
/// Always returns at least one line: empty input gives `[""]`, so the
/// offset arithmetic below never sees a zero-line block.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(i) = rest.find(|c| c == '\r' || c == '\n') {
        lines.push(&rest[..i]);
        let break_len = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[i + break_len..];
    }
    lines.push(rest);
    lines
}

/// Baseline of line `index` in a block whose first line sits at `base_y`.
pub fn line_y(base_y: f64, index: usize) -> f64 {
    base_y - index as f64 * LINE_HEIGHT
}

/// Baseline of the content that follows a block of `line_count` lines.
pub fn flow_below(base_y: f64, line_count: usize) -> f64 {
    line_y(base_y, line_count)
}

/// Pair every line of `text` with its baseline.
pub fn stack_lines(text: &str, base_y: f64) -> Vec<(&str, f64)> {
    split_lines(text)
        .into_iter()
        .enumerate()
        .map(|(i, line)| (line, line_y(base_y, i)))
        .collect()
}
