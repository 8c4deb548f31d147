/// Render a half-open, 0-based base range as a 1-based inclusive label.
///
/// Zero-width ranges still report one line, so an insertion point before
/// line `k` reads as `"line {k + 1}"`.
pub fn format_line_range(start: usize, end: usize) -> String {
    let first = start.saturating_add(1);
    let last = end.max(first);
    if first == last {
        format!("line {first}")
    } else {
        format!("lines {first}-{last}")
    }
}
