//! Line normalization: documents in, line sequences out.
//!
//! `\r\n` and lone `\r` are normalized to `\n` before splitting. A document
//! that ends with a newline yields a trailing empty string so that
//! [`join_lines`] reproduces it exactly.

/// Split a document into lines.
///
/// An empty document yields an empty sequence. A trailing newline is kept as
/// an explicit final `""` element.
pub fn split_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    if normalized.is_empty() {
        return Vec::new();
    }

    match normalized.strip_suffix('\n') {
        Some(body) => {
            let mut lines: Vec<String> = body.split('\n').map(str::to_owned).collect();
            lines.push(String::new());
            lines
        }
        None => normalized.split('\n').map(str::to_owned).collect(),
    }
}

/// Join lines back into a document with `\n` separators.
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}
