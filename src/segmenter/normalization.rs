// WHY: segmentation and every rejoin assume single-space separated text,
// so whitespace collapsing lives apart from boundary detection

/// Collapse every whitespace run (spaces, tabs, `\r\n`, `\n`) into a single
/// space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_whitespace_into(text, &mut result);
    result
}

/// Normalize into a caller-supplied buffer so batch callers can reuse it
pub fn normalize_whitespace_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            // leading whitespace never sets the flag because the buffer is still empty
            pending_space = !buffer.is_empty();
            continue;
        }
        if pending_space {
            buffer.push(' ');
            pending_space = false;
        }
        buffer.push(ch);
    }
}

/// True when the text has no non-whitespace characters
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}
