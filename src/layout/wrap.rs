/// Greedy word wrap on single-space boundaries.
///
/// Words are packed onto a line while `line + word` (the line keeps its trailing separator)
/// fits in `max_chars_per_line` characters. A word longer than the limit is placed alone on
/// its own line and never split. Empty input yields no lines.
pub fn layout_text(text: &str, max_chars_per_line: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    let mut current = String::new();
    let mut current_chars = 0usize;
    for word in text.split(' ') {
        let word_chars = word.chars().count();
        if current_chars + word_chars > max_chars_per_line && !current.is_empty() {
            lines.push(current.trim().to_owned());
            current.clear();
            current_chars = 0;
        }
        current.push_str(word);
        current.push(' ');
        current_chars += word_chars + 1;
    }
    if !current.is_empty() {
        lines.push(current.trim().to_owned());
    }

    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
