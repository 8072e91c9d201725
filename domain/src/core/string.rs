//! String utilities for the domain layer.

/// Truncate a string for display, appending `...` (UTF-8 safe)
///
/// `max_len` is a byte length; the cut moves back to a char boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        format!("{}...", &s[..floor_char_boundary(s, target)])
    }
}

/// Keep at most `max_chars` characters. Returns the kept prefix and whether
/// anything was cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> (&str, bool) {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => (&s[..end], true),
        None => (s, false),
    }
}

/// Single-line preview of a value: newlines collapsed, length capped
pub fn one_line(s: &str, max_len: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    truncate(&flat, max_len)
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut end = index.min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "é" is 2 bytes: target 4 falls inside the third "é", back to 4
        assert_eq!(truncate("ééééé", 7), "éé...");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), ("abc", true));
        assert_eq!(truncate_chars("abc", 3), ("abc", false));
        assert_eq!(truncate_chars("日本語テスト", 2), ("日本", true));
    }

    #[test]
    fn test_one_line() {
        assert_eq!(one_line("a\nb\r\nc", 20), "a b  c");
        assert_eq!(one_line("line one\nline two", 9), "line o...");
    }
}
