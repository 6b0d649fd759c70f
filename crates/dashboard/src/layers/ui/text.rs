pub(super) fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Keeps the end of `text` visible in a field `width` columns wide, leaving
/// one column for the cursor.
pub(super) fn tail_to_width(text: &str, width: usize) -> String {
    let room = width.saturating_sub(1);
    let count = display_width(text);
    if count <= room {
        return text.to_string();
    }
    text.chars().skip(count - room).collect()
}

pub(super) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let chars = text.chars();
    let count = chars.clone().count();
    if count <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return chars.take(max_len).collect();
    }
    let keep = max_len - 3;
    let mut out: String = chars.take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_cursor_column() {
        assert_eq!(tail_to_width("abc", 10), "abc");
        assert_eq!(tail_to_width("abcdef", 4), "def");
        assert_eq!(tail_to_width("abc", 0), "");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_with_ellipsis("terrible product", 10), "terribl...");
        assert_eq!(truncate_with_ellipsis("abc", 3), "abc");
        assert_eq!(truncate_with_ellipsis("abcd", 2), "ab");
    }
}
