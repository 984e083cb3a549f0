pub(super) fn display_width(text: &str) -> usize {
    text.chars().count()
}

pub(super) fn pad_right(text: &str, width: usize) -> String {
    let mut out = text.to_string();
    let current = display_width(text);
    if current < width {
        out.extend(std::iter::repeat(' ').take(width - current));
    }
    out
}

/// Keeps the end of `text` visible in a box `max_len` wide, which is where the
/// cursor sits while typing.
pub(super) fn tail_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let count = display_width(text);
    if count <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return text.chars().skip(count - max_len).collect();
    }
    let keep = max_len - 3;
    let mut out = String::from("...");
    out.extend(text.chars().skip(count - keep));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_text() {
        assert_eq!(pad_right("Age", 6), "Age   ");
        assert_eq!(pad_right("Glucose", 3), "Glucose");
    }

    #[test]
    fn keeps_tail_of_long_text() {
        assert_eq!(tail_with_ellipsis("175", 8), "175");
        assert_eq!(tail_with_ellipsis("123456789", 6), "...789");
        assert_eq!(tail_with_ellipsis("123456789", 2), "89");
        assert_eq!(tail_with_ellipsis("123", 0), "");
    }
}
