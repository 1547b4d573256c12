//! Character-offset helpers for slicing Japanese text.
//!
//! All match spans are expressed in character offsets so they line up with
//! morpheme positions; these helpers translate them to byte offsets at the
//! single point where the sentence string is actually sliced.

/// Number of Unicode scalar values in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Character offset of the scalar starting at byte offset `byte_idx`.
///
/// Returns `None` if `byte_idx` is past the end or not a character boundary.
pub fn byte_to_char(s: &str, byte_idx: usize) -> Option<usize> {
    if byte_idx > s.len() {
        return None;
    }
    if !s.is_char_boundary(byte_idx) {
        return None;
    }
    Some(s[..byte_idx].chars().count())
}

/// Translate a character span `[start, end)` into the corresponding byte span.
///
/// `end == start` yields an empty span. Returns `None` when the span runs past
/// the end of the string or is inverted.
pub fn char_span_to_byte_span(s: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    if end < start {
        return None;
    }
    let mut byte_start = None;
    let mut byte_end = None;
    for (chars_seen, (byte_idx, _)) in s.char_indices().enumerate() {
        if chars_seen == start {
            byte_start = Some(byte_idx);
        }
        if chars_seen == end {
            byte_end = Some(byte_idx);
            break;
        }
    }
    let total = char_len(s);
    if start == total {
        byte_start = Some(s.len());
    }
    if end == total {
        byte_end = Some(s.len());
    }
    Some((byte_start?, byte_end?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len() {
        assert_eq!(char_len(""), 0);
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("食べる"), 3);
        assert_eq!(char_len("彼女はいつも愛想がいい人です。"), 15);
    }

    #[test]
    fn test_byte_to_char() {
        let s = "食べる";
        assert_eq!(byte_to_char(s, 0), Some(0));
        assert_eq!(byte_to_char(s, 3), Some(1));
        assert_eq!(byte_to_char(s, 9), Some(3));
        assert_eq!(byte_to_char(s, 1), None);
        assert_eq!(byte_to_char(s, 10), None);
        assert_eq!(byte_to_char("", 0), Some(0));
    }

    #[test]
    fn test_char_span_to_byte_span() {
        let s = "私は食べた。";
        assert_eq!(char_span_to_byte_span(s, 0, 0), Some((0, 0)));
        assert_eq!(char_span_to_byte_span(s, 2, 4), Some((6, 12)));
        assert_eq!(&s[6..12], "食べ");
        assert_eq!(char_span_to_byte_span(s, 0, 6), Some((0, s.len())));
        assert_eq!(char_span_to_byte_span(s, 6, 6), Some((s.len(), s.len())));
        assert_eq!(char_span_to_byte_span(s, 4, 2), None);
        assert_eq!(char_span_to_byte_span(s, 0, 7), None);
    }

    #[test]
    fn test_span_reconstruction() {
        let s = "彼女はいつも愛想がいい人です。";
        let (b0, b1) = char_span_to_byte_span(s, 6, 11).unwrap();
        assert_eq!(&s[b0..b1], "愛想がいい");
        let joined = format!("{}{}{}", &s[..b0], &s[b0..b1], &s[b1..]);
        assert_eq!(joined, s);
    }
}
