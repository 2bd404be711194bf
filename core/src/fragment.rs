//! The `#slide-N` location fragment.

const PREFIX: &str = "slide-";

/// Fragment for a 0-based index, without the leading `#`.
pub fn format_fragment(index: usize) -> String {
    format!("{PREFIX}{}", index + 1)
}

/// First `slide-<digits>` occurrence anywhere in `fragment`, as written
/// (1-based). Digit runs too long for `usize` saturate.
pub fn parse_fragment(fragment: &str) -> Option<usize> {
    fragment.match_indices(PREFIX).find_map(|(pos, _)| {
        let rest = &fragment[pos + PREFIX.len()..];
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .map_or(rest, |end| &rest[..end]);
        if digits.is_empty() {
            return None;
        }
        Some(digits.parse::<usize>().unwrap_or(usize::MAX))
    })
}

/// Initial 0-based index for a deck of `len` slides.
pub fn initial_index(fragment: Option<&str>, len: usize) -> usize {
    let last = len.saturating_sub(1);
    fragment
        .and_then(parse_fragment)
        .map_or(0, |n| n.saturating_sub(1).min(last))
}
