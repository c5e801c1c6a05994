//! Text normalization shared by every comparison in the engine.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize text for comparison.
///
/// Lowercases, strips diacritics (`"Đà Nẵng"` becomes `"da nang"`) and trims
/// surrounding whitespace. Idempotent.
pub fn normalize(input: &str) -> String {
    let lowered: String = input.trim().chars().flat_map(char::to_lowercase).collect();

    let mut out = String::with_capacity(lowered.len());
    for c in lowered.nfd().filter(|c| !is_combining_mark(*c)) {
        match fold(c) {
            Some(ascii) => out.push_str(ascii),
            None => out.push(c),
        }
    }

    // A leading combining mark would otherwise leave a space behind.
    if out.trim().len() == out.len() {
        out
    } else {
        out.trim().to_string()
    }
}

/// Letters that carry no canonical decomposition.
fn fold(c: char) -> Option<&'static str> {
    match c {
        'đ' | 'ð' => Some("d"),
        'ø' => Some("o"),
        'ł' => Some("l"),
        'ı' => Some("i"),
        'ß' => Some("ss"),
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'þ' => Some("th"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vietnamese_place_names() {
        assert_eq!(normalize("Đà Nẵng"), "da nang");
        assert_eq!(normalize("  Thành phố Hồ Chí Minh "), "thanh pho ho chi minh");
        assert_eq!(normalize("Khách Sạn"), "khach san");
    }

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(normalize("Hotel 5 SAO"), "hotel 5 sao");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t"), "");
    }

    #[test]
    fn test_leading_combining_mark() {
        assert_eq!(normalize("\u{0301} hồ bơi"), "ho boi");
    }

    #[test]
    fn test_idempotent() {
        for s in ["Biệt Thự Đà Lạt", "İstanbul", "Straße", "  Ærø  "] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
