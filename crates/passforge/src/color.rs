//! Color normalization for pass documents.
//!
//! Wallet pass JSON expects `rgb(r, g, b)` component triplets; the UI
//! sends hex strings. Malformed input falls back to the dark-navy
//! default rather than failing the whole generation.

/// Fallback triplet, hex `1a1a2e`.
pub const DEFAULT_TRIPLET: &str = "rgb(26, 26, 46)";

/// Convert a hex color (`ff0000` or `#FF0000`) into the canonical
/// `rgb(r, g, b)` form. Inputs already shaped like a triplet pass
/// through unchanged; anything else yields [`DEFAULT_TRIPLET`].
///
/// Total over all inputs; never panics.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("rgb") {
        return trimmed.to_string();
    }

    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return DEFAULT_TRIPLET.to_string();
    }

    let component = |range| u8::from_str_radix(&digits[range], 16).unwrap_or(0);
    let (r, g, b) = (component(0..2), component(2..4), component(4..6));
    format!("rgb({r}, {g}, {b})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_with_and_without_hash_agree() {
        assert_eq!(normalize("ff0000"), "rgb(255, 0, 0)");
        assert_eq!(normalize("#FF0000"), "rgb(255, 0, 0)");
        assert_eq!(normalize("ff0000"), normalize("#ff0000"));
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(normalize("#AbCdEf"), normalize("#abcdef"));
        assert_eq!(normalize("aBcDeF"), "rgb(171, 205, 239)");
    }

    #[test]
    fn triplet_passes_through() {
        assert_eq!(normalize("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
    }

    #[test]
    fn malformed_inputs_fall_back() {
        for input in ["", "gg0000", "12345", "#12345", "1234567", "not a color"] {
            assert_eq!(normalize(input), DEFAULT_TRIPLET, "input {input:?}");
        }
    }
}
