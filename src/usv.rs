//! Unicode Scalar Value labels.
//!
//! A USV label is the uppercase hexadecimal form of a codepoint. Two
//! conventions are in use: the minimal one pads to four digits and lets
//! supplementary-plane values grow naturally (`1D510`), the wide one pads
//! supplementary-plane values to six digits (`01D510`). Table keys always
//! use the minimal form.

/// The largest codepoint, `U+10FFFF`.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsvWidth {
    /// At least four digits.
    #[default]
    Minimal,
    /// Four digits in the BMP, at least six above it.
    Wide,
}

/// The label for `codepoint`, e.g. `00F1` or `1D510`.
pub fn label(codepoint: u32, width: UsvWidth) -> String {
    match width {
        UsvWidth::Wide if codepoint > 0xFFFF => format!("{:06X}", codepoint),
        _ => format!("{:04X}", codepoint),
    }
}

/// The display form of `c`, e.g. `U+00F1`.
pub fn display(c: char, width: UsvWidth) -> String {
    format!("U+{}", label(c as u32, width))
}

/// Parse a label back into a codepoint; `None` for non-hex text or values
/// beyond `U+10FFFF`. Surrogate values are accepted.
pub fn parse(label: &str) -> Option<u32> {
    let label = label.trim();
    if label.is_empty() || label.len() > 8 {
        return None;
    }
    u32::from_str_radix(label, 16)
        .ok()
        .filter(|&cp| cp <= MAX_CODEPOINT)
}

#[test]
fn test_label() {
    let tests: &[(u32, UsvWidth, &str)] = &[
        (0x41, UsvWidth::Minimal, "0041"),
        (0xF1, UsvWidth::Wide, "00F1"),
        (0xFEFF, UsvWidth::Wide, "FEFF"),
        (0x1D510, UsvWidth::Minimal, "1D510"),
        (0x1D510, UsvWidth::Wide, "01D510"),
        (0x10FFFF, UsvWidth::Wide, "10FFFF"),
        (0xD800, UsvWidth::Minimal, "D800"),
    ];

    for &(cp, width, expected) in tests.iter() {
        assert_eq!(label(cp, width), expected);
    }
}

#[test]
fn test_display() {
    assert_eq!(display('\u{F1}', UsvWidth::Minimal), "U+00F1");
    assert_eq!(display('\u{1D510}', UsvWidth::Minimal), "U+1D510");
    assert_eq!(display('\u{1D510}', UsvWidth::Wide), "U+01D510");
}

#[test]
fn test_parse() {
    assert_eq!(parse("00F1"), Some(0xF1));
    assert_eq!(parse("1d510"), Some(0x1D510));
    assert_eq!(parse("DC00"), Some(0xDC00));
    assert_eq!(parse(""), None);
    assert_eq!(parse("XYZ"), None);
    assert_eq!(parse("110000"), None);
}
