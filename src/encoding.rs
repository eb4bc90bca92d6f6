use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Encodings the octet annotation can show.
///
/// Only Unicode encoding forms are offered, since they can encode every
/// character a text file can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding {
    pub fn encode(self, c: char) -> Vec<u8> {
        match self {
            Encoding::Utf8 => {
                let mut buf = [0; 4];
                c.encode_utf8(&mut buf).as_bytes().to_vec()
            }
            Encoding::Utf16Le | Encoding::Utf16Be => {
                let mut buf = [0; 2];
                c.encode_utf16(&mut buf)
                    .iter()
                    .flat_map(|&unit| {
                        if self == Encoding::Utf16Le {
                            unit.to_le_bytes()
                        } else {
                            unit.to_be_bytes()
                        }
                    })
                    .collect()
            }
            Encoding::Utf32Le => (c as u32).to_le_bytes().to_vec(),
            Encoding::Utf32Be => (c as u32).to_be_bytes().to_vec(),
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;
    fn from_str(s: &str) -> Result<Encoding, Error> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match &*normalized {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "utf-16" | "utf16" | "utf-16be" | "utf16be" => Ok(Encoding::Utf16Be),
            "utf-16le" | "utf16le" => Ok(Encoding::Utf16Le),
            "utf-32" | "utf32" | "utf-32be" | "utf32be" => Ok(Encoding::Utf32Be),
            "utf-32le" | "utf32le" => Ok(Encoding::Utf32Le),
            _ => Err(Error::UnknownEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16Be => "utf-16be",
            Encoding::Utf32Le => "utf-32le",
            Encoding::Utf32Be => "utf-32be",
        })
    }
}

#[test]
fn test_encode() {
    let tests: &[(Encoding, char, &[u8])] = &[
        (Encoding::Utf8, '\n', &[0x0A]),
        (Encoding::Utf8, '\u{F1}', &[0xC3, 0xB1]),
        (Encoding::Utf8, '\u{FEFF}', &[0xEF, 0xBB, 0xBF]),
        (Encoding::Utf8, '\u{1D510}', &[0xF0, 0x9D, 0x94, 0x90]),
        (Encoding::Utf16Be, '\u{F1}', &[0x00, 0xF1]),
        (Encoding::Utf16Le, '\u{F1}', &[0xF1, 0x00]),
        (Encoding::Utf16Be, '\u{1D510}', &[0xD8, 0x35, 0xDD, 0x10]),
        (Encoding::Utf16Le, '\u{1D510}', &[0x35, 0xD8, 0x10, 0xDD]),
        (Encoding::Utf32Be, '\u{1D510}', &[0x00, 0x01, 0xD5, 0x10]),
        (Encoding::Utf32Le, 'A', &[0x41, 0x00, 0x00, 0x00]),
    ];

    for &(encoding, c, expected) in tests.iter() {
        assert_eq!(encoding.encode(c), expected, "{} {:?}", encoding, c);
    }
}

#[test]
fn test_names() {
    assert_eq!("utf-8".parse::<Encoding>().ok(), Some(Encoding::Utf8));
    assert_eq!("UTF_8".parse::<Encoding>().ok(), Some(Encoding::Utf8));
    assert_eq!("utf-16".parse::<Encoding>().ok(), Some(Encoding::Utf16Be));
    assert_eq!("utf-32LE".parse::<Encoding>().ok(), Some(Encoding::Utf32Le));
    assert!(matches!("cp1252".parse::<Encoding>(), Err(Error::UnknownEncoding(name)) if name == "cp1252"));
}
