//! Rendering characters for display.

use std::sync::Arc;

use crate::encoding::Encoding;
use crate::options::{Escape, RunOptions};
use crate::table::UcdTable;
use crate::usv::{self, UsvWidth};

/// Four encoded bytes written as `0xHH` with separating spaces.
const OCTETS_WIDTH: usize = 19;

/// Each byte of `c` in `encoding`, as `0xHH`, space-separated.
pub fn octets(c: char, encoding: Encoding) -> String {
    encoding
        .encode(c)
        .iter()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_printable_ascii(c: char) -> bool {
    (' '..='~').contains(&c)
}

/// Escape `c` for a string literal: `\u00f1`, or `\U0001d510` above the BMP.
pub fn source_literal(c: char) -> String {
    let cp = c as u32;
    if is_printable_ascii(c) {
        c.to_string()
    } else if cp > 0xFFFF {
        format!("\\U{:08x}", cp)
    } else {
        format!("\\u{:04x}", cp)
    }
}

/// Escape `c` for test markup: `\u00f1`, and `\u1d510` above the BMP.
pub fn markup(c: char) -> String {
    if is_printable_ascii(c) {
        c.to_string()
    } else {
        format!("\\u{:04x}", c as u32)
    }
}

/// Replace the escapes produced by [`source_literal`] and [`markup`] with
/// the characters they stand for.
///
/// `\u` takes four hex digits, or five or six when that gives a
/// supplementary-plane codepoint; `\U` takes eight. Anything that does not
/// decode to a character is left as it is.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(i) = rest.find('\\') {
        out.push_str(&rest[..i]);
        rest = &rest[i..];
        match decode_escape(rest) {
            Some((c, len)) => {
                out.push(c);
                rest = &rest[len..];
            }
            None => {
                out.push('\\');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode the escape at the start of `s`, returning it and its length.
fn decode_escape(s: &str) -> Option<(char, usize)> {
    let bytes = s.as_bytes();
    let hex_run = bytes[2.min(bytes.len())..]
        .iter()
        .take(8)
        .take_while(|b| b.is_ascii_hexdigit())
        .count();
    let value = |digits: usize| u32::from_str_radix(&s[2..2 + digits], 16).ok();

    match bytes.get(1) {
        Some(b'U') if hex_run == 8 => value(8).and_then(char::from_u32).map(|c| (c, 10)),
        Some(b'u') if hex_run >= 4 => {
            for digits in [6, 5] {
                if hex_run >= digits {
                    if let Some(c) = value(digits).filter(|&v| v > 0xFFFF).and_then(char::from_u32) {
                        return Some((c, 2 + digits));
                    }
                }
            }
            value(4).and_then(char::from_u32).map(|c| (c, 6))
        }
        _ => None,
    }
}

/// Renders characters according to one run's options.
#[derive(Debug, Clone)]
pub struct Formatter {
    table: Arc<UcdTable>,
    escape: Escape,
    octets: Option<Encoding>,
    usv_width: UsvWidth,
}

impl Formatter {
    pub fn new(table: Arc<UcdTable>, options: &RunOptions) -> Formatter {
        Formatter {
            table,
            escape: options.escape,
            octets: if options.show_octets {
                Some(options.encoding)
            } else {
                None
            },
            usv_width: options.usv_width,
        }
    }

    /// `U+00F1 LATIN SMALL LETTER N WITH TILDE`, prefixed by the octets
    /// when they were asked for.
    pub fn describe(&self, c: char) -> String {
        let described = format!("{} {}", usv::display(c, self.usv_width), self.table.name(c));
        match self.octets {
            Some(encoding) => format!("{:<width$} {}", octets(c, encoding), described, width = OCTETS_WIDTH),
            None => described,
        }
    }

    /// `c` rendered in the active mode: escaped, or described.
    pub fn format(&self, c: char) -> String {
        match self.escape {
            Escape::None => self.describe(c),
            Escape::SourceLiteral => source_literal(c),
            Escape::Markup => markup(c),
        }
    }

    /// [`format`](Formatter::format) plus the text joining it to the
    /// next entry: described entries end with a newline, escaped ones run
    /// together except that a newline in the input stays a newline.
    pub fn entry(&self, c: char) -> String {
        match self.escape {
            Escape::None => {
                let mut line = self.describe(c);
                line.push('\n');
                line
            }
            _ if c == '\n' => "\n".to_string(),
            _ => self.format(c),
        }
    }

    /// A report line of the frequency counter, `      2 U+0031 DIGIT ONE`.
    pub fn count_line(&self, c: char, count: usize) -> String {
        format!("{:>7} {}", count, self.describe(c))
    }
}
