//! Adapters for the two name-source schemas.
//!
//! Both turn lines of text into [`NameRecord`]s carrying the raw primary
//! name (still including markers like `<control>` or `<..., First>`) and
//! the alternate name. Interpreting those markers is the
//! [`Synthesizer`](crate::Synthesizer)'s job, so the two schemas share one
//! code path from the records onwards.

use std::fmt;
use std::mem;

use crate::usv;

/// One entry of a name source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub codepoint: u32,
    pub name: String,
    pub alt_name: String,
}

impl NameRecord {
    pub fn new(codepoint: u32, name: &str, alt_name: &str) -> NameRecord {
        NameRecord {
            codepoint,
            name: name.to_string(),
            alt_name: alt_name.to_string(),
        }
    }
}

/// A line-oriented parser for one name-source schema.
pub trait NameSource {
    /// Parse one line (without its terminator), pushing any records it
    /// completes onto `records`.
    fn parse_line(&mut self, line: &str, records: &mut Vec<NameRecord>);

    /// Flush anything held back waiting for a continuation line.
    fn finish(&mut self, records: &mut Vec<NameRecord>);

    /// Number of lines that looked like entries but could not be parsed.
    fn malformed(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// `UnicodeData.txt`: `;`-separated, name in field 1, alternate in field 10.
    #[default]
    UnicodeData,
    /// `NamesList.txt`: `USV<TAB>name` lines with `<TAB>= alias` continuations.
    NamesList,
}

impl SourceFormat {
    pub fn parser(self) -> Box<dyn NameSource> {
        match self {
            SourceFormat::UnicodeData => Box::new(UnicodeData::default()),
            SourceFormat::NamesList => Box::new(NamesList::default()),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceFormat::UnicodeData => "UnicodeData",
            SourceFormat::NamesList => "NamesList",
        })
    }
}

/// Parser for the flat, semicolon-delimited schema.
#[derive(Debug, Default)]
pub struct UnicodeData {
    malformed: usize,
}

impl NameSource for UnicodeData {
    fn parse_line(&mut self, line: &str, records: &mut Vec<NameRecord>) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let fields: Vec<&str> = line.split(';').collect();
        let codepoint = match usv::parse(fields[0]) {
            Some(cp) if fields.len() > 1 => cp,
            _ => {
                warn!("skipping malformed UnicodeData line: {}", line);
                self.malformed += 1;
                return;
            }
        };
        let alt_name = fields.get(10).copied().unwrap_or("");
        records.push(NameRecord::new(codepoint, fields[1], alt_name));
    }

    fn finish(&mut self, _records: &mut Vec<NameRecord>) {}

    fn malformed(&self) -> usize {
        self.malformed
    }
}

/// Parser for the tab-delimited names list.
///
/// An entry is held back until the next line shows whether a `= alias`
/// continuation follows it; only the first alias is kept.
#[derive(Debug, Default)]
pub struct NamesList {
    pending: Option<NameRecord>,
    malformed: usize,
}

impl NameSource for NamesList {
    fn parse_line(&mut self, line: &str, records: &mut Vec<NameRecord>) {
        let line = line.trim_end_matches(&['\r', '\n'][..]);

        if let Some(alias) = line.strip_prefix("\t= ") {
            if let Some(pending) = self.pending.as_mut() {
                if pending.alt_name.is_empty() {
                    pending.alt_name = alias.trim().to_string();
                }
            }
            return;
        }
        if line.starts_with('\t') {
            // cross references, comments and other annotations
            return;
        }

        let mut fields = line.splitn(2, '\t');
        let head = fields.next().unwrap_or("");
        if head.is_empty() || !head.bytes().all(|b| b.is_ascii_hexdigit()) {
            // headers (`@@`), block titles (`@`) and comments (`;`)
            return;
        }

        let (codepoint, name) = match (usv::parse(head), fields.next()) {
            (Some(cp), Some(name)) => (cp, name),
            _ => {
                warn!("skipping malformed NamesList line: {}", line);
                self.malformed += 1;
                return;
            }
        };

        records.extend(mem::replace(
            &mut self.pending,
            Some(NameRecord::new(codepoint, name.trim(), "")),
        ));
    }

    fn finish(&mut self, records: &mut Vec<NameRecord>) {
        records.extend(self.pending.take());
    }

    fn malformed(&self) -> usize {
        self.malformed
    }
}
