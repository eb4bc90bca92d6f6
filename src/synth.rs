//! Expansion of name-source records into a dense [`UcdTable`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::source::{NameRecord, SourceFormat};
use crate::table::UcdTable;
use crate::usv::{self, UsvWidth};

static CONTROL: &str = "<control>";

/// How the codepoints of a fixed block are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockName {
    /// `CJK Unified Ideograph[ Ext <label>]-<USV>`; the URO has an empty label.
    CjkIdeograph(&'static str),
    /// The same name for every codepoint in the block.
    Fixed(&'static str),
}

/// Ranges the name sources leave implicit, seeded before any source is read.
pub static FIXED_BLOCKS: &[(u32, u32, BlockName)] = &[
    (0x3400, 0x4DBF, BlockName::CjkIdeograph("A")),
    (0x4E00, 0x9FFF, BlockName::CjkIdeograph("")),
    (0xD800, 0xDB7F, BlockName::Fixed("(High Surrogate)")),
    (0xDB80, 0xDBFF, BlockName::Fixed("(High Private Use Surrogate)")),
    (0xDC00, 0xDFFF, BlockName::Fixed("(Low Surrogate)")),
    (0x20000, 0x2A6DF, BlockName::CjkIdeograph("B")),
    (0x2A700, 0x2B739, BlockName::CjkIdeograph("C")),
    (0x2B740, 0x2B81D, BlockName::CjkIdeograph("D")),
    (0x2B820, 0x2CEA1, BlockName::CjkIdeograph("E")),
    (0x2CEB0, 0x2EBE0, BlockName::CjkIdeograph("F")),
    (0x30000, 0x3134A, BlockName::CjkIdeograph("G")),
    (0x31350, 0x323AF, BlockName::CjkIdeograph("H")),
];

impl BlockName {
    pub fn name(self, codepoint: u32) -> String {
        match self {
            BlockName::CjkIdeograph("") => {
                format!("CJK Unified Ideograph-{}", usv::label(codepoint, UsvWidth::Minimal))
            }
            BlockName::CjkIdeograph(label) => format!(
                "CJK Unified Ideograph Ext {}-{}",
                label,
                usv::label(codepoint, UsvWidth::Minimal)
            ),
            BlockName::Fixed(name) => name.to_string(),
        }
    }
}

/// Counters describing one synthesis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub records: usize,
    pub seeded: usize,
    pub ranged: usize,
    pub malformed: usize,
    pub unterminated: usize,
}

#[derive(Debug)]
struct OpenRange {
    start: u32,
    label: String,
}

/// Builds a [`UcdTable`] from a stream of [`NameRecord`]s.
///
/// Literal records always set their codepoint's name. A `<Label, First>`
/// record opens a range that the next `<Label, Last>` record closes; the
/// codepoints in between are named `Label-USV`, but only where nothing
/// (literal or pre-seeded) has named them already.
#[derive(Debug, Default)]
pub struct Synthesizer {
    table: UcdTable,
    open: Option<OpenRange>,
    stats: Stats,
}

impl Synthesizer {
    /// A synthesizer with an empty table.
    pub fn new() -> Synthesizer {
        Synthesizer::default()
    }

    /// A synthesizer whose table already holds the [`FIXED_BLOCKS`].
    pub fn seeded() -> Synthesizer {
        let mut synth = Synthesizer::new();
        for &(start, end, block) in FIXED_BLOCKS.iter() {
            for cp in start..=end {
                synth.table.insert(cp, block.name(cp));
            }
            synth.stats.seeded += (end - start + 1) as usize;
        }
        synth
    }

    pub fn feed(&mut self, record: NameRecord) {
        self.stats.records += 1;
        let NameRecord {
            codepoint,
            name,
            alt_name,
        } = record;

        if name == CONTROL {
            self.table.insert(codepoint, format!("({})", alt_name));
        } else if let Some(label) = range_label(&name, "First") {
            if let Some(open) = self.open.take() {
                warn!(
                    "range {} opened at U+{} was never closed",
                    open.label,
                    usv::label(open.start, UsvWidth::Minimal)
                );
                self.stats.unterminated += 1;
            }
            self.open = Some(OpenRange {
                start: codepoint,
                label: label.to_string(),
            });
        } else if let Some(label) = range_label(&name, "Last") {
            self.close_range(codepoint, label);
        } else {
            self.table.insert(codepoint, name);
        }
    }

    fn close_range(&mut self, end: u32, label: &str) {
        let open = match self.open.take() {
            Some(open) => open,
            None => {
                warn!(
                    "range {} closed at U+{} was never opened",
                    label,
                    usv::label(end, UsvWidth::Minimal)
                );
                self.stats.malformed += 1;
                return;
            }
        };
        if open.label != label {
            warn!("range {} closed as {}", open.label, label);
        }
        if end < open.start {
            warn!(
                "range {} ends before it starts, at U+{}",
                open.label,
                usv::label(end, UsvWidth::Minimal)
            );
            self.stats.malformed += 1;
            return;
        }

        for cp in open.start..=end {
            let name = format!("{}-{}", open.label, usv::label(cp, UsvWidth::Minimal));
            if self.table.insert_vacant(cp, name) {
                self.stats.ranged += 1;
            }
        }
    }

    /// Parse every line of `reader` with the parser for `format`.
    pub fn feed_reader<R: BufRead>(&mut self, reader: R, format: SourceFormat) -> std::io::Result<()> {
        let mut parser = format.parser();
        let mut records = vec![];
        for line in reader.lines() {
            parser.parse_line(&line?, &mut records);
            for record in records.drain(..) {
                self.feed(record);
            }
        }
        parser.finish(&mut records);
        for record in records {
            self.feed(record);
        }
        self.stats.malformed += parser.malformed();
        Ok(())
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Finish synthesis; an unclosed range contributes nothing.
    pub fn finish(mut self) -> UcdTable {
        if let Some(open) = self.open.take() {
            warn!(
                "range {} opened at U+{} was never closed",
                open.label,
                usv::label(open.start, UsvWidth::Minimal)
            );
            self.stats.unterminated += 1;
        }
        info!(
            "synthesized {} names ({} records, {} pre-seeded, {} from ranges, {} malformed, {} unterminated)",
            self.table.len(),
            self.stats.records,
            self.stats.seeded,
            self.stats.ranged,
            self.stats.malformed,
            self.stats.unterminated
        );
        self.table
    }
}

/// For `<Label, First>` (with `which` = `"First"`) return `Label`.
fn range_label<'a>(name: &'a str, which: &str) -> Option<&'a str> {
    let inner = name.strip_prefix('<')?.strip_suffix('>')?;
    let (label, marker) = inner.rsplit_once(',')?;
    if marker.trim() == which {
        Some(label.trim())
    } else {
        None
    }
}

/// Build a table from the fixed blocks plus every source file, in order.
pub fn synthesize<P: AsRef<Path>>(sources: &[P], format: SourceFormat) -> Result<UcdTable> {
    let mut synth = Synthesizer::seeded();
    for path in sources.iter() {
        let path = path.as_ref();
        info!("reading {} names from {}", format, path.display());
        let source_error = |source| Error::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(source_error)?;
        synth
            .feed_reader(BufReader::new(file), format)
            .map_err(source_error)?;
    }
    Ok(synth.finish())
}

#[test]
fn test_range_label() {
    let tests: &[(&str, &str, Option<&str>)] = &[
        ("<CJK Ideograph Extension A, First>", "First", Some("CJK Ideograph Extension A")),
        ("<CJK Ideograph Extension A, First>", "Last", None),
        ("<Hangul Syllable, Last>", "Last", Some("Hangul Syllable")),
        ("<control>", "First", None),
        ("<not a character>", "Last", None),
        ("LATIN SMALL LETTER A", "First", None),
    ];

    for &(name, which, expected) in tests.iter() {
        assert_eq!(range_label(name, which), expected);
    }
}
