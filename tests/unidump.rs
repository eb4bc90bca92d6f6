use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use unidump::run::{self, Context};
use unidump::{
    synth, Encoding, Error, Escape, Formatter, Position, RunMode, RunOptions, SourceFormat, UcdCache, UcdTable,
};

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}

struct Fixture {
    _dir: TempDir,
    cache_path: PathBuf,
    table: Arc<UcdTable>,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("unidump").join("ucd.bin.gz");
    UcdCache::new(&cache_path)
        .build(&[data("UnicodeData.txt")], SourceFormat::UnicodeData)
        .unwrap();
    let table = UcdCache::new(&cache_path).load().unwrap();
    Fixture {
        _dir: dir,
        cache_path,
        table: Arc::new(table),
    }
}

fn options(f: &Fixture, mode: RunMode) -> RunOptions {
    let mut options = RunOptions::new(mode, f.cache_path.clone());
    options.files = vec![data("position.txt")];
    options
}

fn formatter(f: &Fixture) -> Formatter {
    Formatter::new(f.table.clone(), &options(f, RunMode::Dump))
}

fn first_entry(f: &Fixture, line: i64, column: i64) -> String {
    let formatter = formatter(f);
    let mut entries = run::dump_file(&formatter, &data("position.txt"), Position::new(line, column).unwrap(), false).unwrap();
    let entry = entries.next().unwrap().unwrap();
    entry.trim_end_matches('\n').to_string()
}

fn run_to_string(options: &RunOptions) -> String {
    let mut out = vec![];
    {
        let mut ctxt = Context::new(&mut out);
        run::run(options, &mut ctxt).unwrap();
    }
    String::from_utf8(out).unwrap()
}

// dump file position

#[test]
fn position_start() {
    assert_eq!(first_entry(&fixture(), 1, 1), "U+0031 DIGIT ONE");
}

#[test]
fn position_line() {
    assert_eq!(first_entry(&fixture(), 2, 1), "U+0032 DIGIT TWO");
}

#[test]
fn position_line_column() {
    assert_eq!(first_entry(&fixture(), 4, 6), "U+0058 LATIN CAPITAL LETTER X");
}

#[test]
fn positioned_read_matches_discarding_a_full_read() {
    let all = fs::read_to_string(data("position.txt")).unwrap();
    let lines: Vec<&str> = all.split_inclusive('\n').collect();
    let expected: String = lines[3].chars().skip(5).collect();

    let f = fixture();
    let formatter = formatter(&f);
    let got: Vec<String> = run::dump_file(&formatter, &data("position.txt"), Position::new(4, 6).unwrap(), false)
        .unwrap()
        .map(|e| e.unwrap())
        .collect();
    let want: Vec<String> = expected.chars().map(|c| formatter.entry(c)).collect();
    assert_eq!(got, want);
}

#[test]
fn end_of_line_only() {
    let f = fixture();
    let mut options = options(&f, RunMode::Dump);
    options.escape = Escape::SourceLiteral;
    options.position = Position::new(2, 3).unwrap();
    options.stop_at_eol = true;
    assert_eq!(run_to_string(&options), "two\n");
}

// count

#[test]
fn count_file() {
    let counter = run::count_files(&[data("position.txt")], Position::START, false).unwrap();
    assert_eq!(counter.get('1'), 2, "one");
    assert_eq!(counter.get('4'), 2, "four");
    assert_eq!(counter.get('e'), 3, "letter e");
}

#[test]
fn count_files_accumulates() {
    let counter = run::count_files(&[data("position.txt"), data("position.txt")], Position::START, false).unwrap();
    assert_eq!(counter.get('1'), 4, "one");
    assert_eq!(counter.get('4'), 4, "four");
    assert_eq!(counter.get('e'), 6, "letter e");
}

#[test]
fn count_from_a_position_only_sees_later_characters() {
    let counter = run::count_files(&[data("position.txt")], Position::new(4, 6).unwrap(), false).unwrap();
    assert_eq!(counter.report(), vec![('\n', 1), ('X', 1), ('e', 1)]);
}

#[test]
fn count_output() {
    let f = fixture();
    let mut options = options(&f, RunMode::Count);
    options.position = Position::new(4, 6).unwrap();
    assert_eq!(
        run_to_string(&options),
        "      1 U+000A (LINE FEED (LF))\n      1 U+0058 LATIN CAPITAL LETTER X\n      1 U+0065 LATIN SMALL LETTER E\n"
    );
}

// dump output

#[test]
fn dump_output() {
    let f = fixture();
    let mut options = options(&f, RunMode::Dump);
    options.position = Position::new(4, 1).unwrap();
    assert_eq!(
        run_to_string(&options),
        "\
U+0009 (CHARACTER TABULATION)
U+0074 LATIN SMALL LETTER T
U+0065 LATIN SMALL LETTER E
U+0073 LATIN SMALL LETTER S
U+0074 LATIN SMALL LETTER T
U+0058 LATIN CAPITAL LETTER X
U+0065 LATIN SMALL LETTER E
U+000A (LINE FEED (LF))
"
    );
}

#[test]
fn dump_output_with_octets() {
    let f = fixture();
    let mut options = options(&f, RunMode::Dump);
    options.show_octets = true;
    options.encoding = Encoding::Utf16Be;
    options.position = Position::new(4, 6).unwrap();
    options.stop_at_eol = true;
    assert_eq!(
        run_to_string(&options),
        "\
0x00 0x58           U+0058 LATIN CAPITAL LETTER X
0x00 0x65           U+0065 LATIN SMALL LETTER E
0x00 0x0A           U+000A (LINE FEED (LF))
"
    );
}

#[test]
fn escaped_output_keeps_newlines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mixed.txt");
    fs::write(&input, "a\u{F1}\n\u{1D510}\r\n").unwrap();

    let f = fixture();
    let mut options = options(&f, RunMode::Dump);
    options.files = vec![input];

    options.escape = Escape::SourceLiteral;
    let escaped = run_to_string(&options);
    assert_eq!(escaped, "a\\u00f1\n\\U0001d510\\u000d\n");
    assert_eq!(unidump::format::unescape(&escaped), "a\u{F1}\n\u{1D510}\r\n");

    options.escape = Escape::Markup;
    assert_eq!(run_to_string(&options), "a\\u00f1\n\\u1d510\\u000d\n");
}

#[test]
fn crlf_lines() {
    let counter = run::count_files(&[data("crlf.txt")], Position::new(2, 2).unwrap(), false).unwrap();
    assert_eq!(counter.report(), vec![('\n', 1), ('\r', 1), ('d', 1)]);
}

// names

#[test]
fn names() {
    let f = fixture();
    let tests: &[(char, &str)] = &[
        ('\n', "(LINE FEED (LF))"),
        ('\u{F1}', "LATIN SMALL LETTER N WITH TILDE"),
        ('\u{161}', "LATIN SMALL LETTER S WITH CARON"),
        ('\u{4DBF}', "CJK Unified Ideograph Ext A-4DBF"),
        ('\u{6606}', "CJK Unified Ideograph-6606"),
        ('\u{9FFC}', "CJK Unified Ideograph-9FFC"),
        ('\u{20040}', "CJK Unified Ideograph Ext B-20040"),
        ('\u{2A6DD}', "CJK Unified Ideograph Ext B-2A6DD"),
        ('\u{2B739}', "CJK Unified Ideograph Ext C-2B739"),
        ('\u{2B81D}', "CJK Unified Ideograph Ext D-2B81D"),
        ('\u{2CEA1}', "CJK Unified Ideograph Ext E-2CEA1"),
        ('\u{2EBE0}', "CJK Unified Ideograph Ext F-2EBE0"),
        ('\u{3134A}', "CJK Unified Ideograph Ext G-3134A"),
        ('\u{323AF}', "CJK Unified Ideograph Ext H-323AF"),
        ('\u{AC01}', "Hangul Syllable-AC01"),
        ('\u{E000}', "Private Use-E000"),
        ('\u{F8FF}', "Private Use-F8FF"),
        ('\u{FFFFD}', "Plane 15 Private Use-FFFFD"),
        ('\u{FEFF}', "ZERO WIDTH NO-BREAK SPACE"),
        ('\u{1D510}', "MATHEMATICAL FRAKTUR CAPITAL M"),
        ('\u{10FFFD}', "(Unknown)"),
    ];
    for &(c, expected) in tests.iter() {
        assert_eq!(f.table.name(c), expected, "U+{:04X}", c as u32);
    }
}

#[test]
fn surrogate_names_come_from_the_fixed_blocks() {
    let f = fixture();
    assert_eq!(f.table.get(0xD800), Some("(High Surrogate)"));
    assert_eq!(f.table.get(0xDB80), Some("(High Private Use Surrogate)"));
    assert_eq!(f.table.get(0xDC00), Some("(Low Surrogate)"));
    assert_eq!(f.table.get_label("DFFF"), Some("(Low Surrogate)"));
}

// cache

#[test]
fn cache_round_trip_matches_synthesis() {
    let f = fixture();
    let synthesized = synth::synthesize(&[data("UnicodeData.txt")], SourceFormat::UnicodeData).unwrap();
    assert_eq!(*f.table, synthesized);
}

#[test]
fn rebuild_through_run() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("ucd.bin.gz");
    let mut options = RunOptions::new(RunMode::RebuildCache(SourceFormat::NamesList), cache_path.clone());
    options.files = vec![data("NamesList.txt")];

    let output = run_to_string(&options);
    assert!(output.contains("names written to"), "{}", output);

    let table = UcdCache::new(&cache_path).load().unwrap();
    assert_eq!(table.get(0x0A), Some("(LINE FEED (LF))"));
    assert_eq!(table.get(0x41), Some("LATIN CAPITAL LETTER A"));
    assert_eq!(table.get(0x1D510), Some("MATHEMATICAL FRAKTUR CAPITAL M"));
    assert_eq!(table.get(0x20000), Some("CJK Unified Ideograph Ext B-20000"));
}

#[test]
fn both_sources_name_the_same_characters() {
    let from_data = synth::synthesize(&[data("UnicodeData.txt")], SourceFormat::UnicodeData).unwrap();
    let from_list = synth::synthesize(&[data("NamesList.txt")], SourceFormat::NamesList).unwrap();
    for (cp, name) in from_list.iter() {
        assert_eq!(from_data.get(cp), Some(name), "U+{:04X}", cp);
    }
}

// errors

#[test]
fn missing_cache() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = RunOptions::new(RunMode::Dump, dir.path().join("none.bin.gz"));
    options.files = vec![data("position.txt")];
    let mut out = vec![];
    let result = run::run(&options, &mut Context::new(&mut out));
    assert!(matches!(result, Err(Error::CacheMissing { .. })));
}

#[test]
fn missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let cache = UcdCache::new(dir.path().join("ucd.bin.gz"));
    let result = cache.build(&[data("NoSuchFile.txt")], SourceFormat::UnicodeData);
    assert!(matches!(result, Err(Error::SourceUnreadable { .. })));
    assert!(!cache.path().exists());
}

#[test]
fn one_missing_input_aborts_the_run() {
    let f = fixture();
    let mut options = options(&f, RunMode::Count);
    options.files = vec![data("position.txt"), data("missing.txt"), data("position.txt")];
    let mut out = vec![];
    let result = run::run(&options, &mut Context::new(&mut out));
    match result {
        Err(Error::InputUnreadable { path, .. }) => assert_eq!(path, data("missing.txt")),
        other => panic!("expected InputUnreadable, got {:?}", other),
    }
    assert!(out.is_empty());
}
