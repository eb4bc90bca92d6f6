//! Driving the reader through the formatter or the counter.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::cache::UcdCache;
use crate::count::FrequencyCounter;
use crate::error::{Error, Result};
use crate::format::Formatter;
use crate::options::{RunMode, RunOptions};
use crate::reader::{CharReader, Position};

macro_rules! w {
    ($ctxt: expr, $($tt: tt)*) => {
        write!($ctxt.out, $($tt)*).map_err(Error::Output)?
    }
}

/// Where a run writes its output.
pub struct Context<'a> {
    pub out: Box<dyn Write + 'a>,
}

impl<'a> Context<'a> {
    pub fn new<W: Write + 'a>(out: W) -> Context<'a> {
        Context { out: Box::new(out) }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(Error::Output)
    }
}

/// The output entries for the characters of one file, each carrying the
/// text that joins it to the next.
pub fn dump_file<'f>(
    formatter: &'f Formatter,
    path: &Path,
    start: Position,
    stop_at_eol: bool,
) -> Result<impl Iterator<Item = Result<String>> + 'f> {
    let reader = CharReader::open(path, start, stop_at_eol)?;
    Ok(reader.map(move |o| o.map(|o| formatter.entry(o.ch))))
}

/// Write the entries for every file, in order. The first unreadable file
/// ends the run.
pub fn dump_files<P: AsRef<Path>>(
    ctxt: &mut Context<'_>,
    formatter: &Formatter,
    files: &[P],
    start: Position,
    stop_at_eol: bool,
) -> Result<()> {
    for path in files.iter() {
        for entry in dump_file(formatter, path.as_ref(), start, stop_at_eol)? {
            w!(ctxt, "{}", entry?);
        }
    }
    ctxt.flush()
}

/// Add the characters of one file to `counter`.
pub fn count_file<P: AsRef<Path>>(
    counter: &mut FrequencyCounter,
    path: P,
    start: Position,
    stop_at_eol: bool,
) -> Result<()> {
    for o in CharReader::open(path, start, stop_at_eol)? {
        counter.accumulate(o?.ch);
    }
    Ok(())
}

/// Count the characters of every file together.
pub fn count_files<P: AsRef<Path>>(files: &[P], start: Position, stop_at_eol: bool) -> Result<FrequencyCounter> {
    let mut counter = FrequencyCounter::new();
    for path in files.iter() {
        count_file(&mut counter, path, start, stop_at_eol)?;
    }
    Ok(counter)
}

/// Carry out `options.mode`.
pub fn run(options: &RunOptions, ctxt: &mut Context<'_>) -> Result<()> {
    let cache = UcdCache::new(options.cache_path.clone());

    match options.mode {
        RunMode::RebuildCache(format) => {
            let table = cache.build(&options.files, format)?;
            w!(ctxt, "{} names written to {}\n", table.len(), cache.path().display());
            ctxt.flush()
        }
        RunMode::Dump => {
            let formatter = Formatter::new(Arc::new(cache.load()?), options);
            dump_files(ctxt, &formatter, &options.files, options.position, options.stop_at_eol)
        }
        RunMode::Count => {
            let formatter = Formatter::new(Arc::new(cache.load()?), options);
            let counter = count_files(&options.files, options.position, options.stop_at_eol)?;
            for line in counter.lines(&formatter) {
                w!(ctxt, "{}\n", line);
            }
            ctxt.flush()
        }
    }
}
