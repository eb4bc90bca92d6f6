//! Command-line parsing.

use std::path::PathBuf;

use getopts::Options;

use crate::cache::UcdCache;
use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::options::{Escape, RunMode, RunOptions};
use crate::reader::Position;
use crate::source::SourceFormat;
use crate::usv::UsvWidth;

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help(String),
    Version(String),
    Run(RunOptions),
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optflag("", "count", "count characters instead of just listing them");
    opts.optflag("", "ucd", "rebuild the Unicode character database cache from FILE...");
    opts.optflag("", "nameslist", "with --ucd, read NamesList.txt files instead of UnicodeData.txt");
    opts.optopt("", "encoding", "the encoding to display octets in (default utf-8)", "NAME");
    opts.optflag("o", "octets", "also display the bytes stored for each character");
    opts.optflag("e", "escape", "output escaped text for use in test markup");
    opts.optflag("p", "python", "output escaped text for use in a string literal");
    opts.optflag("w", "wide", "pad supplementary-plane USVs to six digits");
    opts.optopt("l", "line", "line number to start reading from", "N");
    opts.optopt("c", "column", "column number to start reading from", "N");
    opts.optflag("", "eol", "read only to the end of the start line");
    opts.optopt("", "cache", "location of the UCD cache", "PATH");
    opts.optflag("", "debug", "display extra messages when reading a file");
    opts.optflag("h", "help", "print this message");
    opts.optflag("", "version", "print the version");
    opts
}

pub fn usage() -> String {
    options().usage("Usage: unidump [options] FILE...\n\nShow the USV values of the characters in files")
}

fn number(matches: &getopts::Matches, name: &str) -> Result<i64> {
    match matches.opt_str(name) {
        None => Ok(1),
        Some(s) => s
            .trim()
            .parse()
            .map_err(|_| Error::Usage(format!("--{} expects a number, not `{}`", name, s))),
    }
}

/// Resolve the arguments (without the program name) into a [`Command`].
pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command> {
    let opts = options();
    let matches = opts
        .parse(args.iter().map(|s| s.as_ref()))
        .map_err(|f| Error::Usage(f.to_string()))?;

    if matches.opt_present("help") {
        return Ok(Command::Help(usage()));
    }
    if matches.opt_present("version") {
        return Ok(Command::Version(format!("unidump {}", env!("CARGO_PKG_VERSION"))));
    }

    let mode = match (matches.opt_present("ucd"), matches.opt_present("count")) {
        (true, true) => return Err(Error::Usage("--ucd and --count cannot be combined".to_string())),
        (true, false) if matches.opt_present("nameslist") => RunMode::RebuildCache(SourceFormat::NamesList),
        (true, false) => RunMode::RebuildCache(SourceFormat::UnicodeData),
        (false, _) if matches.opt_present("nameslist") => {
            return Err(Error::Usage("--nameslist only applies with --ucd".to_string()))
        }
        (false, true) => RunMode::Count,
        (false, false) => RunMode::Dump,
    };

    let escape = match (matches.opt_present("python"), matches.opt_present("escape")) {
        (true, true) => return Err(Error::Usage("--python and --escape cannot be combined".to_string())),
        (true, false) => Escape::SourceLiteral,
        (false, true) => Escape::Markup,
        (false, false) => Escape::None,
    };

    let cache_path = match matches.opt_str("cache") {
        Some(path) => PathBuf::from(path),
        None => UcdCache::default_path()
            .ok_or_else(|| Error::Usage("no configuration directory, pass --cache PATH".to_string()))?,
    };

    if matches.free.is_empty() {
        return Err(Error::Usage("no FILE given".to_string()));
    }

    let mut options = RunOptions::new(mode, cache_path);
    options.encoding = match matches.opt_str("encoding") {
        Some(name) => name.parse()?,
        None => Encoding::Utf8,
    };
    options.show_octets = matches.opt_present("octets");
    options.escape = escape;
    options.usv_width = if matches.opt_present("wide") {
        UsvWidth::Wide
    } else {
        UsvWidth::Minimal
    };
    options.debug = matches.opt_present("debug");
    options.position = Position::new(number(&matches, "line")?, number(&matches, "column")?)?;
    options.stop_at_eol = matches.opt_present("eol");
    options.files = matches.free.iter().map(PathBuf::from).collect();
    Ok(Command::Run(options))
}
