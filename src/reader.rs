//! Positional character reading.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::vec;

use crate::error::{Error, Result};

/// A 1-based line and column (in characters) to start reading from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    line: usize,
    column: usize,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };

    pub fn new(line: i64, column: i64) -> Result<Position> {
        if line < 1 || column < 1 {
            return Err(Error::InvalidPosition { line, column });
        }
        Ok(Position {
            line: line as usize,
            column: column as usize,
        })
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::START
    }
}

/// One character read from a file, with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub ch: char,
    pub file: Arc<Path>,
    pub line: usize,
    pub column: usize,
}

/// A lazy sequence of the characters of one file, from a [`Position`] on.
///
/// Lines end after `\n`, so both LF and CRLF terminators are yielded as
/// part of their line. Columns count characters and restart at 1 on every
/// line. The `column - 1` characters skipped before the first yield are
/// counted from the start of the start line, running on into the following
/// lines when the start line is shorter. With `stop_at_eol` the sequence
/// ends after the start line.
pub struct CharReader<R> {
    input: R,
    file: Arc<Path>,
    start: Position,
    stop_at_eol: bool,
    line_no: usize,
    buf: String,
    chars: vec::IntoIter<char>,
    column: usize,
    skip: usize,
    done: bool,
}

impl CharReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, start: Position, stop_at_eol: bool) -> Result<CharReader<BufReader<File>>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::InputUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(CharReader::new(BufReader::new(file), path, start, stop_at_eol))
    }
}

impl<R: BufRead> CharReader<R> {
    /// Read from `input`, reporting occurrences as coming from `path`.
    pub fn new<P: Into<PathBuf>>(input: R, path: P, start: Position, stop_at_eol: bool) -> CharReader<R> {
        let path: PathBuf = path.into();
        CharReader {
            input,
            file: Arc::from(path),
            start,
            stop_at_eol,
            line_no: 0,
            buf: String::new(),
            chars: Vec::new().into_iter(),
            column: 0,
            skip: start.column - 1,
            done: false,
        }
    }

    /// Load the next line at or past the start line; `false` at the end.
    fn next_line(&mut self) -> io::Result<bool> {
        loop {
            if self.done {
                return Ok(false);
            }
            if self.stop_at_eol && self.line_no >= self.start.line {
                self.done = true;
                return Ok(false);
            }

            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                self.done = true;
                return Ok(false);
            }
            self.line_no += 1;
            debug!("reading line {} of {}", self.line_no, self.file.display());
            if self.line_no < self.start.line {
                continue;
            }

            let chars: Vec<char> = self.buf.chars().collect();
            let skip = self.skip.min(chars.len());
            self.skip -= skip;
            self.column = skip;
            let mut chars = chars.into_iter();
            if skip > 0 {
                chars.nth(skip - 1);
            }
            self.chars = chars;
            return Ok(true);
        }
    }
}

impl<R: BufRead> Iterator for CharReader<R> {
    type Item = Result<Occurrence>;

    fn next(&mut self) -> Option<Result<Occurrence>> {
        loop {
            if let Some(ch) = self.chars.next() {
                self.column += 1;
                return Some(Ok(Occurrence {
                    ch,
                    file: self.file.clone(),
                    line: self.line_no,
                    column: self.column,
                }));
            }
            match self.next_line() {
                Ok(true) => continue,
                Ok(false) => return None,
                Err(source) => {
                    self.done = true;
                    return Some(Err(Error::InputUnreadable {
                        path: self.file.to_path_buf(),
                        source,
                    }));
                }
            }
        }
    }
}
