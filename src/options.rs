use std::path::PathBuf;

use crate::encoding::Encoding;
use crate::reader::Position;
use crate::source::SourceFormat;
use crate::usv::UsvWidth;

/// What one invocation does, resolved once from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// One line per character.
    Dump,
    /// Occurrence counts per distinct character.
    Count,
    /// Rebuild the UCD cache from name sources of the given format.
    RebuildCache(SourceFormat),
}

/// How characters are escaped instead of named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escape {
    #[default]
    None,
    /// `\uXXXX` / `\UXXXXXXXX`, for program source string literals.
    SourceLiteral,
    /// `\uXXXX[XX]`, for test markup documents.
    Markup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: RunMode,
    pub encoding: Encoding,
    pub show_octets: bool,
    pub escape: Escape,
    pub usv_width: UsvWidth,
    pub debug: bool,
    pub position: Position,
    pub stop_at_eol: bool,
    pub files: Vec<PathBuf>,
    pub cache_path: PathBuf,
}

impl RunOptions {
    pub fn new(mode: RunMode, cache_path: PathBuf) -> RunOptions {
        RunOptions {
            mode,
            encoding: Encoding::Utf8,
            show_octets: false,
            escape: Escape::None,
            usv_width: UsvWidth::Minimal,
            debug: false,
            position: Position::START,
            stop_at_eol: false,
            files: vec![],
            cache_path,
        }
    }
}
