//! Show the Unicode Scalar Value and name of every character in a file.
//!
//! Names come from a [`UcdTable`] synthesized once from the Unicode
//! character database (`UnicodeData.txt` or `NamesList.txt`) and kept in a
//! compressed [`UcdCache`]. Ranges the database leaves implicit (CJK
//! ideograph extensions, surrogate halves, `<..., First>`/`<..., Last>`
//! pairs) are expanded so that every such codepoint has its own entry.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use unidump::{CharReader, Formatter, Position, RunMode, RunOptions, UcdCache};
//!
//! # fn main() -> unidump::Result<()> {
//! let options = RunOptions::new(RunMode::Dump, "ucd.bin.gz".into());
//! let table = UcdCache::new(&options.cache_path).load()?;
//! let formatter = Formatter::new(Arc::new(table), &options);
//!
//! for o in CharReader::open("position.txt", Position::new(4, 6)?, false)? {
//!     println!("{}", formatter.format(o?.ch)); // U+0058 LATIN CAPITAL LETTER X
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Characters can also be escaped instead of named, for string literals
//! ([`format::source_literal`]) or test markup ([`format::markup`]), and
//! counted with a [`FrequencyCounter`].

#[macro_use]
extern crate log;

pub mod cache;
pub mod cli;
pub mod count;
pub mod encoding;
pub mod error;
pub mod format;
pub mod options;
pub mod reader;
pub mod run;
pub mod source;
pub mod synth;
pub mod table;
pub mod usv;

pub use crate::cache::UcdCache;
pub use crate::count::FrequencyCounter;
pub use crate::encoding::Encoding;
pub use crate::error::{Error, Result};
pub use crate::format::Formatter;
pub use crate::options::{Escape, RunMode, RunOptions};
pub use crate::reader::{CharReader, Occurrence, Position};
pub use crate::source::{NameRecord, NameSource, SourceFormat};
pub use crate::synth::Synthesizer;
pub use crate::table::UcdTable;
pub use crate::usv::UsvWidth;
