//! The on-disk UCD cache.
//!
//! The cache is a gzip-compressed bincode serialization of a [`UcdTable`].
//! It carries no version: rebuild it whenever the name source changes.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use bincode::Options;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Error, Result};
use crate::source::SourceFormat;
use crate::synth;
use crate::table::UcdTable;

static CACHE_DIR: &str = "unidump";
static CACHE_FILE: &str = "ucd.bin.gz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UcdCache {
    path: PathBuf,
}

impl UcdCache {
    pub fn new<P: Into<PathBuf>>(path: P) -> UcdCache {
        UcdCache { path: path.into() }
    }

    /// `<config dir>/unidump/ucd.bin.gz`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CACHE_DIR).join(CACHE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Synthesize a table from `sources` and store it, returning the table.
    pub fn build<P: AsRef<Path>>(&self, sources: &[P], format: SourceFormat) -> Result<UcdTable> {
        let table = synth::synthesize(sources, format)?;
        self.store(&table)?;
        Ok(table)
    }

    /// Write `table` to the cache, replacing any previous contents.
    ///
    /// The data goes to a sibling temporary file that is renamed over the
    /// cache once complete, so a concurrent [`load`](UcdCache::load) sees
    /// either the old table or the new one.
    pub fn store(&self, table: &UcdTable) -> Result<()> {
        let unwritable = |source| Error::CacheUnwritable {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(unwritable)?;
        }
        let tmp = self.path.with_extension(format!("tmp.{}", process::id()));
        let written = write_table(&tmp, table).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(unwritable(e));
        }

        info!("stored {} names in {}", table.len(), self.path.display());
        Ok(())
    }

    /// Read the table back.
    ///
    /// The whole stream is decompressed first so the gzip trailer is
    /// checked, then decoded from memory: the payload must be exactly one
    /// table, and no length prefix may claim more bytes than are present.
    pub fn load(&self) -> Result<UcdTable> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::CacheMissing {
                    path: self.path.clone(),
                })
            }
            Err(source) => {
                return Err(Error::CacheUnreadable {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut payload = vec![];
        GzDecoder::new(BufReader::new(file))
            .read_to_end(&mut payload)
            .map_err(|e| self.corrupt(Box::new(bincode::ErrorKind::Io(e))))?;
        let table: UcdTable = bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_limit(payload.len() as u64)
            .reject_trailing_bytes()
            .deserialize(&payload)
            .map_err(|e| self.corrupt(e))?;
        info!("loaded {} names from {}", table.len(), self.path.display());
        Ok(table)
    }

    fn corrupt(&self, source: bincode::Error) -> Error {
        Error::CacheCorrupt {
            path: self.path.clone(),
            source,
        }
    }
}

fn write_table(path: &Path, table: &UcdTable) -> io::Result<()> {
    let out = File::create(path)?;
    let mut out = GzEncoder::new(BufWriter::new(out), Compression::default());
    bincode::serialize_into(&mut out, table).map_err(|e| match *e {
        bincode::ErrorKind::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    })?;
    let mut out = out.finish()?;
    out.flush()?;
    out.get_ref().sync_all()
}
