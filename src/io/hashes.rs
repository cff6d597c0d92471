// src/io/hashes.rs
//! Writers for hash arrays.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

/// Output encodings for a hash array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashFormat {
    /// One zero-padded hex hash per line
    #[default]
    Hex,
    /// `id<TAB>index<TAB>hash` per line
    Tsv,
    /// Little-endian u64 words, no framing
    Binary,
}

impl FromStr for HashFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(HashFormat::Hex),
            "tsv" => Ok(HashFormat::Tsv),
            "bin" | "binary" => Ok(HashFormat::Binary),
            other => Err(format!("unsupported hash format '{}'", other)),
        }
    }
}

impl fmt::Display for HashFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashFormat::Hex => f.write_str("hex"),
            HashFormat::Tsv => f.write_str("tsv"),
            HashFormat::Binary => f.write_str("binary"),
        }
    }
}

pub struct HashWriter<W: Write> {
    inner: W,
    format: HashFormat,
}

impl HashWriter<BufWriter<File>> {
    pub fn create(path: &str, format: HashFormat) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?), format))
    }
}

impl<W: Write> HashWriter<W> {
    pub fn new(inner: W, format: HashFormat) -> Self {
        Self { inner, format }
    }

    /// Write the hash array of one record.
    pub fn write_record(&mut self, id: &str, hashes: &[u64]) -> io::Result<()> {
        match self.format {
            HashFormat::Hex => {
                for hash in hashes {
                    writeln!(self.inner, "{:016x}", hash)?;
                }
            }
            HashFormat::Tsv => {
                for (i, hash) in hashes.iter().enumerate() {
                    writeln!(self.inner, "{}\t{}\t{:016x}", id, i, hash)?;
                }
            }
            HashFormat::Binary => {
                for hash in hashes {
                    self.inner.write_all(&hash.to_le_bytes())?;
                }
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
