// src/io/fasta.rs
use std::fs::File;
use std::io::{BufRead, BufReader, Result};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::kmer::PackedSequence;

/// One named nucleotide sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub bases: Vec<u8>,
}

impl SequenceRecord {
    pub fn pack(&self) -> PackedSequence {
        PackedSequence::from_bases(&self.bases)
    }
}

/// Open a FASTA file for reading, handles gzipped files automatically
pub fn open_fasta<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read all records. Multi-line sequences are joined and whitespace dropped.
///
/// Input that does not start with a `>` header is read as one raw sequence
/// with id `sequence`.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<SequenceRecord>> {
    let mut records = Vec::new();
    let mut current: Option<SequenceRecord> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if let Some(header) = line.strip_prefix('>') {
            if let Some(done) = current.take() {
                records.push(done);
            }
            let id = header.split_whitespace().next().unwrap_or("").to_string();
            current = Some(SequenceRecord { id, bases: Vec::new() });
        } else if !line.is_empty() {
            let record = current.get_or_insert_with(|| SequenceRecord {
                id: "sequence".to_string(),
                bases: Vec::new(),
            });
            record
                .bases
                .extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
        }
    }

    if let Some(done) = current {
        records.push(done);
    }
    Ok(records)
}

pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>> {
    read_records(open_fasta(path)?)
}
