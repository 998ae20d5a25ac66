//! FASTQ input: only the sequence line of each record participates in
//! assembly; headers and quality strings are discarded.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fastq;

use crate::errors::AssemblyError;

/// Read every sequence from a FASTQ file, in file order. Gzip compression is
/// detected from the file name.
pub fn read_sequences(path: impl AsRef<Path>) -> Result<Vec<String>, AssemblyError> {
    let path = path.as_ref();
    let is_gzipped = path
        .file_name()
        .map(|v| v.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false);

    let file = File::open(path).map_err(|source| AssemblyError::FileReadError { source })?;
    let reader: Box<dyn BufRead> = if is_gzipped {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    read_sequences_from(reader)
}

/// Read every sequence from an open FASTQ stream, in record order.
pub fn read_sequences_from<R: BufRead>(reader: R) -> Result<Vec<String>, AssemblyError> {
    let mut fastq_reader = fastq::io::Reader::new(reader);

    let mut sequences = Vec::new();
    for result in fastq_reader.records() {
        let record = result?;
        sequences.push(String::from_utf8_lossy(record.sequence()).into_owned());
    }

    Ok(sequences)
}
