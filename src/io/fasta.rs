//! Contig output in FASTA format.

use std::io::Write;

use noodles::fasta::{self as fasta, record::{Definition, Sequence}, Record};

use crate::contig::Contig;
use crate::errors::AssemblyError;

/// Write one FASTA record per contig, in order.
///
/// Each header embeds the contig sequence and its length; sequence lines are
/// wrapped at the writer's default 80 columns.
pub fn write_contigs<W: Write>(contigs: &[Contig], output: W) -> Result<(), AssemblyError> {
    let mut writer = fasta::io::Writer::new(output);

    for contig in contigs {
        let definition = Definition::new(
            format!("contig_{} len={}", contig.sequence, contig.len()),
            None,
        );
        let sequence = Sequence::from(contig.sequence.clone().into_bytes());
        let record = Record::new(definition, sequence);

        writer.write_record(&record)?;
    }

    Ok(())
}
