use seqrec_core::{RecordInfo, Sequence};

use crate::ParseError;

/// Parse a FASTA file into zero or more Sequences.
///
/// `>` lines open a record; the rest of the header line, verbatim, becomes
/// the record's info. Body lines are concatenated verbatim (no stripping)
/// into the residues until the next boundary or end of input.
pub fn parse(input: &str) -> Result<Vec<Sequence>, ParseError> {
    let mut sequences = Vec::new();
    let mut current: Option<(String, String)> = None;

    for (idx, line) in input.lines().enumerate() {
        if let Some(header) = line.strip_prefix('>') {
            if let Some((description, residues)) = current.take() {
                sequences.push(Sequence::new(RecordInfo::Fasta { description }, residues));
            }
            current = Some((header.to_string(), String::new()));
        } else if let Some((_, residues)) = current.as_mut() {
            residues.push_str(line);
        } else if !line.trim().is_empty() {
            return Err(ParseError::Structural {
                line: idx + 1,
                state: "fasta",
                msg: "sequence data before first header".to_string(),
                content: line.to_string(),
            });
        }
    }

    if let Some((description, residues)) = current {
        sequences.push(Sequence::new(RecordInfo::Fasta { description }, residues));
    }

    Ok(sequences)
}
