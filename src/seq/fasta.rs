// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::SwapError;
use crate::seq::file::SeqFile;
use crate::seq::record::SeqRecord;

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, SwapError> {
    let file = File::open(path)?;
    let mut result: SeqFile = Vec::new();
    let mut current_record: Option<SeqRecord> = None;

    for line in BufReader::new(file).lines() {
        let l: String = line?;
        if let Some(hdr) = l.strip_prefix('>') {
            if let Some(rec) = current_record.take() {
                result.push(rec);
            }
            current_record = Some(SeqRecord {
                header: String::from(hdr.trim_end()),
                sequence: String::new(),
            });
        } else {
            let residues = l.trim();
            if residues.is_empty() {
                continue;
            }
            // append line to current record's sequence
            match current_record.as_mut() {
                Some(rec) => rec.sequence.push_str(residues),
                None => {
                    return Err(SwapError::Format(String::from(
                        "Sequence data before first FastA header",
                    )))
                }
            }
        }
    }
    if let Some(rec) = current_record {
        result.push(rec);
    }
    Ok(result)
}

/// Renders records as FastA. Sequence lines are wrapped at `wrap` columns; `None` (or 0) puts
/// each sequence on a single line.
pub fn fasta_string(records: &[SeqRecord], wrap: Option<usize>) -> String {
    let mut out = String::new();
    for rec in records {
        out.push('>');
        out.push_str(&rec.header);
        out.push('\n');
        match wrap {
            Some(width) if width > 0 => {
                let chars: Vec<char> = rec.sequence.chars().collect();
                for chunk in chars.chunks(width) {
                    out.extend(chunk.iter());
                    out.push('\n');
                }
            }
            _ => {
                out.push_str(&rec.sequence);
                out.push('\n');
            }
        }
    }
    out
}

pub fn write_fasta_file<P: AsRef<Path>>(
    path: P,
    records: &[SeqRecord],
    wrap: Option<usize>,
) -> Result<(), SwapError> {
    fs::write(path, fasta_string(records, wrap))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(header: &str, sequence: &str) -> SeqRecord {
        SeqRecord {
            header: String::from(header),
            sequence: String::from(sequence),
        }
    }

    #[test]
    fn test_read_fasta_file_1() {
        let path = "data/test1.fas";
        let fasta: SeqFile = read_fasta_file(path).expect("Test file not found");
        assert_eq!(fasta[0].header, "seq1");
        assert_eq!(fasta[0].sequence, "GAATTC");
    }

    #[test]
    fn test_read_fasta_file_2() {
        let path = "data/test2.fas";
        let fasta: SeqFile = read_fasta_file(path).expect("Test file not found");
        assert_eq!(fasta.len(), 3);
        assert_eq!(fasta[0].header, "Homo@seq1");
        assert_eq!(fasta[0].sequence, "TTGCCG-CGA");
        assert_eq!(fasta[1].header, "Pan@seq2");
        assert_eq!(fasta[1].sequence, "TTCCCGGCGA");
        assert_eq!(fasta[2].header, "Mus@seq3");
        assert_eq!(fasta[2].sequence, "TTACCG-CAA");
    }

    #[test]
    fn test_read_fasta_missing_file() {
        assert!(matches!(
            read_fasta_file("data/no-such-file.fas"),
            Err(SwapError::Io(_))
        ));
    }

    #[test]
    fn test_fasta_string_unwrapped() {
        let records = vec![rec("A@s1", "ACGTAC"), rec("B@s2", "AC-TAC")];
        insta::assert_snapshot!(fasta_string(&records, None), @r"
        >A@s1
        ACGTAC
        >B@s2
        AC-TAC
        ");
    }

    #[test]
    fn test_fasta_string_wrapped() {
        let records = vec![rec("A@s1", "ACGTACG")];
        insta::assert_snapshot!(fasta_string(&records, Some(3)), @r"
        >A@s1
        ACG
        TAC
        G
        ");
        // 0 means no wrapping
        assert_eq!(fasta_string(&records, Some(0)), ">A@s1\nACGTACG\n");
    }

    #[test]
    fn test_fasta_write_then_read() {
        let records = vec![rec("A@s1", "ACGTACGTAC"), rec("B@s2", "AC-TACG-AC")];
        let mut path = std::env::temp_dir();
        path.push(format!("otuswap-test-fasta-{}.fas", std::process::id()));
        write_fasta_file(&path, &records, Some(4)).unwrap();
        let back = read_fasta_file(&path).unwrap();
        assert_eq!(back, records);
        let _ = std::fs::remove_file(&path);
    }
}
