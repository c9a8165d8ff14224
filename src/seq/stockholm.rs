// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::SwapError;
use crate::seq::file::SeqFile;
use crate::seq::record::SeqRecord;

pub fn read_stockholm_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, SwapError> {
    let file = File::open(path)?;
    let mut result: SeqFile = Vec::new();

    for line in BufReader::new(file).lines() {
        let l: String = line?;
        let Some(first_char) = l.chars().next() else {
            continue;
        };
        match first_char {
            // Taken as the '//' terminator.
            '/' => break,
            '#' => {} // Annotation -> ignore.
            _ => {
                let mut fields = l.split_whitespace();

                match (fields.next(), fields.next(), fields.next()) {
                    (Some(seqname), Some(aln_seq), None) => {
                        result.push(SeqRecord {
                            header: String::from(seqname),
                            sequence: String::from(aln_seq),
                        });
                    }
                    (None, _, _) => {} // blank line
                    _ => {
                        return Err(SwapError::Format(String::from(
                            "Expected exactly two fields",
                        )))
                    }
                }
            }
        }
    }

    Ok(result)
}

pub fn stockholm_string(records: &[SeqRecord]) -> String {
    let names: Vec<String> = records
        .iter()
        .map(|r| r.header.split_whitespace().collect::<Vec<_>>().join("_"))
        .collect();
    let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) + 1;
    let mut out = String::from("# STOCKHOLM 1.0\n");
    for (name, rec) in names.iter().zip(records) {
        out.push_str(&format!("{:<width$}{}\n", name, rec.sequence, width = name_width));
    }
    out.push_str("//\n");
    out
}

pub fn write_stockholm_file<P: AsRef<Path>>(
    path: P,
    records: &[SeqRecord],
) -> Result<(), SwapError> {
    fs::write(path, stockholm_string(records))?;
    Ok(())
}
