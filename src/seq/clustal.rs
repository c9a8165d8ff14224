// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::SwapError;
use crate::seq::file::SeqFile;
use crate::seq::record::SeqRecord;

const BLOCK_WIDTH: usize = 60;

pub fn read_clustal_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, SwapError> {
    let file = File::open(path)?;
    let mut order: Vec<String> = Vec::new();
    let mut sequences: HashMap<String, String> = HashMap::new();

    for line in BufReader::new(file).lines() {
        let l = line?;
        let trimmed = l.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("CLUSTAL") || trimmed.starts_with("MUSCLE") {
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }
        // Conservation lines start with blanks.
        if trimmed
            .chars()
            .next()
            .map(|c| c.is_whitespace())
            .unwrap_or(false)
        {
            continue;
        }
        let mut fields = trimmed.split_whitespace();
        let name = fields
            .next()
            .ok_or_else(|| SwapError::Format(String::from("Missing sequence id")))?;
        let fragment = fields
            .next()
            .ok_or_else(|| SwapError::Format(String::from("Missing sequence fragment")))?;
        let entry = sequences.entry(name.to_string()).or_insert_with(|| {
            order.push(name.to_string());
            String::new()
        });
        entry.push_str(fragment);
    }

    if order.is_empty() {
        return Err(SwapError::Format(String::from("No sequences found")));
    }

    let mut result: SeqFile = Vec::new();
    for name in order {
        let sequence = sequences.remove(&name).unwrap_or_default();
        result.push(SeqRecord {
            header: name,
            sequence,
        });
    }

    Ok(result)
}

// Clustal names cannot contain blanks.
fn clustal_name(header: &str) -> String {
    header.split_whitespace().collect::<Vec<_>>().join("_")
}

pub fn clustal_string(records: &[SeqRecord]) -> String {
    let names: Vec<String> = records.iter().map(|r| clustal_name(&r.header)).collect();
    let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) + 6;
    let columns: Vec<Vec<char>> = records.iter().map(|r| r.sequence.chars().collect()).collect();
    let aln_len = columns.iter().map(|c| c.len()).max().unwrap_or(0);

    let mut out = String::from("CLUSTAL W multiple sequence alignment\n\n");
    let mut start = 0;
    while start < aln_len {
        let end = (start + BLOCK_WIDTH).min(aln_len);
        for (name, residues) in names.iter().zip(columns.iter()) {
            if start >= residues.len() {
                continue;
            }
            let block: String = residues[start..end.min(residues.len())].iter().collect();
            out.push_str(&format!("{:<width$}{}\n", name, block, width = name_width));
        }
        out.push('\n');
        start = end;
    }
    out
}

pub fn write_clustal_file<P: AsRef<Path>>(
    path: P,
    records: &[SeqRecord],
) -> Result<(), SwapError> {
    fs::write(path, clustal_string(records))?;
    Ok(())
}
