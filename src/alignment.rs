// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::seq::file::{SeqFile, SeqFileFormat};
use crate::seq::record::SeqRecord;

pub const DEFAULT_OTU_SEPARATOR: char = '@';

/// One aligned sequence, attributed to an OTU. The header it was read from is
/// `<otu><separator><identifier>`; a header without the separator names the OTU on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub otu: String,
    pub identifier: String,
    pub residues: String,
}

impl Sequence {
    pub fn new(otu: &str, identifier: &str, residues: &str) -> Self {
        Sequence {
            otu: String::from(otu),
            identifier: String::from(identifier),
            residues: String::from(residues),
        }
    }

    pub fn from_header(header: &str, residues: String, sep: char) -> Self {
        match header.split_once(sep) {
            Some((otu, identifier)) => Sequence {
                otu: String::from(otu),
                identifier: String::from(identifier),
                residues,
            },
            None => Sequence {
                otu: String::from(header),
                identifier: String::from(header),
                residues,
            },
        }
    }

    pub fn header(&self, sep: char) -> String {
        if self.otu == self.identifier {
            self.otu.clone()
        } else {
            format!("{}{}{}", self.otu, sep, self.identifier)
        }
    }
}

pub struct Alignment {
    pub filename: PathBuf,
    pub format: SeqFileFormat,
    pub sequences: Vec<Sequence>,
}

impl Alignment {
    pub fn new(filename: &Path, format: SeqFileFormat, sequences: Vec<Sequence>) -> Self {
        Alignment {
            filename: filename.to_path_buf(),
            format,
            sequences,
        }
    }

    pub fn from_file(
        filename: &Path,
        format: SeqFileFormat,
        seq_file: SeqFile,
        sep: char,
    ) -> Self {
        let sequences = seq_file
            .into_iter()
            .map(|rec| Sequence::from_header(&rec.header, rec.sequence, sep))
            .collect();
        Alignment::new(filename, format, sequences)
    }

    // Mostly for tests: builds an in-memory FastA alignment from (otu, residues) pairs, numbering
    // the identifiers.
    pub fn from_vecs(otus: Vec<&str>, residues: Vec<&str>) -> Self {
        let sequences = otus
            .iter()
            .zip(residues.iter())
            .enumerate()
            .map(|(i, (otu, res))| Sequence::new(otu, &format!("seq{}", i + 1), res))
            .collect();
        Alignment::new(Path::new("TEST"), SeqFileFormat::FastA, sequences)
    }

    pub fn to_file(&self, sep: char) -> SeqFile {
        self.sequences
            .iter()
            .map(|s| SeqRecord {
                header: s.header(sep),
                sequence: s.residues.clone(),
            })
            .collect()
    }

    pub fn num_seq(&self) -> usize {
        self.sequences.len()
    }

    pub fn aln_len(&self) -> usize {
        self.sequences
            .iter()
            .map(|s| s.residues.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn is_aligned(&self) -> bool {
        self.sequences
            .iter()
            .map(|s| s.residues.chars().count())
            .all_equal()
    }

    /// Distinct OTUs, in order of first appearance.
    pub fn otus(&self) -> Vec<String> {
        self.sequences
            .iter()
            .map(|s| s.otu.clone())
            .unique()
            .collect()
    }

    /// Number of sequences per OTU, in order of first appearance.
    pub fn otu_counts(&self) -> Vec<(String, usize)> {
        let counts = self.sequences.iter().counts_by(|s| s.otu.as_str());
        self.otus()
            .into_iter()
            .map(|otu| {
                let n = counts.get(otu.as_str()).copied().unwrap_or(0);
                (otu, n)
            })
            .collect()
    }

    pub fn has_otu(&self, otu: &str) -> bool {
        self.sequences.iter().any(|s| s.otu == otu)
    }

    pub fn add_sequence(&mut self, seq: Sequence) {
        self.sequences.push(seq);
    }

    pub fn set_filename(&mut self, filename: PathBuf) {
        self.filename = filename;
    }

    /// `base`, or `base` suffixed with `_2`, `_3`, ... if `otu` already has a sequence called
    /// that, so that headers stay unique.
    pub fn unique_identifier(&self, otu: &str, base: &str) -> String {
        let taken = |id: &str| {
            self.sequences
                .iter()
                .any(|s| s.otu == otu && s.identifier == id)
        };
        let mut candidate = String::from(base);
        let mut n = 1;
        while taken(&candidate) {
            n += 1;
            candidate = format!("{}_{}", base, n);
        }
        candidate
    }
}
