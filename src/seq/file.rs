// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{fmt, path::Path};

use clap::ValueEnum;

use crate::errors::SwapError;
use crate::seq::clustal::{read_clustal_file, write_clustal_file};
use crate::seq::fasta::{read_fasta_file, write_fasta_file};
use crate::seq::record::SeqRecord;
use crate::seq::stockholm::{read_stockholm_file, write_stockholm_file};

// For our purposes, a sequence file is just a Vec of sequence records.
//

pub type SeqFile = Vec<SeqRecord>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SeqFileFormat {
    #[clap(name = "fasta")]
    #[clap(alias = "f")]
    FastA,
    #[clap(name = "clustal")]
    #[clap(alias = "c")]
    Clustal,
    #[clap(name = "stockholm")]
    #[clap(alias = "s")]
    Stockholm,
}

impl SeqFileFormat {
    /// Guesses the format from the file extension (case-insensitive). Files with any other
    /// extension are not alignments as far as we are concerned.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<SeqFileFormat> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "fa" | "fas" | "fasta" | "fna" | "faa" | "ffn" | "msa" => Some(SeqFileFormat::FastA),
            "aln" | "clustal" => Some(SeqFileFormat::Clustal),
            "sto" | "sth" | "stk" => Some(SeqFileFormat::Stockholm),
            _ => None,
        }
    }
}

impl fmt::Display for SeqFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeqFileFormat::FastA => "fasta",
            SeqFileFormat::Clustal => "clustal",
            SeqFileFormat::Stockholm => "stockholm",
        };
        write!(f, "{}", s)
    }
}

pub fn read_seq_file<P: AsRef<Path>>(
    path: P,
    format: SeqFileFormat,
) -> Result<SeqFile, SwapError> {
    match format {
        SeqFileFormat::FastA => read_fasta_file(path),
        SeqFileFormat::Clustal => read_clustal_file(path),
        SeqFileFormat::Stockholm => read_stockholm_file(path),
    }
}

// `wrap` only applies to FastA; the other two formats have fixed layouts.
pub fn write_seq_file<P: AsRef<Path>>(
    path: P,
    records: &[SeqRecord],
    format: SeqFileFormat,
    wrap: Option<usize>,
) -> Result<(), SwapError> {
    match format {
        SeqFileFormat::FastA => write_fasta_file(path, records, wrap),
        SeqFileFormat::Clustal => write_clustal_file(path, records),
        SeqFileFormat::Stockholm => write_stockholm_file(path, records),
    }
}
