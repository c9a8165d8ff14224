// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

mod common;

use std::fs;

use crate::common::utils;

use otuswap::{
    config::ReassignmentPolicy,
    runner::{read_alignment, run_batch, write_alignment},
    seq::file::SeqFileFormat,
};

#[test]
fn test_fasta_read_write_keeps_content() {
    let dir = utils::scratch_dir("io-fasta");
    let input = utils::copy_fixture("wrapped.fas", &dir);
    let mut aln = read_alignment(&input, SeqFileFormat::FastA, '@').unwrap();
    assert_eq!(aln.sequences[0].otu, "Homo");
    assert_eq!(aln.sequences[0].identifier, "h1 some description");
    assert_eq!(aln.sequences[0].residues, "ACGTACGTACGTACGT");

    aln.set_filename(dir.join("out.fas"));
    write_alignment(&aln, Some(10), '@').unwrap();
    assert_eq!(
        fs::read_to_string(dir.join("out.fas")).unwrap(),
        fs::read_to_string(&input).unwrap()
    );

    write_alignment(&aln, None, '@').unwrap();
    let back = read_alignment(&dir.join("out.fas"), SeqFileFormat::FastA, '@').unwrap();
    assert_eq!(back.sequences, aln.sequences);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_stockholm_batch_keeps_format() {
    let dir = utils::scratch_dir("io-sto");
    let input = utils::copy_fixture("pfam.sto", &dir);
    let opts = utils::options(&dir, &["Nobody"], ReassignmentPolicy::Replace);
    run_batch(&opts).expect("batch");

    let before = read_alignment(&input, SeqFileFormat::Stockholm, '@').unwrap();
    let out = dir.join("swapped/pfam.sto");
    assert!(fs::read_to_string(&out).unwrap().starts_with("# STOCKHOLM 1.0"));
    let after = read_alignment(&out, SeqFileFormat::Stockholm, '@').unwrap();
    assert_eq!(after.sequences, before.sequences);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_replaced_paralogs_survive_clustal_and_stockholm() {
    // Two receiver paralogs, one donor sequence: both copies must come back as distinct rows.
    for (fixture, format) in [
        ("paralogs.aln", SeqFileFormat::Clustal),
        ("paralogs.sto", SeqFileFormat::Stockholm),
    ] {
        let dir = utils::scratch_dir(&format!("io-paralogs-{}", format));
        utils::copy_fixture(fixture, &dir);
        let opts = utils::options(&dir, &["R"], ReassignmentPolicy::Replace);
        let summary = run_batch(&opts).expect("batch");
        assert_eq!(summary.report.swapped, 2);

        let after = read_alignment(&dir.join("swapped").join(fixture), format, '@').unwrap();
        assert_eq!(after.num_seq(), 3);
        assert!(after.sequences.iter().all(|s| s.residues == "TTTT"));
        let headers: Vec<String> = after.sequences.iter().map(|s| s.header('@')).collect();
        assert_eq!(headers, vec!["R@a1", "R@a1_2", "A@a1"]);
        let _ = fs::remove_dir_all(&dir);
    }
}
