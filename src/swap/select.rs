// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use rand::{seq::SliceRandom, Rng};

use crate::alignment::{Alignment, Sequence};
use crate::errors::SwapError;

/// Picks `count` distinct OTUs of the alignment at random, never one of the `receivers`. Fails
/// with `SwapError::Shortage` if the alignment does not have that many non-receiver OTUs.
pub fn pick_otus_randomly<R: Rng + ?Sized>(
    aln: &Alignment,
    count: usize,
    receivers: &[String],
    rng: &mut R,
) -> Result<Vec<String>, SwapError> {
    let eligible: Vec<String> = aln
        .otus()
        .into_iter()
        .filter(|otu| !receivers.contains(otu))
        .collect();
    if eligible.len() < count {
        return Err(SwapError::Shortage {
            requested: count,
            available: eligible.len(),
        });
    }
    Ok(eligible.choose_multiple(rng, count).cloned().collect())
}

/// Copies of all sequences that belong to any of `otus`, in alignment order.
pub fn get_seqs_from_otus(aln: &Alignment, otus: &[String]) -> Vec<Sequence> {
    aln.sequences
        .iter()
        .filter(|s| otus.contains(&s.otu))
        .cloned()
        .collect()
}

/// Drops every sequence that belongs to any of `otus`. Returns how many were dropped.
pub fn remove_seqs_from_otu(aln: &mut Alignment, otus: &[String]) -> usize {
    let before = aln.sequences.len();
    aln.sequences.retain(|s| !otus.contains(&s.otu));
    before - aln.sequences.len()
}

/// Number of sequences each receiver has in the alignment (0 if absent), in receiver order.
pub fn receivers_in_alignment(aln: &Alignment, receivers: &[String]) -> Vec<(String, usize)> {
    receivers
        .iter()
        .map(|r| {
            let n = aln.sequences.iter().filter(|s| &s.otu == r).count();
            (r.clone(), n)
        })
        .collect()
}
