// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use log::{debug, warn};
use rand::{seq::SliceRandom, Rng};

use crate::alignment::{Alignment, Sequence};
use crate::config::{ReassignmentPolicy, SwapConfig};
use crate::errors::SwapError;
use crate::swap::select::{pick_otus_randomly, receivers_in_alignment};
use crate::swap::{Skip, SwapReport};

fn origin_tagged(identifier: &str, old_otu: &str) -> String {
    format!("{}_from_{}", identifier, old_otu)
}

/// Appends `seqs` to the alignment, each one attributed to a receiver chosen at random (with
/// repetition, so one receiver may end up with several). Residues are left as they are. Returns
/// the number of sequences added.
pub fn randomly_assign_seqs<R: Rng + ?Sized>(
    aln: &mut Alignment,
    seqs: Vec<Sequence>,
    receivers: &[String],
    tag_origin: bool,
    rng: &mut R,
) -> Result<usize, SwapError> {
    if receivers.is_empty() && !seqs.is_empty() {
        return Err(SwapError::Shortage {
            requested: 1,
            available: 0,
        });
    }
    let n = seqs.len();
    for mut seq in seqs {
        // receivers is non-empty here
        let Some(receiver) = receivers.choose(rng) else {
            break;
        };
        debug!(
            "{}: {}@{} -> {}",
            aln.filename.display(),
            seq.otu,
            seq.identifier,
            receiver
        );
        let identifier = if tag_origin {
            origin_tagged(&seq.identifier, &seq.otu)
        } else {
            seq.identifier.clone()
        };
        seq.identifier = aln.unique_identifier(receiver, &identifier);
        seq.otu = receiver.clone();
        aln.add_sequence(seq);
    }
    Ok(n)
}

/// Assign policy: picks `swap_count` random non-receiver OTUs, takes one random sequence out of
/// each and scatters those sequences over the receivers. Exactly `swap_count` sequences move;
/// everything else stays where it was.
pub fn swap_otus<R: Rng + ?Sized>(
    aln: &mut Alignment,
    config: &SwapConfig,
    rng: &mut R,
) -> SwapReport {
    let mut report = SwapReport::default();
    let ReassignmentPolicy::Assign { swap_count } = config.policy else {
        return report;
    };
    if swap_count == 0 || config.receivers.is_empty() {
        return report;
    }
    let donors = match pick_otus_randomly(aln, swap_count, &config.receivers, rng) {
        Ok(donors) => donors,
        Err(SwapError::Shortage {
            requested,
            available,
        }) => {
            report.skip(
                aln,
                Skip::NotEnoughOtus {
                    requested,
                    available,
                },
            );
            return report;
        }
        Err(e) => {
            warn!("{}: cannot pick donor OTUs: {}", aln.filename.display(), e);
            return report;
        }
    };

    let mut picked: Vec<usize> = Vec::with_capacity(donors.len());
    for donor in &donors {
        let positions: Vec<usize> = aln
            .sequences
            .iter()
            .enumerate()
            .filter(|(_, s)| &s.otu == donor)
            .map(|(i, _)| i)
            .collect();
        if let Some(pos) = positions.choose(rng) {
            picked.push(*pos);
        }
    }
    // Remove back to front so the remaining positions stay valid; keep alignment order.
    picked.sort_unstable();
    let mut seqs: Vec<Sequence> = picked
        .iter()
        .rev()
        .map(|pos| aln.sequences.remove(*pos))
        .collect();
    seqs.reverse();

    match randomly_assign_seqs(aln, seqs, &config.receivers, config.tag_origin, rng) {
        Ok(n) => report.swapped = n,
        // receivers were checked above
        Err(e) => warn!("{}: cannot assign sequences: {}", aln.filename.display(), e),
    }
    report
}

/// Overwrites every sequence of every receiver present in the alignment with a copy of a
/// sequence from a randomly chosen donor (non-receiver) OTU. Receivers keep their sequence
/// count and position; donors are left untouched. Copies of the same donor sequence get
/// distinct identifiers.
pub fn replace_receiver_seqs<R: Rng + ?Sized>(
    aln: &mut Alignment,
    config: &SwapConfig,
    rng: &mut R,
) -> SwapReport {
    let mut report = SwapReport::default();
    let donor_otus: Vec<String> = aln
        .otus()
        .into_iter()
        .filter(|otu| !config.is_receiver(otu))
        .collect();

    for (receiver, count) in receivers_in_alignment(aln, &config.receivers) {
        if count == 0 {
            report.skip(aln, Skip::ReceiverAbsent(receiver));
            continue;
        }
        if donor_otus.is_empty() {
            report.skip(aln, Skip::NoDonor(receiver));
            continue;
        }
        let positions: Vec<usize> = aln
            .sequences
            .iter()
            .enumerate()
            .filter(|(_, s)| s.otu == receiver)
            .map(|(i, _)| i)
            .collect();
        for pos in positions {
            let Some(donor_otu) = donor_otus.choose(rng) else {
                break;
            };
            let candidates: Vec<&Sequence> = aln
                .sequences
                .iter()
                .filter(|s| &s.otu == donor_otu)
                .collect();
            let Some(donor) = candidates.choose(rng) else {
                continue;
            };
            let base = if config.tag_origin {
                origin_tagged(&donor.identifier, &donor.otu)
            } else {
                donor.identifier.clone()
            };
            let replacement = Sequence {
                otu: receiver.clone(),
                identifier: aln.unique_identifier(&receiver, &base),
                residues: donor.residues.clone(),
            };
            debug!(
                "{}: {}@{} replaced by copy of {}@{}",
                aln.filename.display(),
                receiver,
                aln.sequences[pos].identifier,
                donor.otu,
                donor.identifier
            );
            aln.sequences[pos] = replacement;
            report.swapped += 1;
        }
    }
    report
}
