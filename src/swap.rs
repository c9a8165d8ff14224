// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// Engines that move sequences between OTUs of one alignment. None of them changes the length of
// any sequence; they only change which OTU owns which residues.

pub mod contaminate;
pub mod reassign;
pub mod select;

use std::fmt;

use log::warn;
use rand::Rng;

use crate::alignment::Alignment;
use crate::config::{ReassignmentPolicy, SwapConfig};

/// An operation that was not carried out on the current alignment, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// The receiver has no sequence in this alignment.
    ReceiverAbsent(String),
    /// Every OTU in the alignment is a receiver, so there is nothing to copy from.
    NoDonor(String),
    /// The receiver is the only OTU, so its sequence cannot leak anywhere.
    NoTarget(String),
    NotEnoughOtus { requested: usize, available: usize },
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::ReceiverAbsent(otu) => write!(f, "receiver {} is absent", otu),
            Skip::NoDonor(otu) => write!(f, "no donor OTU for receiver {}", otu),
            Skip::NoTarget(otu) => write!(f, "no OTU other than {} to contaminate", otu),
            Skip::NotEnoughOtus {
                requested,
                available,
            } => write!(
                f,
                "{} OTUs requested but only {} non-receiver OTUs available",
                requested, available
            ),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SwapReport {
    // Sequences moved onto (or copied over) receivers.
    pub swapped: usize,
    // Mutated copies appended by cross-contamination.
    pub contaminated: usize,
    pub skipped: Vec<Skip>,
}

impl SwapReport {
    pub fn skip(&mut self, aln: &Alignment, reason: Skip) {
        warn!("{}: skipping, {}", aln.filename.display(), reason);
        self.skipped.push(reason);
    }

    pub fn merge(&mut self, other: SwapReport) {
        self.swapped += other.swapped;
        self.contaminated += other.contaminated;
        self.skipped.extend(other.skipped);
    }
}

/// Runs the configured reassignment policy, then cross-contamination.
pub fn apply<R: Rng + ?Sized>(
    aln: &mut Alignment,
    config: &SwapConfig,
    rng: &mut R,
) -> SwapReport {
    let mut report = match config.policy {
        ReassignmentPolicy::Assign { .. } => reassign::swap_otus(aln, config, rng),
        ReassignmentPolicy::Replace => reassign::replace_receiver_seqs(aln, config, rng),
    };
    report.merge(contaminate::cross_contaminate(aln, config, rng));
    report
}
