// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use itertools::Itertools;
use log::debug;
use rand::{
    seq::{index, SliceRandom},
    Rng,
};

use crate::alignment::{Alignment, Sequence};
use crate::config::SwapConfig;
use crate::swap::{Skip, SwapReport};

fn is_gap(c: char) -> bool {
    c == '-' || c == '.'
}

/// Copies `residues` and substitutes up to `max_substitutions` distinct, randomly chosen
/// non-gap positions. Each substituted position gets a different symbol taken from the
/// sequence's own residues. Gaps are never touched, so the copy has the same length and gap
/// pattern as the original. Returns the copy and the number of positions actually changed.
pub fn add_noise<R: Rng + ?Sized>(
    residues: &str,
    max_substitutions: usize,
    rng: &mut R,
) -> (String, usize) {
    let mut chars: Vec<char> = residues.chars().collect();
    let alphabet: Vec<char> = chars.iter().copied().filter(|c| !is_gap(*c)).unique().collect();
    let sites: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| !is_gap(**c))
        .map(|(i, _)| i)
        .collect();

    let wanted = rng.gen_range(0..=max_substitutions).min(sites.len());
    let mut substitutions = 0;
    for k in index::sample(rng, sites.len(), wanted).into_iter() {
        let pos = sites[k];
        let current = chars[pos];
        let choices: Vec<char> = alphabet.iter().copied().filter(|c| *c != current).collect();
        // A one-letter sequence has nothing to mutate into.
        if let Some(new) = choices.choose(rng) {
            chars[pos] = *new;
            substitutions += 1;
        }
    }
    (chars.into_iter().collect(), substitutions)
}

/// For each receiver present in the alignment, with probability `config.likelihood`, appends a
/// mutated copy of one of its sequences to some other OTU of the alignment. The receiver's own
/// sequences are left alone.
pub fn cross_contaminate<R: Rng + ?Sized>(
    aln: &mut Alignment,
    config: &SwapConfig,
    rng: &mut R,
) -> SwapReport {
    let mut report = SwapReport::default();
    if config.likelihood <= 0.0 {
        return report;
    }
    let p = config.likelihood.min(1.0);
    // Contaminants appended below must not serve as templates or targets for later receivers.
    let original: Vec<Sequence> = aln.sequences.clone();
    let otus: Vec<String> = original.iter().map(|s| s.otu.clone()).unique().collect();

    for receiver in &config.receivers {
        let templates: Vec<&Sequence> = original.iter().filter(|s| &s.otu == receiver).collect();
        if templates.is_empty() {
            report.skip(aln, Skip::ReceiverAbsent(receiver.clone()));
            continue;
        }
        if !rng.gen_bool(p) {
            continue;
        }
        let targets: Vec<&String> = otus.iter().filter(|o| *o != receiver).collect();
        let (Some(template), Some(target)) = (templates.choose(rng), targets.choose(rng)) else {
            report.skip(aln, Skip::NoTarget(receiver.clone()));
            continue;
        };
        let (residues, substitutions) =
            add_noise(&template.residues, config.max_substitutions, rng);
        let identifier = format!(
            "{}_contaminated_{}_{}_subs",
            template.identifier, receiver, substitutions
        );
        let contaminant = Sequence {
            otu: (*target).clone(),
            identifier: aln.unique_identifier(target, &identifier),
            residues,
        };
        debug!(
            "{}: {}@{} leaks into {} with {} substitution(s)",
            aln.filename.display(),
            receiver,
            template.identifier,
            target,
            substitutions
        );
        aln.add_sequence(contaminant);
        report.contaminated += 1;
    }
    report
}
