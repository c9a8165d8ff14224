// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

pub mod clustal;
pub mod fasta;
pub mod file;
pub mod record;
pub mod stockholm;
