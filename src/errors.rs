// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{fmt, io};

#[derive(Debug)]
pub enum SwapError {
    Io(io::Error),
    Format(String),
    // Bad command line or config file; fatal, reported before any file is touched.
    Config(String),
    // Not enough OTUs in one alignment to satisfy a request; recoverable per alignment.
    Shortage { requested: usize, available: usize },
    // Number of input files that could not be read or written.
    Batch { failed: usize },
}

// These allow conversion to SwapError, required for main() to return Result<()> and for '?' to
// work.

impl From<io::Error> for SwapError {
    fn from(e: io::Error) -> Self {
        SwapError::Io(e)
    }
}

impl From<String> for SwapError {
    fn from(s: String) -> Self {
        SwapError::Format(s)
    }
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapError::Io(e) => write!(f, "I/O error: {}", e),
            SwapError::Format(msg) => write!(f, "Format error: {}", msg),
            SwapError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SwapError::Shortage {
                requested,
                available,
            } => write!(
                f,
                "Not enough OTUs: {} requested, {} available",
                requested, available
            ),
            SwapError::Batch { failed } => write!(
                f,
                "{} file{} could not be processed",
                failed,
                if *failed == 1 { "" } else { "s" }
            ),
        }
    }
}

impl std::error::Error for SwapError {}
