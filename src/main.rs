// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::process::ExitCode;

fn main() -> ExitCode {
    match otuswap::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("otuswap: {}", e);
            ExitCode::FAILURE
        }
    }
}
