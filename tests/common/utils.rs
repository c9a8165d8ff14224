// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{fs, path::PathBuf};

use otuswap::{
    config::{ReassignmentPolicy, SwapConfig},
    runner::RunOptions,
};

#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("otuswap-it-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("creating scratch dir");
    dir
}

#[allow(dead_code)]
pub fn copy_fixture(fixture: &str, dir: &PathBuf) -> PathBuf {
    let src = PathBuf::from("tests/data").join(fixture);
    let dst = dir.join(fixture);
    fs::copy(&src, &dst).expect("copying fixture");
    dst
}

#[allow(dead_code)]
pub fn options(input_dir: &PathBuf, receivers: &[&str], policy: ReassignmentPolicy) -> RunOptions {
    let mut swap = SwapConfig::new(receivers.iter().map(|s| String::from(*s)).collect(), policy);
    swap.likelihood = 0.0;
    RunOptions {
        input_dir: input_dir.clone(),
        output_dir: input_dir.join("swapped"),
        wrap: None,
        seed: Some(42),
        only_format: None,
        swap,
    }
}
