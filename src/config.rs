// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{
    fmt,
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;

use crate::alignment::DEFAULT_OTU_SEPARATOR;
use crate::errors::SwapError;

pub const DEFAULT_LIKELIHOOD: f64 = 0.1;
pub const DEFAULT_MAX_SUBSTITUTIONS: usize = 30;
pub const DEFAULT_OUTPUT_SUBDIR: &str = "swapped";
pub const CONFIG_FILE_NAME: &str = ".otuswapconfig";

/// How sequences are moved onto the receivers. Exactly one applies per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReassignmentPolicy {
    /// Pick `swap_count` random non-receiver OTUs, take one random sequence out of each and
    /// scatter those over the receivers. A count of 0 leaves the alignment alone.
    Assign { swap_count: usize },
    /// Overwrite each receiver sequence with a copy of some donor's sequence.
    Replace,
}

impl fmt::Display for ReassignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReassignmentPolicy::Assign { swap_count } => {
                write!(f, "assign ({} sequences)", swap_count)
            }
            ReassignmentPolicy::Replace => write!(f, "replace"),
        }
    }
}

/// Parameters shared by every engine call of one run. Built once, never mutated.
#[derive(Clone, Debug)]
pub struct SwapConfig {
    pub receivers: Vec<String>,
    pub policy: ReassignmentPolicy,
    pub likelihood: f64,
    pub max_substitutions: usize,
    // Append `_from_<old otu>` to the identifier of moved sequences.
    pub tag_origin: bool,
    pub separator: char,
}

impl SwapConfig {
    pub fn new(receivers: Vec<String>, policy: ReassignmentPolicy) -> Self {
        SwapConfig {
            receivers,
            policy,
            likelihood: DEFAULT_LIKELIHOOD,
            max_substitutions: DEFAULT_MAX_SUBSTITUTIONS,
            tag_origin: false,
            separator: DEFAULT_OTU_SEPARATOR,
        }
    }

    pub fn validate(&self) -> Result<(), SwapError> {
        if self.receivers.is_empty() {
            return Err(SwapError::Config(String::from("No receivers specified")));
        }
        if !(0.0..=1.0).contains(&self.likelihood) {
            return Err(SwapError::Config(format!(
                "Likelihood must be between 0 and 1 (got {})",
                self.likelihood
            )));
        }
        Ok(())
    }

    pub fn is_receiver(&self, otu: &str) -> bool {
        self.receivers.iter().any(|r| r == otu)
    }
}

/// Optional defaults read from a JSON file. Every key may be absent; unknown keys are ignored,
/// a key of the wrong type is an error.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub likelihood: Option<f64>,
    pub max_substitutions: Option<usize>,
    pub wrap: Option<usize>,
    pub output_subdir: Option<String>,
}

impl ConfigFile {
    pub fn from_value(value: &Value) -> Result<Self, SwapError> {
        // Structs also deserialize from arrays; only an object makes sense here.
        if !value.is_object() {
            return Err(SwapError::Config(String::from("expected a JSON object")));
        }
        ConfigFile::deserialize(value).map_err(|e| SwapError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, SwapError> {
        let text = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| SwapError::Config(format!("{}: {}", path.display(), e)))?;
        ConfigFile::from_value(&value).map_err(|e| match e {
            SwapError::Config(msg) => SwapError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }
}

pub fn find_config_file() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let path = PathBuf::from(home).join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let path = cwd.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

// One receiver per line; blank lines and surrounding whitespace are ignored.
pub fn read_receivers_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, SwapError> {
    let file = File::open(path)?;
    let mut receivers = Vec::new();
    for line in BufReader::new(file).lines() {
        let l = line?;
        let otu = l.trim();
        if !otu.is_empty() {
            receivers.push(String::from(otu));
        }
    }
    Ok(receivers)
}

pub fn dedup_receivers(receivers: Vec<String>) -> Vec<String> {
    receivers.into_iter().unique().collect()
}
