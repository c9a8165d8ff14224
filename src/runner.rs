// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{error, info, warn};

use clap::Parser;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::alignment::{Alignment, DEFAULT_OTU_SEPARATOR};
use crate::config::{
    dedup_receivers, find_config_file, read_receivers_file, ConfigFile, ReassignmentPolicy,
    SwapConfig, DEFAULT_LIKELIHOOD, DEFAULT_MAX_SUBSTITUTIONS, DEFAULT_OUTPUT_SUBDIR,
};
use crate::errors::SwapError;
use crate::seq::file::{read_seq_file, write_seq_file, SeqFileFormat};
use crate::swap::{self, SwapReport};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
pub struct Cli {
    /// Directory containing the alignment files
    input_dir: Option<PathBuf>,

    /// Receiver OTUs (comma-separated, or repeat the option)
    #[arg(short, long, value_delimiter = ',')]
    receivers: Vec<String>,

    /// File listing receiver OTUs, one per line
    #[arg(long = "receivers-file")]
    receivers_file: Option<PathBuf>,

    /// Number of sequences to move onto the receivers, one from each of that many random OTUs
    #[arg(short, long, conflicts_with = "replace")]
    swap: Option<usize>,

    /// Replace the receivers' sequences with copies of donor sequences
    #[arg(short = 'R', long)]
    replace: bool,

    /// Chance that a receiver's sequence leaks into another OTU [default: 0.1]
    #[arg(short, long)]
    likelihood: Option<f64>,

    /// Maximum number of substitutions in a contaminant [default: 30]
    #[arg(short, long = "max-substitutions")]
    max_substitutions: Option<usize>,

    /// Output directory [default: <INPUT_DIR>/swapped]
    #[arg(short, long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Wrap FastA sequence lines at this column (0: no wrapping)
    #[arg(short, long)]
    wrap: Option<usize>,

    /// Random seed, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Append "_from_<OTU>" to the identifiers of moved sequences
    #[arg(long = "tag-origin")]
    tag_origin: bool,

    /// Character separating the OTU from the rest of a sequence header
    #[arg(long, default_value_t = DEFAULT_OTU_SEPARATOR)]
    separator: char,

    /// JSON config file [default: ~/.otuswapconfig or ./.otuswapconfig]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only process files of this format [fasta|clustal|stockholm] (or just f|c|s)
    #[arg(short, long = "format", hide_possible_values = true)]
    format: Option<SeqFileFormat>,
}

/// Everything a batch run needs, validated.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub wrap: Option<usize>,
    pub seed: Option<u64>,
    pub only_format: Option<SeqFileFormat>,
    pub swap: SwapConfig,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub report: SwapReport,
}

impl RunOptions {
    pub fn from_cli(cli: Cli) -> Result<Self, SwapError> {
        let input_dir = cli
            .input_dir
            .ok_or_else(|| SwapError::Config(String::from("No input directory specified")))?;
        if !input_dir.is_dir() {
            return Err(SwapError::Config(format!(
                "Input directory {} does not exist",
                input_dir.display()
            )));
        }
        if cli.replace && cli.swap.is_some() {
            return Err(SwapError::Config(String::from(
                "--replace and --swap are mutually exclusive",
            )));
        }

        let file_config = match cli.config.or_else(find_config_file) {
            Some(path) => {
                info!("Reading config from {}", path.display());
                ConfigFile::from_file(&path)?
            }
            None => ConfigFile::default(),
        };

        let mut receivers = cli.receivers;
        if let Some(path) = &cli.receivers_file {
            receivers.extend(read_receivers_file(path)?);
        }
        let receivers = dedup_receivers(
            receivers
                .into_iter()
                .map(|r| String::from(r.trim()))
                .filter(|r| !r.is_empty())
                .collect(),
        );

        let policy = if cli.replace {
            ReassignmentPolicy::Replace
        } else {
            ReassignmentPolicy::Assign {
                swap_count: cli.swap.unwrap_or(0),
            }
        };
        let swap = SwapConfig {
            receivers,
            policy,
            likelihood: cli
                .likelihood
                .or(file_config.likelihood)
                .unwrap_or(DEFAULT_LIKELIHOOD),
            max_substitutions: cli
                .max_substitutions
                .or(file_config.max_substitutions)
                .unwrap_or(DEFAULT_MAX_SUBSTITUTIONS),
            tag_origin: cli.tag_origin,
            separator: cli.separator,
        };
        swap.validate()?;

        let output_dir = cli.output_dir.unwrap_or_else(|| {
            input_dir.join(
                file_config
                    .output_subdir
                    .as_deref()
                    .unwrap_or(DEFAULT_OUTPUT_SUBDIR),
            )
        });

        Ok(RunOptions {
            input_dir,
            output_dir,
            wrap: cli.wrap.or(file_config.wrap),
            seed: cli.seed,
            only_format: cli.format,
            swap,
        })
    }
}

/// Alignment files directly inside `dir`, sorted by name. Subdirectories are not visited.
pub fn scan_input_dir(
    dir: &Path,
    only: Option<SeqFileFormat>,
) -> Result<Vec<(PathBuf, SeqFileFormat)>, SwapError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match SeqFileFormat::from_path(&path) {
            Some(format) if only.map_or(true, |f| f == format) => files.push((path, format)),
            _ => {}
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

pub fn read_alignment(
    path: &Path,
    format: SeqFileFormat,
    sep: char,
) -> Result<Alignment, SwapError> {
    let seq_file = read_seq_file(path, format)?;
    Ok(Alignment::from_file(path, format, seq_file, sep))
}

pub fn write_alignment(aln: &Alignment, wrap: Option<usize>, sep: char) -> Result<(), SwapError> {
    write_seq_file(&aln.filename, &aln.to_file(sep), aln.format, wrap)
}

fn process_file<R: Rng + ?Sized>(
    path: &Path,
    format: SeqFileFormat,
    opts: &RunOptions,
    rng: &mut R,
) -> Result<SwapReport, SwapError> {
    let mut aln = read_alignment(path, format, opts.swap.separator)?;
    if !aln.is_aligned() {
        warn!("{}: sequences differ in length", path.display());
    }
    let report = swap::apply(&mut aln, &opts.swap, rng);

    let file_name = path
        .file_name()
        .ok_or_else(|| SwapError::Format(format!("{}: not a file name", path.display())))?;
    aln.set_filename(opts.output_dir.join(file_name));
    write_alignment(&aln, opts.wrap, opts.swap.separator)?;
    info!(
        "{}: swapped {} sequence{}, contaminated {}, skipped {} operation{}",
        path.display(),
        report.swapped,
        if report.swapped == 1 { "" } else { "s" },
        report.contaminated,
        report.skipped.len(),
        if report.skipped.len() == 1 { "" } else { "s" },
    );
    Ok(report)
}

/// Processes every alignment of the input directory, one after the other. A file that cannot be
/// read or written is logged and skipped; if any was, the run ends with `SwapError::Batch`.
pub fn run_batch(opts: &RunOptions) -> Result<BatchSummary, SwapError> {
    let files = scan_input_dir(&opts.input_dir, opts.only_format)?;
    fs::create_dir_all(&opts.output_dir)?;
    if fs::canonicalize(&opts.output_dir)? == fs::canonicalize(&opts.input_dir)? {
        return Err(SwapError::Config(String::from(
            "Output directory must differ from input directory",
        )));
    }

    let seed = opts.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("Random seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    info!(
        "{} alignment{} in {}, policy: {}, receivers: {}",
        files.len(),
        if files.len() == 1 { "" } else { "s" },
        opts.input_dir.display(),
        opts.swap.policy,
        opts.swap.receivers.join(",")
    );

    let mut summary = BatchSummary::default();
    for (path, format) in files {
        match process_file(&path, format, opts, &mut rng) {
            Ok(report) => {
                summary.processed += 1;
                summary.report.merge(report);
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                summary.failed += 1;
            }
        }
    }
    if summary.failed > 0 {
        return Err(SwapError::Batch {
            failed: summary.failed,
        });
    }
    Ok(summary)
}

pub fn run() -> Result<(), SwapError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting log");

    let cli = Cli::parse();
    let opts = RunOptions::from_cli(cli)?;
    let summary = run_batch(&opts)?;
    info!(
        "Done: {} alignment{} written to {}",
        summary.processed,
        if summary.processed == 1 { "" } else { "s" },
        opts.output_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("otuswap-runner-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn opts_from(args: &[&str]) -> Result<RunOptions, SwapError> {
        let cli = Cli::try_parse_from(args).map_err(|e| SwapError::Config(e.to_string()))?;
        RunOptions::from_cli(cli)
    }

    #[test]
    fn test_replace_and_swap_conflict() {
        let dir = scratch_dir("conflict");
        let d = dir.to_str().unwrap();
        assert!(Cli::try_parse_from(["otuswap", "-r", "X", "-R", "-s", "2", d]).is_err());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_receivers() {
        let dir = scratch_dir("noreceivers");
        let cfg_path = dir.join("cfg.json");
        fs::write(&cfg_path, "{}").unwrap();
        let d = dir.to_str().unwrap();
        let c = cfg_path.to_str().unwrap();
        assert!(matches!(
            opts_from(&["otuswap", "-c", c, d]),
            Err(SwapError::Config(_))
        ));
        // Blank receivers do not count
        assert!(matches!(
            opts_from(&["otuswap", "-r", " ", "-c", c, d]),
            Err(SwapError::Config(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_input_dir() {
        assert!(matches!(
            opts_from(&["otuswap", "-r", "X"]),
            Err(SwapError::Config(_))
        ));
        assert!(matches!(
            opts_from(&["otuswap", "-r", "X", "/no/such/otuswap/dir"]),
            Err(SwapError::Config(_))
        ));
    }

    #[test]
    fn test_options_defaults() {
        let dir = scratch_dir("defaults");
        let cfg_path = dir.join("cfg.json");
        fs::write(&cfg_path, "{}").unwrap();
        let d = dir.to_str().unwrap();
        let c = cfg_path.to_str().unwrap();
        let opts = opts_from(&["otuswap", "-r", "X,Y", "-r", "X", "-c", c, d]).unwrap();
        assert_eq!(opts.swap.receivers, vec!["X", "Y"]);
        assert_eq!(opts.swap.policy, ReassignmentPolicy::Assign { swap_count: 0 });
        assert_eq!(opts.swap.likelihood, DEFAULT_LIKELIHOOD);
        assert_eq!(opts.swap.max_substitutions, DEFAULT_MAX_SUBSTITUTIONS);
        assert_eq!(opts.output_dir, dir.join(DEFAULT_OUTPUT_SUBDIR));
        assert_eq!(opts.wrap, None);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = scratch_dir("overrides");
        let cfg_path = dir.join("cfg.json");
        fs::write(
            &cfg_path,
            r#"{"likelihood": 0.5, "max_substitutions": 4, "wrap": 60, "output_subdir": "out"}"#,
        )
        .unwrap();
        let d = dir.to_str().unwrap();
        let c = cfg_path.to_str().unwrap();
        let opts = opts_from(&["otuswap", "-r", "X", "-R", "-l", "0.2", "-c", c, d]).unwrap();
        assert_eq!(opts.swap.policy, ReassignmentPolicy::Replace);
        assert_eq!(opts.swap.likelihood, 0.2);
        assert_eq!(opts.swap.max_substitutions, 4);
        assert_eq!(opts.wrap, Some(60));
        assert_eq!(opts.output_dir, dir.join("out"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_mistyped_config_key_is_an_error() {
        let dir = scratch_dir("badconfig");
        let cfg_path = dir.join("cfg.json");
        fs::write(&cfg_path, r#"{"wrap": "sixty"}"#).unwrap();
        let d = dir.to_str().unwrap();
        let c = cfg_path.to_str().unwrap();
        assert!(matches!(
            opts_from(&["otuswap", "-r", "X", "-c", c, d]),
            Err(SwapError::Config(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_scan_input_dir_filters_extensions() {
        let dir = scratch_dir("scan");
        fs::write(dir.join("b.fas"), ">A@1\nAC\n").unwrap();
        fs::write(dir.join("a.aln"), "CLUSTAL\n\nA@1 AC\n").unwrap();
        fs::write(dir.join("notes.txt"), "hello").unwrap();
        fs::create_dir_all(dir.join("sub.fas")).unwrap();

        let files = scan_input_dir(&dir, None).unwrap();
        assert_eq!(
            files,
            vec![
                (dir.join("a.aln"), SeqFileFormat::Clustal),
                (dir.join("b.fas"), SeqFileFormat::FastA)
            ]
        );
        let only_fasta = scan_input_dir(&dir, Some(SeqFileFormat::FastA)).unwrap();
        assert_eq!(only_fasta, vec![(dir.join("b.fas"), SeqFileFormat::FastA)]);
        let _ = fs::remove_dir_all(&dir);
    }
}
