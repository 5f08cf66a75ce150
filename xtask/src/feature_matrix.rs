//! Runs the library's tests once per feature set.
//!
//! `tree` and `heap` are independent opt-in features, so every doctest and
//! integration test has to build with either one missing.

use anyhow::{Context, Result, bail};
use clap::Args;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Feature sets checked by default, each built with `--no-default-features`.
const FEATURE_SETS: [&str; 6] = ["", "tree", "heap", "tree,serde", "heap,serde", "full"];

#[derive(Args)]
pub struct FeatureMatrixArgs {
    /// Only build the tests (`cargo test --no-run`) instead of running them
    #[arg(long)]
    no_run: bool,

    /// Check a single feature set instead of the whole matrix
    #[arg(long, short = 'f')]
    features: Option<String>,
}

/// Get the project root directory
fn project_root() -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    // xtask is in project_root/xtask
    match manifest_dir.parent() {
        Some(parent) if manifest_dir.ends_with("xtask") => parent.to_path_buf(),
        _ => manifest_dir,
    }
}

fn cargo_test(root: &Path, features: &str, no_run: bool) -> Result<()> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let mut cmd = Command::new(cargo);
    cmd.current_dir(root)
        .args(["test", "--package", "ordcollections", "--no-default-features"]);
    if !features.is_empty() {
        cmd.args(["--features", features]);
    }
    if no_run {
        cmd.arg("--no-run");
    }

    let status = cmd
        .status()
        .with_context(|| format!("Failed to run cargo test for features [{features}]"))?;
    if !status.success() {
        bail!("cargo test failed for features [{features}]");
    }
    Ok(())
}

pub fn run(args: &FeatureMatrixArgs) -> Result<()> {
    let root = project_root();
    let sets: Vec<&str> = match &args.features {
        Some(features) => vec![features.as_str()],
        None => FEATURE_SETS.to_vec(),
    };

    let mut failed = Vec::new();
    for features in &sets {
        eprintln!("==> features: [{features}]");
        if let Err(error) = cargo_test(&root, features, args.no_run) {
            eprintln!("    {error:#}");
            failed.push(*features);
        }
    }

    if !failed.is_empty() {
        bail!("{} of {} feature sets failed: {failed:?}", failed.len(), sets.len());
    }
    eprintln!("All {} feature sets passed", sets.len());
    Ok(())
}
