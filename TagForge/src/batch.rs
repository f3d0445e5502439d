//! Batch shader upgrades
//!
//! Finds first-generation shader tags under a directory and upgrades them in
//! parallel. Every file is an independent conversion; the only shared state
//! is a set of atomic counters.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::upgrade::{PatchOverrides, upgrade};

/// Extensions of the shader kinds that can be upgraded
pub const SOURCE_EXTENSIONS: [&str; 2] = ["shader_environment", "shader_model"];

/// Extension of upgraded shader files
pub const TARGET_EXTENSION: &str = "shader";

/// Progress update for a batch upgrade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeProgress {
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// File being upgraded, relative to the source base
    pub current_file: String,
}

impl UpgradeProgress {
    #[must_use]
    pub fn new(current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            current,
            total,
            current_file: file.into(),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Result of a batch upgrade
#[derive(Debug, Clone)]
pub struct BatchUpgradeResult {
    /// Number of successful conversions
    pub success_count: usize,
    /// Number of failed conversions
    pub fail_count: usize,
    /// Messages for each file processed
    pub results: Vec<String>,
}

/// Find all upgradable shader tags in a directory recursively
///
/// # Returns
/// A sorted list of `.shader_environment` and `.shader_model` files.
pub fn find_source_tags<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path().extension().is_some_and(|ext| {
                    SOURCE_EXTENSIONS
                        .iter()
                        .any(|source| ext.eq_ignore_ascii_case(source))
                })
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

/// Output path for `source`: same relative location, `.shader` extension.
pub fn target_path(source: &Path, source_base: &Path, dest_base: &Path) -> PathBuf {
    let relative = source.strip_prefix(source_base).unwrap_or(source);
    dest_base.join(relative).with_extension(TARGET_EXTENSION)
}

/// Upgrade one file on disk.
///
/// # Errors
/// Returns an error if the source cannot be read, the conversion fails, or
/// the output cannot be written.
pub fn upgrade_file(source: &Path, target: &Path, overrides: &PatchOverrides) -> Result<()> {
    let data = std::fs::read(source).map_err(|e| Error::FileAccess {
        path: source.to_path_buf(),
        source: e,
    })?;
    let output = upgrade(&data, overrides).map_err(|e| Error::Conversion(Box::new(e)))?;

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(target, &output.bytes).map_err(|e| Error::FileAccess {
        path: target.to_path_buf(),
        source: e,
    })
}

/// Batch upgrade shader tags in parallel
///
/// Writes each converted shader under `dest_base`, preserving the source
/// directory structure.
///
/// # Arguments
/// * `files` - Shader tags to upgrade
/// * `source_base` - Base directory of the source (for calculating relative paths)
/// * `dest_base` - Destination directory for upgraded shaders
/// * `overrides` - Field overrides applied to every converted shader
/// * `progress` - Callback for progress updates
pub fn batch_upgrade<F>(
    files: &[PathBuf],
    source_base: &Path,
    dest_base: &Path,
    overrides: &PatchOverrides,
    progress: F,
) -> BatchUpgradeResult
where
    F: Fn(&UpgradeProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = files.len();

    let results: Vec<String> = files
        .par_iter()
        .map(|source| {
            let relative_path = source.strip_prefix(source_base).unwrap_or(source.as_path());
            let display_path = relative_path.to_string_lossy();

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&UpgradeProgress::new(current, total, display_path.to_string()));

            let target = target_path(source, source_base, dest_base);
            match upgrade_file(source, &target, overrides) {
                Ok(()) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    format!("Upgraded: {display_path}")
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    tracing::warn!("Failed to upgrade {display_path}: {e}");
                    format!("Failed {display_path}: {e}")
                }
            }
        })
        .collect();

    let result = BatchUpgradeResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
    };
    tracing::info!(
        "Batch upgrade finished: {} succeeded, {} failed",
        result.success_count,
        result.fail_count
    );
    result
}
