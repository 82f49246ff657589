//! Folder batch: every `*.txt` hand-history file in a directory, processed
//! independently and folded into running session totals.

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::LuckResult;
use crate::session::{analyze_hands, FileOutcome, SessionTotals};

/// One file's result. `outcome` is `None` when the file was unreadable or
/// its session was degenerate; the batch carries on either way.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub name: String,
    pub outcome: Option<FileOutcome>,
}

impl FileReport {
    /// A file counts toward totals only when it produced at least one
    /// analyzed hand.
    pub fn processed(&self) -> bool {
        self.outcome.as_ref().map_or(false, |o| !o.hands.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub files: Vec<FileReport>,
    pub totals: SessionTotals,
}

/// Analyzes every `.txt` file under `folder` in parallel. Each file draws
/// from its own RNG seeded from the base seed and the file name, so a seeded
/// batch is reproducible regardless of thread scheduling.
pub fn analyze_folder(
    folder: &Path,
    max_samples: usize,
    seed: Option<u64>,
) -> LuckResult<BatchSummary> {
    let mut paths: Vec<PathBuf> = fs::read_dir(folder)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map_or(false, |ext| ext == "txt"))
        .collect();
    paths.sort();

    let files: Vec<FileReport> = paths
        .par_iter()
        .map(|path| analyze_file(path, max_samples, seed))
        .collect();

    let mut totals = SessionTotals::default();
    for file in files.iter().filter(|f| f.processed()) {
        if let Some(outcome) = &file.outcome {
            totals.add(outcome);
        }
    }

    Ok(BatchSummary { files, totals })
}

pub fn analyze_file(path: &Path, max_samples: usize, seed: Option<u64>) -> FileReport {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let outcome = fs::read_to_string(path).ok().and_then(|text| {
        let mut rng = file_rng(seed, &name);
        analyze_hands(&text, max_samples, &mut rng).ok()
    });

    FileReport { name, outcome }
}

fn file_rng(seed: Option<u64>, name: &str) -> StdRng {
    match seed {
        Some(base) => {
            let mut hasher = DefaultHasher::new();
            name.hash(&mut hasher);
            StdRng::seed_from_u64(base ^ hasher.finish())
        }
        None => StdRng::from_entropy(),
    }
}
