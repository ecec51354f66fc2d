//! Hi-score table and its one-line file format.
//!
//! The file holds exactly five whitespace-separated integers, best first.
//! A missing file is not an error: the table starts at all zeros.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::HISCORE_SLOTS;

#[derive(Debug, Error)]
pub enum HiScoreError {
    #[error("failed to read hi-scores from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write hi-scores to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ranked top-five list, always sorted descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HiScores {
    scores: [u32; HISCORE_SLOTS],
}

impl HiScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any number of scores; keeps the best five.
    pub fn from_scores(scores: impl IntoIterator<Item = u32>) -> Self {
        let mut table = Self::new();
        for s in scores {
            table.push(s);
        }
        table
    }

    pub fn scores(&self) -> &[u32; HISCORE_SLOTS] {
        &self.scores
    }

    pub fn best(&self) -> u32 {
        self.scores[0]
    }

    /// Insert `score`, re-rank, and drop the smallest entry.
    ///
    /// Returns true if the score made it into the table.
    pub fn push(&mut self, score: u32) -> bool {
        let last = HISCORE_SLOTS - 1;
        if score <= self.scores[last] {
            return false;
        }
        self.scores[last] = score;
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        true
    }

    /// Parse the file format. Tokens that are missing or not integers count as 0.
    pub fn parse(text: &str) -> Self {
        let mut tokens = text.split_whitespace();
        let mut scores = [0u32; HISCORE_SLOTS];
        for (slot, score) in scores.iter_mut().enumerate() {
            match tokens.next().map(str::parse::<u32>) {
                Some(Ok(v)) => *score = v,
                Some(Err(e)) => {
                    tracing::warn!(slot, error = %e, "hiscore_entry_invalid");
                }
                None => {
                    tracing::warn!(slot, "hiscore_entry_missing");
                }
            }
        }
        scores.sort_unstable_by(|a, b| b.cmp(a));
        Self { scores }
    }

    /// Serialize as one line: each score followed by a space.
    pub fn to_line(&self) -> String {
        let mut out = String::with_capacity(HISCORE_SLOTS * 8);
        for s in &self.scores {
            out.push_str(&s.to_string());
            out.push(' ');
        }
        out
    }

    /// Read the table from `path`, defaulting to zeros when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, HiScoreError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let line = text.lines().next().unwrap_or_default();
                Ok(Self::parse(line))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "hiscores_missing_using_defaults");
                Ok(Self::new())
            }
            Err(source) => Err(HiScoreError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), HiScoreError> {
        fs::write(path, self.to_line()).map_err(|source| HiScoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
