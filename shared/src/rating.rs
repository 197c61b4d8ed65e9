use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 10;

/// All vote edges, keyed by voter then target. One entry per ordered pair;
/// resubmitting overwrites.
pub type VoteMap = BTreeMap<String, BTreeMap<String, u8>>;

/// Fixed, ordered set of eligible participant names. Built once at startup;
/// membership is exact-match, no case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Keeps first occurrence of each name, drops empties.
    pub fn new(names: Vec<String>) -> Self {
        let mut kept: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !name.is_empty() && !kept.contains(&name) {
                kept.push(name);
            }
        }
        Self { names: kept }
    }

    /// Comma-separated list, whitespace-trimmed.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(',').map(|s| s.trim().to_string()).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A validated 1-10 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = i64;

    fn try_from(v: i64) -> Result<Self, i64> {
        if (MIN_SCORE..=MAX_SCORE).contains(&v) {
            Ok(Score(v as u8))
        } else {
            Err(v)
        }
    }
}

/// Derived per-player aggregate; recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
}

/// Buckets every received score by target, then builds the summary by
/// iterating the roster. Edges pointing at names no longer on the roster
/// land in a bucket that is never read back out, so stale ledger entries
/// are dropped silently rather than erroring.
pub fn compute_summary(roster: &Roster, votes: &VoteMap) -> BTreeMap<String, RatingSummary> {
    let mut received: BTreeMap<&str, Vec<u8>> = BTreeMap::new();
    for targets in votes.values() {
        for (to, score) in targets {
            received.entry(to.as_str()).or_default().push(*score);
        }
    }

    roster
        .names()
        .iter()
        .map(|player| {
            let bucket = received
                .get(player.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let count = bucket.len();
            let average = if count == 0 {
                0.0
            } else {
                let total: u32 = bucket.iter().map(|&s| u32::from(s)).sum();
                round2(f64::from(total) / count as f64)
            };
            (player.clone(), RatingSummary { average, count })
        })
        .collect()
}

/// Round half away from zero at two decimal places.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
