// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Timing samples, the CSV log they are appended to, and the speedup
//! table built from them.
//!
//! The log has no header; each row is `size;patch;workers;seconds`.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Delimiter of the timing log.
pub const DELIMITER: u8 = b';';

/// One timed run.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    /// Side length of the image.
    pub size: usize,
    /// Side length of the patches.
    pub patch_length: usize,
    /// Number of workers.
    pub worker_count: usize,
    /// Wall-clock seconds spent computing.
    pub elapsed_seconds: f64,
}

impl TimingSample {
    /// Build a sample from a measured duration.
    pub fn new(size: usize, patch_length: usize, worker_count: usize, elapsed: Duration) -> Self {
        TimingSample {
            size,
            patch_length,
            worker_count,
            elapsed_seconds: elapsed.as_secs_f64(),
        }
    }

    /// The line printed after each run.
    pub fn line(&self) -> String {
        format!(
            "{};{};{};{}",
            self.size, self.patch_length, self.worker_count, self.elapsed_seconds
        )
    }

    fn rounded(&self) -> TimingSample {
        TimingSample {
            elapsed_seconds: (self.elapsed_seconds * 1e6).round() / 1e6,
            ..*self
        }
    }
}

/// Append one sample to the log at `path`, creating the file if needed.
/// Seconds are rounded to the microsecond.
pub fn append_sample<P: AsRef<Path>>(path: P, sample: &TimingSample) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(file);
    writer.serialize(sample.rounded())?;
    writer.flush()?;
    Ok(())
}

/// Read every sample from the log at `path`.
pub fn read_samples<P: AsRef<Path>>(path: P) -> Result<Vec<TimingSample>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_path(path)?;
    let mut samples = vec![];
    for row in reader.deserialize() {
        samples.push(row?);
    }
    Ok(samples)
}

/// Averaged figures for one image size at one worker count.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    /// Side length of the image.
    pub size: usize,
    /// Number of workers.
    pub worker_count: usize,
    /// How many samples were averaged.
    pub runs: usize,
    /// Mean wall-clock seconds.
    pub mean_seconds: f64,
    /// Single-worker mean over this mean, if a single-worker run of the
    /// same size was logged.
    pub speedup: Option<f64>,
    /// Speedup per worker.
    pub efficiency: Option<f64>,
}

/// Group samples by size and worker count, average them, and work out
/// speedup and efficiency against the single-worker mean of the same
/// size.  Rows come out ordered by size, then worker count.
pub fn summarize(samples: &[TimingSample]) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<(usize, usize), (usize, f64)> = BTreeMap::new();
    for s in samples {
        let entry = groups.entry((s.size, s.worker_count)).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += s.elapsed_seconds;
    }

    let means: BTreeMap<(usize, usize), (usize, f64)> = groups
        .into_iter()
        .map(|(key, (runs, total))| (key, (runs, total / runs as f64)))
        .collect();

    means
        .iter()
        .map(|(&(size, worker_count), &(runs, mean_seconds))| {
            let speedup = means
                .get(&(size, 1))
                .filter(|_| mean_seconds > 0.0)
                .map(|&(_, reference)| reference / mean_seconds);
            SummaryRow {
                size,
                worker_count,
                runs,
                mean_seconds,
                speedup,
                efficiency: speedup.map(|s| s / worker_count as f64),
            }
        })
        .collect()
}

/// Lay the summary out as a fixed-width text table.
pub fn format_table(rows: &[SummaryRow]) -> String {
    fn opt(v: Option<f64>) -> String {
        v.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "-".to_string())
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>8} {:>7} {:>5} {:>12} {:>9} {:>10}",
        "size", "workers", "runs", "runtime (s)", "speedup", "efficiency"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>8} {:>7} {:>5} {:>12.6} {:>9} {:>10}",
            row.size,
            row.worker_count,
            row.runs,
            row.mean_seconds,
            opt(row.speedup),
            opt(row.efficiency)
        );
    }
    out
}
