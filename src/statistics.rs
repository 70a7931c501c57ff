//! Point statistics reported on the console
//!
//! Nothing here is persisted; the numbers summarise what the `_all` and
//! `_filtered` outputs contain.

use crate::flatten::DataPoint;

/// Number of sample points shown after a batch
pub const SAMPLE_POINTS: usize = 5;

/// Point counts for one converted file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub total: usize,
    pub missing: usize,
    pub retained: usize,
}

impl ConversionStats {
    /// Counts the points of the unfiltered variant
    pub fn from_points(points: &[DataPoint]) -> Self {
        let missing = points.iter().filter(|p| p.is_missing()).count();
        Self {
            total: points.len(),
            missing,
            retained: points.len() - missing,
        }
    }

    /// Retained share in percent; 0 for an empty grid
    pub fn retention_percent(&self) -> f64 {
        percent(self.retained, self.total)
    }

    /// Print per-file statistics
    pub fn print(&self, filename: &str) {
        println!("📊 {}", filename);
        println!("   Total points: {}", self.total);
        println!("   Missing points: {}", self.missing);
        println!("   Retained points: {}", self.retained);
        println!(
            "   Retention: {:.2}% ({}/{})",
            self.retention_percent(),
            self.retained,
            self.total
        );
    }
}

/// A file that could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub filename: String,
    pub reason: String,
}

/// Aggregated outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub files_found: usize,
    pub converted: usize,
    pub failed: Vec<FailedFile>,
    pub total_points: usize,
    pub retained_points: usize,
    /// First filtered points of the first converted file
    pub sample: Option<(String, Vec<DataPoint>)>,
}

impl BatchSummary {
    /// Adds a converted file's counts; keeps its first points as the sample if none yet
    pub fn record_success(&mut self, filename: &str, stats: &ConversionStats, filtered: &[DataPoint]) {
        self.converted += 1;
        self.total_points += stats.total;
        self.retained_points += stats.retained;

        if self.sample.is_none() {
            let points = filtered.iter().take(SAMPLE_POINTS).copied().collect();
            self.sample = Some((filename.to_string(), points));
        }
    }

    pub fn record_failure(&mut self, filename: &str, reason: impl Into<String>) {
        self.failed.push(FailedFile {
            filename: filename.to_string(),
            reason: reason.into(),
        });
    }

    pub fn retention_percent(&self) -> f64 {
        percent(self.retained_points, self.total_points)
    }

    /// Print the batch summary and sample points
    pub fn print(&self) {
        println!("\n===== Overall Statistics =====");
        println!("   Files found: {}", self.files_found);
        println!("   Converted: {}", self.converted);
        println!("   Failed: {}", self.failed.len());
        println!("   Total points: {}", self.total_points);
        println!("   Retained points: {}", self.retained_points);
        println!("   Overall retention: {:.2}%", self.retention_percent());

        for failure in &self.failed {
            println!("   ⚠ {}: {}", failure.filename, failure.reason);
        }

        if let Some((filename, points)) = &self.sample {
            println!("\n Sample points (from {}, missing removed):", filename);
            if points.is_empty() {
                println!("   (no valid points)");
            }
            for (i, point) in points.iter().enumerate() {
                let value = point
                    .value
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "null".to_string());
                println!(
                    "   [{}]: lat={:.4}, lon={:.4}, value={}",
                    i + 1,
                    point.latitude,
                    point.longitude,
                    value
                );
            }
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
