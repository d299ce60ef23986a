// src/job/report.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job-level tallies, summed across partitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCounters {
    pub input_lines: u64,
    pub map_outputs: u64,
    pub groups: u64,
    pub summaries: u64,
    pub unknown_area_groups: u64,
    pub unknown_industry_groups: u64,
}

impl JobCounters {
    /// Add another set of counters into `self`, saturating on overflow.
    pub fn add(&mut self, other: JobCounters) {
        self.input_lines = self.input_lines.saturating_add(other.input_lines);
        self.map_outputs = self.map_outputs.saturating_add(other.map_outputs);
        self.groups = self.groups.saturating_add(other.groups);
        self.summaries = self.summaries.saturating_add(other.summaries);
        self.unknown_area_groups = self
            .unknown_area_groups
            .saturating_add(other.unknown_area_groups);
        self.unknown_industry_groups = self
            .unknown_industry_groups
            .saturating_add(other.unknown_industry_groups);
    }
}

/// Written as `_report.json` next to the part files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    pub input_path: String,
    pub output_path: String,
    pub reducers: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub counters: JobCounters,
}
