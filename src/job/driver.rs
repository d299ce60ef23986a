// src/job/driver.rs
//
// In-process stand-in for the cluster: parallel map over the input lines,
// hash-partitioned shuffle, then one reduce worker per partition.

use anyhow::{Context, Result};
use chrono::Utc;
use rayon::prelude::*;
use std::{
    borrow::Cow,
    collections::{hash_map::DefaultHasher, BTreeMap},
    fs::{self, File},
    hash::{Hash, Hasher},
    io::BufWriter,
    path::Path,
    time::Instant,
};
use tracing::{debug, info, instrument, warn};

use super::config::JobConfig;
use super::output::{mark_success, reset_output_dir, write_part, REPORT_FILE_NAME};
use super::report::{JobCounters, JobReport};
use crate::aggregate::{ReduceWorker, Reduced};
use crate::reference::ReferenceTables;
use crate::series::map_line;

/// Encoded key → every encoded value emitted for it.
pub type Partition = BTreeMap<String, Vec<String>>;

/// Run the map phase over `lines`, returning encoded (key, value) pairs.
fn map_all(text: &str) -> Vec<(String, String)> {
    text.par_lines()
        .filter_map(map_line)
        .map(|out| (out.key.encode(), out.value.encode()))
        .collect()
}

/// Deterministic within one build. `DefaultHasher` output is not guaranteed
/// across Rust releases, so part-file assignment may move after a toolchain
/// upgrade; only the grouping is a contract.
fn partition_for(key: &str, partitions: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() % partitions as u64) as usize
}

/// Group pairs by key and spread the keys over `partitions` buckets.
/// Every value for a key lands in the same bucket.
pub fn shuffle<I>(pairs: I, partitions: usize) -> Vec<Partition>
where
    I: IntoIterator<Item = (String, String)>,
{
    let partitions = partitions.max(1);
    let mut out: Vec<Partition> = (0..partitions).map(|_| BTreeMap::new()).collect();
    for (key, value) in pairs {
        let idx = partition_for(&key, partitions);
        out[idx].entry(key).or_default().push(value);
    }
    out
}

/// Reduce every group of one partition, in key order.
fn reduce_partition(worker: &mut ReduceWorker, groups: Partition) -> Result<(Vec<String>, JobCounters)> {
    let mut counters = JobCounters::default();
    let mut lines = Vec::new();
    for (key, values) in groups {
        counters.groups += 1;
        match worker
            .reduce(&key, &values)
            .with_context(|| format!("reducing group {}", key))?
        {
            Reduced::Summary(summary) => {
                counters.summaries += 1;
                lines.push(summary.to_line());
            }
            Reduced::UnknownArea => counters.unknown_area_groups += 1,
            Reduced::UnknownIndustry => counters.unknown_industry_groups += 1,
        }
    }
    Ok((lines, counters))
}

/// Run the whole job: wipe the output, map, shuffle, reduce, then write
/// `part-r-NNNNN` files, `_report.json` and `_SUCCESS`.
#[instrument(level = "info", skip(config), fields(input = %config.input_folder.display(), output = %config.output_path.display()))]
pub fn run_job(config: &JobConfig) -> Result<JobReport> {
    let started_at = Utc::now();
    let start = Instant::now();

    let data_path = config.data_path();
    let out_dir = config.output_path.as_path();
    reset_output_dir(out_dir)?;

    // ─── map ─────────────────────────────────────────────────────────
    let bytes = fs::read(&data_path)
        .with_context(|| format!("reading dataset {}", data_path.display()))?;
    // invalid bytes become U+FFFD; a row that survives the filter with one
    // still fails the strict value parse in the reduce phase
    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        warn!(path = %data_path.display(), "dataset contains invalid UTF-8; decoded lossily");
    }
    let mut counters = JobCounters {
        input_lines: text.lines().count() as u64,
        ..Default::default()
    };
    let pairs = map_all(&text);
    drop(text);
    drop(bytes);
    counters.map_outputs = pairs.len() as u64;
    info!(
        lines = counters.input_lines,
        emitted = counters.map_outputs,
        elapsed = ?start.elapsed(),
        "map phase done"
    );

    // ─── shuffle ─────────────────────────────────────────────────────
    let partitions = shuffle(pairs, config.reducers);
    debug!(partitions = partitions.len(), "shuffle done");

    // ─── reduce ──────────────────────────────────────────────────────
    let input_folder = config.input_folder.as_path();
    let per_partition: Vec<JobCounters> = partitions
        .into_par_iter()
        .enumerate()
        .map(|(idx, groups)| -> Result<JobCounters> {
            let tables = ReferenceTables::load(input_folder)?;
            let mut worker = ReduceWorker::new(tables);
            let (lines, counters) = reduce_partition(&mut worker, groups)
                .with_context(|| format!("reduce partition {}", idx))?;
            let path = write_part(out_dir, idx, &lines)?;
            debug!(partition = idx, summaries = counters.summaries, path = %path.display(), "partition written");
            Ok(counters)
        })
        .collect::<Result<Vec<_>>>()?;
    for c in per_partition {
        counters.add(c);
    }

    let report = JobReport {
        input_path: data_path.display().to_string(),
        output_path: out_dir.display().to_string(),
        reducers: config.reducers.max(1),
        started_at,
        finished_at: Utc::now(),
        counters,
    };
    write_report(out_dir, &report)?;
    mark_success(out_dir)?;

    info!(
        groups = counters.groups,
        summaries = counters.summaries,
        unknown_areas = counters.unknown_area_groups,
        unknown_industries = counters.unknown_industry_groups,
        elapsed = ?start.elapsed(),
        "job complete"
    );
    Ok(report)
}

fn write_report(dir: &Path, report: &JobReport) -> Result<()> {
    let path = dir.join(REPORT_FILE_NAME);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("writing {}", path.display()))
}

/// Run map → shuffle → reduce in memory with a single worker and return
/// `(label, summary)` pairs in key order.
pub fn run_local<I, S>(lines: I, tables: ReferenceTables) -> Result<Vec<(String, String)>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pairs = lines
        .into_iter()
        .filter_map(|line| map_line(line.as_ref()))
        .map(|out| (out.key.encode(), out.value.encode()));
    let mut worker = ReduceWorker::new(tables);
    let mut out = Vec::new();
    for groups in shuffle(pairs, 1) {
        for (key, values) in groups {
            if let Reduced::Summary(summary) = worker.reduce(&key, &values)? {
                out.push((summary.label.clone(), summary.summary()));
            }
        }
    }
    Ok(out)
}
