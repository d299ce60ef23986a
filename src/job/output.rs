// src/job/output.rs

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

pub const SUCCESS_MARKER: &str = "_SUCCESS";
pub const REPORT_FILE_NAME: &str = "_report.json";
const PART_PREFIX: &str = "part-r-";

pub fn part_file_name(partition: usize) -> String {
    format!("{}{:05}", PART_PREFIX, partition)
}

/// Remove whatever is at `path` and recreate it as an empty directory.
pub fn reset_output_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("clearing output directory {}", path.display()))?;
        debug!(path = %path.display(), "cleared previous output");
    } else if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("removing output file {}", path.display()))?;
    }
    fs::create_dir_all(path)
        .with_context(|| format!("creating output directory {}", path.display()))
}

/// Write one partition's `label<TAB>summary` lines.
pub fn write_part(dir: &Path, partition: usize, lines: &[String]) -> Result<PathBuf> {
    let path = dir.join(part_file_name(partition));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line).with_context(|| format!("writing {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(path)
}

pub fn mark_success(dir: &Path) -> Result<()> {
    let path = dir.join(SUCCESS_MARKER);
    File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    Ok(())
}

/// Part files under `dir`, in partition order.
pub fn part_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut parts = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))? {
        let path = entry?.path();
        let is_part = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |n| n.starts_with(PART_PREFIX));
        if is_part && path.is_file() {
            parts.push(path);
        }
    }
    parts.sort();
    Ok(parts)
}

/// First `limit` output lines across all part files.
pub fn preview(dir: &Path, limit: usize) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for path in part_files(dir)? {
        let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
        for line in BufReader::new(file).lines() {
            if out.len() >= limit {
                return Ok(out);
            }
            out.push(line.with_context(|| format!("reading {}", path.display()))?);
        }
    }
    Ok(out)
}
