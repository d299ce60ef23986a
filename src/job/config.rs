// src/job/config.rs

use anyhow::{bail, Context, Result};
use std::{env, path::PathBuf};

/// Main dataset, relative to the input folder.
pub const DATA_FILE_NAME: &str = "nw.data.1.AllData";
/// Overrides the number of reduce workers / output partitions.
pub const REDUCERS_ENV: &str = "NCS_REDUCERS";

#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Folder holding the dataset and both reference tables.
    pub input_folder: PathBuf,
    /// Output directory; wiped before every run.
    pub output_path: PathBuf,
    pub reducers: usize,
}

impl JobConfig {
    pub fn new(input_folder: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_folder: input_folder.into(),
            output_path: output_path.into(),
            reducers: num_cpus::get().max(1),
        }
    }

    /// Apply `NCS_REDUCERS` if it is set.
    pub fn with_env(self) -> Result<Self> {
        let raw = env::var(REDUCERS_ENV).ok();
        self.with_reducers_override(raw.as_deref())
    }

    pub fn with_reducers_override(mut self, raw: Option<&str>) -> Result<Self> {
        if let Some(raw) = raw {
            let reducers: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer, got {:?}", REDUCERS_ENV, raw))?;
            if reducers == 0 {
                bail!("{} must be at least 1", REDUCERS_ENV);
            }
            self.reducers = reducers;
        }
        Ok(self)
    }

    pub fn data_path(&self) -> PathBuf {
        self.input_folder.join(DATA_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_files_under_input_folder() {
        let cfg = JobConfig::new("/data/ncs", "/out");
        assert_eq!(cfg.data_path(), PathBuf::from("/data/ncs/nw.data.1.AllData"));
        assert!(cfg.reducers >= 1);
    }

    #[test]
    fn reducers_override() -> Result<()> {
        let cfg = JobConfig::new("in", "out").with_reducers_override(Some(" 3 "))?;
        assert_eq!(cfg.reducers, 3);

        let untouched = JobConfig::new("in", "out");
        let default = untouched.reducers;
        assert_eq!(untouched.with_reducers_override(None)?.reducers, default);

        assert!(JobConfig::new("in", "out").with_reducers_override(Some("0")).is_err());
        assert!(JobConfig::new("in", "out").with_reducers_override(Some("many")).is_err());
        Ok(())
    }
}
