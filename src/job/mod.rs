pub mod config;
pub mod driver;
pub mod output;
pub mod report;

pub use config::JobConfig;
pub use driver::{run_job, run_local, shuffle};
pub use report::{JobCounters, JobReport};
