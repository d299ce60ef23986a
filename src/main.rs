use anyhow::Result;
use ncs_analyzer::job::{output::preview, run_job, JobConfig};
use std::{env, process};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

const PREVIEW_LINES: usize = 200;

fn print_usage() {
    eprintln!("usage: ncs-analyzer <input folder> <output path>");
    eprintln!();
    eprintln!("  <input folder>  holds nw.data.1.AllData, nw.starea and nw.industry");
    eprintln!("  <output path>   directory for part-r-NNNNN files (cleared first)");
    eprintln!();
    eprintln!("environment:");
    eprintln!("  NCS_REDUCERS    number of reduce workers (default: CPU count)");
    eprintln!("  RUST_LOG / LOG_LEVEL   log filter (default: info)");
}

fn init_logging() {
    // RUST_LOG wins; LOG_LEVEL is a plain directive fallback
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::default().add_directive(level.parse().unwrap_or(Level::INFO.into()))
    });
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn run(input: &str, output: &str) -> Result<()> {
    let config = JobConfig::new(input, output).with_env()?;
    info!(reducers = config.reducers, "starting job");
    run_job(&config)?;

    println!();
    println!("==========================");
    println!("Output:");
    for line in preview(&config.output_path, PREVIEW_LINES)? {
        println!("{}", line);
    }
    Ok(())
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        print_usage();
        process::exit(-1);
    }

    if let Err(e) = run(&args[0], &args[1]) {
        error!("job failed: {:#}", e);
        process::exit(1);
    }
}
