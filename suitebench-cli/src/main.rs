mod collections;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use suitebench_engine::EngineConfig;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// Benchmark std collections suite by suite with live progress
#[derive(Parser, Debug)]
#[command(name = "suitebench-cli")]
#[command(version, about)]
struct Args {
    /// Configuration file (defaults to ./suitebench.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Samples per benchmark
    #[arg(long)]
    samples: Option<usize>,

    /// Calls per sample (disables auto-scaling)
    #[arg(long)]
    iterations: Option<usize>,

    /// Warmup calls before calibration
    #[arg(long)]
    warmup: Option<usize>,

    /// Target sample duration in milliseconds when auto-scaling
    #[arg(long)]
    target_ms: Option<u64>,

    /// Pin the benchmark thread to this CPU core
    #[arg(long)]
    pin_core: Option<usize>,

    /// Number of elements in each collection
    #[arg(short, long, default_value_t = 1000)]
    size: usize,

    /// Only run suites whose name contains this pattern
    #[arg(short, long)]
    filter: Option<String>,

    /// List suites and benchmarks without running them
    #[arg(long)]
    list: bool,

    /// Print per-benchmark statistics as JSON after the run
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Resolve the engine configuration: CLI flags > file/env > defaults.
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = EngineConfig::from_file(path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?;
                config.apply_env_overrides();
                config
            }
            None => EngineConfig::load(),
        };

        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = Some(iterations);
        }
        if let Some(warmup) = self.warmup {
            config.warmup_iterations = warmup;
        }
        if let Some(target_ms) = self.target_ms {
            config.target_sample_duration_ms = target_ms;
        }
        if let Some(core) = self.pin_core {
            config.pin_core = Some(core);
        }

        config.validate().context("Invalid benchmark configuration")?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = args.engine_config()?;
    debug!(?config, "resolved configuration");

    let mut suites = collections::build_suites(&config, args.size, args.filter.as_deref())
        .context("Failed to build benchmark suites")?;

    if args.list {
        output::print_listing(&suites);
        return Ok(ExitCode::SUCCESS);
    }

    if suites.is_empty() {
        eprintln!("ERROR: No suites match the filter!");
        return Ok(ExitCode::FAILURE);
    }

    output::print_header(&config, suites.len(), args.size);

    let status = suitebench::run(&mut suites, ExitCode::SUCCESS);

    output::print_summary(&suites);

    if args.json {
        output::print_json(&suites).context("Failed to serialize results")?;
    }

    if output::failures(&suites) > 0 {
        return Ok(ExitCode::FAILURE);
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["suitebench-cli"]).unwrap();
        assert_eq!(args.size, 1000);
        assert!(args.filter.is_none());
        assert!(!args.list);
        assert!(!args.json);
    }

    #[test]
    fn test_overrides_applied() {
        let args = Args::try_parse_from([
            "suitebench-cli",
            "--samples",
            "7",
            "--iterations",
            "3",
            "--warmup",
            "0",
            "--target-ms",
            "1",
            "--filter",
            "fold",
        ])
        .unwrap();

        let config = args.engine_config().unwrap();
        assert_eq!(config.samples, 7);
        assert_eq!(config.iterations, Some(3));
        assert_eq!(config.warmup_iterations, 0);
        assert_eq!(config.target_sample_duration_ms, 1);
        assert_eq!(args.filter.as_deref(), Some("fold"));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = Args::try_parse_from(["suitebench-cli", "--samples", "0"]).unwrap();
        assert!(args.engine_config().is_err());
    }

    #[test]
    fn test_missing_config_file_rejected() {
        let args =
            Args::try_parse_from(["suitebench-cli", "--config", "/nonexistent/suitebench.toml"])
                .unwrap();
        let err = args.engine_config().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_config_file_then_flags() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "samples = 9\nwarmup_iterations = 4\n").unwrap();
        let path = file.path().to_str().unwrap();

        let args =
            Args::try_parse_from(["suitebench-cli", "--config", path, "--samples", "11"]).unwrap();
        let config = args.engine_config().unwrap();

        assert_eq!(config.samples, 11);
        assert_eq!(config.warmup_iterations, 4);
    }
}
