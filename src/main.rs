use anyhow::{Context, Result};
use clap::Parser;
use latdiff::catalog::ExperimentCatalog;
use latdiff::cli::{Cli, OutputFormat};
use latdiff::config::AnalysisConfig;
use latdiff::csv_output::CsvOutput;
use latdiff::report::AnalysisReport;
use latdiff::{invocation, json_output};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` forces TRACE, otherwise RUST_LOG (default warn)
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Embedded latdiff-default.toml < --config file < explicit flags
fn resolve_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_toml(path)?,
        None => AnalysisConfig::embedded()?,
    };

    if let Some(expected) = args.expected_entries {
        config.expected_entries = expected;
    }
    if let Some(z) = args.z_value {
        config.z_value = z;
    }
    if let Some(n) = args.discard_first {
        config.discard_first_n = n;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    if args.results.is_none() && args.requests_trace.is_none() {
        anyhow::bail!(
            "Nothing to analyze. Usage: latdiff --results DIR and/or --requests-trace FILE"
        );
    }

    let config = resolve_config(&args)?;
    let mut report = AnalysisReport::new();

    if let Some(root) = &args.results {
        let catalog = ExperimentCatalog::build(root, &config)
            .with_context(|| format!("Failed to ingest results tree {}", root.display()))?;
        report = report.with_catalog(&catalog);
    }

    if let Some(trace) = &args.requests_trace {
        let samples = invocation::load_trace(trace, config.discard_first_n)
            .with_context(|| format!("Failed to load invocation trace {}", trace.display()))?;
        report = report.with_invocations(invocation::summarize(&samples, config.z_value));
    }

    match args.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", json_output::to_json(&report)?),
        OutputFormat::Csv => print!("{}", CsvOutput::from_report(&report).to_csv()?),
    }

    Ok(())
}
