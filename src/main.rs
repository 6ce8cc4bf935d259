use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use navtiming::config::load_config;
use navtiming::config::report_config::parse_utc_offset;
use navtiming::error::report;
use navtiming::{HostSnapshot, NavTimingError, PerformanceReportBuilder};

#[derive(Parser)]
#[command(name = "navtiming")]
#[command(about = "Builds a performance report from a captured navigation timing snapshot")]
#[command(version)]
struct Cli {
    /// Snapshot file (YAML or JSON), `-` reads stdin
    snapshot: PathBuf,

    /// Emit raw millisecond values instead of formatted dates and durations
    #[arg(long)]
    raw: bool,

    /// Output format
    #[arg(long, short, value_parser = ["text", "json", "yaml"])]
    output: Option<String>,

    /// Locale for dates and labels (pt-BR, en-US, en-GB)
    #[arg(long)]
    locale: Option<String>,

    /// UTC offset in minutes for wall clock times, or `local`
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(rendered) => {
            print!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", report(&e));
            if e.is_config() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: &Cli) -> Result<String, NavTimingError> {
    let mut config = load_config()?.report;

    if let Some(locale) = &cli.locale {
        config.locale = locale.clone();
    }
    if let Some(offset) = &cli.utc_offset {
        config.utc_offset_minutes = parse_utc_offset(offset)?;
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    config.raw |= cli.raw;

    let formatter = config.formatter()?;
    let output = config.output_format()?;
    log::info!(
        "Rendering {} report as {:?} (locale {})",
        if config.raw { "raw" } else { "formatted" },
        output,
        formatter.locale
    );

    let host = HostSnapshot::load(&cli.snapshot)?;
    let builder = PerformanceReportBuilder::new(&host, formatter);
    output.render(&builder.build(config.raw))
}
