use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result};
use std::fmt::Display;
use std::path::PathBuf;
use tracing::info;

use unusedassets::config::RootConfig;
use unusedassets::{
    Config, DetectionSession, Detector, FileWatcher, FsContentReader, GuidClosureProvider,
    RemovalSummary, ReportFormat, Reporter, SafeDeleter,
};

/// unusedassets - Find assets no enabled scene depends on
#[derive(Parser, Debug)]
#[command(name = "unusedassets")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also report unused scripts
    #[arg(long)]
    include_scripts: bool,

    /// Search other scripts too when looking for script references
    #[arg(long)]
    scan_code: bool,

    /// Extra root documents (can be specified multiple times)
    #[arg(long)]
    root: Vec<String>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Patterns to retain - never report as unused (can be specified multiple times)
    #[arg(short, long)]
    retain: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pick unused assets and delete them
    #[arg(long)]
    delete: bool,

    /// Select every unused asset instead of prompting
    #[arg(long, requires = "delete")]
    all: bool,

    /// Skip the confirmation prompt
    #[arg(short, long, requires = "delete")]
    yes: bool,

    /// Dry run - show what would be deleted without making changes
    #[arg(long)]
    dry_run: bool,

    /// Watch mode - continuously monitor for changes
    #[arg(long)]
    watch: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl Cli {
    fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a progress line; stdout belongs to the report in JSON mode
    fn status(&self, line: impl Display) {
        if self.is_json() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("unusedassets v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let mut session = DetectionSession::new();

    if cli.watch {
        run_watch_mode(&config, &cli, &mut session)?;
    } else {
        run_once(&config, &cli, &mut session)?;
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Keep stdout for the report itself
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if cli.include_scripts {
        config.include_code = true;
    }
    if cli.scan_code {
        config.scan_code_files = true;
    }
    config.roots.extend(cli.root.iter().map(|path| RootConfig {
        path: path.clone(),
        enabled: true,
    }));
    config.exclude.extend(cli.exclude.clone());
    config.retain.extend(cli.retain.clone());

    Ok(config)
}

fn run_watch_mode(config: &Config, cli: &Cli, session: &mut DetectionSession) -> Result<()> {
    let watcher = FileWatcher::new(&cli.path, config);

    watcher
        .watch(|| {
            match detect_and_report(config, cli, session) {
                Ok(()) => {
                    println!();
                    println!("{}", "✓ Detection complete. Waiting for changes...".green());
                }
                Err(e) => {
                    eprintln!("{}: {:?}", "Detection error".red(), e);
                }
            }
            true
        })
        .into_diagnostic()?;

    Ok(())
}

fn run_once(config: &Config, cli: &Cli, session: &mut DetectionSession) -> Result<()> {
    // JSON with --delete emits a single document once deletion is settled
    let defer_report = cli.delete && cli.is_json();

    detect(config, cli, session)?;
    if !defer_report {
        report(config, cli, session)?;
    }

    if cli.delete {
        let changed = run_delete(config, cli, session)?;
        if changed {
            // The tree changed; the old report no longer holds
            detect(config, cli, session)?;
        }
        if changed || defer_report {
            report(config, cli, session)?;
        }
    }

    Ok(())
}

/// Recompute the session's report and print it
fn detect_and_report(config: &Config, cli: &Cli, session: &mut DetectionSession) -> Result<()> {
    detect(config, cli, session)?;
    report(config, cli, session)
}

fn report(config: &Config, cli: &Cli, session: &DetectionSession) -> Result<()> {
    Reporter::new(cli.format.clone().into(), cli.output.clone())
        .with_include_code(config.include_code)
        .report(session.report())
}

fn detect(config: &Config, cli: &Cli, session: &mut DetectionSession) -> Result<()> {
    let provider = GuidClosureProvider::new(config, &cli.path);
    let reader = FsContentReader::new(&cli.path);

    let mut detector = Detector::new(config, &cli.path, &provider, &reader);
    if !cli.quiet && !cli.is_json() {
        detector = detector.with_progress(progress_bar()?);
    }

    detector
        .run(session, config.include_code)
        .into_diagnostic()?;

    Ok(())
}

fn progress_bar() -> Result<ProgressBar> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .into_diagnostic()?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Pick and delete assets; returns whether anything was removed from disk
fn run_delete(config: &Config, cli: &Cli, session: &mut DetectionSession) -> Result<bool> {
    if session.report().is_empty() {
        return Ok(false);
    }

    let deleter = SafeDeleter::new(&cli.path, config, cli.dry_run);

    if cli.all {
        session.select_all();
    } else {
        deleter.choose(session)?;
    }

    if session.selection().is_empty() {
        cli.status("No Selection".yellow());
        return Ok(false);
    }

    let count = session.selection().len();
    if !cli.yes && !cli.dry_run && !deleter.confirm(count)? {
        cli.status("Deletion cancelled.".yellow());
        return Ok(false);
    }

    let summary = deleter.remove(session.selection()).into_diagnostic()?;
    print_removal(cli, &summary);

    Ok(!summary.dry_run && !summary.deleted.is_empty())
}

fn print_removal(cli: &Cli, summary: &RemovalSummary) {
    cli.status("");
    if summary.dry_run {
        cli.status("Dry run - would delete:".yellow().bold());
    } else {
        cli.status("Deleted assets:".cyan().bold());
    }
    for asset in &summary.deleted {
        cli.status(format!("  {} {}", "✓".green(), asset));
    }
    for asset in &summary.skipped {
        cli.status(format!("  {} {} (already missing)", "-".dimmed(), asset));
    }
    cli.status("");
    cli.status(format!("Total: {} assets", summary.deleted.len()).dimmed());
}
