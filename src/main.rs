use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info, warn};

use uilint::cleanup::{backend_for, CleanupMode, ScreenshotRemover};
use uilint::messages::{rule_message, text, Lang, Msg};
use uilint::{Config, LintError, Project, ReportFormat, Reporter, RuleEngine, RuleId};

const BANNER: &str = "UiLint - A static code analyzer for UiPath XAML files";

/// UiLint - A static code analyzer for UiPath XAML files
#[derive(Parser, Debug)]
#[command(name = "uilint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the UiPath project directory
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Message language
    #[arg(long, value_enum)]
    lang: Option<Lang>,

    /// Print Azure Pipelines logging commands (same as --format vsts)
    #[arg(long)]
    vsts: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print the banner
    #[arg(long)]
    nologo: bool,

    /// Remove screenshots no workflow references
    #[arg(long, value_enum, value_name = "MODE")]
    remove_screenshots: Option<CleanupMode>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Workflow patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Rule ids to disable (can be specified multiple times)
    #[arg(long, value_name = "RULE")]
    disable: Vec<String>,

    /// Check workflows in parallel
    #[arg(long)]
    parallel: bool,

    /// List the rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    debug!("UiLint v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(code) => code,
        Err(e) if e.is_broken_pipe() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> uilint::Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if cli.dir.is_dir() {
        Config::from_default_locations(&cli.dir)?
    } else {
        Config::default()
    };

    // Override with CLI arguments
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.iter().cloned());
    }
    if !cli.disable.is_empty() {
        config.disabled_rules.extend(cli.disable.iter().cloned());
    }
    if let Some(lang) = cli.lang {
        config.report.lang = lang;
    }
    if cli.vsts {
        config.report.format = ReportFormat::Vsts;
    } else if let Some(format) = cli.format {
        config.report.format = format;
    }

    Ok(config)
}

fn run(cli: &Cli) -> uilint::Result<ExitCode> {
    let config = load_config(cli)?;
    let lang = config.report.lang;
    let format = config.report.format;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list_rules {
        list_rules(&mut out, lang)?;
        return Ok(ExitCode::SUCCESS);
    }

    let project = match Project::open(&cli.dir, &config) {
        Ok(project) => project,
        Err(e @ LintError::NotADirectory(_)) => {
            debug!("{}", e);
            eprintln!("{}", text(Msg::DirectoryNotFound, lang));
            return Ok(ExitCode::FAILURE);
        }
        Err(e @ LintError::NoWorkflowFiles(_)) => {
            debug!("{}", e);
            eprintln!("{}", text(Msg::NoWorkflows, lang));
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e),
    };

    if !cli.nologo && format != ReportFormat::Json {
        writeln!(out, "{}", BANNER)?;
    }

    let engine = RuleEngine::new(config.rules.clone()).with_disabled(config.disabled_rule_ids());
    let start_time = Instant::now();

    let report = if cli.parallel || cli.quiet {
        project.lint_with(&engine, cli.parallel, None)?
    } else {
        let pb = ProgressBar::new(project.workflows().len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        let report = project.lint_with(&engine, false, Some(&pb));
        pb.finish_and_clear();
        report?
    };

    info!(
        "Checked {} workflows in {:.2?}",
        report.files_analyzed,
        start_time.elapsed()
    );

    let color = format == ReportFormat::Plain && cli.output.is_none() && io::stdout().is_terminal();
    if !color {
        colored::control::set_override(false);
    }
    let reporter = Reporter::new(format, lang).with_color(color);

    let summary = match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| LintError::io(path, e))?;
            let mut writer = BufWriter::new(file);
            let summary = reporter.report(&mut writer, &report)?;
            writer.flush()?;
            info!("Report written to: {}", path.display());
            summary
        }
        None => reporter.report(&mut out, &report)?,
    };

    if let Some(mode) = cli.remove_screenshots {
        if report.is_complete() {
            let mut backend = backend_for(mode);
            let mut remover = ScreenshotRemover::new(backend.as_mut(), lang);
            // stdout carries a single JSON document
            if format == ReportFormat::Json {
                remover.remove_all(&mut io::stderr().lock(), &report.orphans)?;
            } else {
                remover.remove_all(&mut out, &report.orphans)?;
            }
        } else {
            warn!("{} workflows could not be parsed", report.malformed.len());
            eprintln!("{}", text(Msg::CleanupSkipped, lang));
        }
    }

    reporter.complete(&mut out, &summary)?;
    out.flush()?;

    if format == ReportFormat::Vsts || !summary.has_error {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn list_rules<W: Write>(out: &mut W, lang: Lang) -> io::Result<()> {
    for rule in RuleId::all() {
        let category = match rule.category() {
            uilint::Category::Error => "error".red(),
            uilint::Category::Warning => "warning".yellow(),
        };
        writeln!(
            out,
            "{:<28} {:<8} {}",
            rule.code(),
            category,
            rule_message(*rule, lang)
        )?;
    }
    Ok(())
}
