//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use guidegen_core::pipeline::{
    GenerateConfig, GenerateResult, GuideStatus, ProgressReporter, WrittenGuide,
};
use guidegen_shared::{GuideGenConfig, init_config, load_config, load_config_from};
use guidegen_storage::FsStore;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// guidegen — render matched guide configs into markdown guides.
#[derive(Parser)]
#[command(
    name = "guidegen",
    version,
    about = "Render matched guide configs into markdown guides for the docs site.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./guidegen.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render every guide, write it to the content tree, and save the collection.
    Run {
        #[command(flatten)]
        paths: PathOverrides,
    },

    /// Report guides whose file on disk differs from a fresh render. Writes nothing.
    Check {
        #[command(flatten)]
        paths: PathOverrides,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags that override `[paths]` from the config file.
#[derive(Args, Debug, Default)]
pub(crate) struct PathOverrides {
    /// Project root.
    #[arg(long)]
    pub root_dir: Option<PathBuf>,

    /// Content tree guides are written into, relative to the root.
    #[arg(long)]
    pub content_dir: Option<PathBuf>,

    /// Scratch directory holding the collection, relative to the root.
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default guidegen.toml.
    Init {
        /// Directory to create the file in.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "guidegen=info",
        1 => "guidegen=debug",
        _ => "guidegen=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Run { paths } => cmd_run(&resolve_config(config_path, &paths)?).await,
        Command::Check { paths } => cmd_check(&resolve_config(config_path, &paths)?).await,
        Command::Config { action } => match action {
            ConfigAction::Init { dir } => cmd_config_init(&dir),
            ConfigAction::Show => cmd_config_show(&resolve_config(
                config_path,
                &PathOverrides::default(),
            )?),
        },
    }
}

/// Load the config file (explicit path, or ./guidegen.toml) and apply flag overrides.
fn resolve_config(path: Option<&Path>, overrides: &PathOverrides) -> Result<GuideGenConfig> {
    let mut config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config(Path::new("."))?,
    };

    if let Some(root) = &overrides.root_dir {
        config.paths.root_dir = root.clone();
    }
    if let Some(content) = &overrides.content_dir {
        config.paths.content_write_dir = content.clone();
    }
    if let Some(temp) = &overrides.temp_dir {
        config.paths.temp_write_dir = temp.clone();
    }

    Ok(config)
}

async fn cmd_run(config: &GuideGenConfig) -> Result<()> {
    let generate_config = GenerateConfig::from(config);

    info!(
        collection = %generate_config.collection_path.display(),
        content_root = %generate_config.content_root.display(),
        "generating guides"
    );

    let reporter = CliProgress::new();
    let result = guidegen_core::pipeline::generate_guides(&FsStore, &generate_config, &reporter)
        .await
        .inspect_err(|_| reporter.spinner.abandon())?;

    println!();
    println!("  Guides generated!");
    println!("  Written:   {}", result.guides.len());
    println!("  Skipped:   {} unhandled section(s)", result.unhandled_sections);
    println!("  Content:   {}", generate_config.content_root.display());
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_check(config: &GuideGenConfig) -> Result<()> {
    let generate_config = GenerateConfig::from(config);
    let report = guidegen_core::pipeline::check_guides(&FsStore, &generate_config).await?;

    for guide in report.outdated() {
        let label = match guide.status {
            GuideStatus::Missing => "missing",
            GuideStatus::Stale => "stale",
            GuideStatus::UpToDate => continue,
        };
        println!("  {label:<8} {} ({})", guide.id, guide.path.display());
    }

    let outdated = report.outdated().count();
    if outdated > 0 {
        return Err(eyre!(
            "{outdated} of {} guide(s) out of date; run `guidegen run`",
            report.guides.len()
        ));
    }

    println!("  All {} guide(s) up to date.", report.guides.len());
    Ok(())
}

fn cmd_config_init(dir: &Path) -> Result<()> {
    let path = init_config(dir)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &GuideGenConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    println!("# collection: {}", config.collection_path().display());
    println!("# content:    {}", config.content_root().display());
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn guide_written(&self, guide: &WrittenGuide, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Generating [{current}/{total}] {}", guide.id));
    }

    fn done(&self, _result: &GenerateResult) {
        self.spinner.finish_and_clear();
    }
}
