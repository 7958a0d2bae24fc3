//! CLI command definitions, routing, presentation, and tracing setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anchorprobe_core::pipeline::{ProgressReporter, extract};
use anchorprobe_shared::{
    AnchorProbeError, AppConfig, CONTENT_MARKER, Extraction, FetchOptions, Notice, init_config,
    init_config_at, load_config, load_config_from,
};
use clap::{Parser, Subcommand};
use color_eyre::Section;
use color_eyre::eyre::{Report, Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// anchorprobe — list the anchor texts of an Elementor blog post.
#[derive(Parser)]
#[command(
    name = "anchorprobe",
    version,
    about = "Extract the anchor texts of links inside an Elementor post's content widget.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.anchorprobe/anchorprobe.toml.
    #[arg(long, env = "ANCHORPROBE_CONFIG", global = true)]
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

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(eyre!(
                "invalid output format '{other}': expected 'text' or 'json'"
            )),
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch a blog post and list the anchor texts in its content widget.
    Extract {
        /// URL of the blog post.
        url: String,

        /// Seconds to wait for the page (overrides config).
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Output format: text or json (overrides config).
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "anchorprobe=warn",
        1 => "anchorprobe=info",
        2 => "anchorprobe=debug",
        _ => "anchorprobe=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
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
///
/// The config file is read only by commands that consume it, so
/// `config init` can replace a file that no longer parses.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Extract {
            url,
            timeout,
            format,
        } => cmd_extract(config_path, &url, timeout, format).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path).await,
            ConfigAction::Show => cmd_config_show(config_path).await,
        },
    }
}

/// Load the `--config` file if given, else the default location.
fn resolve_config(path: Option<&Path>) -> anchorprobe_shared::Result<AppConfig> {
    match path {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}

async fn cmd_extract(
    config_path: Option<&Path>,
    url: &str,
    timeout: Option<u64>,
    format: Option<OutputFormat>,
) -> Result<()> {
    if url.trim().is_empty() {
        return Err(eyre!("please enter a URL to proceed"));
    }

    let config = resolve_config(config_path).map_err(with_hint)?;

    let format = match format {
        Some(f) => f,
        None => config.output.format.parse()?,
    };

    let mut opts = FetchOptions::from(&config);
    if let Some(secs) = timeout {
        if secs == 0 {
            return Err(eyre!("--timeout must be greater than zero"));
        }
        opts.timeout = Duration::from_secs(secs);
    }

    info!(url, timeout_secs = opts.timeout.as_secs(), "extracting anchors");

    let reporter = CliProgress::new();
    let outcome = extract(url, &opts, &reporter).await;
    reporter.finish();

    match outcome {
        Ok(extraction) => {
            match format {
                OutputFormat::Text => print!("{}", render_text(&extraction)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&extraction)?),
            }
            Ok(())
        }
        Err(err) => {
            if format == OutputFormat::Json {
                let body = serde_json::json!({
                    "error": { "kind": err.kind(), "message": err.to_string() }
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            Err(with_hint(err))
        }
    }
}

async fn cmd_config_init(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => init_config_at(path),
        None => init_config(),
    }
    .map_err(with_hint)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path).map_err(with_hint)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Human-readable listing of an extraction.
fn render_text(extraction: &Extraction) -> String {
    let mut lines = Vec::new();

    if extraction.anchors.is_empty() {
        lines.push("No backlinks found.".to_string());
        if let Some(notice) = extraction.notice {
            lines.push(format!("  {notice}"));
            if notice == Notice::NoRegionFound {
                lines.push(format!(
                    "  Ensure the URL is correct and the post uses the '{CONTENT_MARKER}' class for its main content."
                ));
            }
        }
    } else {
        lines.push(format!("Backlinks found: {}", extraction.anchors.len()));
        if extraction.regions > 1 {
            lines.push(format!("Content regions: {}", extraction.regions));
        }
        lines.push(String::new());
        lines.extend(extraction.anchors.iter().map(|anchor| format!("- {anchor}")));
    }

    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Wrap a domain error in a report carrying its next-step hint.
fn with_hint(err: AnchorProbeError) -> Report {
    let hint = error_hint(&err);
    Report::new(err).suggestion(hint)
}

/// Next step to suggest for each failure kind.
fn error_hint(err: &AnchorProbeError) -> &'static str {
    match err {
        AnchorProbeError::Timeout { .. } => {
            "The server took too long to respond. Check the URL or your connection speed, or raise --timeout."
        }
        AnchorProbeError::ConnectionFailure { .. } => {
            "Could not reach the host. Check your internet connection and the URL's domain."
        }
        AnchorProbeError::HttpStatus { .. } => {
            "The URL may be invalid or the server is not responding correctly."
        }
        AnchorProbeError::Request { .. } => {
            "Check the URL (including http:// or https://) or your internet connection."
        }
        AnchorProbeError::Parse { .. } => {
            "The URL does not appear to serve an HTML page."
        }
        AnchorProbeError::Validation { .. } => "Please enter a URL to proceed.",
        AnchorProbeError::Config { .. } | AnchorProbeError::Io { .. } => {
            "Run `anchorprobe config init` to write a fresh default config."
        }
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner on stderr.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn region(&self, index: usize, total: usize) {
        self.spinner
            .set_message(format!("Processing content region {}/{total}", index + 1));
    }

    fn done(&self, _extraction: &Extraction) {
        self.spinner.finish_and_clear();
    }
}
