//! Crawl Studio main entry point
//!
//! This is the command-line interface for the Crawl Studio client.

use anyhow::Context;
use clap::Parser;
use crawl_studio::client::{CrawlResult, HttpCrawlService};
use crawl_studio::config::{load_settings, ConfigurationModel, OutputFormat, Settings};
use crawl_studio::export::{export, save_artifact, ExportFormat};
use crawl_studio::session::{CrawlSession, SessionPhase, SessionState};
use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Crawl Studio: an interactive web crawler client
///
/// Sends a URL to a crawl service, shows progress while the service works,
/// and prints or exports the markdown and extracted data it returns.
#[derive(Parser, Debug)]
#[command(name = "crawl-studio")]
#[command(version)]
#[command(about = "Interactive client for a web crawling service", long_about = None)]
struct Cli {
    /// URL to crawl
    #[arg(value_name = "URL", required_unless_present = "health")]
    url: Option<String>,

    /// Path to TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the crawl service (overrides the settings file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Take screenshots of the page
    #[arg(long)]
    screenshots: bool,

    /// Collect image references
    #[arg(long)]
    extract_images: bool,

    /// Do not collect link references
    #[arg(long)]
    no_extract_links: bool,

    /// Show the browser window while crawling
    #[arg(long)]
    no_headless: bool,

    /// Seconds the service waits for the page to settle
    #[arg(long, value_name = "SECONDS")]
    wait_time: Option<String>,

    /// User agent the service presents to the site
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Format the service renders the page in (markdown, json, html)
    #[arg(long, value_name = "FORMAT")]
    output_format: Option<OutputFormat>,

    /// Enable AI extraction
    #[arg(long)]
    use_ai: bool,

    /// What the AI extraction should look for
    #[arg(long, value_name = "TEXT")]
    prompt: Option<String>,

    /// Restrict extraction to matching elements
    #[arg(long, value_name = "SELECTOR")]
    css_selector: Option<String>,

    /// Schema describing the data to extract
    #[arg(long, value_name = "TEXT")]
    schema: Option<String>,

    /// Export the result (markdown, json); may be repeated
    #[arg(long = "export", value_name = "FORMAT")]
    exports: Vec<ExportFormat>,

    /// Directory to write exports into (overrides the settings file)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Check that the crawl service is up and exit
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut settings = match &cli.config {
        Some(path) => {
            tracing::info!("Loading settings from: {}", path.display());
            load_settings(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?
        }
        None => Settings::default(),
    };
    if let Some(base_url) = &cli.base_url {
        settings.service.base_url = base_url.clone();
    }

    let service = HttpCrawlService::new(&settings.service)
        .with_context(|| format!("Invalid service base URL {}", settings.service.base_url))?;

    if cli.health {
        return handle_health(&service).await;
    }

    let model = build_configuration(&cli, &settings)?;
    let url = cli.url.clone().unwrap_or_default();
    let out_dir = cli
        .out_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.export.directory));

    handle_crawl(service, model, &url, &cli.exports, &out_dir).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_studio=warn,warn"),
            1 => EnvFilter::new("crawl_studio=info,warn"),
            2 => EnvFilter::new("crawl_studio=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies settings-file defaults, then command-line flags
fn build_configuration(cli: &Cli, settings: &Settings) -> anyhow::Result<ConfigurationModel> {
    let mut model = settings.configuration_model();

    if cli.screenshots {
        model.set_screenshots(true);
    }
    if cli.extract_images {
        model.set_extract_images(true);
    }
    if cli.no_extract_links {
        model.set_extract_links(false);
    }
    if cli.no_headless {
        model.set_headless(false);
    }
    if let Some(wait_time) = &cli.wait_time {
        model.set_wait_time(wait_time)?;
    }
    if let Some(user_agent) = &cli.user_agent {
        model.set_user_agent(user_agent.clone());
    }
    if let Some(output_format) = cli.output_format {
        model.set_output_format(output_format);
    }
    if cli.use_ai {
        model.set_use_ai(true);
    }
    if let Some(prompt) = &cli.prompt {
        model.set_extraction_prompt(prompt.clone());
    }
    if let Some(css_selector) = &cli.css_selector {
        model.set_css_selector(css_selector.clone());
    }
    if let Some(schema) = &cli.schema {
        model.set_schema(schema.clone());
    }

    Ok(model)
}

/// Handles the --health mode
async fn handle_health(service: &HttpCrawlService) -> anyhow::Result<ExitCode> {
    let health = service
        .health_check()
        .await
        .context("Health check failed")?;

    println!("{} {} ({})", health.service, health.version, health.status);

    if health.is_healthy() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Handles the main crawl operation
async fn handle_crawl(
    service: HttpCrawlService,
    model: ConfigurationModel,
    url: &str,
    exports: &[ExportFormat],
    out_dir: &Path,
) -> anyhow::Result<ExitCode> {
    let session = CrawlSession::new(service, model);
    let renderer = tokio::spawn(render_progress(session.subscribe()));

    let state = session.submit(url).await?;
    let _ = renderer.await;

    match state.phase {
        SessionPhase::Succeeded => {
            if let Some(result) = &state.result {
                print!("{}", render_results(result)?);
            }
            for format in exports {
                if let Some(artifact) = session.export(*format)? {
                    let path = save_artifact(&artifact, out_dir)?;
                    println!("✓ Exported {} to: {}", format, path.display());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            let message = state.error.as_deref().unwrap_or("Crawl did not complete");
            eprintln!("✗ {}", message);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Draws the progress line on stderr until the session settles
async fn render_progress(mut rx: watch::Receiver<SessionState>) {
    let mut stderr = std::io::stderr();
    let mut drawn = false;

    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        if state.is_in_flight() {
            let _ = write!(stderr, "\rCrawling in progress... {:>3}%", state.progress);
            let _ = stderr.flush();
            drawn = true;
        } else if state.phase.is_terminal() {
            if drawn {
                let _ = writeln!(stderr, "\rCrawling in progress... {:>3}%", state.progress);
            }
            break;
        }
    }
}

/// Renders statistics, markdown, and extracted data
///
/// The extracted data section is left out when the service sent none.
fn render_results(result: &CrawlResult) -> anyhow::Result<String> {
    let mut out = String::from("=== Crawl Results ===\n\n");
    if let Some(title) = &result.title {
        writeln!(out, "Title: {}", title)?;
    }
    if let Some(url) = &result.url {
        writeln!(out, "URL: {}", url)?;
    }

    if let Some(metadata) = &result.metadata {
        writeln!(out, "\nCrawl Statistics:")?;
        writeln!(out, "  Crawl Time:   {}", metadata.crawl_time)?;
        writeln!(out, "  Word Count:   {}", metadata.word_count)?;
        writeln!(out, "  Links Found:  {}", metadata.link_count)?;
        writeln!(out, "  Images Found: {}", metadata.image_count)?;
    }

    writeln!(out, "\n--- Markdown ---\n")?;
    writeln!(out, "{}", result.markdown.as_deref().unwrap_or_default())?;

    if result.extracted_data.is_some() {
        if let Some(data) = export(Some(result), ExportFormat::Json)? {
            writeln!(out, "\n--- Extracted Data ---\n")?;
            writeln!(out, "{}", data.as_text())?;
        }
    }

    Ok(out)
}
