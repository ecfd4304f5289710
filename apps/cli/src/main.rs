use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chatter_core::{
    BackendConfig, HttpBackend, LifecycleState, RequestLifecycleController, format_sentiment,
    format_summary_readable,
};

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

#[derive(Parser)]
#[command(name = "chatter")]
#[command(about = "Summarize YouTube comments with a remote summarization backend")]
struct Cli {
    /// Summarization backend base URL (overrides config file and CHATTER_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Client-side request timeout in seconds (overrides CHATTER_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize the comments of a video
    Summarize {
        /// Video URL
        url: String,

        /// Also print the raw per-chunk summaries
        #[arg(short, long)]
        chunks: bool,

        /// Print the result as JSON instead of readable text
        #[arg(long)]
        json: bool,
    },
    /// Check that the backend is reachable
    Ping,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = BackendConfig::load()
        .and_then(|c| c.with_overrides(cli.backend_url, cli.timeout))
        .context("Invalid backend configuration")?;
    let backend = HttpBackend::new(&config)?;
    debug!(
        base_url = %config.base_url,
        timeout = ?config.timeout,
        "resolved backend configuration"
    );

    match cli.command {
        Command::Summarize { url, chunks, json } => summarize(backend, &url, chunks, json).await,
        Command::Ping => ping(backend).await,
    }
}

async fn summarize(backend: HttpBackend, url: &str, chunks: bool, json: bool) -> Result<()> {
    if !json {
        println!(
            "\n{}  {}\n",
            style("chatter").cyan().bold(),
            style("Comment Summarizer").dim()
        );
    }

    let mut controller = RequestLifecycleController::new(backend);
    let started = Instant::now();
    let spinner = create_spinner("Working magic...");

    let state = controller.submit(url).await?;

    match state {
        LifecycleState::Done(result) => {
            spinner.finish_and_clear();
            if json {
                println!("{}", serde_json::to_string_pretty(result)?);
                return Ok(());
            }

            println!(
                "{} Summarized: {} {}",
                style("✓").green().bold(),
                style(format_sentiment(result)).yellow(),
                style(format!("[{}]", format_duration(started.elapsed()))).dim()
            );
            println!("{}", style("─".repeat(60)).dim());
            println!("{}", format_summary_readable(result, chunks));
            Ok(())
        }
        LifecycleState::Error(message) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", style("Failed:").red().bold(), message);
            std::process::exit(1);
        }
        LifecycleState::Ready | LifecycleState::Loading => {
            spinner.finish_and_clear();
            anyhow::bail!("summarize request did not complete")
        }
    }
}

async fn ping(backend: HttpBackend) -> Result<()> {
    let target = backend.probe_url().clone();
    let spinner = create_spinner("Contacting backend...");
    let started = Instant::now();

    match backend.probe().await {
        Ok(()) => {
            spinner.finish_with_message(format!(
                "{} Backend reachable: {} {}",
                style("✓").green().bold(),
                style(target).cyan(),
                style(format!("[{}]", format_duration(started.elapsed()))).dim()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", style("Unreachable:").red().bold(), e);
            std::process::exit(1);
        }
    }
}
