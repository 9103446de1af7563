//! Plan command - runs the allocation engine offline

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::planner::PlannerSettings;
use crate::domain::{generate, ScheduleRequest};
use crate::infrastructure::export::render_csv;
use crate::infrastructure::logging;

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Generate request as JSON; `-` reads stdin
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

/// Run the plan command
pub async fn run(args: PlanArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_cli_logging(&config.logging);

    let settings = config
        .planner
        .to_settings()
        .context("Invalid planner configuration")?;

    let raw = read_input(&args.input).await?;
    let output = render_plan(&raw, &settings, args.format)?;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(output.as_bytes()).await?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;

    Ok(())
}

async fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .context("Failed to read request from stdin")?;
        return Ok(raw);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse a request, generate its schedule and format it
pub fn render_plan(
    raw: &str,
    settings: &PlannerSettings,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let request: ScheduleRequest =
        serde_json::from_str(raw).context("Request is not a valid generate request")?;

    debug!(courses = request.courses.len(), "Generating schedule");

    let schedule = generate(&request.profile, &request.courses, settings)
        .context("Schedule generation failed")?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&schedule)?),
        OutputFormat::Csv => Ok(render_csv(&schedule)),
    }
}
