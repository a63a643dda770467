/*
[INPUT]:  CLI arguments, optional YAML configuration, AGRI_PREDICT_* environment, Ctrl-C
[OUTPUT]: One task page run: submit, render the result card, optionally fetch advice
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use agri_predict_adapter::{AgriClient, ImageFile, TaskKind};
use agri_predict_session::render::payload_summary;
use agri_predict_session::{AppConfig, ResultView, SessionStatus, TaskPage, TaskSession};

#[derive(Parser, Debug)]
#[command(name = "agri-predict", version, about = "Crop disease, irrigation and yield predictions")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,
    #[arg(long = "base-url", value_name = "URL")]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a leaf image
    Disease {
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
        #[command(flatten)]
        run: RunOpts,
    },
    /// Predict soil moisture and whether to irrigate
    Irrigation {
        #[arg(long)]
        temperature: Option<String>,
        #[arg(long)]
        humidity: Option<String>,
        #[arg(long)]
        rainfall: Option<String>,
        #[arg(long = "soil-type")]
        soil_type: Option<String>,
        #[arg(long)]
        ph: Option<String>,
        #[arg(long)]
        ec: Option<String>,
        #[arg(long = "previous-moisture")]
        previous_moisture: Option<String>,
        #[command(flatten)]
        run: RunOpts,
    },
    /// Predict crop yield
    Yield {
        #[arg(long)]
        crop: Option<String>,
        #[arg(long)]
        area: Option<String>,
        #[arg(long)]
        rainfall: Option<String>,
        #[arg(long)]
        temperature: Option<String>,
        #[arg(long)]
        season: Option<String>,
        #[arg(long = "soil-type")]
        soil_type: Option<String>,
        #[arg(long)]
        ph: Option<String>,
        #[arg(long = "fertilizer-level")]
        fertilizer_level: Option<String>,
        #[command(flatten)]
        run: RunOpts,
    },
    /// Show the backend banner and its routes
    Health,
}

#[derive(Args, Debug, Clone, Copy)]
struct RunOpts {
    /// Ask for agronomist advice after a successful prediction
    #[arg(long)]
    explain: bool,
    /// Validate inputs and print the request without sending it
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = AppConfig::load(args.config_path.as_deref()).context("load config")?;
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(base_url) = args.base_url {
        config.backend.base_url = base_url;
    }
    init_tracing(&config.log_level)?;

    info!(
        base_url = %config.backend.base_url,
        command = ?args.command,
        "starting agri-predict"
    );

    let (session, run) = match args.command {
        Command::Health => return health(&config).await,
        Command::Disease { file, run } => {
            let image = ImageFile::load(&file)
                .await
                .with_context(|| format!("read image {}", file.display()))?;
            let mut session = TaskSession::new(TaskKind::DiseaseDetection);
            session.select_file(image)?;
            (session, run)
        }
        Command::Irrigation {
            temperature,
            humidity,
            rainfall,
            soil_type,
            ph,
            ec,
            previous_moisture,
            run,
        } => {
            let session = fill_session(
                TaskKind::IrrigationPrediction,
                [
                    ("temperature", temperature),
                    ("humidity", humidity),
                    ("rainfall", rainfall),
                    ("soil_type", soil_type),
                    ("ph", ph),
                    ("ec", ec),
                    ("previous_moisture", previous_moisture),
                ],
            )?;
            (session, run)
        }
        Command::Yield {
            crop,
            area,
            rainfall,
            temperature,
            season,
            soil_type,
            ph,
            fertilizer_level,
            run,
        } => {
            let session = fill_session(
                TaskKind::YieldPrediction,
                [
                    ("crop", crop),
                    ("area", area),
                    ("rainfall", rainfall),
                    ("temperature", temperature),
                    ("season", season),
                    ("soil_type", soil_type),
                    ("ph", ph),
                    ("fertilizer_level", fertilizer_level),
                ],
            )?;
            (session, run)
        }
    };

    let payload = session.validate()?;
    if run.dry_run {
        println!("{}", payload_summary(&payload));
        info!("dry-run requested; inputs validated");
        return Ok(());
    }

    let client = AgriClient::with_config(config.client_config()).context("create client")?;
    let mut page = TaskPage::new(session, Arc::new(client));

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    page.submit()?;
    if !settle_or_leave(&mut page, &shutdown).await {
        return Ok(());
    }

    let session = page.session();
    match (session.status(), session.result()) {
        (SessionStatus::Succeeded, Some(result)) => println!("{}", ResultView(result)),
        _ => {
            let message = session.error().unwrap_or("prediction did not complete");
            return Err(anyhow!(message.to_string()));
        }
    }

    if run.explain {
        page.explain()?;
        if !settle_or_leave(&mut page, &shutdown).await {
            return Ok(());
        }
        if let Some(advice) = page.session().overlay().advice() {
            println!("\nAdvice:\n{advice}");
        }
    }

    Ok(())
}

/// Session with every provided field applied in order
fn fill_session<const N: usize>(
    task: TaskKind,
    fields: [(&str, Option<String>); N],
) -> Result<TaskSession> {
    let mut session = TaskSession::new(task);
    for (name, value) in fields {
        if let Some(value) = value {
            session.set_field(name, value)?;
        }
    }
    Ok(session)
}

/// Wait for in-flight calls. Returns false if the user left the page first.
async fn settle_or_leave(page: &mut TaskPage, shutdown: &CancellationToken) -> bool {
    let settled = tokio::select! {
        _ = shutdown.cancelled() => false,
        _ = page.settle() => true,
    };
    if !settled {
        info!(in_flight = page.in_flight(), "leaving page");
    }
    settled
}

async fn health(config: &AppConfig) -> Result<()> {
    let client = AgriClient::with_config(config.client_config()).context("create client")?;
    let banner = client.health().await.context("reach backend")?;
    println!("{}", banner.message);
    for route in banner.available_routes {
        println!("  {route}");
    }
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
