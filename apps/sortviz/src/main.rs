mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use playback::{PlaybackConfig, PlaybackController, PlaybackSession};
use shared::{
    domain::{InputSource, PlaybackView, RunState, SortingMethod, Step},
    error::ApiError,
    protocol::{PlaybackCommand, PlaybackEvent},
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::{self, error::RecvError},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sortviz", about = "Step-by-step sorting algorithm traces")]
struct Cli {
    /// Settings file; defaults to ./sortviz.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, short, global = true)]
    algorithm: Option<SortingMethod>,
    /// Comma separated integers; random data when omitted or unparseable.
    #[arg(long, short, global = true)]
    input: Option<String>,
    #[arg(long, short, global = true, value_parser = clap::value_parser!(u8).range(1..=100))]
    speed: Option<u8>,
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the whole trace without pacing.
    Trace {
        /// One JSON encoded step per line.
        #[arg(long)]
        json: bool,
    },
    /// Auto-play on the timer and stream the process log.
    Run,
    /// Drive playback with commands read from stdin.
    Interactive {
        /// Emit events as JSON lines instead of log text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn apply_overrides(&self, config: &mut PlaybackConfig) {
        if let Some(method) = self.algorithm {
            config.algorithm = method;
        }
        if let Some(speed) = self.speed {
            config.default_speed = speed;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }

    fn input_source(&self) -> InputSource {
        match &self.input {
            Some(text) => InputSource::Text(text.clone()),
            None => InputSource::Random,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = config::load_settings(cli.config.as_deref())?;
    cli.apply_overrides(&mut settings.playback);
    init_tracing(&settings.log_level);

    let controller = PlaybackController::with_source(settings.playback, cli.input_source())
        .context("invalid playback settings")?;
    info!(
        method = %controller.method(),
        speed = controller.speed(),
        "sortviz ready"
    );

    match cli.command {
        Command::Trace { json } => print_trace(&controller.view(), json),
        Command::Run => run(controller).await,
        Command::Interactive { json } => interactive(controller, json).await,
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_trace(view: &PlaybackView, json: bool) -> Result<()> {
    for (index, step) in tracer::trace(view.method, &view.array).enumerate() {
        if json {
            println!("{}", serde_json::to_string(&step)?);
        } else {
            println!("{}", format_step(index + 1, &step));
        }
    }
    Ok(())
}

fn format_step(number: usize, step: &Step) -> String {
    let array = step
        .array
        .iter()
        .enumerate()
        .map(|(index, value)| {
            if step.highlights.contains(&index) {
                format!("<{value}>")
            } else if step.sorted_indices.contains(&index) {
                format!("{value}*")
            } else {
                value.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{number:03} [{array}] {}", step.description)
}

async fn run(controller: PlaybackController) -> Result<()> {
    let session = PlaybackSession::new(controller);
    let mut events = session.subscribe();

    let view = session.view().await;
    let mut printed = 0;
    for line in &view.log {
        printed += 1;
        println!("{printed:03} {line}");
    }
    session.dispatch(PlaybackCommand::Start).await;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(PlaybackEvent::LogAppended { line }) => {
                    printed += 1;
                    println!("{printed:03} {line}");
                }
                Ok(PlaybackEvent::ViewUpdated { view }) if view.run_state == RunState::Completed => break,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                session.dispatch(PlaybackCommand::Pause).await;
                info!("interrupted; playback paused");
                break;
            }
        }
    }

    session.shutdown().await;
    Ok(())
}

async fn interactive(controller: PlaybackController, json: bool) -> Result<()> {
    let session = PlaybackSession::new(controller);
    let printer = tokio::spawn(print_events(session.subscribe(), json));

    if !json {
        eprintln!("{}", commands::HELP);
        for line in session.view().await.log {
            println!("{line}");
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "quit" | "exit") {
            break;
        }

        let parsed = match commands::parse_line(trimmed) {
            Ok(parsed) => parsed,
            Err(err) => {
                report_error(ApiError::from(err), json)?;
                continue;
            }
        };

        for command in parsed {
            let is_view = matches!(command, PlaybackCommand::View);
            let view = session.dispatch(command).await;
            if is_view {
                print_view(&view, json)?;
            }
        }
    }

    session.shutdown().await;
    printer.abort();
    Ok(())
}

async fn print_events(mut events: broadcast::Receiver<PlaybackEvent>, json: bool) {
    loop {
        match events.recv().await {
            Ok(event) if json => match serde_json::to_string(&event) {
                Ok(encoded) => println!("{encoded}"),
                Err(err) => warn!(%err, "failed to encode event"),
            },
            Ok(PlaybackEvent::LogAppended { line }) => println!("{line}"),
            Ok(PlaybackEvent::RunStateChanged { from, to }) => println!("-- {from} -> {to}"),
            Ok(PlaybackEvent::ViewUpdated { .. }) => {}
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

fn print_view(view: &PlaybackView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(view)?);
        return Ok(());
    }
    println!(
        "{} | {} | speed {} | steps {}",
        view.method, view.run_state, view.speed, view.steps_applied
    );
    println!("array:   {:?}", view.array);
    println!("focus:   {:?}", view.highlights);
    println!("sorted:  {:?}", view.sorted_indices);
    Ok(())
}

fn report_error(error: ApiError, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&error)?);
    } else {
        eprintln!("error: {}", error.message);
    }
    Ok(())
}
