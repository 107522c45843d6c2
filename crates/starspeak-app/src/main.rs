use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use kanal::{AsyncReceiver, AsyncSender};
use starspeak_core::types::{LookupMode, UserId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod events;
pub mod profile;
pub mod render;
pub mod state;
pub mod types;

use self::events::event_loop;
use self::events::lookup::outcome_events;
use self::render::render;
use self::state::AppState;
use self::types::{AppEvent, parse_command};

#[cfg(test)]
mod tests;

/// English lookup with tiered dictionaries and AI fallback
#[derive(Parser, Debug)]
#[command(name = "starspeak", version)]
struct Args {
    /// User whose history is read and written
    #[arg(long)]
    user: Option<String>,

    /// `ai` or `offline`; overrides the profile
    #[arg(long)]
    mode: Option<LookupMode>,

    /// Profile name under the profiles folder
    #[arg(long, default_value = "main")]
    profile: String,

    /// Plain config file, skips profiles
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Look these up and exit instead of reading stdin
    queries: Vec<String>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.json_logs);

    let config = profile::load_user_profile(&args.profile, args.config.as_deref())?;

    let mode = match args.mode {
        Some(mode) => mode,
        None => config.lookup.mode.parse().unwrap_or_else(|e| {
            tracing::warn!("{e}, using AI mode");
            LookupMode::Ai
        }),
    };
    let user = UserId::new(args.user.unwrap_or_else(|| config.default_user.clone()));

    let state = Arc::new(AppState::build(config, user, mode).await?);

    if !args.queries.is_empty() {
        return lookup_once(&state, &args.queries).await;
    }

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    run(state, shutdown).await;
    Ok(())
}

async fn lookup_once(state: &AppState, queries: &[String]) -> anyhow::Result<()> {
    for query in queries {
        let outcome = state.resolver.resolve(&state.user, query, state.default_mode).await;
        for event in outcome_events(query, outcome) {
            if let Some(text) = render(&event) {
                print!("{text}");
            }
        }
    }
    Ok(())
}

pub async fn run(state: Arc<AppState>, shutdown: impl Future<Output = ()>) {
    let (input_tx, input_rx) = kanal::unbounded_async::<AppEvent>();
    let (output_tx, output_rx) = kanal::unbounded_async::<AppEvent>();

    let server_state = Arc::clone(&state);
    let server = tokio::spawn(async move {
        if let Err(e) = event_loop(server_state, input_rx, output_tx).await {
            tracing::error!("event_loop exited: {e}");
        }
    });

    let reader = tokio::spawn(read_input(input_tx));
    let printer = tokio::spawn(print_output(output_rx));

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
        }
        // Closes once stdin and every in-flight lookup are done
        result = printer => {
            if let Err(e) = result {
                tracing::error!("printer task panicked: {e}");
            }
        }
    }

    reader.abort();
    server.abort();
}

/// Feed stdin lines into the event loop
async fn read_input(input_tx: AsyncSender<AppEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let Some(event) = parse_command(&line) else {
                    continue;
                };
                if input_tx.send(event).await.is_err() {
                    tracing::warn!("event loop gone, stop reading input");
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!("failed to read input: {e}");
                break;
            }
        }
    }
}

async fn print_output(output_rx: AsyncReceiver<AppEvent>) {
    while let Ok(event) = output_rx.recv().await {
        if let Some(text) = render(&event) {
            print!("{text}");
        }
    }
}
