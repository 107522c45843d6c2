use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};

use crate::state::AppState;
use crate::types::AppEvent;

pub mod drill;
pub mod history;
pub mod lookup;
pub mod practice;
pub mod sos;
pub mod talk;

use drill::handle_drill_toggle;
use history::{handle_drills, handle_history, handle_search, handle_stats};
use lookup::handle_lookup;
use practice::{handle_answer, handle_practice};
use sos::handle_sos;
use talk::handle_talk;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop for user '{}'", state.user);

    while let Ok(event) = input_rx.recv().await {
        tracing::debug!("[EVENT_LOOP] event: {:?}", std::mem::discriminant(&event));

        if let Err(e) = handle_events(state.clone(), &output_tx, event).await {
            tracing::error!("Event handling failed: {e}");
            output_tx.send(AppEvent::Status(format!("Error: {e}"))).await?;
        }
    }

    tracing::info!("[EVENT_LOOP] Input closed, stopping");
    Ok(())
}

async fn handle_events(
    state: Arc<AppState>,
    output_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Lookup { query, mode } => {
            handle_lookup(state, query, mode, output_tx).await?;
        }
        AppEvent::ToggleDrill { word, in_drill } => {
            handle_drill_toggle(&state, &word, in_drill, output_tx).await?;
        }
        AppEvent::ShowHistory { limit } => {
            handle_history(&state, limit, output_tx).await?;
        }
        AppEvent::ShowDrills => {
            handle_drills(&state, output_tx).await?;
        }
        AppEvent::ShowStats => {
            handle_stats(&state, output_tx).await?;
        }
        AppEvent::Search { prefix } => {
            handle_search(&state, &prefix, output_tx).await?;
        }
        AppEvent::Sos { text } => {
            handle_sos(&state, &text, output_tx).await?;
        }
        AppEvent::Practice => {
            handle_practice(&state, output_tx).await?;
        }
        AppEvent::Answer { text } => {
            handle_answer(&state, &text, output_tx).await?;
        }
        AppEvent::Talk { text } => {
            handle_talk(&state, &text, output_tx).await?;
        }
        AppEvent::Status(message) => {
            // Parser feedback, pass straight through
            output_tx.send(AppEvent::Status(message)).await?;
        }
        AppEvent::ShowResult { .. }
        | AppEvent::PersistenceWarning { .. }
        | AppEvent::LookupFailed { .. }
        | AppEvent::ShowEntries { .. }
        | AppEvent::ShowLines { .. } => {
            // Output-only events, ignore in backend
        }
    }

    Ok(())
}
