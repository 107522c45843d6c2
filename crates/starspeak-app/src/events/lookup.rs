use std::sync::Arc;

use kanal::AsyncSender;
use starspeak_core::error::LookupError;
use starspeak_core::types::LookupMode;
use starspeak_core::{LookupRequest, Resolved};

use crate::state::AppState;
use crate::types::AppEvent;

/// Resolve in the background so a newer query can cancel this one
pub async fn handle_lookup(
    state: Arc<AppState>,
    query: String,
    mode: Option<LookupMode>,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (in_drill, ai_enabled) = {
        let config = state.config.read().await;
        (config.lookup.add_to_drill, config.ai.enabled)
    };

    let mut mode = mode.unwrap_or(state.default_mode);
    if mode == LookupMode::Ai && !ai_enabled {
        tracing::debug!("AI disabled, downgrading '{}' to offline", query);
        mode = LookupMode::Offline;
    }

    let token = state.begin_lookup();
    let output_tx = output_tx.clone();

    tokio::spawn(async move {
        tracing::info!("Looking up '{}' ({})", query, mode);
        let request = LookupRequest::new(state.user.clone(), query.clone(), mode)
            .in_drill(in_drill)
            .cancel_token(token);

        let outcome = state.resolver.resolve_request(request).await;
        if let Err(e) = send_outcome(&output_tx, &query, outcome).await {
            tracing::error!("Failed to deliver lookup result: {e}");
        }
    });

    Ok(())
}

/// Events a finished lookup produces
pub fn outcome_events(query: &str, outcome: Result<Resolved, LookupError>) -> Vec<AppEvent> {
    match outcome {
        Ok(resolved) => {
            let word = resolved.entry.word.clone();
            let mut events = vec![AppEvent::ShowResult {
                entry: resolved.entry,
                origin: resolved.origin,
            }];

            if let Some(failure) = resolved.persistence {
                events.push(AppEvent::PersistenceWarning {
                    word,
                    reason: failure.source.to_string(),
                });
            }
            events
        }
        Err(LookupError::Cancelled) => {
            tracing::debug!("Lookup for '{}' superseded", query);
            vec![AppEvent::Status(format!("'{query}' superseded"))]
        }
        Err(e) => vec![AppEvent::LookupFailed {
            query: query.to_string(),
            retryable: e.is_retryable(),
            message: e.to_string(),
        }],
    }
}

async fn send_outcome(
    output_tx: &AsyncSender<AppEvent>,
    query: &str,
    outcome: Result<Resolved, LookupError>,
) -> anyhow::Result<()> {
    for event in outcome_events(query, outcome) {
        output_tx.send(event).await?;
    }
    Ok(())
}
