use kanal::AsyncSender;

use crate::state::AppState;
use crate::types::AppEvent;

const SEARCH_LIMIT: usize = 10;

pub async fn handle_history(
    state: &AppState,
    limit: Option<usize>,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let limit = match limit {
        Some(limit) => limit,
        None => state.config.read().await.lookup.history_limit,
    };

    let entries = state.resolver.store().recent(&state.user, limit).await?;
    output_tx
        .send(AppEvent::ShowEntries {
            title: format!("Recent lookups ({})", entries.len()),
            entries,
        })
        .await?;
    Ok(())
}

pub async fn handle_drills(state: &AppState, output_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let entries = state.resolver.store().drill_words(&state.user).await?;
    output_tx
        .send(AppEvent::ShowEntries {
            title: format!("Drill words ({})", entries.len()),
            entries,
        })
        .await?;
    Ok(())
}

pub async fn handle_stats(state: &AppState, output_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let lines = state
        .resolver
        .dictionary()
        .stats()
        .into_iter()
        .map(|meta| {
            format!(
                "#{} {} - {} entries{}",
                meta.priority,
                meta.name,
                meta.entry_count,
                if meta.description.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", meta.description)
                }
            )
        })
        .collect();

    output_tx
        .send(AppEvent::ShowLines {
            title: "Dictionary sources".to_string(),
            lines,
        })
        .await?;
    Ok(())
}

pub async fn handle_search(
    state: &AppState,
    prefix: &str,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let lines = state
        .resolver
        .dictionary()
        .search_prefix(prefix, SEARCH_LIMIT)
        .await;

    output_tx
        .send(AppEvent::ShowLines {
            title: format!("Words starting with '{prefix}'"),
            lines,
        })
        .await?;
    Ok(())
}
