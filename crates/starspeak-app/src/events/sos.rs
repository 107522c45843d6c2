use kanal::AsyncSender;

use crate::state::AppState;
use crate::types::AppEvent;

pub async fn handle_sos(state: &AppState, text: &str, output_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let Some(coach) = &state.coach else {
        output_tx
            .send(AppEvent::Status("SOS needs AI mode".to_string()))
            .await?;
        return Ok(());
    };

    match coach.sos(text).await {
        Ok(suggestion) => {
            let mut lines = vec![suggestion.native];
            if !suggestion.explanation.is_empty() {
                lines.push(suggestion.explanation);
            }
            output_tx
                .send(AppEvent::ShowLines {
                    title: format!("Say it like a native: {text}"),
                    lines,
                })
                .await?;
        }
        Err(e) => {
            tracing::warn!("SOS for '{}' failed: {e}", text);
            output_tx
                .send(AppEvent::LookupFailed {
                    query: text.to_string(),
                    message: e.to_string(),
                    retryable: true,
                })
                .await?;
        }
    }

    Ok(())
}
