use kanal::AsyncSender;
use starspeak_ai::ChatTurn;

use crate::state::AppState;
use crate::types::AppEvent;

pub async fn handle_talk(state: &AppState, text: &str, output_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let Some(coach) = &state.coach else {
        output_tx
            .send(AppEvent::Status("Free talk needs AI mode".to_string()))
            .await?;
        return Ok(());
    };

    let mut conversation = state.conversation.lock().await;
    conversation.push(ChatTurn::user(text));

    match coach.free_talk(&conversation).await {
        Ok(reply) => {
            conversation.push(ChatTurn::model(reply.clone()));
            output_tx
                .send(AppEvent::ShowLines {
                    title: "Coach".to_string(),
                    lines: vec![reply],
                })
                .await?;
        }
        Err(e) => {
            // Unanswered, keep history in user/model pairs
            conversation.pop();
            tracing::warn!("Free talk failed: {e}");
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
