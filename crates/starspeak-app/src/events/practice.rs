use kanal::AsyncSender;

use crate::state::{AppState, PracticeRound};
use crate::types::AppEvent;

/// Words per roleplay round
const ROUND_WORDS: usize = 3;

pub async fn handle_practice(state: &AppState, output_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let Some(coach) = &state.coach else {
        output_tx
            .send(AppEvent::Status("Practice needs AI mode".to_string()))
            .await?;
        return Ok(());
    };

    let words: Vec<String> = state
        .resolver
        .store()
        .drill_words(&state.user)
        .await?
        .into_iter()
        .take(ROUND_WORDS)
        .map(|entry| entry.word)
        .collect();

    if words.is_empty() {
        output_tx
            .send(AppEvent::Status("No drill words yet, add some with :drill <word>".to_string()))
            .await?;
        return Ok(());
    }

    let scenario = match coach.drill_scenario(&words).await {
        Ok(scenario) => scenario,
        Err(e) => {
            tracing::warn!("Drill scenario failed: {e}");
            output_tx
                .send(AppEvent::LookupFailed {
                    query: words.join(", "),
                    message: e.to_string(),
                    retryable: true,
                })
                .await?;
            return Ok(());
        }
    };

    tracing::info!("Practice round with {:?}", words);
    output_tx
        .send(AppEvent::ShowLines {
            title: "Practice".to_string(),
            lines: vec![scenario.clone(), format!("Use: {}", words.join(", "))],
        })
        .await?;

    *state.practice.lock().await = Some(PracticeRound { scenario, words });
    Ok(())
}

pub async fn handle_answer(state: &AppState, text: &str, output_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let (Some(coach), Some(round)) = (&state.coach, state.practice.lock().await.clone()) else {
        output_tx
            .send(AppEvent::Status("No practice round, start one with :practice".to_string()))
            .await?;
        return Ok(());
    };

    match coach.check_drill(&round.scenario, text).await {
        Ok(verdict) => {
            if verdict.passed {
                // Round is over
                state.practice.lock().await.take();
            }
            let title = if verdict.passed { "Passed" } else { "Try again" };
            output_tx
                .send(AppEvent::ShowLines {
                    title: title.to_string(),
                    lines: vec![verdict.feedback],
                })
                .await?;
        }
        Err(e) => {
            tracing::warn!("Drill check failed: {e}");
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
