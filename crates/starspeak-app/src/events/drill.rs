use kanal::AsyncSender;
use starspeak_core::types::LookupKey;

use crate::state::AppState;
use crate::types::AppEvent;

pub async fn handle_drill_toggle(
    state: &AppState,
    word: &str,
    in_drill: bool,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Ok(key) = LookupKey::parse(word) else {
        output_tx.send(AppEvent::Status("Nothing to toggle".to_string())).await?;
        return Ok(());
    };

    let found = state
        .resolver
        .store()
        .set_in_drill(&state.user, &key, in_drill)
        .await?;

    let status = match (found, in_drill) {
        (false, _) => format!("'{word}' is not in your history yet"),
        (true, true) => format!("Added '{word}' to drills"),
        (true, false) => format!("Removed '{word}' from drills"),
    };
    tracing::info!("{}", status);
    output_tx.send(AppEvent::Status(status)).await?;

    Ok(())
}
