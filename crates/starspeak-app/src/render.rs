use std::fmt::Write;

use starspeak_core::types::{Origin, WordEntry};

use crate::types::AppEvent;

fn origin_label(origin: &Origin) -> String {
    match origin {
        Origin::Cache => "history".to_string(),
        Origin::Dictionary { source } => source.clone(),
        Origin::Ai => "AI".to_string(),
    }
}

fn write_entry(out: &mut String, entry: &WordEntry) {
    let _ = write!(out, "{}", entry.word);
    if !entry.phonetic.is_empty() {
        let _ = write!(out, "  {}", entry.phonetic);
    }
    if entry.in_drill {
        out.push_str("  [drill]");
    }
    out.push('\n');
    let _ = writeln!(out, "  {}", entry.translation_cn);
    if !entry.definition.is_empty() {
        let _ = writeln!(out, "  {}", entry.definition);
    }
    if !entry.example.is_empty() {
        let _ = writeln!(out, "  e.g. {}", entry.example);
    }
}

/// Text shown for an output event; `None` for input events
pub fn render(event: &AppEvent) -> Option<String> {
    let mut out = String::new();

    match event {
        AppEvent::ShowResult { entry, origin } => {
            write_entry(&mut out, entry);
            let _ = writeln!(out, "  ({})", origin_label(origin));
        }
        AppEvent::PersistenceWarning { word, reason } => {
            let _ = writeln!(out, "warning: '{word}' was not saved to history: {reason}");
        }
        AppEvent::LookupFailed {
            query,
            message,
            retryable,
        } => {
            let _ = write!(out, "{query}: {message}");
            if *retryable {
                out.push_str(" (try again)");
            }
            out.push('\n');
        }
        AppEvent::ShowEntries { title, entries } => {
            let _ = writeln!(out, "== {title} ==");
            for entry in entries {
                write_entry(&mut out, entry);
            }
        }
        AppEvent::ShowLines { title, lines } => {
            let _ = writeln!(out, "== {title} ==");
            if lines.is_empty() {
                out.push_str("  (none)\n");
            }
            for line in lines {
                let _ = writeln!(out, "  {line}");
            }
        }
        AppEvent::Status(message) => {
            let _ = writeln!(out, "{message}");
        }
        _ => return None,
    }

    Some(out)
}
