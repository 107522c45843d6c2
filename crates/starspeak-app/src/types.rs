use starspeak_core::types::{LookupMode, Origin, WordEntry};

#[derive(Debug, Clone)]
pub enum AppEvent {
    // Requests from the input side
    Lookup {
        query: String,
        mode: Option<LookupMode>,
    },
    ToggleDrill {
        word: String,
        in_drill: bool,
    },
    ShowHistory {
        limit: Option<usize>,
    },
    ShowDrills,
    ShowStats,
    Search {
        prefix: String,
    },
    /// Ask for a native way to say something
    Sos {
        text: String,
    },
    /// Start a roleplay round with the drill words
    Practice,
    /// Spoken answer to the current round
    Answer {
        text: String,
    },
    /// Free conversation with the coach
    Talk {
        text: String,
    },

    // Output side
    ShowResult {
        entry: WordEntry,
        origin: Origin,
    },
    /// Result was shown but not saved to history
    PersistenceWarning {
        word: String,
        reason: String,
    },
    LookupFailed {
        query: String,
        message: String,
        retryable: bool,
    },
    ShowEntries {
        title: String,
        entries: Vec<WordEntry>,
    },
    ShowLines {
        title: String,
        lines: Vec<String>,
    },
    Status(String),
}

/// Parse one input line into an event
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Some(AppEvent::Lookup {
            query: line.to_string(),
            mode: None,
        });
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match (name, arg) {
        ("offline", q) if !q.is_empty() => Some(AppEvent::Lookup {
            query: q.to_string(),
            mode: Some(LookupMode::Offline),
        }),
        ("ai", q) if !q.is_empty() => Some(AppEvent::Lookup {
            query: q.to_string(),
            mode: Some(LookupMode::Ai),
        }),
        ("drill", w) if !w.is_empty() => Some(AppEvent::ToggleDrill {
            word: w.to_string(),
            in_drill: true,
        }),
        ("undrill", w) if !w.is_empty() => Some(AppEvent::ToggleDrill {
            word: w.to_string(),
            in_drill: false,
        }),
        ("history", n) => Some(AppEvent::ShowHistory {
            limit: n.parse().ok(),
        }),
        ("drills", _) => Some(AppEvent::ShowDrills),
        ("stats", _) => Some(AppEvent::ShowStats),
        ("search", p) if !p.is_empty() => Some(AppEvent::Search {
            prefix: p.to_string(),
        }),
        ("sos", t) if !t.is_empty() => Some(AppEvent::Sos { text: t.to_string() }),
        ("practice", _) => Some(AppEvent::Practice),
        ("answer", t) if !t.is_empty() => Some(AppEvent::Answer { text: t.to_string() }),
        ("talk", t) if !t.is_empty() => Some(AppEvent::Talk { text: t.to_string() }),
        _ => Some(AppEvent::Status(format!("Unknown command: {line}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_lookup() {
        match parse_command("  piece of cake ") {
            Some(AppEvent::Lookup { query, mode }) => {
                assert_eq!(query, "piece of cake");
                assert_eq!(mode, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn mode_prefixes() {
        assert!(matches!(
            parse_command(":offline bank"),
            Some(AppEvent::Lookup {
                mode: Some(LookupMode::Offline),
                ..
            })
        ));
        assert!(matches!(
            parse_command(":ai 尴尬"),
            Some(AppEvent::Lookup {
                mode: Some(LookupMode::Ai),
                ..
            })
        ));
    }

    #[test]
    fn drill_commands() {
        match parse_command(":undrill Piece of cake") {
            Some(AppEvent::ToggleDrill { word, in_drill }) => {
                assert_eq!(word, "Piece of cake");
                assert!(!in_drill);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn history_limit_is_optional() {
        assert!(matches!(
            parse_command(":history"),
            Some(AppEvent::ShowHistory { limit: None })
        ));
        assert!(matches!(
            parse_command(":history 5"),
            Some(AppEvent::ShowHistory { limit: Some(5) })
        ));
    }

    #[test]
    fn practice_commands() {
        assert!(matches!(parse_command(":practice"), Some(AppEvent::Practice)));
        match parse_command(":answer Could I get a napkin?") {
            Some(AppEvent::Answer { text }) => assert_eq!(text, "Could I get a napkin?"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(parse_command(":talk hi there"), Some(AppEvent::Talk { .. })));
        assert!(matches!(parse_command(":answer"), Some(AppEvent::Status(_))));
    }

    #[test]
    fn blank_and_unknown() {
        assert!(parse_command("   ").is_none());
        assert!(matches!(parse_command(":drill"), Some(AppEvent::Status(_))));
        assert!(matches!(parse_command(":frobnicate"), Some(AppEvent::Status(_))));
        assert!(matches!(parse_command(":sos"), Some(AppEvent::Status(_))));
    }
}
