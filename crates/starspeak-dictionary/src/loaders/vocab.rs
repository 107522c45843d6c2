use starspeak_core::dictionary::SourceRecord;

/// Parse one `word<TAB>pos. gloss` line from a vocabulary list
pub fn parse_vocab_line(line: &str) -> Option<SourceRecord> {
    let (word, gloss) = line.trim().split_once('\t')?;
    let word = word.trim();
    let gloss = gloss.trim();

    if word.is_empty() || gloss.is_empty() {
        return None;
    }

    let (pos, translation) = split_pos(gloss);

    Some(SourceRecord {
        word: word.to_string(),
        display_word: Some(word.to_string()),
        definition: Some(gloss.to_string()),
        translation: Some(translation.to_string()),
        pos: pos.map(str::to_string),
        ..Default::default()
    })
}

// "n. 努力；成就" -> (Some("n."), "努力；成就")
fn split_pos(gloss: &str) -> (Option<&str>, &str) {
    let Some((head, rest)) = gloss.split_once(char::is_whitespace) else {
        return (None, gloss);
    };

    let is_tag = head.ends_with('.')
        && head.len() > 1
        && head
            .trim_end_matches('.')
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '&' || c == '.');

    if is_tag && !rest.trim().is_empty() {
        (Some(head), rest.trim())
    } else {
        (None, gloss)
    }
}

/// Parse a whole vocabulary file, skipping malformed lines
pub fn parse_vocab_list(content: &str) -> Vec<SourceRecord> {
    let mut records = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_vocab_line(line) {
            Some(record) => records.push(record),
            None => tracing::debug!("Skipping malformed vocab line {}", line_num + 1),
        }
    }

    records
}
