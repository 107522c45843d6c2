use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Cleans up user input while keeping its casing
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC) folds full-width latin from CJK keyboards
        let text: String = text.nfkc().collect();

        // Newlines and runs of spaces collapse to a single space
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Storage/equality form of a query: cleaned and lower-cased
pub fn normalize_query(text: &str) -> String {
    DefaultPreprocessor.process(text).to_lowercase()
}
