pub mod ecdict;
pub mod vocab;

pub use ecdict::parse_ecdict_json;
pub use vocab::{parse_vocab_line, parse_vocab_list};
