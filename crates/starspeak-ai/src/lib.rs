mod client;
mod coach;
mod parse;

pub use client::GeminiProxyClient;
pub use coach::{ChatRole, ChatTurn, Coach, DrillVerdict, SosSuggestion};
pub use parse::{decode_body, extract_json_object};
