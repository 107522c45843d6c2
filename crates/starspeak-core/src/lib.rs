pub mod dictionary;
pub mod error;
pub mod generator;
pub mod inflight;
pub mod lookup;
pub mod preprocess;
pub mod store;
pub mod types;

pub use dictionary::{DictionarySource, SourceHit, SourceMetadata, SourceRecord, TieredDictionary};
pub use error::{LookupError, PersistenceFailed};
pub use generator::{AiGenerator, GenerateError, GeneratedEntry};
pub use lookup::{LookupRequest, LookupResolver, Resolved, ResolverOptions};
pub use store::{MemoryWordStore, StoreError, WordStore};
pub use types::{LookupKey, LookupMode, Origin, UserId, WordEntry};

#[cfg(test)]
mod tests;
