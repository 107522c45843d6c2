pub mod dictionary;
pub mod error;
pub mod loader;
pub mod loaders;

pub use dictionary::StaticDictionary;
pub use error::LoadError;
pub use loader::DictionaryLoader;
