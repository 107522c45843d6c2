mod file;

pub use file::JsonFileWordStore;
