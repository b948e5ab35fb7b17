// src/infrastructure/mod.rs
pub mod audio;
pub mod config;
pub mod http_api;
pub mod sqlite_store;

pub use audio::TerminalAudio;
pub use config::Config;
pub use http_api::HttpApi;
pub use sqlite_store::SqliteStore;
