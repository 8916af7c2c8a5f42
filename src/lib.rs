pub mod cli;
pub mod config;
pub mod core;
pub mod diff;
pub mod error;
pub mod export;
pub mod ingest;
pub mod watcher;

pub use config::*;
pub use crate::core::*;
pub use diff::*;
pub use error::CompareError;
pub use ingest::*;
pub use watcher::*;
