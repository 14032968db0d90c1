//! Core utilities and types shared across all biolib crates

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use config::{load_config, load_or_default, save_config, Config};
pub use error::{BiolibError, BiolibResult};

pub use types::{AlphabetKind, SequenceFormat};

