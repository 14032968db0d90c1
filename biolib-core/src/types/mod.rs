/// Core types shared across all biolib modules
pub mod alphabet;
pub mod format;

pub use alphabet::AlphabetKind;
pub use format::SequenceFormat;
