pub mod alphabet;
pub mod record;
pub mod toolkit;

// Re-export commonly used types
pub use alphabet::{infer_alphabet, Alphabet};
pub use record::SequenceRecord;
