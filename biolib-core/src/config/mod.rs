//! Configuration types for biolib

use crate::types::AlphabetKind;
use crate::BiolibError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "BIOLIB_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub parse: ParseConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseConfig {
    /// ASCII offset of encoded quality scores (33 = Sanger/Illumina 1.8+)
    #[serde(default = "default_phred_offset")]
    pub phred_offset: u8,
    /// Upper bound on bytes inspected by format detection
    #[serde(default = "default_lookahead_bytes")]
    pub lookahead_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    #[serde(default)]
    pub alphabet: AlphabetKind,
    #[serde(default = "default_allow_ambiguity")]
    pub allow_ambiguity: bool,
    #[serde(default = "default_allow_gaps")]
    pub allow_gaps: bool,
    #[serde(default = "default_require_non_empty")]
    pub require_non_empty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// FASTA sequence line width; 0 writes each sequence on a single line
    #[serde(default = "default_line_width")]
    pub line_width: usize,
    /// Abort on the first record that cannot be written in the target format
    #[serde(default = "default_strict")]
    pub strict: bool,
}

// Default value functions
fn default_phred_offset() -> u8 { 33 }
fn default_lookahead_bytes() -> usize { 8192 }
fn default_allow_ambiguity() -> bool { true }
fn default_allow_gaps() -> bool { false }
fn default_require_non_empty() -> bool { true }
fn default_line_width() -> usize { 80 }
fn default_strict() -> bool { false }

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            phred_offset: default_phred_offset(),
            lookahead_bytes: default_lookahead_bytes(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            alphabet: AlphabetKind::default(),
            allow_ambiguity: default_allow_ambiguity(),
            allow_gaps: default_allow_gaps(),
            require_non_empty: default_require_non_empty(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            line_width: default_line_width(),
            strict: default_strict(),
        }
    }
}

/// Location of the user config file: `$BIOLIB_CONFIG`, else
/// `<config dir>/biolib/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("biolib").join("config.toml"))
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, BiolibError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| BiolibError::Configuration(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), BiolibError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| BiolibError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Load an explicitly requested config file, or the default one if it exists.
///
/// An explicit path that does not exist is an error; a missing default file
/// silently yields `Config::default()`.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Config, BiolibError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(BiolibError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Loading config from {}", path.display());
            load_config(path)
        }
        _ => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.parse.phred_offset, 33);
        assert_eq!(config.parse.lookahead_bytes, 8192);

        assert_eq!(config.validation.alphabet, AlphabetKind::Auto);
        assert!(config.validation.allow_ambiguity);
        assert!(!config.validation.allow_gaps);
        assert!(config.validation.require_non_empty);

        assert_eq!(config.output.line_width, 80);
        assert!(!config.output.strict);
    }

    #[test]
    fn test_load_valid_config() {
        let toml_content = r#"
[parse]
phred_offset = 64
lookahead_bytes = 1024

[validation]
alphabet = "protein"
allow_ambiguity = false
allow_gaps = true
require_non_empty = false

[output]
line_width = 60
strict = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.parse.phred_offset, 64);
        assert_eq!(config.parse.lookahead_bytes, 1024);
        assert_eq!(config.validation.alphabet, AlphabetKind::Protein);
        assert!(!config.validation.allow_ambiguity);
        assert!(config.validation.allow_gaps);
        assert!(!config.validation.require_non_empty);
        assert_eq!(config.output.line_width, 60);
        assert!(config.output.strict);
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[validation]
alphabet = "dna"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.validation.alphabet, AlphabetKind::Dna);
        // Default values for unspecified fields
        assert!(config.validation.allow_ambiguity);
        assert_eq!(config.parse.phred_offset, 33);
        assert_eq!(config.output.line_width, 80);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "this is not valid TOML {{").unwrap();

        match load_config(temp_file.path()).unwrap_err() {
            BiolibError::Configuration(msg) => assert!(msg.contains("Failed to parse config")),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        match load_config("/nonexistent/path/to/config.toml").unwrap_err() {
            BiolibError::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_load_or_default_missing_explicit_path() {
        let result = load_or_default(Some(Path::new("/nonexistent/biolib.toml")));
        assert!(matches!(result, Err(BiolibError::Configuration(_))));
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.parse.phred_offset = 64;
        config.validation.alphabet = AlphabetKind::Rna;
        config.output.strict = true;

        let temp_file = NamedTempFile::new().unwrap();
        save_config(temp_file.path(), &config).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(config, loaded);
    }
}
