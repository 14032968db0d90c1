#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a fixture file with the given content
pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

/// Create a simple DNA FASTA with n sequences
pub fn create_simple_fasta(n: usize) -> String {
    let mut content = String::new();
    for i in 0..n {
        content.push_str(&format!(">seq_{} Test sequence {}\n", i, i));
        content.push_str("ATGATGATGATGATGATGATGATGATGATGATGATGATGATGATG\n");
    }
    content
}

/// Create a FASTQ with n reads of length 8
pub fn create_simple_fastq(n: usize) -> String {
    let mut content = String::new();
    for i in 0..n {
        content.push_str(&format!("@read_{}\nACGTACGT\n+\nIIIIHHHH\n", i));
    }
    content
}

/// FASTA whose second record carries symbols outside the DNA alphabet
pub fn create_invalid_dna_fasta() -> String {
    ">good\nACGTACGT\n>bad contains protein\nACGTJXZ\n>also_good\nGGCC\n".to_string()
}

/// FASTA whose second record has an empty identifier
pub fn create_malformed_fasta() -> String {
    ">seq1\nACGT\n>\nTTTT\n>seq3\nGGCC\n".to_string()
}

/// Run the biolib binary isolated from any user configuration
pub fn biolib_cmd() -> Command {
    let mut cmd = Command::cargo_bin("biolib").unwrap();
    cmd.env("BIOLIB_CONFIG", "/nonexistent/biolib/config.toml")
        .env("BIOLIB_SILENT", "1")
        .env_remove("BIOLIB_LOG");
    cmd
}

/// Setup test environment with temporary directory
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn create_input_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        create_test_file(self.temp_dir.path(), name, content)
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

/// Count FASTA headers in a file
pub fn count_fasta_records(path: &Path) -> Result<usize> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().filter(|l| l.starts_with('>')).count())
}
