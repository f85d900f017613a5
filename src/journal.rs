use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Encode,
    Decode,
}

/// One line of the operation journal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub timestamp: String,
    pub action: Action,
    pub input: String,
    pub output: String,
    pub input_bytes: usize,
    pub output_bytes: usize,
    /// SHA-256 of the plain text, identical for an encode and its decode.
    pub sha256: String,
}

impl JournalEntry {
    pub fn new(
        action: Action,
        input: &Path,
        output: &Path,
        input_bytes: usize,
        output_bytes: usize,
        text: &[u8],
    ) -> Self {
        JournalEntry {
            timestamp: Utc::now().to_rfc3339(),
            action,
            input: input.display().to_string(),
            output: output.display().to_string(),
            input_bytes,
            output_bytes,
            sha256: digest(text),
        }
    }
}

pub fn digest(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

pub fn append(path: &Path, entry: &JournalEntry) -> anyhow::Result<()> {
    let json = serde_json::to_string(entry).context("Failed to serialize journal entry")?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open journal {}", path.display()))?;

    writeln!(file, "{}", json)
        .with_context(|| format!("Failed to write journal {}", path.display()))?;
    Ok(())
}
