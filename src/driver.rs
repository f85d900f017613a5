// src/driver.rs

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::bits;
use crate::codec::{Decoder, Encoder};
use crate::codes::CodeTable;
use crate::container;
use crate::error::CodecError;
use crate::journal::{self, Action, JournalEntry};
use crate::tree_codec;
use crate::utils::{format_bytes, write_atomic};

/// Console dumps requested on the command line. They never change the output file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dumps {
    pub codes: bool,
    pub tree: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written {
        input_bytes: usize,
        output_bytes: usize,
    },
    /// Nothing to do; the user has already been told why.
    Skipped,
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    write_atomic(path, data).with_context(|| format!("Failed to write {}", path.display()))
}

fn ratio(from: usize, to: usize) -> f64 {
    if from == 0 { 0.0 } else { to as f64 / from as f64 }
}

pub fn encode_file(
    input: &Path,
    output: &Path,
    dumps: Dumps,
    journal_path: Option<&Path>,
) -> anyhow::Result<Outcome> {
    let text = read_input(input)?;

    let encoder = match Encoder::new(&text) {
        Ok(e) => e,
        Err(CodecError::EmptyInput) => {
            println!("Input file is empty; nothing to encode.");
            return Ok(Outcome::Skipped);
        }
        Err(e) => return Err(e.into()),
    };

    let file = encoder
        .encode(&text)
        .with_context(|| format!("Failed to encode {}", input.display()))?;
    write_output(output, &file)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        "encoded {} -> {} (ratio {:.3})",
        format_bytes(text.len()),
        format_bytes(file.len()),
        ratio(text.len(), file.len())
    );

    if dumps.codes {
        println!("Huffman codes:");
        print!("{}", encoder.codes().render());
    }
    if dumps.tree {
        println!("Huffman tree:");
        print!("{}", encoder.tree().render());
    }

    if let Some(path) = journal_path {
        let entry = JournalEntry::new(Action::Encode, input, output, text.len(), file.len(), &text);
        journal::append(path, &entry)?;
    }

    Ok(Outcome::Written {
        input_bytes: text.len(),
        output_bytes: file.len(),
    })
}

pub fn decode_file(
    input: &Path,
    output: &Path,
    dumps: Dumps,
    journal_path: Option<&Path>,
) -> anyhow::Result<Outcome> {
    let file = read_input(input)?;

    let decoder = match Decoder::open(&file) {
        Ok(d) => d,
        Err(CodecError::EmptyInput) => {
            println!("Input file contains no data to decode.");
            return Ok(Outcome::Skipped);
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to open {}", input.display())),
    };

    if dumps.tree {
        println!("Huffman tree:");
        print!("{}", decoder.tree().render());
    }

    let text = decoder
        .decode()
        .with_context(|| format!("Failed to decode {}", input.display()))?;
    write_output(output, &text)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        "decoded {} -> {}",
        format_bytes(file.len()),
        format_bytes(text.len())
    );

    if dumps.codes {
        println!("Decoded text:");
        println!("{}", String::from_utf8_lossy(&text));
    }

    if let Some(path) = journal_path {
        let entry = JournalEntry::new(Action::Decode, input, output, file.len(), text.len(), &text);
        journal::append(path, &entry)?;
    }

    Ok(Outcome::Written {
        input_bytes: file.len(),
        output_bytes: text.len(),
    })
}

/// Print the layout of a container file without decoding it to disk.
pub fn inspect_file(input: &Path) -> anyhow::Result<()> {
    let file = read_input(input)?;
    let (tree_bytes, payload) =
        container::read(&file).with_context(|| format!("Failed to read {}", input.display()))?;

    println!("File:         {} ({})", input.display(), format_bytes(file.len()));
    println!("Tree block:   {} bytes, padding {}", tree_bytes.len(), tree_bytes.first().copied().unwrap_or(0));
    println!("Payload:      {} bytes, padding {}", payload.len(), payload.first().copied().unwrap_or(0));

    let Some(tree) = tree_codec::deserialize(tree_bytes)? else {
        println!("Input file contains no data to decode.");
        return Ok(());
    };
    let stats = tree.stats();
    let payload_bits = bits::unpack(payload)?;
    println!(
        "Tree:         {} leaves, {} internal nodes, depth {}",
        stats.leaves, stats.internal, stats.max_depth
    );
    println!("Encoded bits: {}", payload_bits.len());
    println!("Huffman codes:");
    print!("{}", CodeTable::build(&tree).render());
    Ok(())
}
