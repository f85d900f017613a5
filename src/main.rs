// src/main.rs
use clap::{Parser, Subcommand, ValueEnum};
use huffpack::driver::{self, Dumps};
use huffpack::logger;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "huffpack", version = "0.1.0")]
#[command(about = "Lossless text compression with static Huffman coding.", long_about = None)]
struct Cli {
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
    /// Append a JSON line per successful operation to this file
    #[arg(long, global = true)]
    journal: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a text file
    Encode {
        input: PathBuf,
        output: PathBuf,
        /// Print the Huffman codes
        #[arg(short, long)]
        codes: bool,
        /// Print the Huffman tree
        #[arg(short, long)]
        tree: bool,
    },
    /// Decode an encoded file
    Decode {
        input: PathBuf,
        output: PathBuf,
        /// Print the decoded text
        #[arg(short, long)]
        codes: bool,
        /// Print the Huffman tree
        #[arg(short, long)]
        tree: bool,
    },
    /// Show the layout of an encoded file
    Inspect { input: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.log_level.into())?;

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    let journal = cli.journal.as_deref();
    match cli.command {
        Commands::Encode { input, output, codes, tree } => {
            driver::encode_file(&input, &output, Dumps { codes, tree }, journal)?;
        }
        Commands::Decode { input, output, codes, tree } => {
            driver::decode_file(&input, &output, Dumps { codes, tree }, journal)?;
        }
        Commands::Inspect { input } => driver::inspect_file(&input)?,
    }
    Ok(())
}
