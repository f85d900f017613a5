use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// Malformed or truncated container, tree block, or bit stream.
    #[error("malformed input: {0}")]
    Format(String),
    #[error("symbol {symbol:#04x} has no code in the code table")]
    Encoding { symbol: u8 },
    #[error("cannot decode bit stream: {0}")]
    Decoding(String),
    /// Nothing to do. Callers treat this as a soft no-op, not a failure.
    #[error("input is empty")]
    EmptyInput,
    #[error("character {0:?} does not fit in a single byte")]
    SymbolOutOfRange(char),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CodecError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        CodecError::Format(msg.into())
    }

    pub(crate) fn decoding(msg: impl Into<String>) -> Self {
        CodecError::Decoding(msg.into())
    }
}
