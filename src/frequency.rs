use crate::error::CodecError;

/// Occurrence count for each of the 256 possible symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub fn from_bytes(text: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in text {
            counts[byte as usize] += 1;
        }
        FrequencyTable { counts }
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Symbols with a non-zero count, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .map(|symbol| (symbol, self.counts[symbol as usize]))
            .filter(|&(_, count)| count > 0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Convert text to symbols, rejecting characters above U+00FF.
pub fn symbols_from_text(text: &str) -> Result<Vec<u8>, CodecError> {
    text.chars()
        .map(|c| u8::try_from(c).map_err(|_| CodecError::SymbolOutOfRange(c)))
        .collect()
}
