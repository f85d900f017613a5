use tracing::debug;

use crate::bits;
use crate::codes::{self, CodeTable};
use crate::container;
use crate::error::CodecError;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;
use crate::tree_codec;

/// Model built from one input text: frequencies, tree and code table.
#[derive(Debug, Clone)]
pub struct Encoder {
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    codes: CodeTable,
}

impl Encoder {
    pub fn new(text: &[u8]) -> Result<Self, CodecError> {
        let frequencies = FrequencyTable::from_bytes(text);
        let tree = HuffmanTree::build(&frequencies).ok_or(CodecError::EmptyInput)?;
        let codes = CodeTable::build(&tree);
        Ok(Encoder {
            frequencies,
            tree,
            codes,
        })
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Encode `text` against this model and wrap it in a container file.
    pub fn encode(&self, text: &[u8]) -> Result<Vec<u8>, CodecError> {
        let payload_bits = codes::encode_symbols(text, &self.codes)?;
        let payload = bits::pack(&payload_bits)?;
        let tree_bytes = tree_codec::serialize(&self.tree)?;
        debug!(
            symbols = text.len(),
            distinct = self.codes.len(),
            payload_bits = payload_bits.len(),
            tree_bytes = tree_bytes.len(),
            "encoded text"
        );
        container::write(&tree_bytes, &payload)
    }
}

/// A parsed container file, ready to decode.
#[derive(Debug, Clone)]
pub struct Decoder {
    tree: HuffmanTree,
    tree_len: usize,
    payload: Vec<u8>,
}

impl Decoder {
    pub fn open(file: &[u8]) -> Result<Self, CodecError> {
        let (tree_bytes, payload) = container::read(file)?;
        let tree = tree_codec::deserialize(tree_bytes)?.ok_or(CodecError::EmptyInput)?;
        Ok(Decoder {
            tree,
            tree_len: tree_bytes.len(),
            payload: payload.to_vec(),
        })
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Size of the stored tree block in bytes.
    pub fn tree_len(&self) -> usize {
        self.tree_len
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn decode(&self) -> Result<Vec<u8>, CodecError> {
        let payload_bits = bits::unpack(&self.payload)?;
        let text = codes::decode_symbols(&payload_bits, &self.tree)?;
        debug!(payload_bits = payload_bits.len(), symbols = text.len(), "decoded text");
        Ok(text)
    }
}

/// Encode any text, including the empty one, into a container file.
pub fn encode(text: &[u8]) -> Result<Vec<u8>, CodecError> {
    match Encoder::new(text) {
        Ok(encoder) => encoder.encode(text),
        Err(CodecError::EmptyInput) => container::write(&bits::pack(&[])?, &bits::pack(&[])?),
        Err(e) => Err(e),
    }
}

/// Inverse of [`encode`].
pub fn decode(file: &[u8]) -> Result<Vec<u8>, CodecError> {
    match Decoder::open(file) {
        Ok(decoder) => decoder.decode(),
        Err(CodecError::EmptyInput) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for text in [
            &b""[..],
            b"a",
            b"aaaa",
            b"ab",
            b"abracadabra",
            b"Hello, World!\nThis is line two.\r\n\ttabbed",
            b"\x00\x01\x02\xfe\xff\x00",
        ] {
            let file = encode(text).unwrap();
            assert_eq!(decode(&file).unwrap(), text, "{:?}", text);
        }
    }

    #[test]
    fn test_empty_text_layout() {
        assert_eq!(encode(b"").unwrap(), vec![0, 0, 0, 1, 0, 0]);
        assert!(matches!(Encoder::new(b""), Err(CodecError::EmptyInput)));
        assert!(matches!(
            Decoder::open(&[0, 0, 0, 1, 0, 0]),
            Err(CodecError::EmptyInput)
        ));
    }

    #[test]
    fn test_single_symbol_file() {
        let file = encode(b"aaaa").unwrap();
        // tree block: 7, 1011_0000, 1000_0000 ; payload "0000" -> 4, 0000_0000
        assert_eq!(file, vec![0, 0, 0, 3, 7, 0xB0, 0x80, 4, 0x00]);
    }

    #[test]
    fn test_abracadabra_file() {
        let encoder = Encoder::new(b"abracadabra").unwrap();
        let stats = encoder.tree().stats();
        assert_eq!((stats.leaves, stats.internal), (5, 4));
        assert_eq!(encoder.frequencies().get(b'a'), 5);

        let file = encoder.encode(b"abracadabra").unwrap();
        let decoder = Decoder::open(&file).unwrap();
        // 5 leaves * 9 bits + 4 internal bits = 49 bits -> 1 + 7 bytes
        assert_eq!(decoder.tree_len(), 8);
        // 23 payload bits -> 1 + 3 bytes
        assert_eq!(decoder.payload(), &file[12..]);
        assert_eq!(decoder.payload().len(), 4);
        assert_eq!(decoder.decode().unwrap(), b"abracadabra");
    }

    #[test]
    fn test_encoder_rejects_foreign_text() {
        let encoder = Encoder::new(b"abc").unwrap();
        assert!(matches!(
            encoder.encode(b"cabbage"),
            Err(CodecError::Encoding { symbol: b'g' })
        ));
    }

    #[test]
    fn test_corrupt_files() {
        assert!(matches!(decode(&[0, 0]), Err(CodecError::Format(_))));
        assert!(matches!(decode(&[0, 0, 0, 9, 1]), Err(CodecError::Format(_))));

        let mut file = encode(b"abracadabra").unwrap();
        // payload padding byte out of range
        file[12] = 9;
        assert!(matches!(decode(&file), Err(CodecError::Format(_))));
    }
}
