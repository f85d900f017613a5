use crate::error::CodecError;
use crate::tree::{HuffmanTree, Node, quoted};

/// Symbol to prefix-code mapping. Left edges are `false`, right edges `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Vec<bool>>>,
}

impl CodeTable {
    /// Derive codes from a tree. A lone leaf gets the one-bit code `0`.
    pub fn build(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; 256];
        let mut stack = vec![(tree.root(), Vec::new())];
        while let Some((id, prefix)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol } => {
                    let code = if prefix.is_empty() { vec![false] } else { prefix };
                    codes[symbol as usize] = Some(code);
                }
                Node::Internal { left, right } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(true);
                    stack.push((right, right_prefix));
                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((left, left_prefix));
                }
            }
        }
        CodeTable { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        self.codes[symbol as usize].as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        (0..=u8::MAX).filter_map(|symbol| self.get(symbol).map(|code| (symbol, code)))
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One `label: code` line per symbol, in ascending symbol order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (symbol, code) in self.iter() {
            out.push_str(&format!("{}: {}\n", label(symbol), crate::bits::to_digits(code)));
        }
        out
    }
}

fn label(symbol: u8) -> String {
    match symbol {
        b' ' => "' ' (space)".to_string(),
        b'\n' => "'\\n' (newline)".to_string(),
        0x21..=0x7E => quoted(symbol),
        other => format!("{other:#04x}"),
    }
}

/// Concatenate the code of every symbol of `text`, in order.
pub fn encode_symbols(text: &[u8], table: &CodeTable) -> Result<Vec<bool>, CodecError> {
    let mut bits = Vec::new();
    for &symbol in text {
        let code = table.get(symbol).ok_or(CodecError::Encoding { symbol })?;
        bits.extend_from_slice(code);
    }
    Ok(bits)
}

/// Walk the tree bit by bit, emitting a symbol at every leaf.
pub fn decode_symbols(bits: &[bool], tree: &HuffmanTree) -> Result<Vec<u8>, CodecError> {
    let root = tree.root();

    if let Node::Leaf { symbol } = tree.node(root) {
        if let Some(pos) = bits.iter().position(|&b| b) {
            return Err(CodecError::decoding(format!(
                "bit {pos} leads off a single-leaf tree"
            )));
        }
        return Ok(vec![symbol; bits.len()]);
    }

    let mut out = Vec::new();
    let mut current = root;
    for &bit in bits {
        let Node::Internal { left, right } = tree.node(current) else {
            return Err(CodecError::decoding("walked past a leaf"));
        };
        current = if bit { right } else { left };
        if let Node::Leaf { symbol } = tree.node(current) {
            out.push(symbol);
            current = root;
        }
    }

    if current != root {
        return Err(CodecError::decoding("bit stream ends in the middle of a code"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::{from_digits, to_digits};
    use crate::frequency::FrequencyTable;
    use crate::tree_codec;

    fn tree_of(text: &[u8]) -> HuffmanTree {
        HuffmanTree::build(&FrequencyTable::from_bytes(text)).unwrap()
    }

    fn assert_prefix_free(table: &CodeTable) {
        let codes: Vec<_> = table.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{:?} prefixes {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_single_symbol_code() {
        let tree = tree_of(b"aaaa");
        let table = CodeTable::build(&tree);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'a'), Some(&[false][..]));

        let bits = encode_symbols(b"aaaa", &table).unwrap();
        assert_eq!(to_digits(&bits), "0000");
        assert_eq!(decode_symbols(&bits, &tree).unwrap(), b"aaaa");
    }

    #[test]
    fn test_single_leaf_rejects_one_bit() {
        let tree = tree_of(b"aaaa");
        let bits = from_digits("001").unwrap();
        assert!(matches!(decode_symbols(&bits, &tree), Err(CodecError::Decoding(_))));
    }

    #[test]
    fn test_abracadabra_codes() {
        let text = b"abracadabra";
        let tree = tree_of(text);
        let table = CodeTable::build(&tree);
        assert_eq!(table.len(), 5);
        assert_eq!(table.get(b'a').map(|c| c.len()), Some(1));
        assert_prefix_free(&table);

        let bits = encode_symbols(text, &table).unwrap();
        // 5*1 + 2*3 + 2*3 + 1*3 + 1*3
        assert_eq!(bits.len(), 23);
        assert_eq!(decode_symbols(&bits, &tree).unwrap(), text);
    }

    #[test]
    fn test_prefix_free_over_all_bytes() {
        let text: Vec<u8> = (0..=255u8)
            .flat_map(|b| std::iter::repeat_n(b, 1 + (b as usize * 7) % 13))
            .collect();
        let tree = tree_of(&text);
        let table = CodeTable::build(&tree);
        assert_eq!(table.len(), 256);
        assert_prefix_free(&table);
        let bits = encode_symbols(&text, &table).unwrap();
        assert_eq!(decode_symbols(&bits, &tree).unwrap(), text);
    }

    #[test]
    fn test_codes_survive_tree_serialization() {
        let tree = tree_of(b"she sells sea shells by the sea shore");
        let back = tree_codec::deserialize(&tree_codec::serialize(&tree).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(CodeTable::build(&back), CodeTable::build(&tree));
    }

    #[test]
    fn test_encode_unknown_symbol() {
        let table = CodeTable::build(&tree_of(b"abc"));
        assert!(matches!(
            encode_symbols(b"abz", &table),
            Err(CodecError::Encoding { symbol: b'z' })
        ));
    }

    #[test]
    fn test_decode_stops_mid_code() {
        let text = b"abracadabra";
        let tree = tree_of(text);
        let mut bits = encode_symbols(text, &CodeTable::build(&tree)).unwrap();
        // drop the final 'a' and the last bit of the 'r' before it
        bits.truncate(bits.len() - 2);
        assert!(matches!(decode_symbols(&bits, &tree), Err(CodecError::Decoding(_))));
    }

    #[test]
    fn test_render_labels() {
        let table = CodeTable::build(&tree_of(b"a \n"));
        let rendered = table.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("'\\n' (newline): "));
        assert!(lines[1].starts_with("' ' (space): "));
        assert!(lines[2].starts_with("'a': "));
        assert_eq!(label(0x07), "0x07");
    }
}
