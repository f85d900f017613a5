// Pre-order tree encoding: '1' + 8 symbol bits for a leaf, '0' for an
// internal node whose two subtrees follow.

use tracing::trace;

use crate::bits;
use crate::error::CodecError;
use crate::tree::{HuffmanTree, Node, NodeId};

pub fn serialize_bits(tree: &HuffmanTree) -> Vec<bool> {
    let mut out = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        match tree.node(id) {
            Node::Leaf { symbol } => {
                out.push(true);
                for i in (0..8).rev() {
                    out.push((symbol >> i) & 1 == 1);
                }
            }
            Node::Internal { left, right } => {
                out.push(false);
                // right first so the left subtree pops next
                stack.push(right);
                stack.push(left);
            }
        }
    }
    out
}

/// Serialize a tree into its packed byte form (padding byte first).
pub fn serialize(tree: &HuffmanTree) -> Result<Vec<u8>, CodecError> {
    let bits = serialize_bits(tree);
    trace!(bits = bits.len(), "serialized tree");
    bits::pack(&bits)
}

/// Rebuild a tree from its pre-order bits. An empty stream is an empty tree.
pub fn deserialize_bits(bits: &[bool]) -> Result<Option<HuffmanTree>, CodecError> {
    let mut nodes = Vec::new();
    // internal nodes still waiting for children, with their left child once known
    let mut open: Vec<Option<NodeId>> = Vec::new();
    let mut root = None;
    let mut pos = 0;

    while pos < bits.len() {
        if root.is_some() {
            return Err(CodecError::format(format!(
                "{} trailing bits after a complete tree",
                bits.len() - pos
            )));
        }
        let is_leaf = bits[pos];
        pos += 1;

        if !is_leaf {
            open.push(None);
            continue;
        }

        let payload = bits
            .get(pos..pos + 8)
            .ok_or_else(|| CodecError::format("tree stream ends inside a leaf symbol"))?;
        pos += 8;
        let symbol = payload.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8);

        let mut done = nodes.len();
        nodes.push(Node::Leaf { symbol });
        loop {
            match open.pop() {
                None => {
                    root = Some(done);
                    break;
                }
                Some(None) => {
                    open.push(Some(done));
                    break;
                }
                Some(Some(left)) => {
                    let id = nodes.len();
                    nodes.push(Node::Internal { left, right: done });
                    done = id;
                }
            }
        }
    }

    match root {
        Some(root) => Ok(Some(HuffmanTree::from_parts(nodes, root))),
        None if open.is_empty() => Ok(None),
        None => Err(CodecError::format(format!(
            "tree stream ends with {} unfinished internal nodes",
            open.len()
        ))),
    }
}

/// Inverse of [`serialize`].
pub fn deserialize(bytes: &[u8]) -> Result<Option<HuffmanTree>, CodecError> {
    let bits = bits::unpack(bytes)?;
    deserialize_bits(&bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::{from_digits, to_digits};
    use crate::frequency::FrequencyTable;

    fn tree_of(text: &[u8]) -> HuffmanTree {
        HuffmanTree::build(&FrequencyTable::from_bytes(text)).unwrap()
    }

    #[test]
    fn test_single_leaf_bits() {
        let tree = tree_of(b"aaaa");
        assert_eq!(to_digits(&serialize_bits(&tree)), "101100001");
        assert_eq!(serialize(&tree).unwrap(), vec![7, 0b1011_0000, 0b1000_0000]);
    }

    #[test]
    fn test_preorder_layout() {
        // abcd: ((a b) (c d))
        let tree = tree_of(b"abcd");
        let expected = format!(
            "00{}{}0{}{}",
            "101100001", "101100010", "101100011", "101100100"
        );
        assert_eq!(to_digits(&serialize_bits(&tree)), expected);
    }

    #[test]
    fn test_roundtrip_preserves_structure() {
        for text in [
            &b"x"[..],
            b"abracadabra",
            b"mississippi river\n",
            b"\x00\xff\x7f\x80 binary \x00\x00",
        ] {
            let tree = tree_of(text);
            let bytes = serialize(&tree).unwrap();
            let back = deserialize(&bytes).unwrap().unwrap();
            assert_eq!(back.render(), tree.render());
            assert_eq!(back.stats(), tree.stats());
        }
    }

    #[test]
    fn test_deep_tree_roundtrip() {
        let mut text = Vec::new();
        for (i, symbol) in (b'a'..=b't').enumerate() {
            text.extend(std::iter::repeat_n(symbol, 1 << i));
        }
        let tree = tree_of(&text);
        let back = deserialize(&serialize(&tree).unwrap()).unwrap().unwrap();
        assert_eq!(back.stats().max_depth, 19);
        assert_eq!(back.render(), tree.render());
    }

    #[test]
    fn test_empty_stream_is_empty_tree() {
        assert!(deserialize(&[0]).unwrap().is_none());
    }

    #[test]
    fn test_rejects_truncated_symbol() {
        let bits = from_digits("1011").unwrap();
        assert!(matches!(deserialize_bits(&bits), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_rejects_unfinished_internal_node() {
        let bits = from_digits("0101100001").unwrap();
        assert!(matches!(deserialize_bits(&bits), Err(CodecError::Format(_))));
        // a long run of internal markers with no leaves
        let bits = vec![false; 100_000];
        assert!(matches!(deserialize_bits(&bits), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_rejects_trailing_bits() {
        let bits = from_digits("1011000010").unwrap();
        assert!(matches!(deserialize_bits(&bits), Err(CodecError::Format(_))));
    }
}
