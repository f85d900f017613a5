use tracing::trace;

use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

pub type NodeId = usize;

/// A node of the prefix tree. Children are indices into the owning
/// [`HuffmanTree`]'s node arena, so every internal node has exactly two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: u8 },
    Internal { left: NodeId, right: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub leaves: usize,
    pub internal: usize,
    pub max_depth: usize,
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

// Heap entry used only while building: weight lives here, not on the node.
struct Pending {
    weight: u64,
    node: NodeId,
}

impl HuffmanTree {
    /// Build the optimal prefix tree, or `None` for an empty table.
    ///
    /// Ties on weight are broken by node id: leaves are numbered in ascending
    /// symbol order and merged nodes get increasing ids, so equal weights
    /// leave the queue first-in first-out.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let mut nodes = Vec::with_capacity(table.len() * 2);
        let mut heap = MinHeap::with_comparator(|a: &Pending, b: &Pending| {
            a.weight.cmp(&b.weight).then(a.node.cmp(&b.node))
        });

        for (symbol, weight) in table.iter() {
            heap.insert(Pending {
                weight,
                node: nodes.len(),
            });
            nodes.push(Node::Leaf { symbol });
        }

        while heap.len() > 1 {
            let (Some(first), Some(second)) = (heap.extract_min(), heap.extract_min()) else {
                break;
            };
            heap.insert(Pending {
                weight: first.weight + second.weight,
                node: nodes.len(),
            });
            nodes.push(Node::Internal {
                left: first.node,
                right: second.node,
            });
        }

        let root = heap.extract_min()?.node;
        trace!(nodes = nodes.len(), "built huffman tree");
        Some(HuffmanTree { nodes, root })
    }

    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        HuffmanTree { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Node {
        self.nodes[id]
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            leaves: 0,
            internal: 0,
            max_depth: 0,
        };
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            stats.max_depth = stats.max_depth.max(depth);
            match self.nodes[id] {
                Node::Leaf { .. } => stats.leaves += 1,
                Node::Internal { left, right } => {
                    stats.internal += 1;
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        stats
    }

    /// Indented outline, one line per node, left subtree first.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, String::new())];
        while let Some((id, prefix)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol } => {
                    out.push_str(&format!("{prefix}Leaf: {}\n", quoted(symbol)));
                }
                Node::Internal { left, right } => {
                    out.push_str(&format!("{prefix}Node:\n"));
                    stack.push((right, format!("{prefix} 1-")));
                    stack.push((left, format!("{prefix} 0-")));
                }
            }
        }
        out
    }
}

pub(crate) fn quoted(symbol: u8) -> String {
    format!("'{}'", std::ascii::escape_default(symbol))
}
