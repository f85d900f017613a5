//! # huffpack
//!
//! Static Huffman coding for single-byte text, stored as one container file:
//! a big-endian `u32` tree length, the pre-order serialized tree, then the
//! packed payload. Both bit blocks start with a padding-count byte.
//!
//! ```rust
//! let file = huffpack::encode(b"abracadabra")?;
//! assert_eq!(huffpack::decode(&file)?, b"abracadabra");
//! # Ok::<(), huffpack::CodecError>(())
//! ```

pub mod bits;
pub mod codec;
pub mod codes;
pub mod container;
pub mod driver;
pub mod error;
pub mod frequency;
pub mod journal;
pub mod logger;
pub mod tree;
pub mod tree_codec;

// Internal modules - not part of public API
mod min_heap;
mod utils;

pub use codec::{Decoder, Encoder, decode, encode};
pub use codes::CodeTable;
pub use error::CodecError;
pub use frequency::{FrequencyTable, symbols_from_text};
pub use tree::HuffmanTree;
