//! Word trie and its compression pass
//!
//! Two node kinds share one capability set:
//! - `RawNode`: one character per node, as produced by insertion
//! - `CompressedNode`: unbranching chains collapsed into one multi-character
//!   node by the `Compressor`
//!
//! Both live in a `Trie` arena and are navigated through `NodeRef`.

mod compressor;
mod node;
mod tree;
mod view;

pub use compressor::{CompressionPolicy, Compressor};
pub use node::{ChildrenTree, CompressedNode, Node, NodeId, RawNode};
pub use tree::{CompressedTrie, RawTrie, Trie};
pub use view::NodeRef;
