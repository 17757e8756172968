//! # wordtrie
//!
//! A word trie with a one-shot compression pass.
//!
//! Words are inserted into a raw trie holding one node per character. The
//! compressor then rebuilds it into a separate, denser trie in which every
//! unbranching chain of nodes becomes a single node carrying the whole
//! chain as its letter. Both tries recognise the same words.
//!
//! ## Example
//!
//! ```
//! use wordtrie::{Compressor, RawTrie};
//!
//! let raw = RawTrie::from_words(["cat", "car"])?;
//! let compressed = Compressor::new().compress(&raw);
//!
//! let ca = compressed.root().get('c').unwrap();
//! assert_eq!(ca.letter().as_deref(), Some("ca"));
//! assert!(compressed.contains("car"));
//! # Ok::<(), wordtrie::Error>(())
//! ```

pub mod config;
pub mod dictionary;
pub mod trie;

mod error;

pub use config::Config;
pub use error::{Error, Result};
pub use trie::{
    CompressedNode, CompressedTrie, CompressionPolicy, Compressor, Node, NodeId, NodeRef, RawNode,
    RawTrie, Trie,
};
