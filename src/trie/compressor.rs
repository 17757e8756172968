//! Collapsing unbranching chains of a raw trie into single nodes

use super::node::{ChildrenTree, CompressedNode, Node, NodeId, RawNode};
use super::tree::{CompressedTrie, RawTrie};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Which raw nodes get merged with their only child
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CompressionPolicy {
    /// Merge single-child nodes that do not end a word; every stored word
    /// survives compression
    #[default]
    PreserveWords,
    /// Merge every single-child node. The merged chain takes the terminal
    /// flag of its last node, so a word that is a prefix of exactly one
    /// longer word is absorbed into it.
    SingleChild,
}

impl CompressionPolicy {
    /// Whether `node` is folded into its descendant chain
    pub fn merges(&self, node: &RawNode) -> bool {
        match self {
            CompressionPolicy::PreserveWords => node.is_compressable(),
            CompressionPolicy::SingleChild => node.has_single_child(),
        }
    }
}

/// Builds a compressed copy of a raw trie
///
/// The input is never modified; every node of the output is freshly
/// allocated in a new arena that the caller owns.
#[derive(Clone, Copy, Debug, Default)]
pub struct Compressor {
    policy: CompressionPolicy,
}

impl Compressor {
    /// A compressor using [`CompressionPolicy::PreserveWords`]
    pub fn new() -> Self {
        Compressor::default()
    }

    pub fn with_policy(policy: CompressionPolicy) -> Self {
        Compressor { policy }
    }

    pub fn policy(&self) -> CompressionPolicy {
        self.policy
    }

    /// Compress the trie rooted at `raw`'s root
    ///
    /// The root's own letter and terminal flag are ignored: only its
    /// children are compressed, under a fresh letterless root.
    pub fn compress(&self, raw: &RawTrie) -> CompressedTrie {
        let mut out = CompressedTrie::new();
        let root = out.root_id();
        let mut pending = Vec::new();

        let children =
            self.compress_children(raw.slot(raw.root_id()), root, &mut out, &mut pending);
        if let Some(node) = out.node_mut(root) {
            node.set_children_tree(children);
        }

        while let Some((source, target)) = pending.pop() {
            self.compress_into(raw, source, target, &mut out, &mut pending);
        }

        debug!(
            policy = ?self.policy,
            raw_nodes = raw.len(),
            compressed_nodes = out.len(),
            "compressed trie"
        );
        out
    }

    /// Fill the already allocated slot `target` from the raw node `source`
    ///
    /// While the current raw node merges, its letter is appended to the
    /// target and the walk moves on to its only child. The node where the
    /// chain stops supplies the final letter, the terminal flag and the
    /// children, whose slots are queued on `pending`.
    fn compress_into(
        &self,
        raw: &RawTrie,
        source: NodeId,
        target: NodeId,
        out: &mut CompressedTrie,
        pending: &mut Vec<(NodeId, NodeId)>,
    ) {
        let mut letter = String::new();
        let mut current = raw.slot(source);
        let mut merged = 0usize;

        while self.policy.merges(current) {
            let Some(child) = current.only_child() else {
                break;
            };
            letter.extend(current.raw_letter());
            current = raw.slot(child);
            merged += 1;
        }
        letter.extend(current.raw_letter());

        if merged > 0 {
            trace!(chain = %letter, merged, "collapsed chain");
        }

        let children = self.compress_children(current, target, out, pending);
        if let Some(node) = out.node_mut(target) {
            node.set_letter(Some(letter));
            node.set_terminal(current.is_terminal());
            node.set_children_tree(children);
        }
    }

    /// Allocate a slot owned by `owner` for each child of `source` and queue
    /// it for filling, returning the mapping to install on `owner`
    fn compress_children(
        &self,
        source: &RawNode,
        owner: NodeId,
        out: &mut CompressedTrie,
        pending: &mut Vec<(NodeId, NodeId)>,
    ) -> ChildrenTree {
        let mut children = ChildrenTree::new();
        for (key, child) in source.children_tree() {
            let slot = out.alloc(CompressedNode::new(Some(owner)));
            pending.push((*child, slot));
            children.insert(*key, slot);
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compress(words: &[&str]) -> CompressedTrie {
        Compressor::new().compress(&RawTrie::from_words(words).unwrap())
    }

    fn letters(trie: &CompressedTrie) -> Vec<String> {
        trie.root()
            .children()
            .filter_map(|child| child.letter().map(|letter| letter.into_owned()))
            .collect()
    }

    #[test]
    fn test_single_letter_word() {
        let trie = compress(&["a"]);
        let child = trie.root().get('a').unwrap();

        assert_eq!(trie.root().child_count(), 1);
        assert_eq!(child.letter().as_deref(), Some("a"));
        assert!(child.is_terminal());
    }

    #[test]
    fn test_chain_collapses_into_one_node() {
        let trie = compress(&["cat"]);
        let cat = trie.root().get('c').unwrap();

        assert_eq!(trie.len(), 2);
        assert_eq!(cat.letter().as_deref(), Some("cat"));
        assert!(cat.is_terminal());
        assert_eq!(cat.child_count(), 0);
        assert_eq!(cat.parent().map(|p| p.id()), Some(trie.root_id()));
    }

    #[test]
    fn test_branch_keeps_split_point() {
        let trie = compress(&["cat", "car"]);
        let ca = trie.root().get('c').unwrap();

        assert_eq!(ca.letter().as_deref(), Some("ca"));
        assert!(!ca.is_terminal());
        assert_eq!(ca.child_count(), 2);

        for key in ['t', 'r'] {
            let child = ca.get(key).unwrap();
            assert_eq!(child.letter().as_deref(), Some(key.to_string().as_str()));
            assert!(child.is_terminal());
            assert_eq!(child.parent().map(|p| p.id()), Some(ca.id()));
        }
    }

    #[test]
    fn test_terminal_prefix_is_kept_by_default() {
        let trie = compress(&["cat", "cats"]);
        let cat = trie.root().get('c').unwrap();

        assert_eq!(cat.letter().as_deref(), Some("cat"));
        assert!(cat.is_terminal());
        let s = cat.get('s').unwrap();
        assert_eq!(s.letter().as_deref(), Some("s"));
        assert!(s.is_terminal());
        assert_eq!(trie.words(), vec!["cat", "cats"]);
    }

    #[test]
    fn test_single_child_policy_absorbs_terminal_prefix() {
        let raw = RawTrie::from_words(["cat", "cats"]).unwrap();
        let trie = Compressor::with_policy(CompressionPolicy::SingleChild).compress(&raw);

        assert_eq!(letters(&trie), vec!["cats"]);
        assert_eq!(trie.words(), vec!["cats"]);
        assert!(!trie.contains("cat"));
    }

    #[test]
    fn test_policies_agree_without_terminal_prefixes() {
        let raw = RawTrie::from_words(["these", "three", "things", "two"]).unwrap();
        let preserving = Compressor::new().compress(&raw);
        let single = Compressor::with_policy(CompressionPolicy::SingleChild).compress(&raw);

        assert_eq!(preserving, single);
        assert_eq!(letters(&preserving), vec!["t"]);
    }

    #[test]
    fn test_root_letter_and_terminal_are_ignored() {
        let mut raw = RawTrie::from_words(["ab"]).unwrap();
        if let Some(root) = raw.node_mut(raw.root_id()) {
            root.set_letter(Some('x'));
            root.mark_terminal();
        }

        let trie = Compressor::new().compress(&raw);
        assert!(trie.root().letter().is_none());
        assert!(!trie.root().is_terminal());
        assert_eq!(letters(&trie), vec!["ab"]);
    }

    #[test]
    fn test_long_run_of_terminal_prefixes() {
        let word = "z".repeat(20_000);
        let mut raw = RawTrie::new();
        let mut current = raw.root_id();
        for letter in word.chars() {
            current = raw.add_under(current, &letter.to_string()).unwrap();
        }

        let trie = Compressor::new().compress(&raw);
        assert_eq!(trie.len(), raw.len());
        assert_eq!(trie.depth(), 20_000);
        assert_eq!(trie.word_count(), 20_000);
        assert!(trie.contains(&word));
        assert!(trie.contains("zzz"));

        let single = Compressor::with_policy(CompressionPolicy::SingleChild).compress(&raw);
        assert_eq!(single.len(), 2);
        assert_eq!(single.words(), vec![word]);
    }

    #[test]
    fn test_empty_trie() {
        let trie = Compressor::new().compress(&RawTrie::new());
        assert!(trie.root().is_root());
        assert_eq!(trie.root().child_count(), 0);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_output_is_well_formed() {
        let trie = compress(&["rambling", "ramble", "rambled", "ram", "rat", "zoo"]);
        assert!(trie.validate().is_ok());
        assert_eq!(
            trie.words(),
            vec!["ram", "ramble", "rambled", "rambling", "rat", "zoo"]
        );
    }

    #[test]
    fn test_policy_config_names() {
        let policy: CompressionPolicy = serde_json::from_str("\"single_child\"").unwrap();
        assert_eq!(policy, CompressionPolicy::SingleChild);
        assert_eq!(CompressionPolicy::default(), CompressionPolicy::PreserveWords);
    }
}
