//! Borrowed handles on trie nodes

use super::node::{Node, NodeId};
use super::tree::Trie;
use std::borrow::Cow;
use std::fmt;

/// A node together with the trie it lives in
///
/// This is what downstream code navigates with: it exposes the node
/// capability set plus everything that needs the rest of the arena
/// (parent, children, the word a node spells, structural equality).
pub struct NodeRef<'a, N> {
    trie: &'a Trie<N>,
    id: NodeId,
}

impl<'a, N> Clone for NodeRef<'a, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, N> Copy for NodeRef<'a, N> {}

impl<'a, N: Node> NodeRef<'a, N> {
    /// Callers guarantee `id` is in `trie`
    pub(crate) fn new(trie: &'a Trie<N>, id: NodeId) -> Self {
        NodeRef { trie, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    fn node(&self) -> &'a N {
        self.trie.slot(self.id)
    }

    pub fn letter(&self) -> Option<Cow<'a, str>> {
        self.node().letter()
    }

    pub fn is_terminal(&self) -> bool {
        self.node().is_terminal()
    }

    pub fn is_root(&self) -> bool {
        self.node().is_root()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, N>> {
        self.node().parent().and_then(|id| self.trie.node_ref(id))
    }

    pub fn get(&self, key: char) -> Option<NodeRef<'a, N>> {
        self.node().get(key).and_then(|id| self.trie.node_ref(id))
    }

    pub fn has_key(&self, key: char) -> bool {
        self.node().has_key(key)
    }

    /// Children in key order
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, N>> + 'a {
        let trie = self.trie;
        self.node()
            .children()
            .filter_map(move |id| trie.node_ref(*id))
    }

    pub fn child_count(&self) -> usize {
        self.node().children_tree().len()
    }

    /// The letters from the root down to this node; empty for the root
    pub fn as_word(&self) -> String {
        self.trie.as_word(self.id)
    }
}

/// Structural equality: same letter, same terminal flag, and pairwise equal
/// children under the same keys. Parent links and ids are ignored, so nodes
/// from two independently built tries can compare equal.
///
/// The terminal flag is compared on purpose, so tries that differ only in
/// whether a prefix is itself a stored word are not equal.
impl<'a, 'b, N: Node> PartialEq<NodeRef<'b, N>> for NodeRef<'a, N> {
    fn eq(&self, other: &NodeRef<'b, N>) -> bool {
        let mut pending = vec![(*self, *other)];

        while let Some((mine, theirs)) = pending.pop() {
            let (left, right) = (mine.node(), theirs.node());

            if left.letter() != right.letter() {
                return false;
            }
            if left.is_terminal() != right.is_terminal() {
                return false;
            }
            if left.children_tree().len() != right.children_tree().len() {
                return false;
            }

            for (key, id) in left.children_tree() {
                match theirs.get(*key) {
                    Some(matching) => pending.push((NodeRef::new(mine.trie, *id), matching)),
                    None => return false,
                }
            }
        }
        true
    }
}

impl<'a, N: Node> Eq for NodeRef<'a, N> {}

impl<'a, N: Node> fmt::Debug for NodeRef<'a, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("letter", &self.letter())
            .field("terminal", &self.is_terminal())
            .field("children", &self.child_count())
            .finish()
    }
}

/// Tries compare by their root nodes
impl<N: Node> PartialEq for Trie<N> {
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
    }
}

impl<N: Node> Eq for Trie<N> {}
