//! Arena-backed trie holding a whole node graph

use super::node::{CompressedNode, Node, NodeId, RawNode};
use super::view::NodeRef;
use crate::{Error, Result};

/// A trie whose nodes live in one arena
///
/// The root is always [`NodeId::ROOT`]. Every other node is owned by exactly
/// one parent through that parent's children tree; parent links are ids and
/// carry no ownership.
#[derive(Clone, Debug)]
pub struct Trie<N> {
    nodes: Vec<N>,
}

/// A trie as built by insertion: one node per character
pub type RawTrie = Trie<RawNode>;

/// A trie produced by the [`Compressor`](super::Compressor)
pub type CompressedTrie = Trie<CompressedNode>;

impl<N: Node> Trie<N> {
    /// Create a trie from its root node
    pub fn with_root(root: N) -> Self {
        Trie { nodes: vec![root] }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// A handle on the root node
    pub fn root(&self) -> NodeRef<'_, N> {
        NodeRef::new(self, NodeId::ROOT)
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id.0)
    }

    /// Get a node mutably by id
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(id.0)
    }

    /// A handle on the node with the given id
    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_, N>> {
        self.nodes.get(id.0).map(|_| NodeRef::new(self, id))
    }

    /// Number of nodes in the arena, root included
    ///
    /// A root-only trie has length 1, and nodes that were allocated but never
    /// attached still count.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing hangs off the root
    pub fn has_no_words(&self) -> bool {
        self.nodes[NodeId::ROOT.0].children_tree().is_empty()
    }

    /// Move a node into the arena without linking it anywhere
    pub fn alloc(&mut self, node: N) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Register `child` under `parent`, keyed by the first character of the
    /// child's letter, and point the child back at its new parent
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        let key = self
            .check(child)?
            .key()
            .ok_or_else(|| Error::KeyMismatch(format!("node {} has no letter", child)))?;

        self.nodes[child.0].set_parent(Some(parent));
        self.nodes[parent.0].set(key, child);
        Ok(())
    }

    /// Reconstruct the letters from the root down to `id`
    pub fn as_word(&self, id: NodeId) -> String {
        let mut letters = Vec::new();
        let mut current = self.node(id);
        while let Some(node) = current {
            if let Some(letter) = node.letter() {
                letters.push(letter);
            }
            current = node.parent().and_then(|parent| self.node(parent));
        }
        letters.into_iter().rev().collect()
    }

    /// True if `word` was stored in the trie
    pub fn contains(&self, word: &str) -> bool {
        match self.descend(word) {
            Some((id, exact)) => exact && self.nodes[id.0].is_terminal(),
            None => false,
        }
    }

    /// True if some stored word starts with `prefix`
    pub fn has_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return !self.has_no_words();
        }
        self.descend(prefix).is_some()
    }

    /// All stored words starting with `prefix`, in lexical order
    pub fn scan(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        if let Some((id, _)) = self.descend(prefix) {
            self.collect_words(id, self.as_word(id), &mut results);
        }
        results
    }

    /// All stored words, in lexical order
    pub fn words(&self) -> Vec<String> {
        let mut results = Vec::new();
        self.collect_words(NodeId::ROOT, String::new(), &mut results);
        results
    }

    /// Number of terminal nodes
    pub fn word_count(&self) -> usize {
        self.reachable().iter().filter(|id| self.nodes[id.0].is_terminal()).count()
    }

    /// Longest root-to-leaf path, counted in nodes below the root
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(NodeId::ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in self.nodes[id.0].children() {
                stack.push((*child, depth + 1));
            }
        }
        deepest
    }

    /// Check the structural invariants every well-formed trie keeps
    ///
    /// - every child is stored under the first character of its letter
    /// - every child points back at the node holding it
    /// - every node is reachable from the root exactly once
    /// - only the root lacks a letter and a parent
    pub fn validate(&self) -> Result<()> {
        let root = &self.nodes[NodeId::ROOT.0];
        if !root.is_root() {
            return Err(Error::Malformed("root has a parent".into()));
        }

        let mut seen = vec![false; self.nodes.len()];
        seen[NodeId::ROOT.0] = true;
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            for (key, child) in self.nodes[id.0].children_tree() {
                let node = self.check(*child).map_err(|_| {
                    Error::Malformed(format!("node {} has dangling child {}", id, child))
                })?;

                if seen[child.0] {
                    return Err(Error::Malformed(format!(
                        "node {} is reachable more than once",
                        child
                    )));
                }
                seen[child.0] = true;

                match node.letter() {
                    Some(letter) if letter.starts_with(*key) => {}
                    Some(letter) => {
                        return Err(Error::Malformed(format!(
                            "node {} with letter {:?} stored under key {:?}",
                            child, letter, key
                        )))
                    }
                    None => {
                        return Err(Error::Malformed(format!("node {} has no letter", child)))
                    }
                }

                if node.parent() != Some(id) {
                    return Err(Error::Malformed(format!(
                        "node {} does not point back at its parent {}",
                        child, id
                    )));
                }

                stack.push(*child);
            }
        }

        match seen.iter().position(|reached| !reached) {
            Some(orphan) => Err(Error::Malformed(format!(
                "node {} is not reachable from the root",
                NodeId(orphan)
            ))),
            None => Ok(()),
        }
    }

    // === Internal helpers ===

    /// Direct access for ids known to be in this arena
    pub(crate) fn slot(&self, id: NodeId) -> &N {
        &self.nodes[id.0]
    }

    fn check(&self, id: NodeId) -> Result<&N> {
        self.nodes.get(id.0).ok_or(Error::UnknownNode(id.0))
    }

    /// Walk down as far as `query` leads
    ///
    /// Returns the node where the query runs out, and whether it ran out
    /// exactly at the end of that node's letter rather than partway through.
    fn descend(&self, mut query: &str) -> Option<(NodeId, bool)> {
        let mut id = NodeId::ROOT;
        while let Some(key) = query.chars().next() {
            let child = self.nodes[id.0].get(key)?;
            let letter = self.nodes[child.0].letter()?;

            if let Some(rest) = query.strip_prefix(&*letter) {
                query = rest;
            } else if letter.starts_with(query) {
                return Some((child, false));
            } else {
                return None;
            }
            id = child;
        }
        Some((id, true))
    }

    /// Depth-first, children in key order, so words come out sorted
    fn collect_words(&self, id: NodeId, prefix: String, results: &mut Vec<String>) {
        let mut stack = vec![(id, prefix)];
        while let Some((id, word)) = stack.pop() {
            let node = &self.nodes[id.0];
            for child in node.children().rev() {
                let mut extended = word.clone();
                if let Some(letter) = self.nodes[child.0].letter() {
                    extended.push_str(&letter);
                }
                stack.push((*child, extended));
            }
            if node.is_terminal() && !node.is_root() {
                results.push(word);
            }
        }
    }

    fn reachable(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            ids.push(id);
            stack.extend(self.nodes[id.0].children().copied());
        }
        ids
    }
}

impl RawTrie {
    /// Create a trie with only a root
    pub fn new() -> Self {
        Trie::with_root(RawNode::root())
    }

    /// Build a trie from a list of words
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = RawTrie::new();
        for word in words {
            trie.add(word.as_ref())?;
        }
        Ok(trie)
    }

    /// Insert a word, returning the id of its terminal node
    pub fn add(&mut self, word: &str) -> Result<NodeId> {
        self.add_under(NodeId::ROOT, word)
    }

    /// Insert `suffix` below an existing node, one node per character
    pub fn add_under(&mut self, id: NodeId, suffix: &str) -> Result<NodeId> {
        if suffix.is_empty() {
            return Err(Error::EmptyWord);
        }
        self.check(id)?;

        let mut current = id;
        for letter in suffix.chars() {
            current = match self.nodes[current.0].get(letter) {
                Some(child) => child,
                None => {
                    let child = self.alloc(RawNode::new(letter));
                    self.attach(current, child)?;
                    child
                }
            };
        }
        self.nodes[current.0].mark_terminal();
        Ok(current)
    }
}

impl Default for RawTrie {
    fn default() -> Self {
        RawTrie::new()
    }
}

impl CompressedTrie {
    /// Create a compressed trie with only a root
    pub fn new() -> Self {
        Trie::with_root(CompressedNode::new(None))
    }
}

impl Default for CompressedTrie {
    fn default() -> Self {
        CompressedTrie::new()
    }
}
