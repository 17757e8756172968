//! Trie node types

use std::borrow::Cow;
use std::collections::btree_map::Values;
use std::collections::BTreeMap;
use std::fmt;

/// Index of a node inside the [`Trie`](super::Trie) arena that owns it
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root of every trie
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in its arena
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Children of a node, keyed by the first character of each child's letter
pub type ChildrenTree = BTreeMap<char, NodeId>;

/// The capability set shared by raw and compressed nodes
///
/// Children are owned through `children_tree`; `parent` is a plain id and
/// only ever used to walk upwards.
pub trait Node {
    /// The letter(s) this node contributes to a word; `None` at the root
    fn letter(&self) -> Option<Cow<'_, str>>;

    /// Whether the path from the root to this node spells a stored word
    fn is_terminal(&self) -> bool;

    /// Forces the terminal flag on (`terminal!`)
    fn mark_terminal(&mut self) -> &mut Self;

    fn parent(&self) -> Option<NodeId>;

    fn set_parent(&mut self, parent: Option<NodeId>);

    fn children_tree(&self) -> &ChildrenTree;

    fn children_tree_mut(&mut self) -> &mut ChildrenTree;

    /// True iff no parent is set
    fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    fn get(&self, key: char) -> Option<NodeId> {
        self.children_tree().get(&key).copied()
    }

    fn set(&mut self, key: char, child: NodeId) {
        self.children_tree_mut().insert(key, child);
    }

    fn has_key(&self, key: char) -> bool {
        self.children_tree().contains_key(&key)
    }

    fn children(&self) -> Values<'_, char, NodeId> {
        self.children_tree().values()
    }

    /// First character of the letter, i.e. the key this node is stored under
    fn key(&self) -> Option<char> {
        self.letter().and_then(|letter| letter.chars().next())
    }
}

/// An uncompressed node: exactly one character per node
#[derive(Clone, Debug, Default)]
pub struct RawNode {
    letter: Option<char>,
    terminal: bool,
    parent: Option<NodeId>,
    children_tree: ChildrenTree,
}

impl RawNode {
    /// Create a detached node for `letter`
    pub fn new(letter: char) -> Self {
        RawNode {
            letter: Some(letter),
            ..Default::default()
        }
    }

    /// Create a root node (no letter, no parent)
    pub fn root() -> Self {
        RawNode::default()
    }

    pub fn raw_letter(&self) -> Option<char> {
        self.letter
    }

    pub fn set_letter(&mut self, letter: Option<char>) {
        self.letter = letter;
    }

    /// Exactly one child, regardless of the terminal flag
    pub fn has_single_child(&self) -> bool {
        self.children_tree.len() == 1
    }

    /// Exactly one child and not the end of a stored word, so merging the
    /// node into its descendant chain cannot drop a word
    pub fn is_compressable(&self) -> bool {
        self.has_single_child() && !self.terminal
    }

    /// The only child, if there is exactly one
    pub fn only_child(&self) -> Option<NodeId> {
        if self.has_single_child() {
            self.children().next().copied()
        } else {
            None
        }
    }
}

impl Node for RawNode {
    fn letter(&self) -> Option<Cow<'_, str>> {
        self.letter.map(|c| Cow::Owned(c.to_string()))
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn mark_terminal(&mut self) -> &mut Self {
        self.terminal = true;
        self
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    fn children_tree(&self) -> &ChildrenTree {
        &self.children_tree
    }

    fn children_tree_mut(&mut self) -> &mut ChildrenTree {
        &mut self.children_tree
    }

    fn key(&self) -> Option<char> {
        self.letter
    }
}

/// A compressed node whose letter may span a whole collapsed chain
#[derive(Clone, Debug, Default)]
pub struct CompressedNode {
    letter: Option<String>,
    terminal: bool,
    parent: Option<NodeId>,
    children_tree: ChildrenTree,
}

impl CompressedNode {
    /// Create an empty node owned by `parent`
    pub fn new(parent: Option<NodeId>) -> Self {
        CompressedNode {
            parent,
            ..Default::default()
        }
    }

    pub fn set_letter(&mut self, letter: Option<String>) {
        self.letter = letter;
    }

    /// Append to the letter, starting one if there is none yet
    pub fn push_letter(&mut self, suffix: &str) {
        self.letter.get_or_insert_with(String::new).push_str(suffix);
    }

    pub fn set_terminal(&mut self, terminal: bool) {
        self.terminal = terminal;
    }

    /// Replace the whole children mapping (`children_tree=`)
    pub fn set_children_tree(&mut self, children_tree: ChildrenTree) {
        self.children_tree = children_tree;
    }
}

impl Node for CompressedNode {
    fn letter(&self) -> Option<Cow<'_, str>> {
        self.letter.as_deref().map(Cow::Borrowed)
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn mark_terminal(&mut self) -> &mut Self {
        self.terminal = true;
        self
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    fn children_tree(&self) -> &ChildrenTree {
        &self.children_tree
    }

    fn children_tree_mut(&mut self) -> &mut ChildrenTree {
        &mut self.children_tree
    }
}
