//! Compression behaviour on whole tries
//!
//! Run with:
//! ```bash
//! cargo test --test compression
//! ```

use wordtrie::{CompressionPolicy, Compressor, Node, RawNode, RawTrie};

fn raw(words: &[&str]) -> RawTrie {
    RawTrie::from_words(words).unwrap()
}

type NodeState = (String, Option<char>, bool, Option<usize>, Vec<(char, usize)>);

/// Every reachable node's observable state, in depth-first order
fn snapshot(trie: &RawTrie) -> Vec<NodeState> {
    let mut states = Vec::new();
    let mut stack = vec![trie.root_id()];
    while let Some(id) = stack.pop() {
        let node = trie.node(id).unwrap();
        states.push((
            trie.as_word(id),
            node.raw_letter(),
            node.is_terminal(),
            node.parent().map(|p| p.index()),
            node.children_tree()
                .iter()
                .map(|(key, child)| (*key, child.index()))
                .collect(),
        ));
        stack.extend(node.children().copied());
    }
    states
}

// ============================================================================
// Shape
// ============================================================================

#[test]
fn test_root_identity() {
    let cases: [&[&str]; 3] = [&[], &["a"], &["cat", "car", "dog"]];
    for words in cases {
        let compressed = Compressor::new().compress(&raw(words));
        assert!(compressed.root().is_root());
        assert!(compressed.root().letter().is_none());
    }
}

#[test]
fn test_single_character_word() {
    let compressed = Compressor::new().compress(&raw(&["a"]));
    let children: Vec<_> = compressed.root().children().collect();

    assert_eq!(children.len(), 1);
    assert_eq!(children[0].letter().as_deref(), Some("a"));
    assert!(children[0].is_terminal());
}

#[test]
fn test_chain_collapse() {
    let compressed = Compressor::new().compress(&raw(&["cat"]));
    let children: Vec<_> = compressed.root().children().collect();

    assert_eq!(children.len(), 1);
    assert_eq!(children[0].letter().as_deref(), Some("cat"));
    assert!(children[0].is_terminal());
}

#[test]
fn test_branch_preservation() {
    let compressed = Compressor::new().compress(&raw(&["cat", "car"]));
    let ca = compressed.root().get('c').unwrap();

    assert_eq!(compressed.root().child_count(), 1);
    assert_eq!(ca.letter().as_deref(), Some("ca"));
    assert!(!ca.is_terminal());

    let t = ca.get('t').unwrap();
    let r = ca.get('r').unwrap();
    assert_eq!(t.letter().as_deref(), Some("t"));
    assert_eq!(r.letter().as_deref(), Some("r"));
    assert!(t.is_terminal() && r.is_terminal());
    assert_eq!(t.as_word(), "cat");
    assert_eq!(r.as_word(), "car");
}

#[test]
fn test_long_chain_is_one_node() {
    let word = "a".repeat(5_000);
    let compressed = Compressor::new().compress(&raw(&[word.as_str()]));

    assert_eq!(compressed.len(), 2);
    assert_eq!(compressed.words(), vec![word]);
}

#[test]
fn test_empty_input() {
    let compressed = Compressor::new().compress(&RawTrie::new());

    assert!(compressed.root().is_root());
    assert_eq!(compressed.root().child_count(), 0);
    assert!(compressed.words().is_empty());
}

#[test]
fn test_never_deeper_than_source() {
    let source = raw(&["rambling", "ramble", "ram", "trie", "tried", "tries", "x"]);
    for policy in [CompressionPolicy::PreserveWords, CompressionPolicy::SingleChild] {
        let compressed = Compressor::with_policy(policy).compress(&source);
        assert!(compressed.depth() <= source.depth());
        assert!(compressed.len() <= source.len());
        assert!(compressed.validate().is_ok());
    }
}

// ============================================================================
// Words
// ============================================================================

#[test]
fn test_word_set_preserved() {
    let words = [
        "these", "three", "things", "two", "the", "thee", "a", "an", "and", "zzz",
    ];
    let source = raw(&words);
    let compressed = Compressor::new().compress(&source);

    assert_eq!(compressed.words(), source.words());
    for word in words {
        assert!(compressed.contains(word), "{} should survive", word);
    }
    assert!(!compressed.contains("th"));
    assert!(compressed.has_prefix("th"));
    assert!(compressed.has_prefix("thi"));
    assert!(!compressed.has_prefix("tx"));
}

#[test]
fn test_compressed_scan_inside_a_letter() {
    let compressed = Compressor::new().compress(&raw(&["rambling", "rambled", "zoo"]));

    assert_eq!(compressed.scan("ram"), vec!["rambled", "rambling"]);
    assert_eq!(compressed.scan("rambli"), vec!["rambling"]);
    assert_eq!(compressed.scan("z"), vec!["zoo"]);
    assert!(compressed.scan("rax").is_empty());
}

// ============================================================================
// Input is untouched
// ============================================================================

#[test]
fn test_input_not_mutated() {
    let source = raw(&["cat", "cats", "car", "dog", "do"]);
    let before = source.clone();
    let before_snapshot = snapshot(&source);

    let _ = Compressor::new().compress(&source);
    let _ = Compressor::with_policy(CompressionPolicy::SingleChild).compress(&source);

    assert_eq!(source, before);
    assert_eq!(snapshot(&source), before_snapshot);
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_independent_tries_with_same_words_are_equal() {
    let one = raw(&["cat", "car", "dog"]);
    let two = raw(&["dog", "car", "cat"]);
    assert_eq!(one, two);

    let three = raw(&["cat", "car", "dog", "dot"]);
    assert_ne!(one, three);

    let four = raw(&["cat", "car"]);
    assert_ne!(one, four);
}

#[test]
fn test_compressed_tries_compare_structurally() {
    let one = Compressor::new().compress(&raw(&["cat", "car"]));
    let two = Compressor::new().compress(&raw(&["car", "cat"]));
    let three = Compressor::new().compress(&raw(&["cat", "cab"]));

    assert_eq!(one, two);
    assert_ne!(one, three);
}

#[test]
fn test_hand_built_trie_compresses() {
    let mut source = RawTrie::new();
    let h = source.alloc(RawNode::new('h'));
    let i = source.alloc(RawNode::new('i'));
    source.attach(source.root_id(), h).unwrap();
    source.attach(h, i).unwrap();
    source.node_mut(i).unwrap().mark_terminal();
    assert!(source.validate().is_ok());

    let compressed = Compressor::new().compress(&source);
    assert_eq!(compressed.words(), vec!["hi"]);
    assert_eq!(compressed.root().get('h').unwrap().letter().as_deref(), Some("hi"));
}
