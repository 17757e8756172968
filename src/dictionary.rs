//! Loading word lists into a raw trie

use crate::trie::RawTrie;
use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Load a dictionary file with one word per line
///
/// Surrounding whitespace is trimmed and blank lines are skipped.
pub fn load(path: impl AsRef<Path>) -> Result<RawTrie> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let trie = from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), nodes = trie.len(), "loaded dictionary");
    Ok(trie)
}

/// Build a raw trie from any line-oriented reader
pub fn from_reader(reader: impl BufRead) -> Result<RawTrie> {
    let mut trie = RawTrie::new();
    let mut words = 0usize;

    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        trie.add(word)?;
        words += 1;
    }

    debug!(words, "read word list");
    Ok(trie)
}
