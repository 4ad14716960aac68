//! A prefix trie over upper-cased words.
//!
//! The trie is the read-only oracle behind the
//! [`DictionaryWord`](crate::solver::constraints::dictionary_word::DictionaryWord)
//! constraint: it answers "is this a prefix of any word?" and "is this a
//! complete word?" queries while the constraint enumerates candidate
//! assignments. Populate it fully before sharing it with a constraint;
//! sharing happens through `Arc`, which makes it immutable from then on.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::Result;

#[derive(Debug, Default)]
struct Node {
    word: bool,
    children: HashMap<char, Node>,
}

/// A set of words supporting prefix and whole-word membership queries.
///
/// All input is normalized to upper case, both when adding and when
/// querying, so callers can mix cases freely.
#[derive(Debug, Default)]
pub struct Trie {
    root: Node,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single word.
    pub fn add(&mut self, word: &str) {
        let mut node = &mut self.root;
        for c in word.to_uppercase().chars() {
            node = node.children.entry(c).or_default();
        }
        node.word = true;
    }

    /// Reads a newline-separated word list from `path`, skipping blank lines.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::open(path)?;
        for line in BufReader::new(file).lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                self.add(word);
            }
        }
        Ok(())
    }

    /// Returns `true` if `s` is a prefix of at least one word (every word
    /// is a prefix of itself).
    pub fn has_prefix(&self, s: &str) -> bool {
        self.lookup(s).is_some()
    }

    /// Returns `true` if `s` is a complete word.
    pub fn has_word(&self, s: &str) -> bool {
        self.lookup(s).map_or(false, |node| node.word)
    }

    fn lookup(&self, s: &str) -> Option<&Node> {
        let mut node = &self.root;
        for c in s.to_uppercase().chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }
}
