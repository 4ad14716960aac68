use std::sync::Arc;

use crate::{
    solver::{
        constraint::{ConstraintChecker, ConstraintDescriptor},
        constraints::buildup::BuildupSet,
        problem::GroupScope,
    },
    trie::Trie,
};

/// Requires the group's members, read in order, to spell a dictionary
/// word.
///
/// Each value index maps to a token of `alphabet` (usually a single
/// letter). `apply` enumerates assignments left to right through the
/// values still possible at each position, abandoning a branch as soon as
/// the accumulated prefix is not a prefix of any word, and requiring a
/// complete word at the final position. Every value that survives in at
/// least one completed branch is kept; everything else is removed. The
/// trie must be fully populated before the first `apply`.
#[derive(Debug, Clone)]
pub struct DictionaryWord {
    trie: Arc<Trie>,
    alphabet: Vec<String>,
}

impl DictionaryWord {
    pub fn new<I, S>(trie: Arc<Trie>, alphabet: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trie,
            alphabet: alphabet.into_iter().map(Into::into).collect(),
        }
    }

    fn enumerate(
        &self,
        scope: &GroupScope<'_>,
        reachable: &mut BuildupSet,
        prefix: &mut String,
        pos: usize,
    ) {
        if pos == scope.len() {
            return;
        }
        for (value, token) in self.alphabet.iter().enumerate() {
            if !scope.possible(pos, value) {
                continue;
            }
            let rollback = prefix.len();
            prefix.push_str(token);
            let viable = if pos + 1 == scope.len() {
                self.trie.has_word(prefix)
            } else {
                self.trie.has_prefix(prefix)
            };
            if viable {
                reachable.push(value);
                self.enumerate(scope, reachable, prefix, pos + 1);
                reachable.pop();
            }
            prefix.truncate(rollback);
        }
    }
}

impl ConstraintChecker for DictionaryWord {
    fn apply(&self, scope: &mut GroupScope<'_>, _dirty: &[usize]) -> bool {
        let mut reachable = BuildupSet::new(scope.len(), scope.value_size());
        let mut prefix = String::new();
        self.enumerate(scope, &mut reachable, &mut prefix, 0);
        reachable.export(scope);
        true
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "DictionaryWord".to_string(),
            description: format!("members spell a word over {:?}", self.alphabet),
        }
    }
}
