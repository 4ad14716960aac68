pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced by the crate's I/O boundary.
///
/// The solver itself never reports errors: constraint violations and
/// exhausted domains are ordinary search outcomes, threaded back as plain
/// booleans. `Error` exists for the edges of the crate, such as loading a
/// word list into a [`Trie`](crate::trie::Trie).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read word list: {0}")]
    WordList(#[from] std::io::Error),
}
