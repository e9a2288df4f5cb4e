use thiserror::Error;

/// Structural failures that make a territory block unsafe to rewrite
///
/// A territory that is simply absent from the document is not an error; it is
/// reported as `PatchStatus::NotFound`.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("failed to build match pattern for `{target}`: {source}")]
    Pattern {
        target: String,
        #[source]
        source: regex::Error,
    },
    #[error(
        "territory `{id}` opens at byte {start} but no closing `}},` follows at indentation {indent}"
    )]
    UnterminatedBlock {
        id: String,
        start: usize,
        indent: usize,
    },
    #[error("territory `{id}` is declared more than once (at bytes {first} and {second})")]
    DuplicateBlock {
        id: String,
        first: usize,
        second: usize,
    },
}
