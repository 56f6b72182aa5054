use thiserror::Error;

/// Errors reported by the tree container.
///
/// All errors are returned synchronously at the offending call; a failing
/// operation leaves the container exactly as it was before the call.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("empty tree: no root node")]
    EmptyTree,

    #[error("node not found: {0}")]
    NotFound(String),

    #[error("parent not found: {0}")]
    ParentNotFound(String),

    #[error("duplicate identity: {0}")]
    DuplicateIdentity(String),

    #[error("invalid identity: matching key is empty or default")]
    InvalidIdentity,

    #[error("no parent: {0} is the root node")]
    NoParent(String),

    #[error("invalid removal: {0}")]
    InvalidRemoval(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
