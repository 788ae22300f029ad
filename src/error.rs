use crate::oid::Oid;

/// Failures surfaced by the object database.
///
/// Every operation reports synchronously to its caller; nothing is retried
/// here. Retry policy, if any, belongs to whoever drives the database.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested id has no backing file in `objects/`.
    #[error("object {0} not found")]
    ObjectNotFound(Oid),

    /// Header or tree-entry framing that cannot be parsed: missing
    /// separator, unknown kind or mode, truncated hash, unparsable length.
    #[error("malformed object: {0}")]
    MalformedObject(String),

    /// Filesystem access error (permissions, missing directory, disk).
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
