//! Errors of the route tables.

use thiserror::Error;

/// Failures reported by the route tables. None of them leaves a table modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The text is not a valid prefix of the table's address family.
    #[error("malformed prefix `{0}`")]
    MalformedPrefix(String),
    /// The text is not a valid bare address of the table's address family.
    #[error("malformed address `{0}`")]
    MalformedAddress(String),
    /// The canonical prefix is already stored.
    #[error("route already present")]
    DuplicateRoute,
    /// The canonical prefix is not stored.
    #[error("route not found")]
    RouteNotFound,
    /// A loose delete matched more than one stored route.
    #[error("route is ambiguous, {0} stored routes share its network address")]
    AmbiguousRoute(usize),
    /// No stored prefix covers the address.
    #[error("no route covers the address")]
    NotFound,
}

/// Result type of all fallible table operations.
pub type Result<T> = std::result::Result<T, Error>;
