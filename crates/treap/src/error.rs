use std::collections::TryReserveError;

use thiserror::Error;

/// Failure modes of [`Treap::insert`](crate::Treap::insert).
///
/// Either way the tree is left exactly as it was before the call.
#[derive(Debug, Error)]
pub enum InsertError {
    /// A node with an equal key is already present.
    #[error("key is already present")]
    DuplicateKey,
    /// The node arena could not grow.
    #[error("node allocation failed")]
    Alloc(#[from] TryReserveError),
}
