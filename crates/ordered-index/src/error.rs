use thiserror::Error;

use super::Key;

/// Returned when inserting a key that is already present.
///
/// Key assignment happens outside of the index, so this usually means the caller
/// handed out the same key twice.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("duplicate key in ordered index <key='{0}'>")]
pub struct DuplicateKeyError(pub Key);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid index order <order={0}>, must be at least {min}", min = super::Order::MIN)]
pub struct InvalidOrderError(pub usize);
