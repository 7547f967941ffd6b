//! Backing Store Module
//!
//! The store capability consumed by CRUD dispatch, its SQLite implementation,
//! and bounded-retry connection establishment.
//!
//! The core treats store errors as opaque: absence is expressed through
//! `Option`/`bool` return values, and everything else surfaces as a generic
//! [`StoreError`](crate::error::StoreError).

mod connect;
mod sqlite;

pub use connect::connect_with_retry;
pub use sqlite::Database;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::User;

// == Store Capability ==
/// Query/exec capability over the authoritative user data.
///
/// Implementations are expected to serialize conflicting writes themselves;
/// the service holds no cross-request lock around store calls.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns all users.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Inserts a user; the store assigns the identity.
    async fn insert(&self, name: &str) -> Result<User, StoreError>;

    /// Returns the user with the given id, or None if absent.
    async fn fetch(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Replaces the name of the user with the given id.
    ///
    /// Returns None when no row was affected; the affected-row count is the
    /// sole existence check, there is no pre-read.
    async fn update(&self, id: i64, name: &str) -> Result<Option<User>, StoreError>;

    /// Deletes the user with the given id; false when no row was affected.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
