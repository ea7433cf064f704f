//! Abstract repository interface for client storage.
//!
//! Every storage backend (Postgres, in-memory) implements [`ClientRepository`].
//! The service layer and HTTP handlers only ever see the trait object, which
//! is what makes backends swappable in tests.

use async_trait::async_trait;

use crate::models::{Client, ClientDraft, ClientId};

mod error;

pub use error::{RepositoryError, RepositoryResult};

/// Storage operations for client records.
///
/// Lookup methods return `Ok(None)` / an empty `Vec` when nothing matches;
/// an `Err` always means the store itself failed.
#[async_trait]
pub trait ClientRepository: Send + Sync + std::fmt::Debug {
    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All clients, ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Client>>;

    /// Look up a single client by id.
    async fn find_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;

    /// All clients whose income matches `income` exactly, ordered by id.
    async fn find_by_income(&self, income: f64) -> RepositoryResult<Vec<Client>>;

    /// Look up a single client by CPF.
    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Client>>;

    /// Insert a new client and return the stored row with its assigned id.
    ///
    /// Fails with [`RepositoryError::UniqueViolation`] when the CPF is taken.
    async fn insert(&self, draft: &ClientDraft) -> RepositoryResult<Client>;

    /// Overwrite every field of an existing client.
    ///
    /// Returns `Ok(None)` when no row with `id` exists. Fails with
    /// [`RepositoryError::UniqueViolation`] when the new CPF belongs to a
    /// different client.
    async fn update(&self, id: ClientId, draft: &ClientDraft)
        -> RepositoryResult<Option<Client>>;

    /// Remove a client. Returns `false` when no row with `id` existed.
    async fn delete(&self, id: ClientId) -> RepositoryResult<bool>;
}
