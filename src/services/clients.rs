//! Business logic for client records.
//!
//! Sits between the HTTP handlers and the repository. Owns the two domain
//! rules the system has: CPF uniqueness on create and NotFound signaling on
//! missing lookups. Everything else is delegation.

use std::sync::Arc;

use crate::db::repository::{ClientRepository, RepositoryError};
use crate::models::{Client, ClientDraft, ClientId};

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Domain signals raised by the service layer.
///
/// The HTTP layer maps these to status codes; the repository layer never
/// produces them directly.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The requested client does not exist.
    #[error("Client not found: {0}")]
    NotFound(String),

    /// A create or update would duplicate an existing CPF.
    #[error("CPF already exists: {0}")]
    DuplicateCpf(String),

    /// The store failed. Distinct from NotFound so infrastructure failures
    /// are never reported as missing data.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Orchestrates repository calls for client CRUD.
#[derive(Clone)]
pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
}

impl ClientService {
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    /// All clients.
    pub async fn get_all(&self) -> ServiceResult<Vec<Client>> {
        Ok(self.repository.find_all().await?)
    }

    /// A single client by id.
    pub async fn get_by_id(&self, id: ClientId) -> ServiceResult<Client> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("id {}", id)))
    }

    /// Clients whose income matches exactly. An empty result is not an error.
    pub async fn get_by_income(&self, income: f64) -> ServiceResult<Vec<Client>> {
        Ok(self.repository.find_by_income(income).await?)
    }

    /// A single client by CPF.
    pub async fn get_by_cpf(&self, cpf: &str) -> ServiceResult<Client> {
        self.repository
            .find_by_cpf(cpf)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("cpf {}", cpf)))
    }

    /// Create a new client with a not-yet-used CPF.
    pub async fn create(&self, draft: ClientDraft) -> ServiceResult<Client> {
        if self.repository.find_by_cpf(&draft.cpf).await?.is_some() {
            return Err(ServiceError::DuplicateCpf(draft.cpf));
        }

        match self.repository.insert(&draft).await {
            Ok(client) => Ok(client),
            // A racing create can slip past the pre-check; the unique index
            // has the final word.
            Err(RepositoryError::UniqueViolation(_)) => {
                Err(ServiceError::DuplicateCpf(draft.cpf))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite every field of an existing client.
    pub async fn update(&self, id: ClientId, draft: ClientDraft) -> ServiceResult<Client> {
        match self.repository.update(id, &draft).await {
            Ok(Some(client)) => Ok(client),
            Ok(None) => Err(ServiceError::NotFound(format!("id {}", id))),
            Err(RepositoryError::UniqueViolation(_)) => {
                Err(ServiceError::DuplicateCpf(draft.cpf))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a client.
    pub async fn delete(&self, id: ClientId) -> ServiceResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("id {}", id)))
        }
    }
}
