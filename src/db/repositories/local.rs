//! In-memory repository implementation.
//!
//! Backs unit tests and local development. Mirrors the Postgres backend's
//! behavior, including the unique CPF constraint, so tests exercising the
//! service layer see the same error surface as production.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::db::repository::{
    ClientRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Client, ClientDraft, ClientId};

#[derive(Debug, Default)]
struct Store {
    clients: HashMap<i32, Client>,
    next_id: i32,
}

impl Store {
    /// Matches the SQL `UNIQUE` constraint: no two rows share a CPF.
    /// `exclude` skips the row being updated so it can keep its own CPF.
    fn cpf_taken(&self, cpf: &str, exclude: Option<i32>) -> bool {
        self.clients
            .values()
            .any(|c| c.cpf == cpf && Some(c.id.value()) != exclude)
    }
}

/// Thread-safe in-memory client store.
#[derive(Debug, Default)]
pub struct LocalRepository {
    inner: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored clients. Handy for test assertions.
    pub fn len(&self) -> usize {
        self.inner.read().clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().clients.is_empty()
    }
}

fn sorted_by_id(mut clients: Vec<Client>) -> Vec<Client> {
    clients.sort_by_key(|c| c.id);
    clients
}

#[async_trait]
impl ClientRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Client>> {
        let store = self.inner.read();
        Ok(sorted_by_id(store.clients.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let store = self.inner.read();
        Ok(store.clients.get(&id.value()).cloned())
    }

    async fn find_by_income(&self, income: f64) -> RepositoryResult<Vec<Client>> {
        let store = self.inner.read();
        Ok(sorted_by_id(
            store
                .clients
                .values()
                .filter(|c| c.income == income)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Client>> {
        let store = self.inner.read();
        Ok(store.clients.values().find(|c| c.cpf == cpf).cloned())
    }

    async fn insert(&self, draft: &ClientDraft) -> RepositoryResult<Client> {
        let mut store = self.inner.write();

        if store.cpf_taken(&draft.cpf, None) {
            return Err(RepositoryError::UniqueViolation(format!(
                "cpf {} already exists",
                draft.cpf
            )));
        }

        store.next_id += 1;
        let client = Client::from_draft(ClientId::new(store.next_id), draft.clone());
        store.clients.insert(client.id.value(), client.clone());
        Ok(client)
    }

    async fn update(
        &self,
        id: ClientId,
        draft: &ClientDraft,
    ) -> RepositoryResult<Option<Client>> {
        let mut store = self.inner.write();

        if !store.clients.contains_key(&id.value()) {
            return Ok(None);
        }

        if store.cpf_taken(&draft.cpf, Some(id.value())) {
            return Err(RepositoryError::UniqueViolation(format!(
                "cpf {} already exists",
                draft.cpf
            )));
        }

        let client = Client::from_draft(id, draft.clone());
        store.clients.insert(id.value(), client.clone());
        Ok(Some(client))
    }

    async fn delete(&self, id: ClientId) -> RepositoryResult<bool> {
        let mut store = self.inner.write();
        Ok(store.clients.remove(&id.value()).is_some())
    }
}
