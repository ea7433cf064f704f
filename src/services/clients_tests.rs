//! Unit tests for the client service, run against the in-memory repository.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::db::repositories::LocalRepository;
use crate::db::repository::{ClientRepository, RepositoryError, RepositoryResult};
use crate::models::{Client, ClientDraft, ClientId};
use crate::services::{ClientService, ServiceError};

fn draft(name: &str, cpf: &str, income: f64) -> ClientDraft {
    ClientDraft {
        name: name.to_string(),
        cpf: cpf.to_string(),
        income,
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        children: 2,
    }
}

fn service() -> ClientService {
    ClientService::new(Arc::new(LocalRepository::new()))
}

#[tokio::test]
async fn create_assigns_id_and_stores_fields() {
    let service = service();

    let client = service
        .create(draft("Carlos", "12345678901", 3000.0))
        .await
        .unwrap();

    assert_eq!(client.id, ClientId::new(1));
    assert_eq!(client.name, "Carlos");
    assert_eq!(client.cpf, "12345678901");
    assert_eq!(client.income, 3000.0);
    assert_eq!(client.children, 2);

    let fetched = service.get_by_id(client.id).await.unwrap();
    assert_eq!(fetched, client);
}

#[tokio::test]
async fn create_with_duplicate_cpf_is_rejected_and_adds_no_row() {
    let service = service();

    service
        .create(draft("Carlos", "12345678901", 3000.0))
        .await
        .unwrap();
    let err = service
        .create(draft("Other", "12345678901", 5000.0))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::DuplicateCpf(ref cpf) if cpf == "12345678901"));
    assert_eq!(service.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn get_by_id_signals_not_found_for_missing_client() {
    let service = service();

    let err = service.get_by_id(ClientId::new(999)).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn get_by_cpf_finds_and_signals_not_found() {
    let service = service();
    service
        .create(draft("Carlos", "12345678901", 3000.0))
        .await
        .unwrap();

    let found = service.get_by_cpf("12345678901").await.unwrap();
    assert_eq!(found.name, "Carlos");

    let err = service.get_by_cpf("00000000000").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn get_by_income_returns_exact_matches_only() {
    let service = service();
    service.create(draft("a", "111", 3000.0)).await.unwrap();
    service.create(draft("b", "222", 3000.0)).await.unwrap();
    service.create(draft("c", "333", 4500.5)).await.unwrap();

    let matches = service.get_by_income(3000.0).await.unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|c| c.income == 3000.0));

    // Empty result is a plain empty list, not NotFound.
    assert!(service.get_by_income(99.0).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_overwrites_every_field() {
    let service = service();
    let created = service
        .create(draft("Carlos", "12345678901", 3000.0))
        .await
        .unwrap();

    let new_fields = ClientDraft {
        name: "Carlos Silva".to_string(),
        cpf: "10987654321".to_string(),
        income: 4200.0,
        birth_date: NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
        children: 3,
    };
    let updated = service.update(created.id, new_fields.clone()).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, new_fields.name);
    assert_eq!(updated.cpf, new_fields.cpf);
    assert_eq!(updated.income, new_fields.income);
    assert_eq!(updated.birth_date, new_fields.birth_date);
    assert_eq!(updated.children, new_fields.children);

    let fetched = service.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_missing_client_signals_not_found() {
    let service = service();

    let err = service
        .update(ClientId::new(42), draft("ghost", "999", 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn update_to_another_clients_cpf_is_a_duplicate() {
    let service = service();
    service.create(draft("a", "111", 1.0)).await.unwrap();
    let b = service.create(draft("b", "222", 2.0)).await.unwrap();

    let err = service.update(b.id, draft("b", "111", 2.0)).await.unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateCpf(_)));
}

#[tokio::test]
async fn delete_removes_row_and_subsequent_fetch_fails() {
    let service = service();
    let created = service
        .create(draft("Carlos", "12345678901", 3000.0))
        .await
        .unwrap();

    service.delete(created.id).await.unwrap();

    let err = service.get_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = service.delete(created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

/// Repository stub that fails every call, for checking that store errors
/// surface as `ServiceError::Repository` rather than NotFound.
#[derive(Debug)]
struct BrokenRepository;

#[async_trait::async_trait]
impl ClientRepository for BrokenRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Err(RepositoryError::connection("down"))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Client>> {
        Err(RepositoryError::connection("down"))
    }

    async fn find_by_id(&self, _id: ClientId) -> RepositoryResult<Option<Client>> {
        Err(RepositoryError::connection("down"))
    }

    async fn find_by_income(&self, _income: f64) -> RepositoryResult<Vec<Client>> {
        Err(RepositoryError::connection("down"))
    }

    async fn find_by_cpf(&self, _cpf: &str) -> RepositoryResult<Option<Client>> {
        Err(RepositoryError::connection("down"))
    }

    async fn insert(&self, _draft: &ClientDraft) -> RepositoryResult<Client> {
        Err(RepositoryError::connection("down"))
    }

    async fn update(
        &self,
        _id: ClientId,
        _draft: &ClientDraft,
    ) -> RepositoryResult<Option<Client>> {
        Err(RepositoryError::connection("down"))
    }

    async fn delete(&self, _id: ClientId) -> RepositoryResult<bool> {
        Err(RepositoryError::connection("down"))
    }
}

#[tokio::test]
async fn store_failures_are_not_reported_as_not_found() {
    let service = ClientService::new(Arc::new(BrokenRepository));

    let err = service.get_by_id(ClientId::new(1)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Repository(_)));

    let err = service.get_all().await.unwrap_err();
    assert!(matches!(err, ServiceError::Repository(_)));

    let err = service.delete(ClientId::new(1)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Repository(_)));
}
