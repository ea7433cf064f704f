//! Tests for the in-memory LocalRepository.
//!
//! Covers CRUD behavior, the unique CPF constraint, and concurrent access.

use std::sync::Arc;

use chrono::NaiveDate;
use client_registry::db::repositories::LocalRepository;
use client_registry::db::repository::{ClientRepository, RepositoryError};
use client_registry::models::{ClientDraft, ClientId};

fn draft(name: &str, cpf: &str, income: f64) -> ClientDraft {
    ClientDraft {
        name: name.to_string(),
        cpf: cpf.to_string(),
        income,
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        children: 2,
    }
}

#[tokio::test]
async fn insert_and_find_round_trip() {
    let repo = LocalRepository::new();

    let created = repo.insert(&draft("Carlos", "12345678901", 3000.0)).await.unwrap();
    assert_eq!(created.id, ClientId::new(1));

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id, created);

    let by_cpf = repo.find_by_cpf("12345678901").await.unwrap().unwrap();
    assert_eq!(by_cpf, created);

    assert!(repo.find_by_id(ClientId::new(99)).await.unwrap().is_none());
    assert!(repo.find_by_cpf("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn find_all_is_ordered_by_id() {
    let repo = LocalRepository::new();
    for i in 0..5 {
        repo.insert(&draft(&format!("c{i}"), &format!("cpf{i}"), 100.0))
            .await
            .unwrap();
    }

    let all = repo.find_all().await.unwrap();
    let ids: Vec<i32> = all.iter().map(|c| c.id.value()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn find_by_income_matches_exactly() {
    let repo = LocalRepository::new();
    repo.insert(&draft("a", "111", 3000.0)).await.unwrap();
    repo.insert(&draft("b", "222", 3000.0)).await.unwrap();
    repo.insert(&draft("c", "333", 3000.01)).await.unwrap();

    let matches = repo.find_by_income(3000.0).await.unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|c| c.income == 3000.0));

    assert!(repo.find_by_income(1.0).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_cpf_insert_is_a_unique_violation() {
    let repo = LocalRepository::new();
    repo.insert(&draft("a", "111", 1.0)).await.unwrap();

    let err = repo.insert(&draft("b", "111", 2.0)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueViolation(_)));
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn update_overwrites_and_reports_missing_rows() {
    let repo = LocalRepository::new();
    let created = repo.insert(&draft("a", "111", 1.0)).await.unwrap();

    let updated = repo
        .update(created.id, &draft("b", "222", 2.0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "b");
    assert_eq!(updated.cpf, "222");
    assert_eq!(updated.income, 2.0);

    // Old CPF is free again.
    assert!(repo.find_by_cpf("111").await.unwrap().is_none());

    let missing = repo
        .update(ClientId::new(42), &draft("x", "333", 3.0))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn delete_removes_row() {
    let repo = LocalRepository::new();
    let created = repo.insert(&draft("a", "111", 1.0)).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    // Second delete finds nothing.
    assert!(!repo.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn concurrent_inserts_of_distinct_cpfs_all_succeed() {
    let repo = Arc::new(LocalRepository::new());

    let mut handles = vec![];
    for i in 0..10 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.insert(&draft(&format!("c{i}"), &format!("cpf{i}"), 100.0))
                .await
        }));
    }

    let mut ids = vec![];
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id.value());
    }

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);
    assert_eq!(repo.len(), 10);
}

#[tokio::test]
async fn concurrent_inserts_of_the_same_cpf_have_one_winner() {
    let repo = Arc::new(LocalRepository::new());

    let mut handles = vec![];
    for i in 0..10 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.insert(&draft(&format!("c{i}"), "shared-cpf", 100.0)).await
        }));
    }

    let mut successes = 0;
    let mut violations = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(RepositoryError::UniqueViolation(_)) => violations += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(violations, 9);
    assert_eq!(repo.len(), 1);
}
