//! Domain types for client records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the store when a client row is first persisted.
///
/// Serializes as a plain integer so API payloads carry `"id": 42` rather
/// than a nested object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ClientId(pub i32);

impl ClientId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A client record as stored.
///
/// Invariants enforced by the storage layer: `id` is immutable once assigned
/// and `cpf` is unique across all clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    /// National id (CPF). Unique per client.
    pub cpf: String,
    pub income: f64,
    pub birth_date: NaiveDate,
    pub children: i32,
}

/// Every client field except the identifier.
///
/// Used for create and update operations, where the caller never supplies
/// the id: on create the store assigns one, on update the id comes from the
/// request path and all other fields are overwritten with the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: NaiveDate,
    pub children: i32,
}

impl Client {
    /// Attach an identifier to a draft, producing a full record.
    pub fn from_draft(id: ClientId, draft: ClientDraft) -> Self {
        Self {
            id,
            name: draft.name,
            cpf: draft.cpf,
            income: draft.income,
            birth_date: draft.birth_date,
            children: draft.children,
        }
    }
}
