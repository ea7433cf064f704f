//! Data Transfer Objects for the HTTP API.
//!
//! Request and response bodies for the REST API. The wire shape of a client
//! is `{id, name, cpf, income, birth_date, children}` with `birth_date` as
//! an ISO `YYYY-MM-DD` date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Client, ClientDraft};

/// A client as serialized in API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDto {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: NaiveDate,
    pub children: i32,
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.value(),
            name: client.name,
            cpf: client.cpf,
            income: client.income,
            birth_date: client.birth_date,
            children: client.children,
        }
    }
}

/// Request body for creating or updating a client. The id is never part of
/// the body: creates get one assigned, updates take it from the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientPayload {
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: NaiveDate,
    pub children: i32,
}

impl From<ClientPayload> for ClientDraft {
    fn from(payload: ClientPayload) -> Self {
        Self {
            name: payload.name,
            cpf: payload.cpf,
            income: payload.income,
            birth_date: payload.birth_date,
            children: payload.children,
        }
    }
}

/// Query parameters for the income filter endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeQuery {
    pub income: f64,
}

/// Response body for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
