use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::clients;
use crate::models::{Client, ClientDraft, ClientId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientRow {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: NaiveDate,
    pub children: i32,
}

/// Insert/update payload. Carries no id: inserts let the database assign
/// one, updates target the row through the query instead.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = clients)]
pub struct NewClientRow {
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: NaiveDate,
    pub children: i32,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: ClientId::new(row.id),
            name: row.name,
            cpf: row.cpf,
            income: row.income,
            birth_date: row.birth_date,
            children: row.children,
        }
    }
}

impl From<&ClientDraft> for NewClientRow {
    fn from(draft: &ClientDraft) -> Self {
        NewClientRow {
            name: draft.name.clone(),
            cpf: draft.cpf.clone(),
            income: draft.income,
            birth_date: draft.birth_date,
            children: draft.children,
        }
    }
}
