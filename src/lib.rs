//! # Client Registry
//!
//! A CRUD web service for client records (name, CPF, income, birth date,
//! number of children) backed by PostgreSQL through Diesel, with an
//! in-memory repository for tests and local development.
//!
//! ## Architecture
//!
//! The crate is organized into a few logical modules:
//!
//! - [`models`]: Domain types (`Client`, `ClientDraft`, `ClientId`)
//! - [`db`]: Repository trait, Postgres and in-memory backends, configuration
//! - [`services`]: Business logic (CPF uniqueness, NotFound signaling)
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! Requests flow HTTP handler → [`services::ClientService`] →
//! `dyn ClientRepository` → store. No layer holds per-request state; the
//! repository is shared as an `Arc` and connections come from its pool.

pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
