//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repository layer. They
//! orchestrate repository calls and raise the domain signals (NotFound,
//! DuplicateCpf) that the route layer turns into HTTP status codes.

pub mod clients;

#[cfg(test)]
#[path = "clients_tests.rs"]
mod clients_tests;

pub use clients::{ClientService, ServiceError, ServiceResult};
