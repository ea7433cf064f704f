//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;

use crate::db::repository::{ClientRepository, RepositoryError, RepositoryResult};
use crate::models::{Client, ClientDraft, ClientId};

mod models;
mod schema;

use models::{ClientRow, NewClientRow};
use schema::clients;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
///
/// An explicit value handed to [`PostgresRepository::new`]; nothing in this
/// crate reads connection settings from a global. The pool closes when the
/// repository is dropped.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    // Metrics counters
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| RepositoryError::connection(e.to_string()))?;

        // Run migrations once during initialization
        {
            let mut conn = pool
                .get()
                .map_err(|e| RepositoryError::connection(e.to_string()))?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| RepositoryError::internal(format!("Migration failed: {}", e)))?;

        Ok(())
    }

    /// Execute a database operation on a pooled connection.
    ///
    /// Diesel is synchronous, so the closure runs on the blocking thread
    /// pool. The connection goes back to the pool when the closure returns,
    /// whatever the outcome.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                RepositoryError::connection(e.to_string())
            })?;

            total_queries.fetch_add(1, Ordering::Relaxed);
            f(&mut conn).inspect_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                log::error!("postgres operation failed: {e}");
            })
        })
        .await
        .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))?
    }

    /// Get pool health statistics.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
        }
    }

    /// Check if the database connection is healthy.
    pub async fn is_healthy(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }

    /// Get detailed health information.
    ///
    /// Returns a tuple of (is_healthy, latency_ms, error_message).
    pub async fn health_check_detailed(&self) -> (bool, Option<u64>, Option<String>) {
        let start = Instant::now();
        match self.health_check().await {
            Ok(true) => (true, Some(start.elapsed().as_millis() as u64), None),
            Ok(false) => (
                false,
                Some(start.elapsed().as_millis() as u64),
                Some("Health check returned false".to_string()),
            ),
            Err(e) => (
                false,
                Some(start.elapsed().as_millis() as u64),
                Some(e.to_string()),
            ),
        }
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

#[async_trait]
impl ClientRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Client>> {
        self.with_conn(|conn| {
            let rows = clients::table
                .order(clients::id.asc())
                .select(ClientRow::as_select())
                .load::<ClientRow>(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(Client::from).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        self.with_conn(move |conn| {
            let row = clients::table
                .find(id.value())
                .select(ClientRow::as_select())
                .first::<ClientRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;

            Ok(row.map(Client::from))
        })
        .await
    }

    async fn find_by_income(&self, income: f64) -> RepositoryResult<Vec<Client>> {
        self.with_conn(move |conn| {
            let rows = clients::table
                .filter(clients::income.eq(income))
                .order(clients::id.asc())
                .select(ClientRow::as_select())
                .load::<ClientRow>(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(Client::from).collect())
        })
        .await
    }

    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Client>> {
        let cpf = cpf.to_string();
        self.with_conn(move |conn| {
            let row = clients::table
                .filter(clients::cpf.eq(cpf))
                .select(ClientRow::as_select())
                .first::<ClientRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;

            Ok(row.map(Client::from))
        })
        .await
    }

    async fn insert(&self, draft: &ClientDraft) -> RepositoryResult<Client> {
        let new_row = NewClientRow::from(draft);
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                let inserted: ClientRow = diesel::insert_into(clients::table)
                    .values(&new_row)
                    .returning(ClientRow::as_returning())
                    .get_result(tx)
                    .map_err(map_diesel_error)?;

                Ok(Client::from(inserted))
            })
        })
        .await
    }

    async fn update(
        &self,
        id: ClientId,
        draft: &ClientDraft,
    ) -> RepositoryResult<Option<Client>> {
        let changes = NewClientRow::from(draft);
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                let updated: Option<ClientRow> =
                    diesel::update(clients::table.find(id.value()))
                        .set(&changes)
                        .returning(ClientRow::as_returning())
                        .get_result(tx)
                        .optional()
                        .map_err(map_diesel_error)?;

                Ok(updated.map(Client::from))
            })
        })
        .await
    }

    async fn delete(&self, id: ClientId) -> RepositoryResult<bool> {
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                let deleted = diesel::delete(clients::table.find(id.value()))
                    .execute(tx)
                    .map_err(map_diesel_error)?;

                Ok(deleted > 0)
            })
        })
        .await
    }
}
