pub mod config;
pub mod functions;
pub mod models;
pub mod repository;
pub mod schema;

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::{debug, info};

use discoteca_config::ConfigError;
use discoteca_core::CoreError;
use discoteca_core::services::CatalogService;

pub use crate::config::{DATABASE_URL_ENV, StorageConfig};
pub use crate::repository::SqliteCatalogRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const MEMORY_URL: &str = ":memory:";
const BUSY_TIMEOUT_MS: u64 = 5_000;
const JOURNAL_MODES: [&str; 6] = ["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
pub type PooledSqlite = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Repository bound to one connection checked out of the pool.
pub type PooledRepository = SqliteCatalogRepository<PooledSqlite>;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("config error: {0}")]
  Config(#[from] ConfigError),
  #[error("connection pool error: {0}")]
  Pool(#[from] diesel::r2d2::PoolError),
  #[error("migration error: {0}")]
  Migration(String),
  #[error("invalid journal mode '{0}'")]
  JournalMode(String),
}

impl From<StoreError> for CoreError {
  fn from(e: StoreError) -> Self {
    CoreError::Repository(e.to_string())
  }
}

/// Pragmas applied to every connection the pool opens.
#[derive(Debug, Clone)]
struct ConnectionOptions {
  journal_mode: Option<&'static str>,
  busy_timeout: Duration,
}

impl ConnectionOptions {
  fn from_config(cfg: &StorageConfig) -> Result<Self, StoreError> {
    let journal_mode = match cfg.journal_mode.as_deref() {
      None => None,
      Some(mode) => {
        let upper = mode.to_ascii_uppercase();
        let known = JOURNAL_MODES
          .iter()
          .find(|m| **m == upper)
          .ok_or_else(|| StoreError::JournalMode(mode.to_string()))?;
        Some(*known)
      }
    };

    Ok(Self { journal_mode, busy_timeout: Duration::from_millis(BUSY_TIMEOUT_MS) })
  }

  fn apply(&self, conn: &mut SqliteConnection) -> QueryResult<()> {
    let mut pragmas = String::from("PRAGMA foreign_keys = ON;");
    pragmas.push_str(&format!("PRAGMA busy_timeout = {};", self.busy_timeout.as_millis()));
    if let Some(mode) = self.journal_mode {
      pragmas.push_str(&format!("PRAGMA journal_mode = {mode};"));
    }
    conn.batch_execute(&pragmas)
  }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    self.apply(conn).map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Applies every embedded migration that has not run yet on `conn`.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), StoreError> {
  let applied =
    conn.run_pending_migrations(MIGRATIONS).map_err(|e| StoreError::Migration(e.to_string()))?;
  for version in applied {
    debug!(%version, "applied migration");
  }
  Ok(())
}

/// Process-wide handle to the catalog database.
///
/// Owns the connection pool. Each request checks a connection out through
/// [`CatalogStore::catalog`] and returns it when the service is dropped.
#[derive(Clone)]
pub struct CatalogStore {
  pool: SqlitePool,
}

impl CatalogStore {
  /// Opens (creating if needed) the database described by `cfg` and brings
  /// its schema up to date.
  pub fn open(cfg: &StorageConfig) -> Result<Self, StoreError> {
    let url = cfg.database_url();
    let options = ConnectionOptions::from_config(cfg)?;

    let manager = ConnectionManager::<SqliteConnection>::new(url.as_str());
    let builder = Pool::builder().connection_customizer(Box::new(options));

    // Every `:memory:` connection is its own database: the pool holds exactly
    // one and must never recycle it, or the schema and data go with it.
    let (max_size, builder) = if url == MEMORY_URL {
      (1, builder.max_size(1).max_lifetime(None).idle_timeout(None))
    } else {
      let max_size = cfg.pool_size.max(1);
      (max_size, builder.max_size(max_size))
    };

    let pool = builder.build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    info!(database = %url, pool_size = max_size, "catalog store ready");

    Ok(Self { pool })
  }

  /// Opens the store configured in the `[storage]` config section.
  pub fn new_from_config() -> Result<Self, StoreError> {
    let cfg = StorageConfig::load()?;
    Self::open(&cfg)
  }

  pub fn session(&self) -> Result<PooledRepository, StoreError> {
    Ok(SqliteCatalogRepository::new(self.pool.get()?))
  }

  pub fn catalog(&self) -> Result<CatalogService<PooledRepository>, StoreError> {
    Ok(CatalogService::new(self.session()?))
  }
}
