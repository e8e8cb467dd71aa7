use discoteca_core::CoreError;
use discoteca_core::services::CatalogService;
use discoteca_storage::{CatalogStore, PooledRepository};

use crate::error::ApiError;

/// Catalog service over one pooled connection, alive for a single request.
pub type RequestCatalog = CatalogService<PooledRepository>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
  store: CatalogStore,
}

impl AppState {
  pub fn new(store: CatalogStore) -> Self {
    Self { store }
  }

  pub fn store(&self) -> &CatalogStore {
    &self.store
  }

  /// Runs `op` on the blocking pool with a catalog bound to a freshly checked
  /// out connection. The connection goes back to the pool when `op` returns.
  pub async fn with_catalog<F, T>(&self, op: F) -> Result<T, ApiError>
  where
    F: FnOnce(&RequestCatalog) -> Result<T, CoreError> + Send + 'static,
    T: Send + 'static,
  {
    let store = self.store.clone();

    tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
      let catalog = store.catalog()?;
      Ok(op(&catalog)?)
    })
    .await?
  }
}
