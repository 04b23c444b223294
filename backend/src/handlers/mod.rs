//! HTTP request handlers for the Store Inventory Analytics service

pub mod analysis;
pub mod catalog;
pub mod health;
pub mod settings;
pub mod stores;

pub use analysis::*;
pub use catalog::*;
pub use health::*;
pub use settings::*;
pub use stores::*;

use crate::error::{AppError, AppResult};

/// Run file-backed service work on the blocking pool
pub(crate) async fn blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| AppError::Internal(format!("Blocking task failed: {}", err)))?
}
