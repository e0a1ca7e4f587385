//! Record store interface.
//!
//! A [`ProjectStore`] is the process-wide, cloneable handle to wherever
//! projects live. Each request opens its own [`ProjectSession`] from it and
//! drops the session when the request is done, which releases any underlying
//! connection.

mod memory;

use std::future::Future;

use thiserror::Error;

use crate::models::{Project, ProjectCreate};

pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("identity space exhausted")]
    IdentityExhausted,
}

/// Shared handle to a record store
pub trait ProjectStore: Clone + Send + Sync + 'static {
    type Session: ProjectSession + Send;

    /// Acquire a scoped handle for one request
    fn open_session(&self) -> impl Future<Output = StoreResult<Self::Session>> + Send;
}

/// Per-request access to the records
pub trait ProjectSession {
    /// Persist a new project and return it with its assigned identity
    fn create(
        &mut self,
        input: ProjectCreate,
    ) -> impl Future<Output = StoreResult<Project>> + Send;

    /// All projects in creation order
    fn list(&mut self) -> impl Future<Output = StoreResult<Vec<Project>>> + Send;
}
