//! Storage layer for procura.
//!
//! This crate provides persistent storage for purchase requests. The primary
//! backend is PostgreSQL ([`PgStore`]); an in-memory backend ([`MemoryStore`])
//! implements the same contract for tests.
//!
//! # Transition atomicity
//!
//! Every backend enforces the one-shot transition invariant: a request moves
//! out of `Pending` exactly once. The PostgreSQL backend does this with a
//! single conditional `UPDATE`; no application-level locking is involved.
//!
//! # Example
//!
//! ```no_run
//! use procura_core::{ListFilter, SubmitInput};
//! use procura_store::{MemoryStore, Store};
//!
//! # async fn example() -> procura_store::Result<()> {
//! let store = MemoryStore::new();
//!
//! let new = SubmitInput {
//!     requester_name: Some("Laura Gomez".into()),
//!     requester_email: Some("laura@example.com".into()),
//!     vendor_name: Some("Suministros SA".into()),
//!     vendor_tax_id: Some("900123456-7".into()),
//!     amount: Some("1500".into()),
//!     payment_method: Some("Transferencia".into()),
//!     ..SubmitInput::default()
//! }
//! .validate()
//! .unwrap();
//!
//! let request = store.create_request(new).await?;
//! let all = store.list_requests(&ListFilter::default()).await?;
//! assert_eq!(all[0].id, request.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use procura_core::{Decision, ListFilter, NewRequest, PurchaseRequest, RequestId, RequestStats};

/// Get the procura database migrator.
///
/// Returns a migrator that can be run against a PostgreSQL connection pool.
#[must_use]
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// The storage trait defining all purchase-request operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (PostgreSQL in production, in-memory for testing).
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist a validated submission as a new pending request.
    ///
    /// Returns the stored row with its assigned id and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn create_request(&self, new: NewRequest) -> Result<PurchaseRequest>;

    /// Get a request by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_request(&self, id: RequestId) -> Result<Option<PurchaseRequest>>;

    /// Apply a decision to a pending request.
    ///
    /// The update is atomic and conditional on the row still being pending,
    /// so the pending-to-terminal edge fires exactly once.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no request has this id.
    /// - [`StoreError::InvalidTransition`] if the request is already
    ///   approved or rejected.
    async fn transition(&self, id: RequestId, decision: Decision) -> Result<PurchaseRequest>;

    /// List requests matching the filter.
    ///
    /// Ordering is part of the contract: pending first, then approved, then
    /// rejected, newest-first within each group. No pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_requests(&self, filter: &ListFilter) -> Result<Vec<PurchaseRequest>>;

    /// Aggregate counts and amount sums over the whole table.
    ///
    /// Always computed from current state; an empty store yields zeros.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn stats(&self) -> Result<RequestStats>;
}
