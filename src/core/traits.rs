//! Store traits consumed by the import pipeline
//!
//! This module defines the interfaces through which the pipeline reaches the
//! durable store. Implementations are injected into the orchestrator at
//! construction time, never reached through ambient globals, so the pipeline
//! can run against anything from an in-memory map to a remote database.

use crate::types::{Category, NewTransaction, StoreError, Transaction};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for looking up and creating categories
///
/// Both operations are batched: one call covers every title of the current
/// run, avoiding per-row round trips to the store.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Find all existing categories whose title is in `titles`
    ///
    /// Titles with no matching category are simply absent from the result;
    /// this is not an error.
    async fn find_by_titles(&self, titles: &[String]) -> Result<Vec<Category>, StoreError>;

    /// Create one category per title, returning them with assigned identities
    ///
    /// Titles must not already exist in the store. If any do, the store
    /// reports [`StoreError::UniqueViolation`] naming exactly the
    /// conflicting titles; implementations that support partial-batch
    /// reporting still insert the non-conflicting titles of the batch.
    async fn create(&self, titles: &[String]) -> Result<Vec<Category>, StoreError>;
}

/// Trait for persisting transactions
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persist all records in one batched write
    ///
    /// Returns the persisted transactions with assigned identities, in the
    /// same order as `records`. The write is all-or-nothing: on error no
    /// transaction from the batch is persisted.
    async fn create(&self, records: &[NewTransaction]) -> Result<Vec<Transaction>, StoreError>;
}

// Shared store handles: concurrent runs hold the same store behind an Arc.

#[async_trait]
impl<S: CategoryStore + ?Sized> CategoryStore for Arc<S> {
    async fn find_by_titles(&self, titles: &[String]) -> Result<Vec<Category>, StoreError> {
        (**self).find_by_titles(titles).await
    }

    async fn create(&self, titles: &[String]) -> Result<Vec<Category>, StoreError> {
        (**self).create(titles).await
    }
}

#[async_trait]
impl<S: TransactionStore + ?Sized> TransactionStore for Arc<S> {
    async fn create(&self, records: &[NewTransaction]) -> Result<Vec<Transaction>, StoreError> {
        (**self).create(records).await
    }
}
