//! Transaction Importer Library
//! # Overview
//!
//! This library ingests delimited financial-transaction files and reconciles
//! them against a store of transactions and categories, producing a
//! deduplicated, normalized set of persisted records.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, Category, errors)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::collector`] - Stream draining and row validation
//!   - [`core::reconciler`] - Category name resolution (batched lookup/create)
//!   - [`core::persister`] - Transaction materialization and batched writes
//!   - [`core::importer`] - End-to-end pipeline orchestration
//! - [`io`] - Streaming CSV parsing and output serialization
//!
//! # Pipeline
//!
//! One import run moves through strict phases:
//!
//! 1. **Parse**: stream the CSV source in bounded batches, skipping the header
//! 2. **Validate & collect**: drop malformed rows, gather ordered candidates
//!    and the referenced category names
//! 3. **Reconcile**: one batched lookup plus one batched create resolves every
//!    category name to a store entity, deduplicated and race-hardened
//! 4. **Materialize & persist**: bind candidates to categories and write the
//!    final records in one batch, preserving input order
//!
//! On success the source file is removed; on any failure it is left intact
//! and no partial result is returned.
//!
//! # Concurrency
//!
//! Runs may execute concurrently against a shared store. The only contended
//! region is category creation, resolved through the store's uniqueness
//! reporting and the reconciler's refetch-and-retry recovery.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{
    CategoryReconciler, CategoryStore, ImportConfig, MemoryStore, TransactionImporter,
    TransactionStore,
};
pub use io::write_transactions_csv;
pub use types::{
    CandidateTransaction, Category, CategoryId, ImportError, NewTransaction, StoreError,
    Transaction, TransactionId, TransactionType,
};
