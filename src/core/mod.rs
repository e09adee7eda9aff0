//! Core business logic for the transaction importer
//!
//! This module contains the pipeline stages and the store abstractions:
//!
//! - [`traits`] - Store interfaces consumed by the pipeline
//! - [`collector`] - Stream draining and row validation
//! - [`reconciler`] - Category name resolution against the store
//! - [`persister`] - Transaction materialization and batched persistence
//! - [`importer`] - End-to-end pipeline orchestration
//! - [`memory_store`] - DashMap-backed reference store implementation

pub mod collector;
pub mod importer;
pub mod memory_store;
pub mod persister;
pub mod reconciler;
pub mod traits;

pub use collector::{collect_candidates, Collected};
pub use importer::{ImportConfig, TransactionImporter};
pub use memory_store::MemoryStore;
pub use reconciler::CategoryReconciler;
pub use traits::{CategoryStore, TransactionStore};
