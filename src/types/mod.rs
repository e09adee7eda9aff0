//! Core type definitions for the transaction importer
//!
//! This module contains the domain types and error types used throughout
//! the import pipeline.

pub mod error;
pub mod transaction;

pub use error::{ImportError, StoreError};
pub use transaction::{
    CandidateTransaction, Category, CategoryId, NewTransaction, Transaction, TransactionId,
    TransactionType,
};
