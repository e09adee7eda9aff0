//! Thread-safe in-memory reference store
//!
//! This module provides `MemoryStore`, a DashMap-backed implementation of
//! the store traits. It backs the CLI binary and the test suite, and it
//! exercises the same contract a real database-backed store would: unique
//! category titles with partial-batch conflict reporting, store-assigned
//! identities, and batched writes.
//!
//! # Thread Safety
//!
//! All operations are safe under concurrent import runs. Category inserts
//! go through DashMap's entry API, so two runs racing on the same title
//! resolve atomically: one wins, the other observes a uniqueness violation,
//! exactly as with a database unique constraint.

use crate::core::traits::{CategoryStore, TransactionStore};
use crate::types::{Category, NewTransaction, StoreError, Transaction};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// In-memory store implementing both store traits
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Categories keyed by title (the unique business key)
    categories: DashMap<String, Category>,

    /// Persisted transactions in insertion order
    transactions: Mutex<Vec<Transaction>>,

    next_category_id: AtomicU64,
    next_transaction_id: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty MemoryStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category directly, bypassing the batched create path
    ///
    /// Intended for seeding pre-existing state in tests and demos.
    pub fn seed_category(&self, title: &str) -> Category {
        let category = Category {
            id: self.next_category_id.fetch_add(1, Ordering::SeqCst) + 1,
            title: title.to_string(),
        };
        self.categories.insert(title.to_string(), category.clone());
        category
    }

    /// Number of categories currently in the store
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Look up a single category by title
    pub fn category_by_title(&self, title: &str) -> Option<Category> {
        self.categories.get(title).map(|entry| entry.value().clone())
    }

    /// All persisted transactions, in insertion order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().expect("store poisoned").clone()
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_by_titles(&self, titles: &[String]) -> Result<Vec<Category>, StoreError> {
        Ok(titles
            .iter()
            .filter_map(|title| self.categories.get(title).map(|e| e.value().clone()))
            .collect())
    }

    async fn create(&self, titles: &[String]) -> Result<Vec<Category>, StoreError> {
        let mut created = Vec::with_capacity(titles.len());
        let mut conflicting = Vec::new();

        for title in titles {
            // Entry API makes the insert atomic with respect to concurrent
            // runs creating the same title.
            match self.categories.entry(title.clone()) {
                dashmap::Entry::Occupied(_) => conflicting.push(title.clone()),
                dashmap::Entry::Vacant(entry) => {
                    let category = Category {
                        id: self.next_category_id.fetch_add(1, Ordering::SeqCst) + 1,
                        title: title.clone(),
                    };
                    entry.insert(category.clone());
                    created.push(category);
                }
            }
        }

        if !conflicting.is_empty() {
            // Partial-batch reporting: non-conflicting titles stay inserted,
            // the conflict names exactly the losing titles.
            return Err(StoreError::unique_violation(conflicting));
        }

        Ok(created)
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn create(&self, records: &[NewTransaction]) -> Result<Vec<Transaction>, StoreError> {
        let persisted: Vec<Transaction> = records
            .iter()
            .map(|record| Transaction {
                id: self.next_transaction_id.fetch_add(1, Ordering::SeqCst) + 1,
                title: record.title.clone(),
                tx_type: record.tx_type,
                value: record.value,
                category_id: record.category_id,
            })
            .collect();

        let mut transactions = self
            .transactions
            .lock()
            .map_err(|_| StoreError::backend("transaction log poisoned"))?;
        transactions.extend(persisted.iter().cloned());

        Ok(persisted)
    }
}
