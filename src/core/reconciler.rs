//! Category reconciliation
//!
//! Given every category name referenced by a run, the reconciler determines
//! which categories already exist in the store, creates the missing ones,
//! and returns a unified title-to-entity mapping. Both the lookup and the
//! create are single batched store calls.
//!
//! # Concurrency
//!
//! Category creation is the only region where concurrent runs contend: two
//! runs referencing the same new name can race. The reconciler relies on the
//! store's uniqueness constraint and treats a reported violation as
//! recoverable: it re-fetches the still-unresolved names (picking up rows
//! created by the other run as well as non-conflicting rows from its own
//! failed batch) and retries creation only for names that remain missing.
//! The retry budget is bounded; exhausting it surfaces
//! [`ImportError::CategoryConflict`].

use crate::core::traits::CategoryStore;
use crate::types::{Category, ImportError};
use std::collections::{HashMap, HashSet};

/// Default number of create retries after uniqueness conflicts
pub const DEFAULT_MAX_CREATE_RETRIES: usize = 3;

/// Resolves category names to existing-or-newly-created store entities
pub struct CategoryReconciler<'a, S: CategoryStore + ?Sized> {
    store: &'a S,
    max_create_retries: usize,
}

impl<'a, S: CategoryStore + ?Sized> CategoryReconciler<'a, S> {
    /// Create a reconciler over the given category store
    ///
    /// # Arguments
    ///
    /// * `store` - The category store to reconcile against
    /// * `max_create_retries` - How many uniqueness conflicts to absorb
    ///   before giving up on the run
    pub fn new(store: &'a S, max_create_retries: usize) -> Self {
        Self {
            store,
            max_create_retries,
        }
    }

    /// Resolve every referenced name to exactly one Category
    ///
    /// `names` may contain duplicates and may be empty. On success the
    /// returned mapping contains exactly one entry per distinct input name,
    /// keyed by title.
    ///
    /// # Errors
    ///
    /// * [`ImportError::CategoryConflict`] - uniqueness conflicts persisted
    ///   past the retry budget
    /// * [`ImportError::Persistence`] - the store failed outright
    pub async fn resolve(&self, names: &[String]) -> Result<HashMap<String, Category>, ImportError> {
        let mut resolved: HashMap<String, Category> = HashMap::new();

        // Dedup by exact string equality, preserving first-seen order for
        // the create batch.
        let mut seen = HashSet::new();
        let mut pending: Vec<String> = names
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect();

        if pending.is_empty() {
            return Ok(resolved);
        }

        // Single batched lookup for everything the run references.
        for category in self.store.find_by_titles(&pending).await? {
            resolved.insert(category.title.clone(), category);
        }
        pending.retain(|name| !resolved.contains_key(name));

        let mut attempts = 0;
        while !pending.is_empty() {
            match self.store.create(&pending).await {
                Ok(created) => {
                    for category in created {
                        resolved.insert(category.title.clone(), category);
                    }
                    pending.clear();
                }
                Err(crate::types::StoreError::UniqueViolation { titles }) => {
                    attempts += 1;
                    if attempts > self.max_create_retries {
                        return Err(ImportError::category_conflict(titles));
                    }

                    // A concurrent run won the race for some titles. Re-fetch
                    // everything still unresolved: that picks up the other
                    // run's rows and any non-conflicting rows our failed
                    // batch did insert. Only names still missing afterwards
                    // are retried.
                    for category in self.store.find_by_titles(&pending).await? {
                        resolved.insert(category.title.clone(), category);
                    }
                    pending.retain(|name| !resolved.contains_key(name));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StoreError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Test double over a plain map, with an optional one-shot race:
    /// on the first create call, `race_titles` are inserted as if a
    /// concurrent run created them, and reported as a uniqueness violation.
    struct RacingStore {
        state: Mutex<RacingState>,
    }

    struct RacingState {
        categories: HashMap<String, Category>,
        next_id: u64,
        race_titles: Vec<String>,
        create_calls: usize,
    }

    impl RacingStore {
        fn new(existing: &[&str]) -> Self {
            let mut categories = HashMap::new();
            let mut next_id = 1;
            for title in existing {
                categories.insert(
                    title.to_string(),
                    Category {
                        id: next_id,
                        title: title.to_string(),
                    },
                );
                next_id += 1;
            }
            Self {
                state: Mutex::new(RacingState {
                    categories,
                    next_id,
                    race_titles: Vec::new(),
                    create_calls: 0,
                }),
            }
        }

        fn with_race(existing: &[&str], race_titles: &[&str]) -> Self {
            let store = Self::new(existing);
            store.state.lock().unwrap().race_titles =
                race_titles.iter().map(|t| t.to_string()).collect();
            store
        }

        fn create_calls(&self) -> usize {
            self.state.lock().unwrap().create_calls
        }

        fn category_count(&self) -> usize {
            self.state.lock().unwrap().categories.len()
        }
    }

    #[async_trait]
    impl CategoryStore for RacingStore {
        async fn find_by_titles(&self, titles: &[String]) -> Result<Vec<Category>, StoreError> {
            let state = self.state.lock().unwrap();
            Ok(titles
                .iter()
                .filter_map(|title| state.categories.get(title).cloned())
                .collect())
        }

        async fn create(&self, titles: &[String]) -> Result<Vec<Category>, StoreError> {
            let mut state = self.state.lock().unwrap();
            state.create_calls += 1;

            if state.create_calls == 1 && !state.race_titles.is_empty() {
                // Simulate the concurrent run committing first: its rows
                // land in the store, our batch reports them as conflicts
                // while still inserting the non-conflicting titles.
                let race_titles = state.race_titles.clone();
                for title in &race_titles {
                    let id = state.next_id;
                    state.next_id += 1;
                    state.categories.insert(
                        title.clone(),
                        Category {
                            id,
                            title: title.clone(),
                        },
                    );
                }
                let conflicting: Vec<String> = titles
                    .iter()
                    .filter(|t| race_titles.contains(t))
                    .cloned()
                    .collect();
                for title in titles.iter().filter(|t| !race_titles.contains(t)) {
                    let id = state.next_id;
                    state.next_id += 1;
                    state.categories.insert(
                        title.clone(),
                        Category {
                            id,
                            title: title.clone(),
                        },
                    );
                }
                return Err(StoreError::UniqueViolation { titles: conflicting });
            }

            let mut created = Vec::new();
            let mut conflicting = Vec::new();
            for title in titles {
                if state.categories.contains_key(title) {
                    conflicting.push(title.clone());
                    continue;
                }
                let id = state.next_id;
                state.next_id += 1;
                let category = Category {
                    id,
                    title: title.clone(),
                };
                state.categories.insert(title.clone(), category.clone());
                created.push(category);
            }
            if !conflicting.is_empty() {
                return Err(StoreError::UniqueViolation {
                    titles: conflicting,
                });
            }
            Ok(created)
        }
    }

    fn names(titles: &[&str]) -> Vec<String> {
        titles.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_resolve_empty_input() {
        let store = RacingStore::new(&[]);
        let reconciler = CategoryReconciler::new(&store, DEFAULT_MAX_CREATE_RETRIES);

        let resolved = reconciler.resolve(&[]).await.unwrap();
        assert!(resolved.is_empty());
        assert_eq!(store.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_resolve_creates_missing_deduplicated() {
        let store = RacingStore::new(&[]);
        let reconciler = CategoryReconciler::new(&store, DEFAULT_MAX_CREATE_RETRIES);

        let resolved = reconciler
            .resolve(&names(&["Food", "Food", "Housing"]))
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert!(resolved.contains_key("Food"));
        assert!(resolved.contains_key("Housing"));
        // Duplicates collapse into a single created row
        assert_eq!(store.category_count(), 2);
        assert_eq!(store.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_resolve_uses_existing_without_creating() {
        let store = RacingStore::new(&["Food"]);
        let reconciler = CategoryReconciler::new(&store, DEFAULT_MAX_CREATE_RETRIES);

        let resolved = reconciler
            .resolve(&names(&["Food", "Food"]))
            .await
            .unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved["Food"].id, 1);
        assert_eq!(store.create_calls(), 0);
        assert_eq!(store.category_count(), 1);
    }

    #[tokio::test]
    async fn test_resolve_mixes_existing_and_new() {
        let store = RacingStore::new(&["Payroll"]);
        let reconciler = CategoryReconciler::new(&store, DEFAULT_MAX_CREATE_RETRIES);

        let resolved = reconciler
            .resolve(&names(&["Payroll", "Housing"]))
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved["Payroll"].id, 1);
        assert_eq!(store.category_count(), 2);
    }

    #[tokio::test]
    async fn test_resolve_recovers_from_uniqueness_race() {
        // Two new names; a concurrent run creates "Food" between our lookup
        // and our create. Only the conflicting name is refetched; "Travel"
        // is still created and used.
        let store = RacingStore::with_race(&[], &["Food"]);
        let reconciler = CategoryReconciler::new(&store, DEFAULT_MAX_CREATE_RETRIES);

        let resolved = reconciler
            .resolve(&names(&["Food", "Travel"]))
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert!(resolved.contains_key("Food"));
        assert!(resolved.contains_key("Travel"));
        // One failed create plus the refetch; no second create needed
        assert_eq!(store.create_calls(), 1);
        assert_eq!(store.category_count(), 2);
    }

    #[tokio::test]
    async fn test_resolve_conflict_budget_exhausted() {
        struct AlwaysConflict;

        #[async_trait]
        impl CategoryStore for AlwaysConflict {
            async fn find_by_titles(
                &self,
                _titles: &[String],
            ) -> Result<Vec<Category>, StoreError> {
                Ok(Vec::new())
            }

            async fn create(&self, titles: &[String]) -> Result<Vec<Category>, StoreError> {
                Err(StoreError::UniqueViolation {
                    titles: titles.to_vec(),
                })
            }
        }

        let store = AlwaysConflict;
        let reconciler = CategoryReconciler::new(&store, 2);

        let result = reconciler.resolve(&names(&["Food"])).await;
        assert_eq!(
            result,
            Err(ImportError::CategoryConflict {
                titles: vec!["Food".to_string()]
            })
        );
    }

    #[tokio::test]
    async fn test_resolve_propagates_backend_error() {
        struct BrokenStore;

        #[async_trait]
        impl CategoryStore for BrokenStore {
            async fn find_by_titles(
                &self,
                _titles: &[String],
            ) -> Result<Vec<Category>, StoreError> {
                Err(StoreError::backend("connection refused"))
            }

            async fn create(&self, _titles: &[String]) -> Result<Vec<Category>, StoreError> {
                unreachable!("lookup fails first")
            }
        }

        let store = BrokenStore;
        let reconciler = CategoryReconciler::new(&store, DEFAULT_MAX_CREATE_RETRIES);

        let result = reconciler.resolve(&names(&["Food"])).await;
        assert!(matches!(result, Err(ImportError::Persistence { .. })));
    }
}
