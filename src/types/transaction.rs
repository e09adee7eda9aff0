//! Domain types for the transaction importer
//!
//! This module defines the transaction and category types that flow through
//! the import pipeline, from validated CSV candidates to persisted records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category identifier, assigned by the store
pub type CategoryId = u64;

/// Transaction identifier, assigned by the store
pub type TransactionId = u64;

/// Direction of a financial transaction
///
/// Input rows must carry one of the literal tokens `income` or `outcome`
/// (matched case-insensitively); anything else fails validation and the
/// row is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money entering the ledger
    Income,

    /// Money leaving the ledger
    Outcome,
}

impl TransactionType {
    /// Parse a transaction type from its CSV token
    ///
    /// Matching is case-insensitive. Returns `None` for any token that is
    /// not `income` or `outcome`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "outcome" => Some(TransactionType::Outcome),
            _ => None,
        }
    }

    /// The CSV token for this transaction type
    pub fn as_token(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
        }
    }
}

/// A parsed, validated, not-yet-persisted transaction
///
/// Produced by the collector from a CSV row that passed validation, and
/// held in input order until category reconciliation completes. The
/// category is still a bare name at this point; binding to a stored
/// `Category` happens during materialization.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTransaction {
    /// Transaction title as it appeared in the input (trimmed)
    pub title: String,

    /// Income or outcome
    pub tx_type: TransactionType,

    /// Transaction amount
    pub value: Decimal,

    /// Referenced category name, not yet resolved to an entity
    pub category_name: String,
}

/// A persisted category
///
/// The store owns the canonical copy; the pipeline only holds transient
/// references during reconciliation. Titles are unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identity
    pub id: CategoryId,

    /// Unique business key
    pub title: String,
}

/// A transaction ready for persistence
///
/// The shape handed to the transaction store once the candidate's category
/// name has been resolved. The category reference is mandatory: a candidate
/// without a resolved category never reaches this type.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub title: String,
    pub tx_type: TransactionType,
    pub value: Decimal,
    pub category_id: CategoryId,
}

/// A persisted transaction, as returned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Store-assigned identity
    pub id: TransactionId,

    pub title: String,
    pub tx_type: TransactionType,
    pub value: Decimal,

    /// Reference to the owning category; always resolvable by construction
    pub category_id: CategoryId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("income", Some(TransactionType::Income))]
    #[case("outcome", Some(TransactionType::Outcome))]
    #[case("INCOME", Some(TransactionType::Income))]
    #[case("Outcome", Some(TransactionType::Outcome))]
    #[case("deposit", None)]
    #[case("", None)]
    fn test_type_from_token(#[case] token: &str, #[case] expected: Option<TransactionType>) {
        assert_eq!(TransactionType::from_token(token), expected);
    }

    #[rstest]
    #[case(TransactionType::Income, "income")]
    #[case(TransactionType::Outcome, "outcome")]
    fn test_type_as_token(#[case] tx_type: TransactionType, #[case] expected: &str) {
        assert_eq!(tx_type.as_token(), expected);
    }
}
