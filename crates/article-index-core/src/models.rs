//! Core data models shared by the indices and the service facade.
//!
//! These are the plain records handed to the presentation layer: ids,
//! strings, counts and ordered sequences. Nothing here knows about the store.

use std::collections::BTreeSet;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::Serialize;

/// Unique, creation-ordered article identifier.
///
/// Allocated from a store-side atomic counter, so two concurrent publishes
/// never receive the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArticleId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ArticleId)
    }
}

/// A published article. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub body: String,
    pub tags: BTreeSet<String>,
}

/// One entry of the most-read ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadCount {
    pub id: ArticleId,
    pub reads: u64,
}

/// Aggregate view for a signed-in user's landing page.
///
/// Each field reflects the store at the moment its own query ran; no
/// consistency is implied across fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeView {
    pub latest: Vec<ArticleId>,
    pub tags: BTreeSet<String>,
    pub top_read: Vec<ReadCount>,
    pub history: Vec<ArticleId>,
}

/// Outcome of a [`reconcile`](crate::service::ArticleService::reconcile) pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Ids examined (`1..=next_id`).
    pub scanned: u64,
    /// Stored articles whose tag index entries were re-applied.
    pub indexed: u64,
    /// Allocated ids with no stored body (publish failed after allocation).
    pub missing: u64,
    /// The rebuilt latest list, newest first.
    pub latest: Vec<ArticleId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_id_parses_decimal() {
        assert_eq!(" 42 ".parse::<ArticleId>().unwrap(), ArticleId(42));
        assert!("abc".parse::<ArticleId>().is_err());
        assert!("-1".parse::<ArticleId>().is_err());
    }

    #[test]
    fn test_article_id_orders_by_value() {
        assert!(ArticleId(9) < ArticleId(10));
        assert_eq!(ArticleId(7).to_string(), "7");
    }
}
