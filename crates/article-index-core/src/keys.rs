//! Store keyspace.
//!
//! Key names are a stable contract: any compatible reader or writer of the
//! same store relies on them.
//!
//! | Key | Structure | Meaning |
//! |-----|-----------|---------|
//! | `articles:{id}` | string | article body |
//! | `articles:{id}:tags` | set | tags on that article |
//! | `articles:next_id` | integer | last allocated article id |
//! | `tags:{tag}:articles` | set | articles carrying that tag |
//! | `tags` | set | global tag catalog |
//! | `articles:latest` | list, newest first | recency index |
//! | `user:{user}:lastread` | list, newest first | per-user read history |
//! | `articles:reads` | sorted set, score = reads | popularity index |

use crate::models::ArticleId;
use crate::store::{StoreError, StoreResult};

pub const NEXT_ARTICLE_ID: &str = "articles:next_id";
pub const TAG_CATALOG: &str = "tags";
pub const LATEST_ARTICLES: &str = "articles:latest";
pub const ARTICLE_READS: &str = "articles:reads";

pub fn article_body(id: ArticleId) -> String {
    format!("articles:{id}")
}

pub fn article_tags(id: ArticleId) -> String {
    format!("articles:{id}:tags")
}

pub fn tag_members(tag: &str) -> String {
    format!("tags:{tag}:articles")
}

pub fn user_last_read(user_id: &str) -> String {
    format!("user:{user_id}:lastread")
}

/// Parse an article id read back from the index stored at `key`.
pub(crate) fn parse_article_id(key: &str, raw: &str) -> StoreResult<ArticleId> {
    raw.parse::<ArticleId>()
        .map_err(|e| StoreError::invalid_data(key, format!("article id `{raw}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_patterns() {
        let id = ArticleId(1700000000123);
        assert_eq!(article_body(id), "articles:1700000000123");
        assert_eq!(article_tags(id), "articles:1700000000123:tags");
        assert_eq!(tag_members("rust"), "tags:rust:articles");
        assert_eq!(user_last_read("alice"), "user:alice:lastread");
    }

    #[test]
    fn test_parse_article_id_reports_key() {
        assert_eq!(parse_article_id("k", "12").unwrap(), ArticleId(12));
        let err = parse_article_id(LATEST_ARTICLES, "oops").unwrap_err();
        assert!(matches!(err, StoreError::InvalidData { ref key, .. } if key == LATEST_ARTICLES));
    }
}
