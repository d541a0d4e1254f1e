//! # Article Index
//!
//! Secondary-index maintenance for a small article publishing backend.
//!
//! Users publish text articles with free-form tags; readers get "latest",
//! "by tag", "most read" and "recently read by me" views. Redis holds the
//! articles and every derived view; this crate keeps those views in step as
//! articles are published and read. The index logic itself lives in
//! [`article_index_core`]; this crate adds configuration, logging, the Redis
//! backend, and the `articles` CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐
//! │  CLI         │──▶│  ArticleService  │──▶│  RedisStore  │
//! │  (articles)  │   │  5 index parts   │   │  one command │
//! └──────────────┘   └──────────────────┘   │  per call    │
//!                                           └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! articles publish --text "hello world" --tags "go, rust"
//! articles read 1 --user alice
//! articles home --user alice
//! articles tag rust
//! articles reconcile
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | Tracing subscriber setup |
//! | [`redis_store`] | Redis `KeyValueStore` backend |
//! | [`db`] | Store connection and service construction |
//! | [`publish`] | Publishing |
//! | [`read`] | Article retrieval |
//! | [`views`] | Latest, tag, ranking, history and home views |
//! | [`reconcile`] | Index rebuild |

pub mod config;
pub mod db;
pub mod logging;
pub mod publish;
pub mod read;
pub mod reconcile;
pub mod redis_store;
pub mod views;
