//! # Article Index Core
//!
//! Secondary-index maintenance for a small article publishing backend:
//! data models, the store keyspace, the [`store::KeyValueStore`] abstraction,
//! and the index components that keep derived views coherent as articles are
//! published and read.
//!
//! This crate contains no tokio, network, or filesystem dependencies. A real
//! backend (Redis) lives in the outer `article-index` crate; tests run against
//! [`store::memory::InMemoryStore`].
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`articles`] | Article bodies and per-article tag sets |
//! | [`tag_index`] | Inverted tag index and global tag catalog |
//! | [`recency`] | Global latest list and per-user read history |
//! | [`popularity`] | Read-count ranking |
//! | [`service`] | Facade composing the indices |

pub mod articles;
pub mod error;
pub mod keys;
pub mod models;
pub mod popularity;
pub mod recency;
pub mod service;
pub mod store;
pub mod tag_index;
pub mod tags;

/// Default bound `N` for the latest list and user histories.
pub const DEFAULT_CAPACITY: usize = 5;

/// Default `K` for the most-read ranking shown in the home view.
pub const DEFAULT_TOP_K: usize = 5;
