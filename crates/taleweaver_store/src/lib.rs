//! Postgres story store, HTTP blob store, and change feed for Taleweaver.
//!
//! The repository bridges diesel's blocking connections onto the async
//! runtime with `spawn_blocking`, and publishes a row event on the change
//! feed after every committed mutation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blob;
mod connection;
mod feed;
mod models;
mod repository;
mod schema;

pub use blob::BucketBlobStore;
pub use connection::{establish_pool, pool_from_env, PgPool};
pub use feed::BroadcastChangeFeed;
pub use repository::PgStoryRepository;
