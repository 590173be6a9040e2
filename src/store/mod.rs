//! Publication persistence keyed by `identifier`.
//!
//! Writes are idempotent upserts: storing the same publication twice
//! replaces it, and storing an identical record is a no-op detected by
//! checksum.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgPublicationStore;

use anyhow::Result;
use async_trait::async_trait;
use md5::Context;

use crate::extractor::Publication;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    /// Stored record already identical.
    Unchanged,
}

#[async_trait]
pub trait PublicationStore: Send + Sync {
    async fn upsert(&self, publication: &Publication) -> Result<UpsertOutcome>;

    async fn get(&self, identifier: &str) -> Result<Option<Publication>>;

    async fn count(&self) -> Result<usize>;
}

/// MD5 of the serialized record.
pub fn checksum(publication: &Publication) -> Result<String> {
    let mut hasher = Context::new();
    hasher.consume(serde_json::to_vec(publication)?);
    Ok(format!("{:x}", hasher.compute()))
}
