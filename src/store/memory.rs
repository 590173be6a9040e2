use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::extractor::Publication;
use crate::store::{PublicationStore, UpsertOutcome, checksum};

/// Process-local store, used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<String, (String, Publication)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored publication, ordered by identifier.
    pub fn publications(&self) -> Vec<Publication> {
        let mut all: Vec<_> = self
            .records
            .iter()
            .map(|entry| entry.value().1.clone())
            .collect();
        all.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        all
    }
}

#[async_trait]
impl PublicationStore for MemoryStore {
    async fn upsert(&self, publication: &Publication) -> Result<UpsertOutcome> {
        let sum = checksum(publication)?;

        let outcome = match self.records.entry(publication.identifier.clone()) {
            Entry::Vacant(slot) => {
                slot.insert((sum, publication.clone()));
                UpsertOutcome::Inserted
            }
            Entry::Occupied(slot) if slot.get().0 == sum => UpsertOutcome::Unchanged,
            Entry::Occupied(mut slot) => {
                slot.insert((sum, publication.clone()));
                UpsertOutcome::Updated
            }
        };

        Ok(outcome)
    }

    async fn get(&self, identifier: &str) -> Result<Option<Publication>> {
        Ok(self
            .records
            .get(identifier)
            .map(|entry| entry.value().1.clone()))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }
}
