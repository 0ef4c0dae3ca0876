//! Cached reference data from the catalog.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::MovieCatalog;

/// Genre id → display name.
pub type GenreTable = HashMap<u32, String>;

struct CachedGenres {
    table: Arc<GenreTable>,
    fetched_at: Instant,
}

/// Time-boxed cache for the catalog's genre list.
///
/// Concurrent refreshes are allowed to race: whichever finishes last wins,
/// and since the data is static reference data the outcome is the same.
/// A failed fetch yields an empty table and is not cached.
pub struct CatalogReferenceCache {
    catalog: Arc<dyn MovieCatalog>,
    ttl: Duration,
    genres: RwLock<Option<CachedGenres>>,
}

impl CatalogReferenceCache {
    pub fn new(catalog: Arc<dyn MovieCatalog>, ttl: Duration) -> Self {
        Self {
            catalog,
            ttl,
            genres: RwLock::new(None),
        }
    }

    /// Get the genre table, fetching it if missing or older than the TTL.
    pub async fn genres(&self) -> Arc<GenreTable> {
        if let Some(cached) = self.genres.read().await.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return Arc::clone(&cached.table);
            }
        }

        // Lock is not held across the fetch.
        match self.catalog.get_genres().await {
            Ok(genres) => {
                let table: Arc<GenreTable> =
                    Arc::new(genres.into_iter().map(|g| (g.id, g.name)).collect());
                debug!("Genre table refreshed ({} entries)", table.len());

                *self.genres.write().await = Some(CachedGenres {
                    table: Arc::clone(&table),
                    fetched_at: Instant::now(),
                });
                table
            }
            Err(e) => {
                warn!("Failed to fetch genres: {}", e);
                Arc::new(GenreTable::new())
            }
        }
    }

    /// Drop the cached table so the next lookup refetches it.
    pub async fn invalidate(&self) {
        *self.genres.write().await = None;
    }
}
