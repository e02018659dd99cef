/*!
 * Persistent store for resolved and pending subtitle resources.
 *
 * This module provides SQLite-based persistence for subtitle records:
 * direct hits cached from the search provider as well as placeholder rows
 * for translations that are still in flight. The store is the only
 * synchronization boundary between concurrent resolutions.
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

use anyhow::Result;
use async_trait::async_trait;

use crate::content_id::ContentKind;
pub use connection::DatabaseConnection;
pub use models::SubtitleRecord;
pub use repository::SubtitleRepository;

/// Store seam the resolution pipeline depends on.
///
/// At most one record exists per `(imdb_id, season, episode, language_key)`;
/// enforcing that uniqueness is the store's job, not the pipeline's.
#[async_trait]
pub trait SubtitleStore: Send + Sync {
    /// Fetch the records for a content/language tuple
    async fn get(
        &self,
        imdb_id: &str,
        season: u32,
        episode: u32,
        language_key: &str,
    ) -> Result<Vec<SubtitleRecord>>;

    /// Insert or replace the record for a content/language tuple
    async fn add(
        &self,
        imdb_id: &str,
        kind: ContentKind,
        season: u32,
        episode: u32,
        relative_path: &str,
        language_key: &str,
    ) -> Result<()>;

    /// Atomically insert a placeholder row unless one already exists.
    ///
    /// Returns `true` when this call created the row. A `false` return means
    /// another resolution already claimed the tuple and its translation job
    /// must not be enqueued again.
    async fn try_claim(
        &self,
        imdb_id: &str,
        kind: ContentKind,
        season: u32,
        episode: u32,
        relative_path: &str,
        language_key: &str,
    ) -> Result<bool>;
}
