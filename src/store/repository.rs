/*!
 * Repository layer for subtitle store operations.
 *
 * This module provides a high-level API over the subtitles table,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rusqlite::params;

use super::connection::DatabaseConnection;
use super::models::SubtitleRecord;
use super::SubtitleStore;
use crate::content_id::ContentKind;

/// Repository for subtitle records
#[derive(Clone)]
pub struct SubtitleRepository {
    /// Database connection
    db: DatabaseConnection,
}

impl SubtitleRepository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Total number of stored records
    pub async fn count(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM subtitles", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }
}

#[async_trait]
impl SubtitleStore for SubtitleRepository {
    async fn get(
        &self,
        imdb_id: &str,
        season: u32,
        episode: u32,
        language_key: &str,
    ) -> Result<Vec<SubtitleRecord>> {
        let imdb_id = imdb_id.to_string();
        let language_key = language_key.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT imdb_id, kind, season, episode, relative_path, language_key,
                           created_at, updated_at
                    FROM subtitles
                    WHERE imdb_id = ?1 AND season = ?2 AND episode = ?3 AND language_key = ?4
                    "#,
                )?;

                let records = stmt
                    .query_map(params![imdb_id, season, episode, language_key], |row| {
                        Ok(SubtitleRecord {
                            imdb_id: row.get(0)?,
                            kind: row
                                .get::<_, String>(1)?
                                .parse()
                                .unwrap_or(ContentKind::Unknown),
                            season: row.get(2)?,
                            episode: row.get(3)?,
                            relative_path: row.get(4)?,
                            language_key: row.get(5)?,
                            created_at: row.get(6)?,
                            updated_at: row.get(7)?,
                        })
                    })?
                    .filter_map(|r| r.ok())
                    .collect();

                Ok(records)
            })
            .await
    }

    async fn add(
        &self,
        imdb_id: &str,
        kind: ContentKind,
        season: u32,
        episode: u32,
        relative_path: &str,
        language_key: &str,
    ) -> Result<()> {
        let imdb_id = imdb_id.to_string();
        let relative_path = relative_path.to_string();
        let language_key = language_key.to_string();
        let now = Utc::now().to_rfc3339();

        debug!(
            "Storing subtitle record {} s{}e{} [{}] -> {}",
            imdb_id, season, episode, language_key, relative_path
        );

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO subtitles (
                        imdb_id, kind, season, episode, relative_path, language_key,
                        created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
                    ON CONFLICT(imdb_id, season, episode, language_key)
                    DO UPDATE SET relative_path = excluded.relative_path,
                                  updated_at = excluded.updated_at
                    "#,
                    params![
                        imdb_id,
                        kind.to_string(),
                        season,
                        episode,
                        relative_path,
                        language_key,
                        now,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    async fn try_claim(
        &self,
        imdb_id: &str,
        kind: ContentKind,
        season: u32,
        episode: u32,
        relative_path: &str,
        language_key: &str,
    ) -> Result<bool> {
        let imdb_id = imdb_id.to_string();
        let relative_path = relative_path.to_string();
        let language_key = language_key.to_string();
        let now = Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                // INSERT OR IGNORE against the unique tuple is the atomic
                // check-and-insert; the changed-row count tells us who won.
                let inserted = conn.execute(
                    r#"
                    INSERT OR IGNORE INTO subtitles (
                        imdb_id, kind, season, episode, relative_path, language_key,
                        created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
                    "#,
                    params![
                        imdb_id,
                        kind.to_string(),
                        season,
                        episode,
                        relative_path,
                        language_key,
                        now,
                    ],
                )?;
                Ok(inserted > 0)
            })
            .await
    }
}
