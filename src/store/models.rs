/*!
 * Store entity models.
 *
 * These structures map directly to database rows and provide type-safe
 * access to persisted subtitle records.
 */

use serde::{Deserialize, Serialize};

use crate::content_id::ContentKind;

/// Persisted subtitle resource, either a finished file or a placeholder for
/// a translation still in flight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleRecord {
    /// IMDB-style id of the content
    pub imdb_id: String,
    /// Movie or series
    pub kind: ContentKind,
    /// Season number
    pub season: u32,
    /// Episode number
    pub episode: u32,
    /// Resource path relative to the serving root
    pub relative_path: String,
    /// Provider language key the resource satisfies
    pub language_key: String,
    /// Row creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}
