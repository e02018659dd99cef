/*!
 * # subrelay - subtitle resolution and translation relay
 *
 * A Rust service that resolves a subtitle request for a media item into
 * either an already-available subtitle resource or a placeholder pointing at
 * a resource a translation worker will create shortly.
 *
 * ## Features
 *
 * - Parse opaque content ids (IMDB-style and catalog specials)
 * - Serve cached subtitles from a persistent SQLite store
 * - Fall back to OpenSubtitles search for existing subtitles
 * - Schedule asynchronous translation when languages mismatch
 * - Deterministic resource URLs shared with the translation workers
 * - Per-provider language vocabularies (Google Translate, ChatGPT API)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Service and per-request configuration
 * - `content_id`: Opaque content id parsing
 * - `languages`: Label/key tables and language tag normalization
 * - `resource_url`: Deterministic subtitle URL construction
 * - `pipeline`: The resolve-or-schedule orchestrator
 * - `store`: SQLite-backed subtitle record persistence
 * - `search`: OpenSubtitles search client
 * - `queue`: Translation job hand-off
 * - `notify`: User-facing status message sink
 * - `server`: Addon HTTP surface
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod content_id;
pub mod errors;
pub mod languages;
pub mod notify;
pub mod pipeline;
pub mod queue;
pub mod resource_url;
pub mod search;
pub mod server;
pub mod store;

// Re-export main types for easier usage
pub use app_config::{AppConfig, RequestOptions, TranslationProvider};
pub use content_id::{ContentKind, ContentRef};
pub use errors::{AppError, NotifyError, QueueError, SearchError};
pub use pipeline::{ResolutionPipeline, ResolvedSubtitle};
pub use store::{SubtitleRecord, SubtitleStore};
