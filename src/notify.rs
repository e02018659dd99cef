/*!
 * Notification sink for user-facing status messages.
 *
 * A player that fetches a placeholder URL before the translation worker has
 * finished should see the current status instead of a 404. Upserting a
 * message writes a one-cue SRT file at the exact path the finished
 * translation will later overwrite.
 */

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use crate::app_config::TranslationProvider;
use crate::errors::NotifyError;
use crate::resource_url::subtitle_relative_path;

/// How long the status message stays on screen, in milliseconds. Long enough
/// to survive seeking around the start of playback.
const MESSAGE_DURATION_MS: u64 = 120_000;

/// Notification seam the resolution pipeline depends on
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Create or replace the status message for a content/language tuple
    async fn upsert(
        &self,
        message: &str,
        imdb_id: &str,
        season: u32,
        episode: u32,
        language_key: &str,
        provider: TranslationProvider,
    ) -> Result<(), NotifyError>;
}

/// Sink that writes status messages as SRT files under the serving root
pub struct MessageSubtitleSink {
    /// Directory the `subtitles/` tree lives under
    root: PathBuf,
}

impl MessageSubtitleSink {
    /// Create a sink writing below the given serving root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Render a message as a single-cue SRT document
    fn message_srt(message: &str) -> String {
        format!(
            "1\n{} --> {}\n{}\n\n",
            Self::format_timestamp(500),
            Self::format_timestamp(MESSAGE_DURATION_MS),
            message
        )
    }

    fn write_file(path: &Path, content: &str) -> Result<(), NotifyError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NotifyError::WriteFailed(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| NotifyError::WriteFailed(format!("{}: {}", path.display(), e)))
    }
}

#[async_trait]
impl NotificationSink for MessageSubtitleSink {
    async fn upsert(
        &self,
        message: &str,
        imdb_id: &str,
        season: u32,
        episode: u32,
        language_key: &str,
        provider: TranslationProvider,
    ) -> Result<(), NotifyError> {
        let relative = subtitle_relative_path(provider, language_key, imdb_id, season, episode);
        let path = self.root.join(&relative);
        debug!("Writing status message to {:?}", path);

        let content = Self::message_srt(message);

        // Blocking is fine here: the file is a few hundred bytes.
        Self::write_file(&path, &content)
    }
}
