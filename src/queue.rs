/*!
 * Translation job hand-off.
 *
 * The pipeline never performs translation itself; it describes the work and
 * pushes it onto a queue. Ownership of the job passes to the queue on push -
 * the pipeline holds no handle afterwards and never polls for completion.
 */

use sha2::{Digest, Sha256};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::app_config::TranslationProvider;
use crate::errors::QueueError;
use crate::search::SubtitleCandidate;

/// Credentials and endpoint selection for the translation backend
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    /// API key, empty for keyless providers
    pub api_key: String,
    /// OpenAI-compatible endpoint
    pub base_url: String,
    /// Model name
    pub model_name: String,
}

/// A unit of translation work, handed off to the worker population
#[derive(Debug, Clone)]
pub struct TranslationJob {
    /// Job id for log correlation
    pub id: Uuid,
    /// Source subtitles to translate from
    pub source_subtitles: Vec<SubtitleCandidate>,
    /// IMDB-style id of the content
    pub imdb_id: String,
    /// Season number
    pub season: u32,
    /// Episode number
    pub episode: u32,
    /// Provider language key the translation must produce
    pub target_language: String,
    /// Translation backend to use
    pub provider: TranslationProvider,
    /// Backend credentials
    pub credentials: ProviderCredentials,
}

impl TranslationJob {
    /// Deterministic key identifying the logical work unit.
    ///
    /// Two jobs for the same (content, language, provider) tuple share a key
    /// even when their uuids differ; workers and stores can use it to detect
    /// duplicate hand-offs.
    pub fn idempotency_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.imdb_id.as_bytes());
        hasher.update([0x1f]);
        hasher.update(self.season.to_le_bytes());
        hasher.update(self.episode.to_le_bytes());
        hasher.update(self.target_language.as_bytes());
        hasher.update([0x1f]);
        hasher.update(self.provider.slug().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Queue seam the resolution pipeline depends on
pub trait TranslationQueue: Send + Sync {
    /// Fire-and-forget hand-off; returns as soon as the job is accepted
    fn push(&self, job: TranslationJob) -> Result<(), QueueError>;
}

/// In-process queue backed by an unbounded tokio channel.
///
/// The receiving half belongs to the worker population; dropping it closes
/// the queue and subsequent pushes fail.
#[derive(Clone)]
pub struct ChannelTranslationQueue {
    sender: mpsc::UnboundedSender<TranslationJob>,
}

impl ChannelTranslationQueue {
    /// Create a queue and the receiver its consumers drain
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TranslationJob>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl TranslationQueue for ChannelTranslationQueue {
    fn push(&self, job: TranslationJob) -> Result<(), QueueError> {
        self.sender.send(job).map_err(|_| QueueError::Closed)
    }
}
