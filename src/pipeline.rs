/*!
 * Subtitle resolution pipeline.
 *
 * The decision logic at the center of the service: parse the content id,
 * consult the store, fall back to the search provider, compare languages,
 * and either answer with an existing resource or schedule a translation and
 * answer with the deterministic placeholder URL the worker will later
 * fulfill. The caller always gets a well-formed (possibly empty) result
 * within the request's lifetime; translation itself never blocks a request.
 */

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use serde::Serialize;
use uuid::Uuid;

use crate::app_config::RequestOptions;
use crate::content_id::{self, ContentRef};
use crate::languages;
use crate::notify::NotificationSink;
use crate::queue::{ProviderCredentials, TranslationJob, TranslationQueue};
use crate::resource_url::{subtitle_relative_path, subtitle_url};
use crate::search::{SubtitleCandidate, SubtitleSearchProvider};
use crate::store::SubtitleStore;

/// Status message written when the search provider has nothing
const MSG_NOT_FOUND: &str = "No subtitles found on OpenSubtitles";

/// Status message written while a translation is in flight
const MSG_TRANSLATING: &str = "Translating subtitles. Please wait 1 minute and try again.";

/// One entry of the pipeline's answer, in addon wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSubtitle {
    /// Exposed id, a three-letter language code for player compatibility
    pub id: String,
    /// Resource URL; may reference a file that does not exist yet
    pub url: String,
    /// Human-facing language name
    pub lang: String,
}

/// Tie-break strategy over search results.
///
/// The default keeps the provider's first result; implementations can score
/// candidates without the state machine changing.
pub trait RankCandidates: Send + Sync {
    /// Pick the candidate to use, or `None` to treat the search as empty
    fn select<'a>(&self, candidates: &'a [SubtitleCandidate]) -> Option<&'a SubtitleCandidate>;
}

/// Default tie-break: first search result wins
pub struct FirstCandidate;

impl RankCandidates for FirstCandidate {
    fn select<'a>(&self, candidates: &'a [SubtitleCandidate]) -> Option<&'a SubtitleCandidate> {
        candidates.first()
    }
}

/// The resolve-or-schedule orchestrator
pub struct ResolutionPipeline {
    /// Externally reachable base URL for generated resource links
    public_url: String,
    /// Persistent subtitle store
    store: Arc<dyn SubtitleStore>,
    /// External subtitle search provider
    search: Arc<dyn SubtitleSearchProvider>,
    /// Translation work hand-off
    queue: Arc<dyn TranslationQueue>,
    /// User-facing status messages
    notifier: Arc<dyn NotificationSink>,
    /// Tie-break strategy over search results
    ranker: Box<dyn RankCandidates>,
}

impl ResolutionPipeline {
    /// Create a pipeline over the given collaborators.
    ///
    /// `public_url` is an explicit configuration value; resource URLs are
    /// never assembled from ambient process state.
    pub fn new(
        public_url: impl Into<String>,
        store: Arc<dyn SubtitleStore>,
        search: Arc<dyn SubtitleSearchProvider>,
        queue: Arc<dyn TranslationQueue>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            public_url: public_url.into(),
            store,
            search,
            queue,
            notifier,
            ranker: Box::new(FirstCandidate),
        }
    }

    /// Replace the tie-break strategy
    pub fn with_ranker(mut self, ranker: Box<dyn RankCandidates>) -> Self {
        self.ranker = ranker;
        self
    }

    /// Resolve a subtitle request.
    ///
    /// Never fails: unparseable ids, unsupported labels, empty search results
    /// and downstream I/O failures all degrade to an empty or placeholder
    /// answer. Failures are reported to the log, not to the caller.
    pub async fn resolve(
        &self,
        content_id: &str,
        options: &RequestOptions,
    ) -> Vec<ResolvedSubtitle> {
        match self.resolve_inner(content_id, options).await {
            Ok(subtitles) => subtitles,
            Err(e) => {
                error!("Subtitle resolution failed for {}: {:#}", content_id, e);
                Vec::new()
            }
        }
    }

    async fn resolve_inner(
        &self,
        content_id: &str,
        options: &RequestOptions,
    ) -> Result<Vec<ResolvedSubtitle>> {
        let content = content_id::parse(content_id);
        if !content.is_resolvable() {
            debug!("Unrecognized content id: {}", content_id);
            return Ok(Vec::new());
        }

        let Some(target_key) = languages::key_for_label(&options.translate_to, options.provider)
        else {
            info!(
                "Unsupported target language {:?} for {}",
                options.translate_to,
                options.provider.display_name()
            );
            return Ok(Vec::new());
        };

        // Placeholder and cached answers point at the deterministic path the
        // translation worker also computes.
        let placeholder_url = subtitle_url(
            &self.public_url,
            options.provider,
            target_key,
            &content.imdb_id,
            content.season,
            content.episode,
        );

        let cached = self
            .store
            .get(&content.imdb_id, content.season, content.episode, target_key)
            .await?;
        if let Some(record) = cached.first() {
            let url = self.absolute_url(&record.relative_path);
            info!(
                "Subtitle for {} s{}e{} [{}] served from store",
                content.imdb_id, content.season, content.episode, target_key
            );
            return Ok(vec![self.entry(target_key, url, options)]);
        }

        let candidates = self
            .search
            .search(
                content.kind,
                &content.imdb_id,
                content.season,
                content.episode,
                target_key,
            )
            .await?;

        let Some(candidate) = self.ranker.select(&candidates) else {
            info!(
                "No subtitles found for {} s{}e{}",
                content.imdb_id, content.season, content.episode
            );
            self.notifier
                .upsert(
                    MSG_NOT_FOUND,
                    &content.imdb_id,
                    content.season,
                    content.episode,
                    target_key,
                    options.provider,
                )
                .await?;
            return Ok(vec![self.entry(target_key, placeholder_url, options)]);
        };

        let candidate_lang = languages::normalize_provider_tag(&candidate.lang);
        if candidate_lang == target_key {
            info!(
                "Search returned a {} subtitle for {} s{}e{}, serving it directly",
                target_key, content.imdb_id, content.season, content.episode
            );
            self.store
                .add(
                    &content.imdb_id,
                    content.kind,
                    content.season,
                    content.episode,
                    self.relative_to_base(&candidate.url),
                    target_key,
                )
                .await?;
            return Ok(vec![self.entry(target_key, candidate.url.clone(), options)]);
        }

        info!(
            "Search returned {} (wanted {}) for {} s{}e{}, scheduling translation",
            candidate_lang, target_key, content.imdb_id, content.season, content.episode
        );
        self.notifier
            .upsert(
                MSG_TRANSLATING,
                &content.imdb_id,
                content.season,
                content.episode,
                target_key,
                options.provider,
            )
            .await?;

        self.schedule_translation(&content, target_key, candidate, options)
            .await?;

        Ok(vec![self.entry(target_key, placeholder_url, options)])
    }

    /// Claim the placeholder row and enqueue the translation job.
    ///
    /// The store's atomic check-and-insert is the dedup point: the job is
    /// handed off only by the resolution that created the row, so a tuple
    /// requested twice while the first translation runs is enqueued once.
    async fn schedule_translation(
        &self,
        content: &ContentRef,
        target_key: &str,
        candidate: &SubtitleCandidate,
        options: &RequestOptions,
    ) -> Result<()> {
        let relative_path = subtitle_relative_path(
            options.provider,
            target_key,
            &content.imdb_id,
            content.season,
            content.episode,
        );

        let claimed = self
            .store
            .try_claim(
                &content.imdb_id,
                content.kind,
                content.season,
                content.episode,
                &relative_path,
                target_key,
            )
            .await?;

        if !claimed {
            debug!(
                "Translation for {} s{}e{} [{}] already in flight, skipping enqueue",
                content.imdb_id, content.season, content.episode, target_key
            );
            return Ok(());
        }

        let job = TranslationJob {
            id: Uuid::new_v4(),
            source_subtitles: vec![candidate.clone()],
            imdb_id: content.imdb_id.clone(),
            season: content.season,
            episode: content.episode,
            target_language: target_key.to_string(),
            provider: options.provider,
            credentials: ProviderCredentials {
                api_key: options.api_key.clone(),
                base_url: options.base_url.clone(),
                model_name: options.model_name.clone(),
            },
        };

        debug!("Enqueueing translation job {}", job.id);
        self.queue.push(job)?;
        Ok(())
    }

    /// Response entry for the target language at the given URL
    fn entry(&self, target_key: &str, url: String, options: &RequestOptions) -> ResolvedSubtitle {
        let label =
            languages::label_for_key(target_key, options.provider).unwrap_or(target_key);
        ResolvedSubtitle {
            id: languages::exposed_code(target_key),
            url,
            lang: label.to_string(),
        }
    }

    /// Expand a stored path to an absolute URL. Direct hits from the search
    /// provider are stored with their foreign absolute URL and pass through.
    fn absolute_url(&self, relative_path: &str) -> String {
        if relative_path.starts_with("http://") || relative_path.starts_with("https://") {
            relative_path.to_string()
        } else {
            format!(
                "{}/{}",
                self.public_url.trim_end_matches('/'),
                relative_path
            )
        }
    }

    /// Strip the public base from a URL, mirroring how records are stored
    fn relative_to_base<'a>(&self, url: &'a str) -> &'a str {
        let base = self.public_url.trim_end_matches('/');
        url.strip_prefix(base)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(url)
    }
}
