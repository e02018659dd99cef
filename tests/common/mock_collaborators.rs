/*!
 * Mock collaborator implementations for testing
 *
 * This module provides mock implementations of the pipeline's collaborator
 * seams (store, search provider, queue, notification sink) so tests can
 * observe exactly which side effects a resolution performed without touching
 * a database, the network, or the filesystem.
 */

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use subrelay::app_config::TranslationProvider;
use subrelay::content_id::ContentKind;
use subrelay::errors::{NotifyError, QueueError, SearchError};
use subrelay::notify::NotificationSink;
use subrelay::queue::{TranslationJob, TranslationQueue};
use subrelay::search::{SubtitleCandidate, SubtitleSearchProvider};
use subrelay::store::{SubtitleRecord, SubtitleStore};

/// In-memory subtitle store tracking every call made against it
#[derive(Default)]
pub struct MockStore {
    records: Mutex<Vec<SubtitleRecord>>,
    /// Number of `get` calls
    pub get_calls: Mutex<usize>,
    /// Number of `add` calls
    pub add_calls: Mutex<usize>,
    /// Number of `try_claim` calls
    pub claim_calls: Mutex<usize>,
    /// When set, the next `get` fails
    pub fail_get: Mutex<bool>,
    /// When set, the next `get` reports no records regardless of contents
    pub empty_get: Mutex<bool>,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed the store with an existing record
    pub fn with_record(self: &Arc<Self>, record: SubtitleRecord) -> Arc<Self> {
        self.records.lock().unwrap().push(record);
        self.clone()
    }

    /// Make the next `get` call fail
    pub fn fail_next_get(&self) {
        *self.fail_get.lock().unwrap() = true;
    }

    /// Make the next `get` report no records, simulating the window between
    /// another resolution's lookup and its claim
    pub fn empty_next_get(&self) {
        *self.empty_get.lock().unwrap() = true;
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl SubtitleStore for MockStore {
    async fn get(
        &self,
        imdb_id: &str,
        season: u32,
        episode: u32,
        language_key: &str,
    ) -> Result<Vec<SubtitleRecord>> {
        *self.get_calls.lock().unwrap() += 1;

        let mut fail = self.fail_get.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(anyhow!("store unavailable"));
        }

        let mut empty = self.empty_get.lock().unwrap();
        if *empty {
            *empty = false;
            return Ok(Vec::new());
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.imdb_id == imdb_id
                    && r.season == season
                    && r.episode == episode
                    && r.language_key == language_key
            })
            .cloned()
            .collect())
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
        *self.add_calls.lock().unwrap() += 1;

        let mut records = self.records.lock().unwrap();
        records.retain(|r| {
            !(r.imdb_id == imdb_id
                && r.season == season
                && r.episode == episode
                && r.language_key == language_key)
        });
        records.push(record(imdb_id, kind, season, episode, relative_path, language_key));
        Ok(())
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
        *self.claim_calls.lock().unwrap() += 1;

        let mut records = self.records.lock().unwrap();
        let exists = records.iter().any(|r| {
            r.imdb_id == imdb_id
                && r.season == season
                && r.episode == episode
                && r.language_key == language_key
        });
        if exists {
            return Ok(false);
        }
        records.push(record(imdb_id, kind, season, episode, relative_path, language_key));
        Ok(true)
    }
}

/// Build a record with fixed timestamps
pub fn record(
    imdb_id: &str,
    kind: ContentKind,
    season: u32,
    episode: u32,
    relative_path: &str,
    language_key: &str,
) -> SubtitleRecord {
    SubtitleRecord {
        imdb_id: imdb_id.to_string(),
        kind,
        season,
        episode,
        relative_path: relative_path.to_string(),
        language_key: language_key.to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

/// Search provider returning a fixed candidate list
#[derive(Default)]
pub struct MockSearch {
    results: Mutex<Vec<SubtitleCandidate>>,
    /// Number of `search` calls
    pub search_calls: Mutex<usize>,
    /// When set, the next `search` fails
    pub fail_search: Mutex<bool>,
}

impl MockSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed the provider with a candidate
    pub fn with_candidate(self: &Arc<Self>, url: &str, lang: &str) -> Arc<Self> {
        self.results.lock().unwrap().push(SubtitleCandidate {
            id: format!("mock-{}", lang),
            url: url.to_string(),
            lang: lang.to_string(),
        });
        self.clone()
    }

    /// Make the next `search` call fail
    pub fn fail_next_search(&self) {
        *self.fail_search.lock().unwrap() = true;
    }
}

#[async_trait]
impl SubtitleSearchProvider for MockSearch {
    async fn search(
        &self,
        _kind: ContentKind,
        _imdb_id: &str,
        _season: u32,
        _episode: u32,
        _language_key: &str,
    ) -> Result<Vec<SubtitleCandidate>, SearchError> {
        *self.search_calls.lock().unwrap() += 1;

        let mut fail = self.fail_search.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(SearchError::RequestFailed("search unavailable".to_string()));
        }

        Ok(self.results.lock().unwrap().clone())
    }
}

/// Queue collecting every pushed job
#[derive(Default)]
pub struct MockQueue {
    /// Jobs pushed so far
    pub jobs: Mutex<Vec<TranslationJob>>,
}

impl MockQueue {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn job_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }
}

impl TranslationQueue for MockQueue {
    fn push(&self, job: TranslationJob) -> Result<(), QueueError> {
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}

/// Notification sink collecting every message
#[derive(Default)]
pub struct MockSink {
    /// (message, language_key) pairs in upsert order
    pub messages: Mutex<Vec<(String, String)>>,
}

impl MockSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSink for MockSink {
    async fn upsert(
        &self,
        message: &str,
        _imdb_id: &str,
        _season: u32,
        _episode: u32,
        language_key: &str,
        _provider: TranslationProvider,
    ) -> Result<(), NotifyError> {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), language_key.to_string()));
        Ok(())
    }
}
