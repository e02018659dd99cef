/*!
 * End-to-end resolution flow tests
 *
 * These tests run the pipeline against the real SQLite repository (in
 * memory) and the real message subtitle sink (in a temp directory); only the
 * network-facing search provider and the worker-facing queue are mocked.
 */

use std::sync::Arc;

use subrelay::app_config::{RequestOptions, TranslationProvider};
use subrelay::notify::MessageSubtitleSink;
use subrelay::pipeline::ResolutionPipeline;
use subrelay::resource_url::subtitle_url;
use subrelay::store::SubtitleRepository;

use crate::common::mock_collaborators::{MockQueue, MockSearch};

const BASE_URL: &str = "http://localhost:3000";

fn pipeline_over(
    search: Arc<MockSearch>,
    queue: Arc<MockQueue>,
    root: &std::path::Path,
) -> ResolutionPipeline {
    let store = SubtitleRepository::new_in_memory().expect("in-memory store");
    ResolutionPipeline::new(
        BASE_URL,
        Arc::new(store),
        search,
        queue,
        Arc::new(MessageSubtitleSink::new(root)),
    )
}

#[tokio::test]
async fn test_mismatchFlow_shouldScheduleOnceAndConvergeOnPlaceholderUrl() {
    let dir = tempfile::tempdir().unwrap();
    let search = MockSearch::new().with_candidate("https://subs.example.org/en/1.srt", "eng");
    let queue = MockQueue::new();
    let pipeline = pipeline_over(search.clone(), queue.clone(), dir.path());
    let options = RequestOptions::new(TranslationProvider::GoogleTranslate, "Vietnamese");

    let first = pipeline.resolve("tt1234567:2:5", &options).await;

    let expected_url = subtitle_url(
        BASE_URL,
        TranslationProvider::GoogleTranslate,
        "vi",
        "tt1234567",
        2,
        5,
    );
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].url, expected_url);
    assert_eq!(first[0].id, "vie");
    assert_eq!(first[0].lang, "Vietnamese");
    assert_eq!(queue.job_count(), 1);

    // The status message sits at the placeholder path, ready to be served
    // until the worker overwrites it.
    let placeholder = dir
        .path()
        .join("subtitles/google-translate/vi/tt1234567/season2/tt1234567-translated-5-1.srt");
    let content = std::fs::read_to_string(&placeholder).expect("placeholder file written");
    assert!(content.contains("Translating subtitles"));

    // A retry gets the identical URL from the store without searching or
    // scheduling again.
    let second = pipeline.resolve("tt1234567:2:5", &options).await;
    assert_eq!(first, second);
    assert_eq!(queue.job_count(), 1);
    assert_eq!(*search.search_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_directHitFlow_shouldPersistAndServeForeignUrl() {
    let dir = tempfile::tempdir().unwrap();
    let search = MockSearch::new().with_candidate("https://subs.example.org/vi/9.srt", "vie");
    let queue = MockQueue::new();
    let pipeline = pipeline_over(search.clone(), queue.clone(), dir.path());
    let options = RequestOptions::new(TranslationProvider::GoogleTranslate, "Vietnamese");

    let first = pipeline.resolve("tt0111161", &options).await;
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].url, "https://subs.example.org/vi/9.srt");
    assert_eq!(queue.job_count(), 0);

    // Second request is served from the store with the same foreign URL.
    let second = pipeline.resolve("tt0111161", &options).await;
    assert_eq!(first, second);
    assert_eq!(*search.search_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_noResultsFlow_shouldWriteNotFoundMessage() {
    let dir = tempfile::tempdir().unwrap();
    let search = MockSearch::new();
    let queue = MockQueue::new();
    let pipeline = pipeline_over(search.clone(), queue.clone(), dir.path());
    let options = RequestOptions::new(TranslationProvider::ChatGptApi, "French");

    let result = pipeline.resolve("tt0903747:3:7", &options).await;

    assert_eq!(result.len(), 1);
    assert_eq!(
        result[0].url,
        subtitle_url(
            BASE_URL,
            TranslationProvider::ChatGptApi,
            "fr",
            "tt0903747",
            3,
            7
        )
    );
    assert_eq!(queue.job_count(), 0);

    let message = dir
        .path()
        .join("subtitles/chatgpt-api/fr/tt0903747/season3/tt0903747-translated-7-1.srt");
    let content = std::fs::read_to_string(&message).expect("message file written");
    assert!(content.contains("No subtitles found"));

    // No record is persisted on this path; a retry searches again.
    let retry = pipeline.resolve("tt0903747:3:7", &options).await;
    assert_eq!(result, retry);
    assert_eq!(*search.search_calls.lock().unwrap(), 2);
}
