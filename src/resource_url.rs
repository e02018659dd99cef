use crate::app_config::TranslationProvider;

/// Deterministic resource path construction
///
/// The URL returned to a client on the translation path is computed before
/// the file exists; the worker that later writes the file derives the target
/// path with the same function. Both sides converging on identical strings is
/// what makes the asynchronous hand-off work, so these functions are pure,
/// injective over their argument tuple, and must never depend on call time.
/// Path of a subtitle resource relative to the serving root.
pub fn subtitle_relative_path(
    provider: TranslationProvider,
    language_key: &str,
    imdb_id: &str,
    season: u32,
    episode: u32,
) -> String {
    format!(
        "subtitles/{}/{}/{}/season{}/{}-translated-{}-1.srt",
        provider, language_key, imdb_id, season, imdb_id, episode
    )
}

/// Absolute subtitle URL for a (provider, language, content, episode) tuple.
pub fn subtitle_url(
    base_url: &str,
    provider: TranslationProvider,
    language_key: &str,
    imdb_id: &str,
    season: u32,
    episode: u32,
) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        subtitle_relative_path(provider, language_key, imdb_id, season, episode)
    )
}
