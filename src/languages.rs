use std::collections::HashMap;

use isolang::Language;
use once_cell::sync::Lazy;

use crate::app_config::TranslationProvider;

/// Language resolution utilities
///
/// Three related code spaces are in play: the display label the user picks on
/// the configuration surface, the provider-specific key the translation
/// backend understands, and the tag the subtitle search API reports for a
/// candidate. The per-provider tables below relate label and key; the
/// normalization helpers bridge the search API's tag space. Lookups in both
/// directions are precomputed once at load time.
/// Google Translate vocabulary: (key, display label).
///
/// Google keeps a few legacy codes ("iw" for Hebrew) and splits Chinese by
/// script rather than by region.
static GOOGLE_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("iw", "Hebrew"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ms", "Malay"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

/// ChatGPT vocabulary: (key, display label). Plain ISO 639-1 codes, with a
/// regional variant for Brazilian Portuguese.
static CHATGPT_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ms", "Malay"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pt-BR", "Portuguese (Brazilian)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

struct LanguageTable {
    key_to_label: HashMap<&'static str, &'static str>,
    label_to_key: HashMap<&'static str, &'static str>,
}

impl LanguageTable {
    fn build(entries: &'static [(&'static str, &'static str)]) -> Self {
        let mut key_to_label = HashMap::with_capacity(entries.len());
        let mut label_to_key = HashMap::with_capacity(entries.len());
        for (key, label) in entries {
            key_to_label.insert(*key, *label);
            // First match wins if a label were ever duplicated.
            label_to_key.entry(*label).or_insert(*key);
        }
        LanguageTable {
            key_to_label,
            label_to_key,
        }
    }
}

static GOOGLE_TABLE: Lazy<LanguageTable> = Lazy::new(|| LanguageTable::build(GOOGLE_LANGUAGES));
static CHATGPT_TABLE: Lazy<LanguageTable> = Lazy::new(|| LanguageTable::build(CHATGPT_LANGUAGES));

fn table_for(provider: TranslationProvider) -> &'static LanguageTable {
    match provider {
        TranslationProvider::GoogleTranslate => &GOOGLE_TABLE,
        TranslationProvider::ChatGptApi => &CHATGPT_TABLE,
    }
}

/// Resolve a display label to the provider's language key.
///
/// Returns `None` when the provider does not support the label. Vocabularies
/// differ per provider: "Hebrew" is "iw" for Google Translate and "he" for
/// ChatGPT.
pub fn key_for_label(label: &str, provider: TranslationProvider) -> Option<&'static str> {
    table_for(provider).label_to_key.get(label).copied()
}

/// Resolve a provider language key to its display label.
pub fn label_for_key(key: &str, provider: TranslationProvider) -> Option<&'static str> {
    table_for(provider).key_to_label.get(key).copied()
}

/// All display labels a provider supports, in table order.
pub fn labels(provider: TranslationProvider) -> Vec<&'static str> {
    match provider {
        TranslationProvider::GoogleTranslate => {
            GOOGLE_LANGUAGES.iter().map(|(_, label)| *label).collect()
        }
        TranslationProvider::ChatGptApi => {
            CHATGPT_LANGUAGES.iter().map(|(_, label)| *label).collect()
        }
    }
}

/// Search-API tags that do not round-trip through ISO tables: regional
/// variants and ISO 639-2/B codes the search provider is known to emit.
static TAG_OVERRIDES: &[(&str, &str)] = &[
    ("pob", "pt-BR"),
    ("scc", "sr"),
    ("fre", "fr"),
    ("ger", "de"),
    ("dut", "nl"),
    ("gre", "el"),
    ("chi", "zh"),
    ("cze", "cs"),
    ("per", "fa"),
    ("may", "ms"),
    ("rum", "ro"),
    ("slo", "sk"),
];

/// Normalize a search provider's language tag into the internal code space.
///
/// Handles ISO 639-2/B and /T three-letter tags as well as the provider's
/// regional specials. When no mapping entry exists the tag is returned
/// unchanged, so comparisons degrade to plain inequality instead of failing.
pub fn normalize_provider_tag(tag: &str) -> String {
    let trimmed = tag.trim();

    if let Some((_, mapped)) = TAG_OVERRIDES
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(trimmed))
    {
        return (*mapped).to_string();
    }

    let lower = trimmed.to_lowercase();
    if lower.len() == 2 && Language::from_639_1(&lower).is_some() {
        return lower;
    }
    if lower.len() == 3 {
        if let Some(lang) = Language::from_639_3(&lower) {
            if let Some(part1) = lang.to_639_1() {
                return part1.to_string();
            }
        }
    }

    // Identity fallback keeps the comparison total.
    trimmed.to_string()
}

/// Three-letter code exposed as the entry id in addon responses, for better
/// player compatibility. Identity fallback for keys with no ISO mapping.
///
/// ISO resolution runs before the override table: several overrides map
/// legacy three-letter tags onto plain two-letter keys, and those keys must
/// still widen to their ISO 639-2/T form.
pub fn exposed_code(key: &str) -> String {
    let lower = key.trim().to_lowercase();
    if let Some(lang) = Language::from_639_1(&lower) {
        return lang.to_639_3().to_string();
    }

    if let Some((tag, _)) = TAG_OVERRIDES
        .iter()
        .find(|(_, mapped)| mapped.eq_ignore_ascii_case(key))
    {
        return (*tag).to_string();
    }

    key.to_string()
}
