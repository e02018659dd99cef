/*!
 * Tests for language table lookups and tag normalization
 */

use subrelay::app_config::TranslationProvider;
use subrelay::languages::{
    exposed_code, key_for_label, label_for_key, labels, normalize_provider_tag,
};

/// Vocabularies differ per provider: the same label maps to different keys
#[test]
fn test_keyForLabel_withSameLabel_shouldDependOnProvider() {
    assert_eq!(
        key_for_label("Hebrew", TranslationProvider::GoogleTranslate),
        Some("iw")
    );
    assert_eq!(
        key_for_label("Hebrew", TranslationProvider::ChatGptApi),
        Some("he")
    );
}

#[test]
fn test_keyForLabel_withCommonLabels_shouldResolve() {
    assert_eq!(
        key_for_label("English", TranslationProvider::GoogleTranslate),
        Some("en")
    );
    assert_eq!(
        key_for_label("Portuguese", TranslationProvider::ChatGptApi),
        Some("pt")
    );
    assert_eq!(
        key_for_label("Portuguese (Brazilian)", TranslationProvider::ChatGptApi),
        Some("pt-BR")
    );
    assert_eq!(
        key_for_label("Chinese (Simplified)", TranslationProvider::GoogleTranslate),
        Some("zh-CN")
    );
}

#[test]
fn test_keyForLabel_withUnknownLabel_shouldReturnNone() {
    assert_eq!(
        key_for_label("Klingon", TranslationProvider::GoogleTranslate),
        None
    );
    // Chinese script variants exist only in the Google vocabulary
    assert_eq!(
        key_for_label("Chinese (Simplified)", TranslationProvider::ChatGptApi),
        None
    );
}

#[test]
fn test_labelForKey_shouldInvertKeyForLabel() {
    for provider in [
        TranslationProvider::GoogleTranslate,
        TranslationProvider::ChatGptApi,
    ] {
        for label in labels(provider) {
            let key = key_for_label(label, provider).expect("label must resolve");
            assert_eq!(label_for_key(key, provider), Some(label));
        }
    }
}

#[test]
fn test_labels_shouldListDisplayLabels() {
    let google = labels(TranslationProvider::GoogleTranslate);
    assert!(google.contains(&"English"));
    assert!(google.contains(&"Vietnamese"));
    assert!(!google.is_empty());
}

#[test]
fn test_normalizeProviderTag_withIsoTags_shouldMapToInternalCodes() {
    assert_eq!(normalize_provider_tag("eng"), "en");
    assert_eq!(normalize_provider_tag("por"), "pt");
    assert_eq!(normalize_provider_tag("vie"), "vi");
    // ISO 639-2/B variants
    assert_eq!(normalize_provider_tag("fre"), "fr");
    assert_eq!(normalize_provider_tag("ger"), "de");
    // Two-letter tags pass through normalized
    assert_eq!(normalize_provider_tag("EN"), "en");
    assert_eq!(normalize_provider_tag(" fr "), "fr");
}

#[test]
fn test_normalizeProviderTag_withProviderSpecials_shouldUseOverrides() {
    assert_eq!(normalize_provider_tag("pob"), "pt-BR");
    assert_eq!(normalize_provider_tag("scc"), "sr");
}

#[test]
fn test_normalizeProviderTag_withUnknownTag_shouldFallBackToIdentity() {
    assert_eq!(normalize_provider_tag("x-custom"), "x-custom");
    assert_eq!(normalize_provider_tag(""), "");
}

#[test]
fn test_exposedCode_shouldWidenToThreeLetters() {
    assert_eq!(exposed_code("en"), "eng");
    assert_eq!(exposed_code("fr"), "fra");
    assert_eq!(exposed_code("pt-BR"), "pob");
}

#[test]
fn test_exposedCode_withUnmappableKey_shouldFallBackToIdentity() {
    assert_eq!(exposed_code("zh-CN"), "zh-CN");
}
