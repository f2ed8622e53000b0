//! Turns candidate records into fully populated, trustworthy ones.
//!
//! Validation never rejects a record. It corrects what it can (attribution,
//! word count), localizes metadata for non-canonical languages and fills
//! whatever is still blank with defaults in the target language.

use crate::attribution::AttributionRules;
use crate::dictionary::TranslationDictionary;
use crate::i18n::Language;
use crate::text::{count_tokens, is_blank, CandidateText, ValidatedText};
use tracing::info;

/// Largest accepted difference between a declared and a measured word count
pub const WORD_COUNT_TOLERANCE: u32 = 3;

/// Validates candidates for one target language
pub struct Validator<'a> {
    language: Language,
    attribution: &'a AttributionRules,
    dictionary: Option<&'a TranslationDictionary>,
}

impl<'a> Validator<'a> {
    /// `dictionary` is ignored when `language` is canonical.
    pub fn new(
        language: Language,
        attribution: &'a AttributionRules,
        dictionary: Option<&'a TranslationDictionary>,
    ) -> Self {
        Self {
            language,
            attribution,
            dictionary: dictionary.filter(|_| !language.is_canonical()),
        }
    }

    pub fn validate_all(&self, candidates: Vec<CandidateText>) -> Vec<ValidatedText> {
        candidates
            .into_iter()
            .map(|candidate| self.validate(candidate))
            .collect()
    }

    /// Validate a single candidate
    pub fn validate(&self, candidate: CandidateText) -> ValidatedText {
        let CandidateText {
            title,
            source,
            text_type,
            style,
            content,
            word_count,
            themes,
            motifs,
            interpretation,
        } = candidate;

        let mut title = title.unwrap_or_default();
        let mut source = source.unwrap_or_default();
        let content = content.unwrap_or_default();
        let mut text_type = text_type;
        let mut style = style;
        let mut themes = themes;
        let mut motifs = motifs;
        let mut interpretation = interpretation;

        self.attribution.correct(&title, &mut source);
        let mut word_count = reconcile_word_count(&title, &content, word_count);

        if let Some(dictionary) = self.dictionary {
            let localize = |field: Option<String>| field.map(|value| dictionary.translate(&value));

            title = dictionary.translate(&title);
            themes = localize(themes);
            motifs = localize(motifs);
            interpretation = localize(interpretation);
            text_type = localize(text_type);
            style = localize(style);

            // Localized titles can trigger rules the original did not
            self.attribution.correct(&title, &mut source);
            word_count = reconcile_word_count(&title, &content, Some(word_count));
        }

        let strings = self.language.strings();
        ValidatedText {
            title: or_default(Some(title), strings.untitled),
            source: or_default(Some(source), strings.unknown_source),
            text_type: or_default(text_type, strings.default_type),
            style: or_default(style, strings.default_style),
            content,
            word_count,
            themes: or_default(themes, strings.default_themes),
            motifs: or_default(motifs, strings.default_motifs),
            interpretation: or_default(interpretation, strings.default_interpretation),
        }
    }
}

/// The declared count if it is within tolerance of the measured one,
/// otherwise the measured count. A missing declaration counts as zero.
pub fn reconcile_word_count(title: &str, content: &str, declared: Option<u32>) -> u32 {
    let declared = declared.unwrap_or(0);
    let actual = count_tokens(content);

    if declared.abs_diff(actual) > WORD_COUNT_TOLERANCE {
        info!(
            "Correcting word count for \"{}\" from {} to {}",
            title, declared, actual
        );
        actual
    } else {
        declared
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(value) if !is_blank(Some(&value)) => value,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::AttributionRule;
    use crate::i18n::{CZECH_STRINGS, ENGLISH_STRINGS};
    use proptest::prelude::*;

    fn english(rules: &AttributionRules) -> Validator<'_> {
        Validator::new(Language::ENGLISH, rules, None)
    }

    // ==================== Word Count ====================

    #[test]
    fn test_inflated_word_count_is_corrected() {
        let rules = AttributionRules::builtin();
        let candidate = CandidateText {
            title: Some("X".to_string()),
            content: Some("word ".repeat(50)),
            word_count: Some(999),
            ..Default::default()
        };

        let validated = english(&rules).validate(candidate);
        assert_eq!(validated.word_count, 50);
        assert_eq!(validated.themes, ENGLISH_STRINGS.default_themes);
        assert_eq!(validated.motifs, ENGLISH_STRINGS.default_motifs);
        assert_eq!(validated.text_type, ENGLISH_STRINGS.default_type);
        assert_eq!(validated.style, ENGLISH_STRINGS.default_style);
        assert_eq!(validated.source, ENGLISH_STRINGS.unknown_source);
        assert_eq!(validated.interpretation, ENGLISH_STRINGS.default_interpretation);
    }

    #[test]
    fn test_declared_count_within_tolerance_is_kept() {
        assert_eq!(reconcile_word_count("t", &"w ".repeat(50), Some(53)), 53);
        assert_eq!(reconcile_word_count("t", &"w ".repeat(50), Some(47)), 47);
        assert_eq!(reconcile_word_count("t", &"w ".repeat(50), Some(54)), 50);
        assert_eq!(reconcile_word_count("t", &"w ".repeat(50), Some(46)), 50);
    }

    #[test]
    fn test_missing_declared_count_counts_as_zero() {
        assert_eq!(reconcile_word_count("t", "one two", None), 2);
        assert_eq!(reconcile_word_count("t", "one two three four five", None), 5);
        assert_eq!(reconcile_word_count("t", "", None), 0);
    }

    #[test]
    fn test_blank_content_stays_empty() {
        let rules = AttributionRules::builtin();
        let candidate = CandidateText {
            title: Some("Only a title".to_string()),
            ..Default::default()
        };

        let validated = english(&rules).validate(candidate);
        assert_eq!(validated.content, "");
        assert_eq!(validated.word_count, 0);
        assert_eq!(validated.title, "Only a title");
    }

    // ==================== Defaults ====================

    #[test]
    fn test_whitespace_fields_get_defaults() {
        let rules = AttributionRules::builtin();
        let candidate = CandidateText {
            title: Some("   ".to_string()),
            source: Some("\t".to_string()),
            content: Some("Some content here".to_string()),
            themes: Some(" ".to_string()),
            motifs: Some(String::new()),
            ..Default::default()
        };

        let validated = english(&rules).validate(candidate);
        assert_eq!(validated.title, ENGLISH_STRINGS.untitled);
        assert_eq!(validated.source, ENGLISH_STRINGS.unknown_source);
        assert_eq!(validated.themes, ENGLISH_STRINGS.default_themes);
        assert_eq!(validated.motifs, ENGLISH_STRINGS.default_motifs);
    }

    #[test]
    fn test_czech_defaults_are_czech() {
        let rules = AttributionRules::builtin();
        let validator = Validator::new(Language::CZECH, &rules, None);

        let validated = validator.validate(CandidateText {
            content: Some("Byl pozdní večer".to_string()),
            ..Default::default()
        });
        assert_eq!(validated.title, CZECH_STRINGS.untitled);
        assert_eq!(validated.themes, CZECH_STRINGS.default_themes);
        assert_eq!(validated.style, CZECH_STRINGS.default_style);
        assert_eq!(validated.word_count, 3);
    }

    // ==================== Attribution ====================

    #[test]
    fn test_attribution_is_corrected() {
        let rules = AttributionRules::builtin();
        let validated = english(&rules).validate(CandidateText {
            title: Some("Proměna".to_string()),
            source: Some("Milan Kundera".to_string()),
            content: Some("Když se Řehoř Samsa".to_string()),
            word_count: Some(4),
            ..Default::default()
        });

        assert_eq!(validated.source, "Franz Kafka");
        assert_eq!(validated.word_count, 4);
    }

    // ==================== Localization ====================

    #[test]
    fn test_czech_metadata_is_localized() {
        let rules = AttributionRules::builtin();
        let dictionary = TranslationDictionary::czech().expect("dictionary should compile");
        let validator = Validator::new(Language::CZECH, &rules, Some(&dictionary));

        let validated = validator.validate(CandidateText {
            title: Some("Proměna".to_string()),
            source: Some("Franz Kafka".to_string()),
            text_type: Some("Novel excerpt".to_string()),
            style: Some("Surreal".to_string()),
            content: Some("Když se Řehoř Samsa jednoho rána probudil".to_string()),
            word_count: Some(7),
            themes: Some("Alienation".to_string()),
            ..Default::default()
        });

        assert_eq!(validated.text_type, "Úryvek z románu");
        assert_eq!(validated.style, "Surrealistický");
        assert_eq!(validated.themes, "Odcizení");
        assert_eq!(validated.title, "Proměna");
        assert_eq!(validated.motifs, CZECH_STRINGS.default_motifs);
    }

    #[test]
    fn test_localized_title_can_trigger_attribution() {
        let rules = AttributionRules::new(vec![AttributionRule::new(&["Babička"], "Božena Němcová")]);
        let dictionary =
            TranslationDictionary::new(&[("Grandmother", "Babička")], &[], &['č', 'ř', 'ž'])
                .expect("dictionary should compile");
        let validator = Validator::new(Language::CZECH, &rules, Some(&dictionary));

        let validated = validator.validate(CandidateText {
            title: Some("The Grandmother".to_string()),
            source: Some("Unknown".to_string()),
            content: Some("Babička měla".to_string()),
            ..Default::default()
        });

        assert_eq!(validated.title, "The Babička");
        assert_eq!(validated.source, "Božena Němcová");
    }

    #[test]
    fn test_dictionary_ignored_for_canonical_language() {
        let rules = AttributionRules::builtin();
        let dictionary = TranslationDictionary::czech().expect("dictionary should compile");
        let validator = Validator::new(Language::ENGLISH, &rules, Some(&dictionary));

        let validated = validator.validate(CandidateText {
            title: Some("Poem".to_string()),
            text_type: Some("Poem".to_string()),
            content: Some("a b c".to_string()),
            ..Default::default()
        });
        assert_eq!(validated.text_type, "Poem");
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_validated_count_is_within_tolerance(
            words in proptest::collection::vec("[a-z]{1,8}", 0..80),
            declared in proptest::option::of(0u32..200),
        ) {
            let rules = AttributionRules::builtin();
            let content = words.join(" ");
            let validated = english(&rules).validate(CandidateText {
                title: Some("Random".to_string()),
                content: Some(content.clone()),
                word_count: declared,
                ..Default::default()
            });

            let actual = count_tokens(&content);
            prop_assert!(validated.word_count.abs_diff(actual) <= WORD_COUNT_TOLERANCE);
            if declared.unwrap_or(0).abs_diff(actual) > WORD_COUNT_TOLERANCE {
                prop_assert_eq!(validated.word_count, actual);
            }
        }

        #[test]
        fn prop_validated_fields_are_never_blank_except_content(
            title in proptest::option::of("[ a-z]{0,10}"),
            themes in proptest::option::of("[ a-z]{0,10}"),
        ) {
            let rules = AttributionRules::builtin();
            let validated = english(&rules).validate(CandidateText {
                title,
                themes,
                ..Default::default()
            });

            for field in [
                &validated.title,
                &validated.source,
                &validated.text_type,
                &validated.style,
                &validated.themes,
                &validated.motifs,
                &validated.interpretation,
            ] {
                prop_assert!(!field.trim().is_empty());
            }
        }
    }
}
