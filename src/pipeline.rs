//! Retrieval orchestration.
//!
//! A retrieval moves through a small state machine:
//!
//! ```text
//! Requesting ──► Parsed ──────────────────────────► Validating ──► Done
//!      │                                                 ▲
//!      └──► ProviderFailed ──► FallbackSelecting ────────┘
//!                                     │
//!                                     └──► AllFailed ──► Done (error entry)
//! ```
//!
//! The provider is asked exactly once. Every failure is absorbed here, so a
//! caller always receives a non-empty [`Retrieval`].

use crate::attribution::AttributionRules;
use crate::corpus::SampleCorpus;
use crate::dictionary::TranslationDictionary;
use crate::extractor;
use crate::gemini::{GenerationRequest, TextProvider, DEFAULT_TEMPERATURE};
use crate::i18n::Language;
use crate::mode::Mode;
use crate::selector;
use crate::text::{CandidateText, ValidatedText};
use crate::validator::Validator;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Immutable lookup tables shared by every retrieval
#[derive(Debug, Clone, Default)]
pub struct ContentTables {
    pub corpus: SampleCorpus,
    /// Metadata dictionaries keyed by target language code
    pub dictionaries: HashMap<&'static str, TranslationDictionary>,
    pub attribution: AttributionRules,
}

impl ContentTables {
    /// The tables shipped with the application
    pub fn builtin() -> anyhow::Result<Self> {
        let czech = TranslationDictionary::czech().context("Failed to compile Czech dictionary")?;

        Ok(Self {
            corpus: SampleCorpus::builtin(),
            dictionaries: HashMap::from([(Language::CZECH.code(), czech)]),
            attribution: AttributionRules::builtin(),
        })
    }

    pub fn dictionary_for(&self, language: Language) -> Option<&TranslationDictionary> {
        self.dictionaries.get(language.code())
    }

    pub fn validator(&self, language: Language) -> Validator<'_> {
        Validator::new(language, &self.attribution, self.dictionary_for(language))
    }
}

/// Where the texts of a retrieval came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextOrigin {
    Provider,
    Fallback,
    Error,
}

/// The result of one retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Retrieval {
    pub texts: Vec<ValidatedText>,
    pub total_word_count: u32,
    pub origin: TextOrigin,
}

impl Retrieval {
    fn new(texts: Vec<ValidatedText>, origin: TextOrigin) -> Self {
        let total_word_count = texts.iter().map(|text| text.word_count).sum();
        Self {
            texts,
            total_word_count,
            origin,
        }
    }
}

enum Stage {
    Requesting,
    Parsed(Vec<CandidateText>),
    ProviderFailed(String),
    FallbackSelecting,
    Validating {
        candidates: Vec<CandidateText>,
        origin: TextOrigin,
    },
    AllFailed(String),
    Done(Retrieval),
}

/// Fetches, repairs and localizes reading texts
pub struct Pipeline<P> {
    provider: P,
    tables: Arc<ContentTables>,
    temperature: f32,
}

impl<P: TextProvider> Pipeline<P> {
    pub fn new(provider: P, tables: Arc<ContentTables>) -> Self {
        Self {
            provider,
            tables,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Retrieve texts for user-supplied language and mode strings.
    ///
    /// Unknown languages resolve to the canonical language, unknown modes to
    /// the lowest tier.
    pub async fn retrieve_raw(&self, language: &str, mode: &str) -> Retrieval {
        let language = Language::parse(language).unwrap_or_else(|e| {
            warn!("{}, falling back to {}", e, Language::canonical());
            Language::canonical()
        });
        let mode = Mode::parse_or_default(mode);

        self.retrieve(language, mode).await
    }

    /// Retrieve texts totalling roughly the mode's word count
    pub async fn retrieve(&self, language: Language, mode: Mode) -> Retrieval {
        let target = mode.target_word_count();
        info!("Retrieving {} texts ({} words) in {}", mode, target, language);

        let mut stage = Stage::Requesting;
        loop {
            stage = match stage {
                Stage::Requesting => match self.request(language, target).await {
                    Ok(candidates) => Stage::Parsed(candidates),
                    Err(reason) => Stage::ProviderFailed(reason),
                },
                Stage::Parsed(candidates) => Stage::Validating {
                    candidates,
                    origin: TextOrigin::Provider,
                },
                Stage::ProviderFailed(reason) => {
                    warn!("Provider path failed, using sample texts: {}", reason);
                    Stage::FallbackSelecting
                }
                Stage::FallbackSelecting => match self.select_fallback(language, target) {
                    Ok(candidates) => Stage::Validating {
                        candidates,
                        origin: TextOrigin::Fallback,
                    },
                    Err(reason) => Stage::AllFailed(reason),
                },
                Stage::Validating { candidates, origin } => {
                    let texts = self.tables.validator(language).validate_all(candidates);
                    Stage::Done(Retrieval::new(texts, origin))
                }
                Stage::AllFailed(reason) => {
                    error!("No texts available for {}: {}", language, reason);
                    Stage::Done(Retrieval::new(vec![error_entry(language)], TextOrigin::Error))
                }
                Stage::Done(retrieval) => {
                    info!(
                        "Retrieved {} texts ({} words) from {:?}",
                        retrieval.texts.len(),
                        retrieval.total_word_count,
                        retrieval.origin
                    );
                    return retrieval;
                }
            };
        }
    }

    /// Ask the provider once and extract candidates from its answer
    async fn request(&self, language: Language, target: u32) -> Result<Vec<CandidateText>, String> {
        let request = GenerationRequest::new(language, target).with_temperature(self.temperature);

        let response = self
            .provider
            .generate(&request)
            .await
            .map_err(|e| e.to_string())?;

        let extraction = extractor::extract(&response).map_err(|e| e.to_string())?;
        info!(
            "Extracted {} candidate texts ({})",
            extraction.candidates.len(),
            extraction.strategy
        );
        Ok(extraction.candidates)
    }

    fn select_fallback(&self, language: Language, target: u32) -> Result<Vec<CandidateText>, String> {
        info!(
            "Selecting from {} sample words in {}",
            self.tables.corpus.total_words(language),
            language
        );
        let mut rng = rand::thread_rng();
        let candidates = selector::select_fallback(&self.tables.corpus, language, target, &mut rng)
            .map_err(|e| e.to_string())?;

        if candidates.is_empty() {
            return Err(format!("no sample text for {} fits within {} words", language, target));
        }
        Ok(candidates)
    }
}

/// The single record returned when neither the provider nor the corpus
/// produced anything. Every field is in the target language; the underlying
/// failure is only logged. Its word count is a fixed per-language value.
pub fn error_entry(language: Language) -> ValidatedText {
    let strings = language.strings();
    ValidatedText {
        title: strings.error_title.to_string(),
        source: strings.error_source.to_string(),
        text_type: strings.error_type.to_string(),
        style: strings.error_style.to_string(),
        content: strings.error_content_for(strings.error_reason),
        word_count: strings.error_word_count,
        themes: strings.error_themes.to_string(),
        motifs: strings.error_motifs.to_string(),
        interpretation: strings.error_interpretation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::i18n::CZECH_STRINGS;
    use crate::text::count_tokens;
    use crate::validator::WORD_COUNT_TOLERANCE;
    use futures::future::{BoxFuture, FutureExt};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // ==================== Helper Functions ====================

    /// Provider double that either answers with a fixed body or fails
    struct StubProvider {
        response: Option<String>,
        calls: AtomicUsize,
        last_request: Mutex<Option<GenerationRequest>>,
    }

    impl StubProvider {
        fn answering(body: &str) -> Self {
            Self {
                response: Some(body.to_string()),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                response: None,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }
    }

    impl TextProvider for StubProvider {
        fn generate<'a>(
            &'a self,
            request: &'a GenerationRequest,
        ) -> BoxFuture<'a, Result<String, ProviderError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            let result = match &self.response {
                Some(body) => Ok(body.clone()),
                None => Err(ProviderError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                }),
            };
            async move { result }.boxed()
        }
    }

    fn pipeline(provider: StubProvider) -> Pipeline<StubProvider> {
        Pipeline::new(provider, Arc::new(ContentTables::builtin().unwrap()))
    }

    fn assert_reconciled(retrieval: &Retrieval) {
        for text in &retrieval.texts {
            let actual = count_tokens(&text.content);
            assert!(
                text.word_count.abs_diff(actual) <= WORD_COUNT_TOLERANCE,
                "\"{}\" declares {} words but has {}",
                text.title,
                text.word_count,
                actual
            );
        }
    }

    // ==================== Provider Path ====================

    #[tokio::test]
    async fn test_inflated_provider_count_is_corrected() {
        let body = format!(
            r#"[{{"title":"X","content":"{}","wordCount":999}}]"#,
            "word ".repeat(50)
        );
        let pipeline = pipeline(StubProvider::answering(&body));

        let retrieval = pipeline.retrieve(Language::ENGLISH, Mode::Easy).await;

        assert_eq!(retrieval.origin, TextOrigin::Provider);
        assert_eq!(retrieval.texts.len(), 1);
        let text = &retrieval.texts[0];
        assert_eq!(text.word_count, 50);
        assert_eq!(text.themes, "Literary themes, personal reflection");
        assert_eq!(text.motifs, "Literary devices, imagery");
        assert_eq!(text.text_type, "Text");
        assert_eq!(text.style, "Not specified");
        assert_eq!(retrieval.total_word_count, 50);
    }

    #[tokio::test]
    async fn test_fragments_without_array_are_validated() {
        let body = r#"Here you go:
{"title": "First", "content": "one two three"}
{"title": "Broken", "content": oops}
{"title": "Third", "content": "four five"}"#;
        let pipeline = pipeline(StubProvider::answering(body));

        let retrieval = pipeline.retrieve(Language::ENGLISH, Mode::Easy).await;

        assert_eq!(retrieval.origin, TextOrigin::Provider);
        assert_eq!(retrieval.texts.len(), 2);
        assert_eq!(retrieval.texts[0].title, "First");
        assert_eq!(retrieval.texts[1].title, "Third");
        assert_eq!(retrieval.total_word_count, 5);
    }

    #[tokio::test]
    async fn test_request_uses_mode_target_and_temperature() {
        let pipeline = pipeline(StubProvider::answering(
            r#"[{"title": "A", "content": "a b c"}]"#,
        ))
        .with_temperature(0.5);

        pipeline.retrieve(Language::CZECH, Mode::Grind).await;

        let request = pipeline.provider.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.target_word_count, 700);
        assert_eq!(request.language, Language::CZECH);
        assert!((request.temperature - 0.5).abs() < f32::EPSILON);
    }

    // ==================== Fallback Path ====================

    #[tokio::test]
    async fn test_provider_failure_uses_english_corpus() {
        let pipeline = pipeline(StubProvider::failing());

        let retrieval = pipeline.retrieve(Language::ENGLISH, Mode::Easy).await;

        assert_eq!(retrieval.origin, TextOrigin::Fallback);
        assert!(!retrieval.texts.is_empty());
        assert_reconciled(&retrieval);
        assert!((180..=220).contains(&retrieval.total_word_count));
        assert_eq!(pipeline.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unusable_response_uses_corpus() {
        let pipeline = pipeline(StubProvider::answering("Sorry, I can't help with that."));

        let retrieval = pipeline.retrieve(Language::ENGLISH, Mode::Medium).await;

        assert_eq!(retrieval.origin, TextOrigin::Fallback);
        // The English corpus is smaller than 360 words, so all of it is used.
        assert_eq!(retrieval.total_word_count, 219);
        assert_eq!(pipeline.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_czech_fallback_metadata_is_localized() {
        let pipeline = pipeline(StubProvider::failing());

        let retrieval = pipeline.retrieve(Language::CZECH, Mode::Easy).await;

        assert_eq!(retrieval.origin, TextOrigin::Fallback);
        assert_eq!(retrieval.texts.len(), 2);
        for text in &retrieval.texts {
            assert!(
                text.text_type == "Úryvek z románu" || text.text_type == "Báseň",
                "type not localized: {}",
                text.text_type
            );
        }
    }

    // ==================== Total Failure ====================

    #[tokio::test]
    async fn test_total_failure_returns_czech_error_entry() {
        let tables = ContentTables {
            corpus: SampleCorpus::new(),
            ..ContentTables::builtin().unwrap()
        };
        let pipeline = Pipeline::new(StubProvider::failing(), Arc::new(tables));

        let retrieval = pipeline.retrieve(Language::CZECH, Mode::Easy).await;

        assert_eq!(retrieval.origin, TextOrigin::Error);
        assert_eq!(retrieval.texts.len(), 1);
        let entry = &retrieval.texts[0];
        assert_eq!(entry.title, CZECH_STRINGS.error_title);
        assert_eq!(entry.source, CZECH_STRINGS.error_source);
        assert_eq!(entry.text_type, CZECH_STRINGS.error_type);
        assert_eq!(entry.style, CZECH_STRINGS.error_style);
        assert_eq!(entry.themes, CZECH_STRINGS.error_themes);
        assert_eq!(entry.motifs, CZECH_STRINGS.error_motifs);
        assert_eq!(entry.interpretation, CZECH_STRINGS.error_interpretation);
        assert_eq!(
            entry.content,
            "Nastal problém: momentálně nejsou k dispozici žádné texty. Používají se ukázkové texty."
        );
        assert!(!entry.content.contains("corpus"));
        assert_eq!(entry.word_count, 10);
        assert_eq!(retrieval.total_word_count, 10);
    }

    #[tokio::test]
    async fn test_corpus_with_nothing_that_fits_returns_error_entry() {
        let long = "w ".repeat(500);
        let tables = ContentTables {
            corpus: SampleCorpus::new().with_entries(
                Language::ENGLISH,
                [crate::corpus::CorpusEntry {
                    title: "Too long",
                    source: "Author",
                    text_type: "Text",
                    style: "Plain",
                    content: &long,
                    themes: "Themes",
                    motifs: "Motifs",
                    interpretation: "Interpretation",
                }],
            ),
            ..ContentTables::builtin().unwrap()
        };
        let pipeline = Pipeline::new(StubProvider::failing(), Arc::new(tables));

        let retrieval = pipeline.retrieve(Language::ENGLISH, Mode::Easy).await;

        assert_eq!(retrieval.origin, TextOrigin::Error);
        assert_eq!(retrieval.texts[0].word_count, 20);
        assert_eq!(
            retrieval.texts[0].content,
            "We encountered a problem: no texts are available right now. Using sample texts instead."
        );
    }

    #[test]
    fn test_error_entry_english() {
        let entry = error_entry(Language::ENGLISH);
        assert_eq!(entry.title, "Error");
        assert_eq!(entry.source, "System");
        assert_eq!(
            entry.content,
            "We encountered a problem: no texts are available right now. Using sample texts instead."
        );
        assert_eq!(entry.word_count, 20);
    }

    // ==================== Raw Inputs ====================

    #[tokio::test]
    async fn test_retrieve_raw_defaults_unknown_inputs() {
        let pipeline = pipeline(StubProvider::answering(
            r#"[{"title": "A", "content": "a b c"}]"#,
        ));

        pipeline.retrieve_raw("Klingon", "NIGHTMARE").await;

        let request = pipeline.provider.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.language, Language::ENGLISH);
        assert_eq!(request.target_word_count, 200);
    }

    #[tokio::test]
    async fn test_retrieve_raw_accepts_names_and_codes() {
        let pipeline = pipeline(StubProvider::answering(
            r#"[{"title": "A", "content": "a b c"}]"#,
        ));

        pipeline.retrieve_raw("Czech", "medium").await;
        let request = pipeline.provider.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.language, Language::CZECH);
        assert_eq!(request.target_word_count, 400);

        pipeline.retrieve_raw("cs", "grind").await;
        let request = pipeline.provider.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.language, Language::CZECH);
        assert_eq!(request.target_word_count, 700);
    }

    // ==================== Serialization ====================

    #[test]
    fn test_retrieval_serializes_camel_case() {
        let retrieval = Retrieval::new(vec![error_entry(Language::ENGLISH)], TextOrigin::Error);
        let json = serde_json::to_value(&retrieval).expect("Should serialize");

        assert_eq!(json["totalWordCount"], 20);
        assert_eq!(json["origin"], "error");
        assert_eq!(json["texts"][0]["wordCount"], 20);
        assert_eq!(json["texts"][0]["type"], "Error");
    }
}
