//! Offline sample corpus used when the provider path fails.
//!
//! Entries carry metadata in the canonical language; the validator localizes
//! it like any provider record. Declared word counts are computed from the
//! content when an entry is built, so fallback selection budgets with true
//! counts.

use crate::i18n::Language;
use crate::text::{count_tokens, CandidateText};
use std::collections::HashMap;

/// Read-only excerpts per language
#[derive(Debug, Clone, Default)]
pub struct SampleCorpus {
    texts: HashMap<&'static str, Vec<CandidateText>>,
}

/// Metadata for one corpus excerpt
pub struct CorpusEntry<'a> {
    pub title: &'a str,
    pub source: &'a str,
    pub text_type: &'a str,
    pub style: &'a str,
    pub content: &'a str,
    pub themes: &'a str,
    pub motifs: &'a str,
    pub interpretation: &'a str,
}

impl CorpusEntry<'_> {
    fn into_candidate(self) -> CandidateText {
        CandidateText {
            title: Some(self.title.to_string()),
            source: Some(self.source.to_string()),
            text_type: Some(self.text_type.to_string()),
            style: Some(self.style.to_string()),
            content: Some(self.content.to_string()),
            word_count: Some(count_tokens(self.content)),
            themes: Some(self.themes.to_string()),
            motifs: Some(self.motifs.to_string()),
            interpretation: Some(self.interpretation.to_string()),
        }
    }
}

impl SampleCorpus {
    /// An empty corpus (every language misconfigured)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add entries for a language
    pub fn with_entries<'a>(
        mut self,
        language: Language,
        entries: impl IntoIterator<Item = CorpusEntry<'a>>,
    ) -> Self {
        self.texts
            .entry(language.code())
            .or_default()
            .extend(entries.into_iter().map(CorpusEntry::into_candidate));
        self
    }

    /// Texts available for a language (empty if none are configured)
    pub fn texts_for(&self, language: Language) -> &[CandidateText] {
        self.texts
            .get(language.code())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of declared word counts for a language
    pub fn total_words(&self, language: Language) -> u32 {
        self.texts_for(language)
            .iter()
            .filter_map(|text| text.word_count)
            .sum()
    }

    /// The curated corpus shipped with the application
    pub fn builtin() -> Self {
        Self::new()
            .with_entries(Language::ENGLISH, english_entries())
            .with_entries(Language::CZECH, czech_entries())
    }
}

fn english_entries() -> Vec<CorpusEntry<'static>> {
    vec![
        CorpusEntry {
            title: "The Old Man and the Sea",
            source: "Ernest Hemingway",
            text_type: "Novel excerpt",
            style: "Concise, direct, with powerful imagery",
            content: "He was an old man who fished alone in a skiff in the Gulf Stream and he had gone eighty-four days now without taking a fish. In the first forty days a boy had been with him. But after forty days without a fish the boy's parents had told him that the old man was now definitely and finally salao, which is the worst form of unlucky, and the boy had gone at their orders in another boat which caught three good fish the first week.",
            themes: "Perseverance, struggle against nature, dignity in defeat, isolation",
            motifs: "The sea, fishing, luck and superstition, mentorship",
            interpretation: "This opening passage introduces the central conflict of man versus nature, and establishes the old man's determination despite his apparent failure. The absence of the boy emphasizes the fisherman's isolation, while setting up their relationship as an important element of the story.",
        },
        CorpusEntry {
            title: "Sonnet 18",
            source: "William Shakespeare",
            text_type: "Poem",
            style: "Lyrical, romantic, rhythmic",
            content: "Shall I compare thee to a summer's day?\nThou art more lovely and more temperate.\nRough winds do shake the darling buds of May,\nAnd summer's lease hath all too short a date.\nSometime too hot the eye of heaven shines,\nAnd often is his gold complexion dimmed;\nAnd every fair from fair sometime declines,\nBy chance, or nature's changing course, untrimmed;",
            themes: "Eternal beauty, love transcending time, art as preservation",
            motifs: "Seasons, nature's impermanence, celestial imagery",
            interpretation: "Shakespeare's sonnet explores how poetry immortalizes beauty that would otherwise fade with time. By comparing his beloved to summer (but noting their superiority), he highlights the imperfections and transience of nature while suggesting that his verse will preserve the beloved's beauty eternally.",
        },
        CorpusEntry {
            title: "Letter from Birmingham Jail",
            source: "Martin Luther King Jr.",
            text_type: "Letter/Essay",
            style: "Persuasive, eloquent, powerful",
            content: "We know through painful experience that freedom is never voluntarily given by the oppressor; it must be demanded by the oppressed. Frankly, I have yet to engage in a direct action campaign that was \"well timed\" in the view of those who have not suffered unduly from the disease of segregation. For years now I have heard the word \"Wait!\" It rings in the ear of every Negro with piercing familiarity.",
            themes: "Justice, civil disobedience, moral urgency, racial inequality",
            motifs: "Time and waiting, disease as metaphor for injustice, voice and silence",
            interpretation: "King's powerful argument rejects the call for patience in the face of injustice. Through his ethical appeal to shared values and emotional imagery, he makes the case that oppression must be actively confronted rather than passively accepted. His reference to waiting emphasizes the psychological toll of delayed justice.",
        },
    ]
}

fn czech_entries() -> Vec<CorpusEntry<'static>> {
    vec![
        CorpusEntry {
            title: "Proměna",
            source: "Franz Kafka",
            text_type: "Novel excerpt",
            style: "Surreal, psychological, detailed",
            content: "Když se Řehoř Samsa jednoho rána probudil z nepokojných snů, shledal, že se v posteli proměnil v jakýsi nestvůrný hmyz. Ležel na hřbetě tvrdém jak pancíř, a když trochu nadzvedl hlavu, uviděl své vyklenuté, hnědé břicho rozdělené obloukovitými výztuhami, na jehož vrcholu se sotva ještě držela přikrývka a tak tak že úplně nesklouzla dolů.",
            themes: "Alienation, transformation, identity, existential crisis",
            motifs: "Insects, dreams, physical confinement, body as prison",
            interpretation: "Kafka's famous opening line immediately establishes the surreal premise while treating it with mundane practicality. This juxtaposition creates a sense of disorientation and absurdity that mirrors Gregor's own experience of suddenly being trapped in an unfamiliar body, reflecting deeper anxieties about self-identity and social alienation.",
        },
        CorpusEntry {
            title: "Máj",
            source: "Karel Hynek Mácha",
            text_type: "Poem",
            style: "Romantic, lyrical, nature-focused",
            content: "Byl pozdní večer – první máj –\nvečerní máj – byl lásky čas.\nHrdliččin zval ku lásce hlas,\nkde borový zaváněl háj.\nO lásce šeptal tichý mech;\nkvetoucí strom lhal lásky žel,\nsvou lásku slavík růži pěl,\nrůžinu jevil vonný vzdech.",
            themes: "Romantic love, beauty of nature, cyclical time, melancholy",
            motifs: "Evening, spring, birdsong, forest imagery, personification of nature",
            interpretation: "Mácha's lyrical poem celebrates the beauty of May evening while connecting it to romantic love. Through rich sensory imagery and personification of natural elements, he creates an immersive atmosphere of longing and passion. The poem's musicality and rhythm capture the emotional intensity characteristic of Czech Romanticism.",
        },
    ]
}
