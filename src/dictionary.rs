//! Dictionary-driven localization of record metadata.
//!
//! This is a best-effort fallback for metadata fields, not a translation
//! engine: phrases and words without a rule are left as they are.
//!
//! Rewriting happens per segment (text between `,` `.` `;` `:`), in three
//! passes: multi-word phrases, single words, then function-word cleanup.
//! Within the phrase and word passes longer keys are tried first. Every
//! replacement is parked behind a private-use placeholder until the passes
//! finish, so later (shorter) rules never rewrite text an earlier rule
//! produced.

use crate::i18n::CZECH_STRINGS;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Strings with more distinct marker characters than this are treated as
/// already localized and returned untouched.
pub const ALREADY_LOCALIZED_THRESHOLD: usize = 2;

const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

static SEGMENT_SEPARATOR: OnceLock<Regex> = OnceLock::new();
static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn segment_separator() -> &'static Regex {
    SEGMENT_SEPARATOR.get_or_init(|| Regex::new(r"[,.;:]").unwrap())
}

fn placeholder() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new("\u{E000}(\\d+)\u{E001}").unwrap())
}

/// A compiled rewrite rule
#[derive(Debug, Clone)]
struct Replacement {
    pattern: Regex,
    value: String,
}

impl Replacement {
    /// Case-insensitive match of `key` that never starts or ends inside a word
    fn keyed(key: &str, value: &str) -> Result<Self, regex::Error> {
        let mut pattern = String::from("(?i)");
        if key.chars().next().is_some_and(is_word_char) {
            pattern.push_str(r"\b");
        }
        pattern.push_str(&regex::escape(key));
        if key.chars().last().is_some_and(is_word_char) {
            pattern.push_str(r"\b");
        }

        Ok(Self {
            pattern: Regex::new(&pattern)?,
            value: value.to_string(),
        })
    }

    fn from_regex(pattern: &str, value: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("(?i){}", pattern))?,
            value: value.to_string(),
        })
    }
}

/// Static phrase/word table for one target language
#[derive(Debug, Clone)]
pub struct TranslationDictionary {
    exact: HashMap<String, String>,
    phrases: Vec<Replacement>,
    words: Vec<Replacement>,
    cleanup: Vec<Replacement>,
    markers: Vec<char>,
}

impl TranslationDictionary {
    /// Build a dictionary.
    ///
    /// * `rules` - source phrase/word and its replacement; keys containing a
    ///   space are phrases, the rest are words
    /// * `cleanup` - regex pattern and replacement, applied in order after the
    ///   dictionary passes
    /// * `markers` - characters that indicate already-localized text
    pub fn new(
        rules: &[(&str, &str)],
        cleanup: &[(&str, &str)],
        markers: &[char],
    ) -> Result<Self, regex::Error> {
        let exact = rules
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        let mut sorted: Vec<&(&str, &str)> = rules.iter().collect();
        // Longest key first; ties broken alphabetically so the order is stable.
        sorted.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(b.0))
        });

        let mut phrases = Vec::new();
        let mut words = Vec::new();
        for (key, value) in sorted {
            let replacement = Replacement::keyed(key, value)?;
            if key.contains(' ') {
                phrases.push(replacement);
            } else {
                words.push(replacement);
            }
        }

        let cleanup = cleanup
            .iter()
            .map(|(pattern, value)| Replacement::from_regex(pattern, value))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            exact,
            phrases,
            words,
            cleanup,
            markers: markers.to_vec(),
        })
    }

    /// Czech dictionary for English metadata
    pub fn czech() -> Result<Self, regex::Error> {
        Self::new(
            CZECH_RULES,
            CZECH_CLEANUP,
            CZECH_STRINGS.localized_markers,
        )
    }

    /// Whether `text` already looks like target-language text
    pub fn is_already_localized(&self, text: &str) -> bool {
        self.markers.iter().filter(|c| text.contains(**c)).count() > ALREADY_LOCALIZED_THRESHOLD
    }

    /// Rewrite `text` into the target language, best effort.
    pub fn translate(&self, text: &str) -> String {
        if text.trim().is_empty() || self.is_already_localized(text) {
            return text.to_string();
        }

        if let Some(value) = self.exact.get(text.trim()) {
            return value.clone();
        }

        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        for separator in segment_separator().find_iter(text) {
            result.push_str(&self.translate_padded(&text[last..separator.start()]));
            result.push_str(separator.as_str());
            last = separator.end();
        }
        result.push_str(&self.translate_padded(&text[last..]));

        result
    }

    /// Translate a segment, keeping its surrounding whitespace
    fn translate_padded(&self, segment: &str) -> String {
        let core = segment.trim();
        if core.is_empty() {
            return segment.to_string();
        }

        let leading = &segment[..segment.len() - segment.trim_start().len()];
        let trailing = &segment[segment.trim_end().len()..];
        format!("{}{}{}", leading, self.translate_segment(core), trailing)
    }

    fn translate_segment(&self, segment: &str) -> String {
        if let Some(value) = self.exact.get(segment) {
            return value.clone();
        }

        let mut parked = Vec::new();
        let text = apply_parked(segment, &self.phrases, &mut parked);
        let text = apply_parked(&text, &self.words, &mut parked);
        let text = apply_parked(&text, &self.cleanup, &mut parked);

        let restored = placeholder().replace_all(&text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| parked.get(index))
                .cloned()
                .unwrap_or_default()
        });

        restored.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Apply `rules` in order, replacing each match with a placeholder that
/// indexes into `parked`
fn apply_parked(text: &str, rules: &[Replacement], parked: &mut Vec<String>) -> String {
    let mut current = text.to_string();

    for rule in rules {
        if !rule.pattern.is_match(&current) {
            continue;
        }
        current = rule
            .pattern
            .replace_all(&current, |caps: &Captures| {
                parked.push(match_case(&caps[0], &rule.value));
                format!("{}{}{}", PLACEHOLDER_OPEN, parked.len() - 1, PLACEHOLDER_CLOSE)
            })
            .into_owned();
    }

    current
}

/// Give `value` the capitalization of the first letter of `matched`
fn match_case(matched: &str, value: &str) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let head: String = if matched.chars().next().is_some_and(char::is_uppercase) {
        first.to_uppercase().collect()
    } else {
        first.to_lowercase().collect()
    };
    head + chars.as_str()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

const CZECH_CLEANUP: &[(&str, &str)] = &[
    (r"\b(?:the|a|an)\s+", ""),
    (r"\band\b", "a"),
    (r"\bof\b", "z"),
    (r"\bin\b", "v"),
    (r"\bwith\b", "s"),
    (r"\bby\b", "od"),
    (r"\bfor\b", "pro"),
    (r"\bon\b", "na"),
    (r"\bat\b", "u"),
    (r"\bfrom\b", "od"),
    (r"\bto\b", "k"),
];

const CZECH_RULES: &[(&str, &str)] = &[
    // Themes
    ("Loss", "Ztráta"),
    ("Melancholy", "Melancholie"),
    ("Autumn", "Podzim"),
    ("Love", "Láska"),
    ("Nature", "Příroda"),
    ("Time", "Čas"),
    ("Death", "Smrt"),
    ("Life", "Život"),
    ("Memory", "Paměť"),
    ("Identity", "Identita"),
    ("Freedom", "Svoboda"),
    ("Alienation", "Odcizení"),
    ("Loneliness", "Samota"),
    ("Hope", "Naděje"),
    ("Despair", "Zoufalství"),
    ("Language learning", "Výuka jazyka"),
    ("Vocabulary acquisition", "Rozšiřování slovní zásoby"),
    ("Comprehension", "Porozumění"),
    ("Literary themes", "Literární témata"),
    ("Personal reflection", "Osobní reflexe"),
    ("Literary expression", "Literární výraz"),
    ("Language study", "Studium jazyka"),
    // Motifs
    ("Falling leaves", "Padající listí"),
    ("Silence", "Ticho"),
    ("Darkness", "Tma"),
    ("Light", "Světlo"),
    ("Water", "Voda"),
    ("Birds", "Ptáci"),
    ("Dreams", "Sny"),
    ("Journey", "Cesta"),
    ("Mirrors", "Zrcadla"),
    ("Seasons", "Roční období"),
    ("Cultural elements", "Kulturní prvky"),
    ("Communication patterns", "Komunikační vzorce"),
    ("Everyday scenarios", "Každodenní situace"),
    ("Literary devices", "Literární prostředky"),
    ("Imagery", "Obraznost"),
    ("Text structure", "Struktura textu"),
    ("Linguistic patterns", "Jazykové vzorce"),
    // Types
    ("Novel excerpt", "Úryvek z románu"),
    ("Poem", "Báseň"),
    ("Essay", "Esej"),
    ("Short story", "Povídka"),
    ("Quote", "Citát"),
    ("Text", "Text"),
    ("Song", "Píseň"),
    ("Letter/Essay", "Dopis/Esej"),
    // Styles
    ("Surreal", "Surrealistický"),
    ("Psychological", "Psychologický"),
    ("Detailed", "Detailní"),
    ("Romantic", "Romantický"),
    ("Lyrical", "Lyrický"),
    ("Nature-focused", "Zaměřený na přírodu"),
    ("Concise", "Stručný"),
    ("Direct", "Přímý"),
    ("Evocative", "Evokativní"),
    ("Not specified", "Neurčeno"),
    ("Selected from literature", "Vybraný z literatury"),
    // General vocabulary
    ("Sun", "Slunce"),
    ("Shadow", "Stín"),
    ("Fading", "Vytrácející se"),
    ("Simple", "Jednoduchý"),
    ("Yet", "Přesto"),
    ("Bittersweet", "Hořkosladký"),
    ("Feelings", "Pocity"),
    ("Nostalgia", "Nostalgie"),
    ("Passage", "Plynutí"),
    ("Of", "Z"),
    ("The", ""),
    ("And", "A"),
    ("In", "V"),
    ("From", "Od"),
    ("To", "K"),
    ("With", "S"),
    ("For", "Pro"),
    ("By", "Od"),
    ("On", "Na"),
    ("At", "U"),
    ("This", "Tento"),
    ("That", "Ten"),
    ("These", "Tyto"),
    ("Those", "Ty"),
    ("But", "Ale"),
    ("Or", "Nebo"),
    ("As", "Jako"),
    ("If", "Pokud"),
    ("So", "Tak"),
    ("When", "Když"),
    ("Where", "Kde"),
    ("Why", "Proč"),
    ("How", "Jak"),
    ("What", "Co"),
    ("Who", "Kdo"),
    ("Expressing", "Vyjadřující"),
    ("Lyrics", "Text písně"),
    // Phrases
    ("expressing the bittersweet feelings", "vyjadřující hořkosladké pocity"),
    ("bittersweet feelings of nostalgia", "hořkosladké pocity nostalgie"),
    ("passage of time", "plynutí času"),
    ("simple yet evocative lyrics", "jednoduchý, přesto evokativní text písně"),
    ("simple yet evocative", "jednoduchý, přesto evokativní"),
    ("evocative lyrics", "evokativní text písně"),
    ("fading love", "vytrácející se láska"),
    ("sun and shadow", "slunce a stín"),
    ("reflects on", "zamýšlí se nad"),
    ("showcases", "ukazuje"),
    ("highlights", "zdůrazňuje"),
    ("explores", "zkoumá"),
    ("demonstrates", "demonstruje"),
    ("illustrates", "ilustruje"),
    ("technique", "technika"),
    ("structure", "struktura"),
    ("metaphor", "metafora"),
    ("symbolism", "symbolika"),
    ("literary significance", "literární význam"),
    ("emotional impact", "emocionální dopad"),
];
