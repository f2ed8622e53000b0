//! Recovers candidate records from free-form provider output.
//!
//! Provider responses are not guaranteed to be valid JSON. The extractor tries
//! a fixed list of strategies in order and stops at the first one that yields
//! at least one usable candidate:
//!
//! 1. a JSON array of objects embedded anywhere in the text
//! 2. independent brace-delimited objects, each parsed on its own
//! 3. the raw text itself, as a single untitled-ish record
//!
//! Strategies report "nothing here" with `None`; they never panic or error.

use crate::error::ExtractError;
use crate::text::{count_tokens, CandidateText};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Raw text shorter than this (in characters, after trimming) is not worth
/// presenting as a record.
pub const RAW_TEXT_MIN_CHARS: usize = 100;

const RAW_SOURCE: &str = "Selected Text";
const RAW_TYPE: &str = "Text";
const RAW_STYLE: &str = "Selected from literature";
const RAW_THEMES: &str = "Literary expression, language study";
const RAW_MOTIFS: &str = "Text structure, linguistic patterns";
const RAW_INTERPRETATION: &str = "This text showcases important literary techniques and linguistic structures that help develop understanding of how ideas are conveyed in written form.";

static JSON_ARRAY: OnceLock<Regex> = OnceLock::new();

type Strategy = fn(&str) -> Option<Vec<CandidateText>>;

/// Extraction strategies in the order they are attempted
const STRATEGIES: &[(&str, Strategy)] = &[
    ("json-array", from_json_array),
    ("json-fragments", from_json_fragments),
    ("raw-text", from_raw_text),
];

/// Candidates recovered from a response, and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub strategy: &'static str,
    pub candidates: Vec<CandidateText>,
}

/// Extract candidate records from a provider response.
///
/// Never returns an empty candidate list: if every strategy comes up empty
/// the attempt is reported as `ExtractError::NoCandidates`.
pub fn extract(response: &str) -> Result<Extraction, ExtractError> {
    for &(name, strategy) in STRATEGIES {
        match strategy(response) {
            Some(candidates) if !candidates.is_empty() => {
                debug!("Extracted {} candidates using {}", candidates.len(), name);
                return Ok(Extraction {
                    strategy: name,
                    candidates,
                });
            }
            _ => debug!("Extraction strategy {} found nothing", name),
        }
    }

    Err(ExtractError::NoCandidates {
        length: response.chars().count(),
    })
}

/// Strategy 1: the first `[ { ... } ]` span, parsed as a whole
fn from_json_array(response: &str) -> Option<Vec<CandidateText>> {
    let regex = JSON_ARRAY.get_or_init(|| Regex::new(r"\[\s*\{[\s\S]*\}\s*\]").unwrap());
    let span = regex.find(response)?;

    let parsed: Value = match serde_json::from_str(span.as_str()) {
        Ok(value) => value,
        Err(e) => {
            debug!("JSON array candidate failed to parse: {}", e);
            return None;
        }
    };

    let candidates = parsed
        .as_array()?
        .iter()
        .filter_map(CandidateText::from_json)
        .filter(CandidateText::has_title_or_content)
        .collect();

    Some(candidates)
}

/// Strategy 2: every `{ ... }` fragment, parsed independently
fn from_json_fragments(response: &str) -> Option<Vec<CandidateText>> {
    let objects = json_objects(response);
    if objects.is_empty() {
        return None;
    }

    let candidates = objects
        .iter()
        .filter_map(CandidateText::from_json)
        .filter(CandidateText::has_title_or_content)
        .collect();

    Some(candidates)
}

/// Strategy 3: first non-empty line as title, the rest as content
fn from_raw_text(response: &str) -> Option<Vec<CandidateText>> {
    let trimmed = response.trim();
    if trimmed.chars().count() <= RAW_TEXT_MIN_CHARS {
        return None;
    }

    let mut lines = trimmed.lines().map(str::trim).filter(|line| !line.is_empty());
    let title = lines.next()?.to_string();
    let rest: Vec<&str> = lines.collect();
    let content = if rest.is_empty() {
        trimmed.to_string()
    } else {
        rest.join("\n")
    };

    Some(vec![CandidateText {
        title: Some(title),
        source: Some(RAW_SOURCE.to_string()),
        text_type: Some(RAW_TYPE.to_string()),
        style: Some(RAW_STYLE.to_string()),
        word_count: Some(count_tokens(&content)),
        content: Some(content),
        themes: Some(RAW_THEMES.to_string()),
        motifs: Some(RAW_MOTIFS.to_string()),
        interpretation: Some(RAW_INTERPRETATION.to_string()),
    }])
}

/// JSON objects found in `text`, in order of appearance.
///
/// Parsing is attempted at every `{`. A successful parse resumes scanning
/// after the object it consumed; a failed one resumes at the next `{`, so a
/// malformed fragment or a stray brace in prose only loses itself.
fn json_objects(text: &str) -> Vec<Value> {
    let mut objects = Vec::new();
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find('{') {
        let start = cursor + found;
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();

        match stream.next() {
            Some(Ok(value)) => {
                cursor = start + stream.byte_offset();
                objects.push(value);
            }
            Some(Err(e)) => {
                debug!("Skipping malformed JSON fragment at byte {}: {}", start, e);
                cursor = start + 1;
            }
            None => break,
        }
    }

    objects
}
