use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Count whitespace-separated tokens in `content`.
pub fn count_tokens(content: &str) -> u32 {
    content.split_whitespace().count() as u32
}

/// A provisional record, as extracted from a provider response or drawn from
/// the sample corpus. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateText {
    pub title: Option<String>,
    pub source: Option<String>,
    pub text_type: Option<String>,
    pub style: Option<String>,
    pub content: Option<String>,
    /// Word count as declared by whoever produced the record
    pub word_count: Option<u32>,
    pub themes: Option<String>,
    pub motifs: Option<String>,
    pub interpretation: Option<String>,
}

impl CandidateText {
    /// Build a candidate from a JSON value.
    ///
    /// Returns `None` unless the value is an object. Fields are read leniently:
    /// numbers are stringified, arrays of strings are joined with ", ", and
    /// `wordCount` may be an integer or a numeric string.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        Some(Self {
            title: string_field(object, "title"),
            source: string_field(object, "source"),
            text_type: string_field(object, "type"),
            style: string_field(object, "style"),
            content: string_field(object, "content"),
            word_count: word_count_field(object),
            themes: string_field(object, "themes"),
            motifs: string_field(object, "motifs"),
            interpretation: string_field(object, "interpretation"),
        })
    }

    /// Whether the record carries a non-blank title or content
    pub fn has_title_or_content(&self) -> bool {
        !is_blank(self.title.as_deref()) || !is_blank(self.content.as_deref())
    }
}

/// A candidate after attribution correction, word-count reconciliation,
/// optional localization and defaulting. All fields are populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedText {
    pub title: String,
    pub source: String,
    #[serde(rename = "type")]
    pub text_type: String,
    pub style: String,
    pub content: String,
    pub word_count: u32,
    pub themes: String,
    pub motifs: String,
    pub interpretation: String,
}

/// `true` for `None`, empty and whitespace-only strings
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

fn word_count_field(object: &Map<String, Value>) -> Option<u32> {
    match object.get("wordCount")? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .map(|count| count.min(u32::MAX as u64) as u32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_count_tokens_splits_on_whitespace_runs() {
        assert_eq!(count_tokens("one two  three\n\tfour"), 4);
        assert_eq!(count_tokens("  leading and trailing  "), 3);
        assert_eq!(count_tokens(""), 0);
        assert_eq!(count_tokens("   \n "), 0);
    }

    #[test]
    fn test_from_json_reads_all_fields() {
        let value = json!({
            "title": "Sonnet 18",
            "source": "William Shakespeare",
            "type": "Poem",
            "style": "Lyrical",
            "content": "Shall I compare thee to a summer's day?",
            "wordCount": 8,
            "themes": "Beauty",
            "motifs": "Seasons",
            "interpretation": "Verse outlasts beauty."
        });

        let candidate = CandidateText::from_json(&value).expect("object should parse");
        assert_eq!(candidate.title.as_deref(), Some("Sonnet 18"));
        assert_eq!(candidate.text_type.as_deref(), Some("Poem"));
        assert_eq!(candidate.word_count, Some(8));
        assert_eq!(candidate.interpretation.as_deref(), Some("Verse outlasts beauty."));
    }

    #[test]
    fn test_from_json_is_lenient_with_types() {
        let value = json!({
            "title": 1984,
            "content": "It was a bright cold day in April",
            "wordCount": "8",
            "themes": ["Surveillance", "Truth"],
            "motifs": null
        });

        let candidate = CandidateText::from_json(&value).expect("object should parse");
        assert_eq!(candidate.title.as_deref(), Some("1984"));
        assert_eq!(candidate.word_count, Some(8));
        assert_eq!(candidate.themes.as_deref(), Some("Surveillance, Truth"));
        assert_eq!(candidate.motifs, None);
        assert_eq!(candidate.source, None);
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(CandidateText::from_json(&json!([1, 2])).is_none());
        assert!(CandidateText::from_json(&json!("text")).is_none());
    }

    #[test]
    fn test_negative_or_garbage_word_count_is_ignored() {
        let negative = CandidateText::from_json(&json!({"wordCount": -5})).unwrap();
        assert_eq!(negative.word_count, None);

        let garbage = CandidateText::from_json(&json!({"wordCount": "many"})).unwrap();
        assert_eq!(garbage.word_count, None);
    }

    #[test]
    fn test_has_title_or_content() {
        let empty = CandidateText::default();
        assert!(!empty.has_title_or_content());

        let blank = CandidateText {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!blank.has_title_or_content());

        let titled = CandidateText {
            title: Some("Máj".to_string()),
            ..Default::default()
        };
        assert!(titled.has_title_or_content());
    }

    #[test]
    fn test_validated_text_serializes_with_camel_case_and_type() {
        let text = ValidatedText {
            title: "T".to_string(),
            source: "S".to_string(),
            text_type: "Poem".to_string(),
            style: "Lyrical".to_string(),
            content: "a b c".to_string(),
            word_count: 3,
            themes: "x".to_string(),
            motifs: "y".to_string(),
            interpretation: "z".to_string(),
        };

        let json = serde_json::to_value(&text).expect("Should serialize");
        assert_eq!(json["wordCount"], 3);
        assert_eq!(json["type"], "Poem");
        assert!(json.get("text_type").is_none());
    }
}
