use crate::config::Config;
use crate::error::ProviderError;
use crate::i18n::Language;
use anyhow::Context;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TOP_K: u32 = 80;
pub const DEFAULT_TOP_P: f32 = 0.98;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

const SAFETY_THRESHOLD: &str = "BLOCK_ONLY_HIGH";
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Something that turns a generation request into raw response text
pub trait TextProvider: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<String, ProviderError>>;
}

/// Everything needed to ask the provider for one batch of texts
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub language: Language,
    pub target_word_count: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(language: Language, target_word_count: u32) -> Self {
        Self {
            language,
            target_word_count,
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn prompt(&self) -> String {
        build_prompt(self.language, self.target_word_count)
    }
}

// ==================== Wire Types ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                top_k: request.top_k,
                top_p: request.top_p,
                max_output_tokens: request.max_output_tokens,
            },
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> Result<String, ProviderError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(ProviderError::EmptyResponse {
                reason: block_reason,
            });
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse {
                reason: candidate.finish_reason.or(block_reason),
            });
        }

        Ok(text)
    }
}

// ==================== Prompt ====================

/// Build the instruction sent to the provider
fn build_prompt(language: Language, word_count: u32) -> String {
    let localization = language.strings().prompt_instructions;
    let localization = if localization.is_empty() {
        String::new()
    } else {
        format!("\n{}\n", localization)
    };

    format!(
        r#"Select high-quality real-world texts in {language} with a TOTAL of EXACTLY {word_count} words (very important!) to help improve expressiveness, vocabulary, and emotional depth for songwriting and lyric writing.

Focus on:
- Rich vocabulary that is diverse, poetic, or emotionally powerful
- Writing that conveys emotions vividly (sadness, longing, joy, doubt)
- Stylistic variety: lyrical, poetic, journalistic, introspective, metaphorical
- Musical or rhythmic phrasing that can inspire lyrics
- Imagery and metaphors
- Only authentic content from real sources

Ensure diversity:
- Include at least one meaningful quote from a writer, philosopher, or public figure
- Include lesser-known works alongside famous ones
- Draw on different authors, periods, and cultural backgrounds

Guidelines:
- Each text must be a complete, cohesive piece from a single source
- Use at most one quote per text entry
- Avoid AI-generated texts, dry news articles, and technical writing
{localization}
The total word count across all texts MUST be exactly {word_count} words.

Respond with a JSON array in this format:
[
  {{
    "title": "Title of text",
    "source": "Author name",
    "type": "Essay/Poem/Song/etc",
    "style": "Brief style description (e.g. lyrical, introspective)",
    "content": "The full text content",
    "wordCount": 150,
    "themes": "Key themes in the text",
    "motifs": "Recurring symbols, images, or concepts in the text",
    "interpretation": "A brief analysis of the text's meaning and emotional impact"
  }}
]"#,
        language = language.name(),
        word_count = word_count,
        localization = localization,
    )
}

// ==================== Client ====================

/// Google Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_url: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            api_url: config.gemini_api_url.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send one generation request and return the raw response text
    pub async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        info!(
            "Requesting {} words of {} text from {}",
            request.target_word_count, request.language, self.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&GenerateContentRequest::from(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let text = parsed.into_text()?;
        debug!("Provider returned {} characters", text.chars().count());
        Ok(text)
    }
}

impl TextProvider for GeminiClient {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<String, ProviderError>> {
        self.generate_content(request).boxed()
    }
}
