//! LLM-backed hydration advice
//!
//! Two text-in/text-out requests go to Gemini: advice from a free-text mood
//! description, and an insight over the most recent intake log. Both are
//! best effort. `Advisor` is the only thing the rest of the crate talks to,
//! and it never returns an error: failures become `Advisory::Unavailable`.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{BaseTarget, IntakeEvent, UserProfile};

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// The insight prompt only ever sees this many log entries
pub const INSIGHT_LOG_LIMIT: usize = 10;

/// Stand-in profile when the user has not filled theirs in yet
pub const FALLBACK_AGE: u32 = 25;
pub const FALLBACK_WEIGHT_KG: f64 = 60.0;

const MSG_NOT_CONFIGURED: &str =
  "AI advice is unavailable. Check that the Gemini API key is configured.";
const MSG_TEMPORARILY_UNAVAILABLE: &str =
  "AI advice is temporarily unavailable. Please try again later.";
const MSG_BLOCKED: &str =
  "The AI declined to answer because the content may be inappropriate.";
const MSG_NEED_MOOD: &str = "Tell us how you are feeling to get advice.";
const MSG_NEED_LOG: &str =
  "There are no intake records to analyze yet. Try logging your drinks for a few days.";

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug, Serialize)]
pub enum AdvisoryError {
  #[error("API key not configured")]
  MissingApiKey,

  #[error("Request failed: {0}")]
  Request(String),

  #[error("API error: {0}")]
  Api(String),

  #[error("Parse error: {0}")]
  Parse(String),

  #[error("Response blocked: {0}")]
  Blocked(String),
}

impl From<reqwest::Error> for AdvisoryError {
  fn from(e: reqwest::Error) -> Self {
    AdvisoryError::Request(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Gemini API Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest {
  contents: Vec<Content>,
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

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
  prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
  content: Option<Content>,
  finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
  block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
  error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
  message: String,
}

/// ---------------------------------------------------------------------------
/// Advisory Results
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Advisory {
  /// Generated advice
  Text(String),

  /// The request needs more from the user before it is worth sending
  NeedsInput(String),

  /// Misconfiguration or provider failure
  Unavailable(String),
}

impl Advisory {
  pub fn text(&self) -> &str {
    match self {
      Advisory::Text(t) | Advisory::NeedsInput(t) | Advisory::Unavailable(t) => t,
    }
  }
}

/// Age and weight used to personalize prompts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryProfile {
  pub age: u32,
  pub weight_kg: f64,

  /// True when the defaults stood in for a missing profile
  pub is_fallback: bool,
}

impl AdvisoryProfile {
  pub fn from_profile(profile: &UserProfile) -> Self {
    match (profile.age, profile.weight_kg) {
      (Some(age), Some(weight_kg)) => Self {
        age,
        weight_kg,
        is_fallback: false,
      },
      _ => Self {
        age: FALLBACK_AGE,
        weight_kg: FALLBACK_WEIGHT_KG,
        is_fallback: true,
      },
    }
  }
}

/// ---------------------------------------------------------------------------
/// Gemini Client
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GeminiClient {
  client: Client,
  api_key: String,
  base_url: String,
  model: String,
}

impl GeminiClient {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      api_key: api_key.into(),
      base_url: GEMINI_API_BASE.to_string(),
      model: GEMINI_MODEL.to_string(),
    }
  }

  pub fn from_config(config: &Config) -> Result<Self, AdvisoryError> {
    let api_key = config
      .gemini_api_key
      .clone()
      .ok_or(AdvisoryError::MissingApiKey)?;
    Ok(Self::new(api_key))
  }

  pub fn with_base_url(mut self, base_url: &str) -> Self {
    self.base_url = base_url.trim_end_matches('/').to_string();
    self
  }

  /// Send a single-turn prompt and return the first candidate's text
  pub async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError> {
    let request = GenerateRequest {
      contents: vec![Content {
        role: Some("user".to_string()),
        parts: vec![Part {
          text: Some(prompt.to_string()),
        }],
      }],
    };

    let url = format!(
      "{}/v1beta/models/{}:generateContent",
      self.base_url, self.model
    );

    let response = self
      .client
      .post(&url)
      .header("x-goog-api-key", &self.api_key)
      .header("content-type", "application/json")
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
        return Err(AdvisoryError::Api(error_resp.error.message));
      }
      return Err(AdvisoryError::Api(format!("HTTP {}: {}", status, body)));
    }

    let parsed: GenerateResponse =
      serde_json::from_str(&body).map_err(|e| AdvisoryError::Parse(e.to_string()))?;

    extract_text(parsed)
  }
}

/// Pull the text out of a response; an empty answer means the provider
/// filtered it
fn extract_text(response: GenerateResponse) -> Result<String, AdvisoryError> {
  if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
    return Err(AdvisoryError::Blocked(reason));
  }

  let mut finish_reason = None;
  for candidate in response.candidates {
    let text: String = candidate
      .content
      .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
      .unwrap_or_default();
    if !text.trim().is_empty() {
      return Ok(text.trim().to_string());
    }
    finish_reason = finish_reason.or(candidate.finish_reason);
  }

  Err(AdvisoryError::Blocked(
    finish_reason.unwrap_or_else(|| "empty response".to_string()),
  ))
}

/// ---------------------------------------------------------------------------
/// Prompts
/// ---------------------------------------------------------------------------

fn mood_prompt(mood_text: &str, profile: &AdvisoryProfile) -> String {
  format!(
    r#"You are the hydration coach in a heatstroke-prevention app.
Read the user's description of how they feel and give specific, kind advice about fluid intake so their condition does not get worse. Keep it to about two short sentences.
Stay within general wellness advice; do not give medical treatment.
Take into account that the user is {age} years old and weighs {weight} kg.
---
How the user feels: "{mood}"
---
Advice:"#,
    age = profile.age,
    weight = profile.weight_kg,
    mood = mood_text.trim()
  )
}

fn insight_prompt(events: &[IntakeEvent], profile: &AdvisoryProfile, base_target: BaseTarget) -> String {
  let log_text = events
    .iter()
    .map(|e| {
      format!(
        "- {}: {} {} ml",
        e.timestamp.format("%Y-%m-%d %H:%M"),
        e.drink_kind,
        e.amount_ml
      )
    })
    .collect::<Vec<_>>()
    .join("\n");

  let target_text = match base_target {
    BaseTarget::Ml(ml) => format!("{} ml", ml),
    BaseTarget::NotConfigured => "not set".to_string(),
  };

  format!(
    r#"You are the hydration coach in a heatstroke-prevention app.
Based on the user's recent intake log, profile and daily base target, give a short insight into their drinking habits and one concrete suggestion for improvement, in about three sentences.
Stay within general wellness advice; do not give medical treatment.
---
Profile:
Age: {age}
Weight: {weight} kg
Daily base target: {target}

Recent intake (time, drink, amount):
{log}
---
Insight and suggestion:"#,
    age = profile.age,
    weight = profile.weight_kg,
    target = target_text,
    log = log_text
  )
}

/// ---------------------------------------------------------------------------
/// Advisor (memoized, infallible façade)
/// ---------------------------------------------------------------------------

pub struct Advisor {
  client: Option<GeminiClient>,
  /// Unbounded; lives only as long as the single-user session
  cache: Mutex<HashMap<String, String>>,
}

impl Advisor {
  pub fn new(client: Option<GeminiClient>) -> Self {
    Self {
      client,
      cache: Mutex::new(HashMap::new()),
    }
  }

  pub fn from_config(config: &Config) -> Self {
    match GeminiClient::from_config(config) {
      Ok(client) => Self::new(Some(client)),
      Err(e) => {
        info!(error = %e, "Advisory service disabled");
        Self::new(None)
      }
    }
  }

  pub fn is_available(&self) -> bool {
    self.client.is_some()
  }

  /// Advice from a free-text description of how the user feels
  pub async fn mood_advice(&self, mood_text: &str, profile: &AdvisoryProfile) -> Advisory {
    if !self.is_available() {
      return Advisory::Unavailable(MSG_NOT_CONFIGURED.to_string());
    }
    if mood_text.trim().is_empty() {
      return Advisory::NeedsInput(MSG_NEED_MOOD.to_string());
    }
    self.ask(mood_prompt(mood_text, profile)).await
  }

  /// Insight over the intake log; only the last `INSIGHT_LOG_LIMIT` events are sent
  pub async fn intake_insight(
    &self,
    events: &[IntakeEvent],
    profile: &AdvisoryProfile,
    base_target: BaseTarget,
  ) -> Advisory {
    if !self.is_available() {
      return Advisory::Unavailable(MSG_NOT_CONFIGURED.to_string());
    }
    if events.is_empty() {
      return Advisory::NeedsInput(MSG_NEED_LOG.to_string());
    }
    let start = events.len().saturating_sub(INSIGHT_LOG_LIMIT);
    self
      .ask(insight_prompt(&events[start..], profile, base_target))
      .await
  }

  async fn ask(&self, prompt: String) -> Advisory {
    let Some(client) = &self.client else {
      return Advisory::Unavailable(MSG_NOT_CONFIGURED.to_string());
    };

    if let Some(hit) = self.cached(&prompt) {
      debug!("Advisory cache hit");
      return Advisory::Text(hit);
    }

    match client.generate(&prompt).await {
      Ok(text) => {
        self.store(prompt, text.clone());
        Advisory::Text(text)
      }
      Err(AdvisoryError::Blocked(reason)) => {
        warn!(reason = %reason, "Advisory response blocked");
        Advisory::Unavailable(MSG_BLOCKED.to_string())
      }
      Err(e) => {
        warn!(error = %e, "Advisory request failed");
        Advisory::Unavailable(MSG_TEMPORARILY_UNAVAILABLE.to_string())
      }
    }
  }

  fn cached(&self, prompt: &str) -> Option<String> {
    self.cache.lock().ok()?.get(prompt).cloned()
  }

  fn store(&self, prompt: String, text: String) {
    if let Ok(mut cache) = self.cache.lock() {
      cache.insert(prompt, text);
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
