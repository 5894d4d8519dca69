use serde::{Deserialize, Serialize};
use std::env;

use crate::models::tour_plan::{TourPlan, TravelRequest};
use crate::services::{plan_normalizer, prompt};

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const MODEL: &str = "mistralai/mixtral-8x7b";
const SYSTEM_PROMPT: &str = "You are a helpful travel planning assistant.";

#[derive(Debug)]
pub enum PlanError {
    MissingApiKey,
    RequestError(String),
    ApiError(String),
    EmptyResponse,
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::MissingApiKey => write!(f, "OPENROUTER_API_KEY is not configured"),
            PlanError::RequestError(err) => write!(f, "Request error: {}", err),
            PlanError::ApiError(err) => write!(f, "API error: {}", err),
            PlanError::EmptyResponse => write!(f, "Provider returned no content"),
        }
    }
}

impl std::error::Error for PlanError {}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Thin OpenRouter client wrapping the prompt builder and the normalizer.
/// The only errors surfaced here are transport-level; malformed reply text
/// is absorbed by the normalizer and still yields a plan.
pub struct AiPlanService {
    api_key: String,
    client: reqwest::Client,
}

impl AiPlanService {
    pub fn new() -> Result<Self, PlanError> {
        let api_key = env::var("OPENROUTER_API_KEY").map_err(|_| PlanError::MissingApiKey)?;
        Ok(Self {
            api_key,
            client: reqwest::Client::new(),
        })
    }

    pub async fn generate_tour_plan(&self, info: &TravelRequest) -> Result<TourPlan, PlanError> {
        let body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt::build_prompt(info),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(OPENROUTER_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| PlanError::RequestError(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PlanError::ApiError(format!(
                "OpenRouter API error ({}): {}",
                status, text
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| PlanError::RequestError(err.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(PlanError::EmptyResponse)?;

        Ok(plan_normalizer::normalize(&content, info))
    }
}
