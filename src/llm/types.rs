//! Common types for LLM interactions

use serde::{Deserialize, Serialize};

/// LLM request
///
/// Every call in this crate is single-turn, so a request carries one user
/// prompt and an optional system instruction.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    /// A single user turn with no system instruction
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: text.into(),
            max_tokens: None,
        }
    }

    /// A single user turn under a system instruction
    pub fn with_system(system: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            prompt: text.into(),
            max_tokens: None,
        }
    }
}

/// LLM response
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    pub text: String,
    pub finish_reason: Option<String>,
    pub usage: Usage,
}

impl LlmResponse {
    #[cfg(test)]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: Some("STOP".to_string()),
            usage: Usage::default(),
        }
    }
}

/// Usage statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Harm categories the Gemini safety filter evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHateSpeech,
    HarmCategoryHarassment,
    HarmCategoryDangerousContent,
    HarmCategorySexuallyExplicit,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::HarmCategoryHateSpeech,
        HarmCategory::HarmCategoryHarassment,
        HarmCategory::HarmCategoryDangerousContent,
        HarmCategory::HarmCategorySexuallyExplicit,
    ];
}

/// Blocking threshold applied to every harm category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    #[default]
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

impl HarmBlockThreshold {
    /// Parse the API spelling (`BLOCK_LOW_AND_ABOVE`, ...)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BLOCK_LOW_AND_ABOVE" => Some(Self::BlockLowAndAbove),
            "BLOCK_MEDIUM_AND_ABOVE" => Some(Self::BlockMediumAndAbove),
            "BLOCK_ONLY_HIGH" => Some(Self::BlockOnlyHigh),
            "BLOCK_NONE" => Some(Self::BlockNone),
            _ => None,
        }
    }
}

/// Process-wide safety policy sent with every completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SafetyPolicy {
    pub threshold: HarmBlockThreshold,
}

impl SafetyPolicy {
    pub fn new(threshold: HarmBlockThreshold) -> Self {
        Self { threshold }
    }

    /// One (category, threshold) pair per harm category
    pub fn settings(&self) -> impl Iterator<Item = (HarmCategory, HarmBlockThreshold)> + '_ {
        HarmCategory::ALL.into_iter().map(|c| (c, self.threshold))
    }
}
