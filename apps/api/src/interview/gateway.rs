//! Completion Gateway — the three prompt-driven operations an interview needs.
//!
//! `InterviewService` holds an `Arc<dyn CompletionGateway>`; production wires in
//! `LlmGateway`, tests use scripted stubs.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::interview::prompts::{feedback_prompt, question_prompt, scoring_prompt};
use crate::interview::scoring::normalize_questions;
use crate::llm_client::prompts::INTERVIEWER_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};

/// The completion backend failed or produced nothing usable.
/// Recoverable: the caller keeps its session and may retry the same stage.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("the completion backend returned no usable questions")]
    NoQuestions,
}

#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Returns up to five normalized questions. Fewer than five is tolerated.
    async fn generate_questions(
        &self,
        experience: &str,
        tech_stack: &str,
    ) -> Result<Vec<String>, GenerationError>;

    /// Returns critique text, passed through verbatim.
    async fn generate_feedback(&self, question: &str, answer: &str)
        -> Result<String, GenerationError>;

    /// Returns raw scoring text; see `scoring::extract_score`.
    async fn score_answer(&self, question: &str, answer: &str) -> Result<String, GenerationError>;
}

/// Gateway backed by the completion API.
pub struct LlmGateway(pub LlmClient);

impl LlmGateway {
    async fn complete(&self, operation: &'static str, prompt: &str) -> Result<String, GenerationError> {
        self.0
            .complete(prompt, INTERVIEWER_SYSTEM)
            .await
            .map_err(|source| GenerationError::Backend { operation, source })
    }
}

#[async_trait]
impl CompletionGateway for LlmGateway {
    async fn generate_questions(
        &self,
        experience: &str,
        tech_stack: &str,
    ) -> Result<Vec<String>, GenerationError> {
        let raw = self
            .complete("question generation", &question_prompt(experience, tech_stack))
            .await?;
        let questions = normalize_questions(&raw);
        info!("Generated {} interview questions", questions.len());
        Ok(questions)
    }

    async fn generate_feedback(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<String, GenerationError> {
        self.complete("feedback generation", &feedback_prompt(question, answer))
            .await
    }

    async fn score_answer(&self, question: &str, answer: &str) -> Result<String, GenerationError> {
        let raw = self
            .complete("answer scoring", &scoring_prompt(question, answer))
            .await?;
        debug!("Raw scoring output: {raw:?}");
        Ok(raw)
    }
}
