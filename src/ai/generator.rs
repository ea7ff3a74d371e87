use crate::ai::client::LanguageModel;
use crate::ai::parser::parse_question;
use crate::ai::prompts::prompt_for;
use crate::config::DEFAULT_MAX_RETRY;
use crate::error::QuizError;
use crate::logger;
use crate::models::{Difficulty, Question, QuestionKind};

/// Produces one validated question per call, retrying the model call and the
/// parse up to `max_retry` times. Validation failures are not retried.
#[derive(Debug)]
pub struct QuestionGenerator<M> {
    model: M,
    max_retry: u32,
}

impl<M: LanguageModel> QuestionGenerator<M> {
    pub fn new(model: M) -> Self {
        Self::with_max_retry(model, DEFAULT_MAX_RETRY)
    }

    pub fn with_max_retry(model: M, max_retry: u32) -> Self {
        Self {
            model,
            max_retry: max_retry.max(1),
        }
    }

    pub fn max_retry(&self) -> u32 {
        self.max_retry
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
        kind: QuestionKind,
    ) -> Result<Question, QuizError> {
        logger::info(&format!(
            "Generating {} question for topic: {} and difficulty: {}",
            kind, topic, difficulty
        ));

        let question = self.retry_and_parse(topic, difficulty, kind).await?;

        if let Err(e) = question.validate() {
            logger::error(&format!(
                "Rejected {} question for topic: {} and difficulty: {}: {}",
                kind, topic, difficulty, e
            ));
            return Err(e.into());
        }

        logger::info(&format!("Generated a valid {} question", kind));
        Ok(question)
    }

    pub async fn generate_mcq(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Question, QuizError> {
        self.generate(topic, difficulty, QuestionKind::MultipleChoice).await
    }

    pub async fn generate_fill_blank(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Question, QuizError> {
        self.generate(topic, difficulty, QuestionKind::FillInBlank).await
    }

    async fn retry_and_parse(
        &self,
        topic: &str,
        difficulty: Difficulty,
        kind: QuestionKind,
    ) -> Result<Question, QuizError> {
        let prompt = prompt_for(kind, topic, difficulty);
        let mut last_error = String::new();

        for attempt in 1..=self.max_retry {
            let outcome = match self.model.complete(&prompt).await {
                Ok(response) => {
                    logger::info(&format!("LLM response (attempt {}): {}", attempt, response));
                    parse_question(kind, &response).map_err(|e| e.to_string())
                }
                Err(e) => Err(e.to_string()),
            };

            match outcome {
                Ok(question) => return Ok(question),
                Err(e) => {
                    logger::warn(&format!(
                        "Attempt {}/{} failed for topic: {} and difficulty: {}: {}",
                        attempt, self.max_retry, topic, difficulty, e
                    ));
                    last_error = e;
                }
            }
        }

        logger::error(&format!(
            "Generation failed after {} attempts for topic: {} and difficulty: {}",
            self.max_retry, topic, difficulty
        ));
        Err(QuizError::Generation {
            topic: topic.to_string(),
            difficulty,
            attempts: self.max_retry,
            reason: last_error,
        })
    }
}

/// Scripted stand-in for the language model. Replies are served in order and
/// the last one repeats once the script runs out.
#[cfg(test)]
pub struct MockModel {
    replies: Vec<Result<String, String>>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockModel {
    pub fn new(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn always(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, _prompt: &str) -> Result<String, crate::ai::client::ClientError> {
        let index = self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let reply = self
            .replies
            .get(index)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_else(|| Err("no scripted reply".to_string()));
        reply.map_err(|e| e.into())
    }
}

#[cfg(test)]
pub const VALID_MCQ: &str = r#"{"question": "What is the capital of India?", "options": ["New Delhi", "Mumbai", "Kolkata", "Chennai"], "correct_answer": "New Delhi"}"#;

#[cfg(test)]
pub const VALID_FILL_BLANK: &str =
    r#"{"question": "The capital of France is ___.", "correct_answer": "Paris"}"#;
