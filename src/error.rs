use crate::models::Difficulty;
use thiserror::Error;

/// Model output that parsed but breaks the structural contract of its question type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("multiple choice question has {found} options, at least 4 required")]
    TooFewOptions { found: usize },

    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },

    #[error("fill in the blank question does not contain '___'")]
    MissingBlank,
}

/// Failure to turn raw model text into a question. Only ever seen inside the retry loop.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in model response")]
    NoJson,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing or empty field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' has unexpected type, expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no results to save")]
    NoResults,

    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode results: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENROUTER_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error(
        "generation failed after {attempts} attempts for topic: {topic} and difficulty: {difficulty}: {reason}"
    )]
    Generation {
        topic: String,
        difficulty: Difficulty,
        attempts: u32,
        reason: String,
    },

    #[error("invalid question: {0}")]
    Validation(#[from] ValidationError),

    #[error("no answers collected, nothing to grade")]
    NothingToGrade,

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to create language model client: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_message_carries_context() {
        let err = QuizError::Generation {
            topic: "Geography".to_string(),
            difficulty: Difficulty::Easy,
            attempts: 3,
            reason: "timeout".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("3 attempts"));
        assert!(msg.contains("Geography"));
        assert!(msg.contains("Easy"));
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn test_validation_error_converts() {
        let err: QuizError = ValidationError::MissingBlank.into();
        assert!(matches!(
            err,
            QuizError::Validation(ValidationError::MissingBlank)
        ));
    }

    #[test]
    fn test_too_few_options_message() {
        let err = ValidationError::TooFewOptions { found: 2 };
        assert_eq!(
            err.to_string(),
            "multiple choice question has 2 options, at least 4 required"
        );
    }
}
