pub mod ai;
pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use ai::{LanguageModel, ModelConfig, OpenRouterClient, QuestionGenerator, parse_question};
pub use app::{Action, App};
pub use config::Settings;
pub use error::{ConfigError, ExportError, ParseError, QuizError, ValidationError};
pub use models::{AnswerRecord, AppState, Difficulty, Question, QuestionKind, QuizSettings};
pub use quiz::{QuizManager, ResultTable};
