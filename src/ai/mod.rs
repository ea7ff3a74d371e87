pub mod client;
pub mod generator;
pub mod parser;
pub mod prompts;

// Public API exports
pub use client::{ClientError, LanguageModel, ModelConfig, OpenRouterClient};
pub use generator::QuestionGenerator;
pub use parser::parse_question;
