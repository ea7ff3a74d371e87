use crate::error::ValidationError;
use std::fmt;

pub const BLANK_MARKER: &str = "___";
pub const MIN_OPTIONS: usize = 4;
pub const MIN_QUESTIONS: u8 = 1;
pub const MAX_QUESTIONS: u8 = 10;
pub const DEFAULT_QUESTIONS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionKind {
    #[default]
    MultipleChoice,
    FillInBlank,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 2] = [QuestionKind::MultipleChoice, QuestionKind::FillInBlank];

    /// Label shown in the settings panel.
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::FillInBlank => "Fill in the Blank",
        }
    }

    /// Value written to the `question_type` column of the results table.
    pub fn tag(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "MCQ",
            QuestionKind::FillInBlank => "Fill in the blank",
        }
    }

    pub fn next(self) -> Self {
        match self {
            QuestionKind::MultipleChoice => QuestionKind::FillInBlank,
            QuestionKind::FillInBlank => QuestionKind::MultipleChoice,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    MultipleChoice {
        question: String,
        options: Vec<String>,
        correct_answer: String,
    },
    FillInBlank {
        question: String,
        correct_answer: String,
    },
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Question::FillInBlank { .. } => QuestionKind::FillInBlank,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Question::MultipleChoice { question, .. } | Question::FillInBlank { question, .. } => {
                question
            }
        }
    }

    pub fn correct_answer(&self) -> &str {
        match self {
            Question::MultipleChoice { correct_answer, .. }
            | Question::FillInBlank { correct_answer, .. } => correct_answer,
        }
    }

    /// Options in display order; empty for fill in the blank.
    pub fn options(&self) -> &[String] {
        match self {
            Question::MultipleChoice { options, .. } => options,
            Question::FillInBlank { .. } => &[],
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Question::MultipleChoice {
                options,
                correct_answer,
                ..
            } => {
                if options.len() < MIN_OPTIONS {
                    return Err(ValidationError::TooFewOptions {
                        found: options.len(),
                    });
                }
                if !options.contains(correct_answer) {
                    return Err(ValidationError::AnswerNotInOptions {
                        answer: correct_answer.clone(),
                    });
                }
                Ok(())
            }
            Question::FillInBlank { question, .. } => {
                if question.contains(BLANK_MARKER) {
                    Ok(())
                } else {
                    Err(ValidationError::MissingBlank)
                }
            }
        }
    }

    /// Grades a user answer. Selections are matched exactly, typed answers are
    /// compared trimmed and case-folded.
    pub fn is_correct(&self, user_answer: &str) -> bool {
        match self {
            Question::MultipleChoice { correct_answer, .. } => user_answer == correct_answer,
            Question::FillInBlank { correct_answer, .. } => {
                normalize_answer(user_answer) == normalize_answer(correct_answer)
            }
        }
    }
}

pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// One graded row of the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_number: usize,
    pub question_type: QuestionKind,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Generated,
    Answered,
    Graded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    pub kind: QuestionKind,
    pub topic: String,
    pub difficulty: Difficulty,
    pub count: u8,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            kind: QuestionKind::default(),
            topic: String::new(),
            difficulty: Difficulty::default(),
            count: DEFAULT_QUESTIONS,
        }
    }
}

impl QuizSettings {
    pub fn set_count(&mut self, count: i32) {
        self.count = count.clamp(MIN_QUESTIONS as i32, MAX_QUESTIONS as i32) as u8;
    }
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Settings,
    Generating,
    Quiz,
    Results,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq(options: &[&str], answer: &str) -> Question {
        Question::MultipleChoice {
            question: "What is the capital of India?".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: answer.to_string(),
        }
    }

    #[test]
    fn test_valid_mcq() {
        let q = mcq(&["New Delhi", "Mumbai", "Kolkata", "Chennai"], "New Delhi");
        assert!(q.validate().is_ok());
        assert_eq!(q.kind(), QuestionKind::MultipleChoice);
        assert_eq!(q.options().len(), 4);
    }

    #[test]
    fn test_mcq_too_few_options() {
        let q = mcq(&["New Delhi", "Mumbai", "Kolkata"], "New Delhi");
        assert_eq!(
            q.validate(),
            Err(ValidationError::TooFewOptions { found: 3 })
        );
    }

    #[test]
    fn test_mcq_answer_not_in_options() {
        let q = mcq(&["Delhi", "Mumbai", "Kolkata", "Chennai"], "New Delhi");
        assert_eq!(
            q.validate(),
            Err(ValidationError::AnswerNotInOptions {
                answer: "New Delhi".to_string()
            })
        );
    }

    #[test]
    fn test_fill_blank_requires_marker() {
        let valid = Question::FillInBlank {
            question: "The capital of France is ___.".to_string(),
            correct_answer: "Paris".to_string(),
        };
        assert!(valid.validate().is_ok());
        assert!(valid.options().is_empty());

        let invalid = Question::FillInBlank {
            question: "What is the capital of France?".to_string(),
            correct_answer: "Paris".to_string(),
        };
        assert_eq!(invalid.validate(), Err(ValidationError::MissingBlank));
    }

    #[test]
    fn test_fill_blank_grading_ignores_case_and_whitespace() {
        let q = Question::FillInBlank {
            question: "The capital of France is ___.".to_string(),
            correct_answer: "paris".to_string(),
        };
        assert!(q.is_correct(" Paris "));
        assert!(q.is_correct("PARIS"));
        assert!(!q.is_correct("Lyon"));
    }

    #[test]
    fn test_mcq_grading_is_exact() {
        let q = mcq(&["New Delhi", "Mumbai", "Kolkata", "Chennai"], "New Delhi");
        assert!(!q.is_correct("Delhi"));
        assert!(!q.is_correct("new delhi"));
        assert!(q.is_correct("New Delhi"));
    }

    #[test]
    fn test_settings_count_is_clamped() {
        let mut settings = QuizSettings::default();
        assert_eq!(settings.count, 5);
        settings.set_count(0);
        assert_eq!(settings.count, 1);
        settings.set_count(42);
        assert_eq!(settings.count, 10);
        settings.set_count(7);
        assert_eq!(settings.count, 7);
    }

    #[test]
    fn test_kind_labels_and_tags() {
        assert_eq!(QuestionKind::MultipleChoice.label(), "Multiple Choice");
        assert_eq!(QuestionKind::FillInBlank.label(), "Fill in the Blank");
        assert_eq!(QuestionKind::MultipleChoice.tag(), "MCQ");
        assert_eq!(QuestionKind::FillInBlank.tag(), "Fill in the blank");
        assert_eq!(QuestionKind::MultipleChoice.next(), QuestionKind::FillInBlank);
    }

    #[test]
    fn test_difficulty_cycles() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.previous(), Difficulty::Hard);
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
    }
}
