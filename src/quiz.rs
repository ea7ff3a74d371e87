use crate::ai::{LanguageModel, QuestionGenerator};
use crate::config::DEFAULT_RESULTS_DIR;
use crate::error::{ExportError, QuizError};
use crate::logger;
use crate::models::{AnswerRecord, Difficulty, Question, QuestionKind, SessionState};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXPORT_PREFIX: &str = "quiz_results";
const OPTION_SEPARATOR: &str = " | ";

/// Graded answers plus the derived score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub rows: Vec<AnswerRecord>,
}

impl ResultTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn correct(&self) -> usize {
        self.rows.iter().filter(|r| r.is_correct).count()
    }

    pub fn percentage(&self) -> f32 {
        if self.rows.is_empty() {
            0.0
        } else {
            self.correct() as f32 / self.total() as f32 * 100.0
        }
    }
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    question_number: usize,
    question_type: &'a str,
    question: &'a str,
    user_answer: &'a str,
    correct_answer: &'a str,
    is_correct: bool,
    options: String,
}

impl<'a> From<&'a AnswerRecord> for CsvRow<'a> {
    fn from(record: &'a AnswerRecord) -> Self {
        Self {
            question_number: record.question_number,
            question_type: record.question_type.tag(),
            question: &record.question,
            user_answer: &record.user_answer,
            correct_answer: &record.correct_answer,
            is_correct: record.is_correct,
            options: record.options.join(OPTION_SEPARATOR),
        }
    }
}

/// One user's quiz: questions, index-aligned answers, and graded results.
#[derive(Debug)]
pub struct QuizManager {
    questions: Vec<Question>,
    user_answers: Vec<String>,
    results: Vec<AnswerRecord>,
    state: SessionState,
    results_dir: PathBuf,
}

impl Default for QuizManager {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_DIR)
    }
}

impl QuizManager {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            questions: Vec::new(),
            user_answers: Vec::new(),
            results: Vec::new(),
            state: SessionState::Empty,
            results_dir: results_dir.into(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn user_answers(&self) -> &[String] {
        &self.user_answers
    }

    pub fn results(&self) -> &[AnswerRecord] {
        &self.results
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Generates `count` questions in sequence. The session is only replaced
    /// once every question succeeded; a failure leaves it untouched.
    pub async fn generate_questions<M: LanguageModel>(
        &mut self,
        generator: &QuestionGenerator<M>,
        kind: QuestionKind,
        topic: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<(), QuizError> {
        let mut questions = Vec::with_capacity(count);

        for i in 0..count {
            match generator.generate(topic, difficulty, kind).await {
                Ok(question) => questions.push(question),
                Err(e) => {
                    logger::error(&format!(
                        "Error generating questions ({}/{}) for topic: {} and difficulty: {}: {}",
                        i + 1,
                        count,
                        topic,
                        difficulty,
                        e
                    ));
                    return Err(e);
                }
            }
        }

        self.questions = questions;
        self.user_answers.clear();
        self.results.clear();
        self.state = SessionState::Generated;
        logger::info(&format!(
            "Generated {} {} questions for topic: {} and difficulty: {}",
            count, kind, topic, difficulty
        ));
        Ok(())
    }

    /// Asks for one answer per question, in order. Prior answers are dropped first.
    pub fn collect_answers<F>(&mut self, mut ask: F)
    where
        F: FnMut(usize, &Question) -> String,
    {
        self.user_answers.clear();
        for (i, question) in self.questions.iter().enumerate() {
            self.user_answers.push(ask(i, question));
        }
        if !self.questions.is_empty() {
            self.state = SessionState::Answered;
        }
    }

    pub fn grade(&mut self) -> Result<&[AnswerRecord], QuizError> {
        if self.user_answers.is_empty() {
            return Err(QuizError::NothingToGrade);
        }

        self.results = self
            .questions
            .iter()
            .zip(&self.user_answers)
            .enumerate()
            .map(|(i, (question, user_answer))| AnswerRecord {
                question_number: i + 1,
                question_type: question.kind(),
                question: question.text().to_string(),
                user_answer: user_answer.clone(),
                correct_answer: question.correct_answer().to_string(),
                is_correct: question.is_correct(user_answer),
                options: question.options().to_vec(),
            })
            .collect();
        self.state = SessionState::Graded;

        Ok(&self.results)
    }

    pub fn summarize(&self) -> ResultTable {
        ResultTable {
            rows: self.results.clone(),
        }
    }

    /// Writes the results under the results directory and returns the file
    /// path, or `None` when there is nothing to write or the write failed.
    pub fn export(&self, prefix: &str) -> Option<PathBuf> {
        match self.try_export(prefix) {
            Ok(path) => {
                logger::info(&format!("Results saved to {}", path.display()));
                Some(path)
            }
            Err(ExportError::NoResults) => {
                logger::warn("No results to save");
                None
            }
            Err(e) => {
                logger::error(&format!("Failed to save results: {}", e));
                None
            }
        }
    }

    pub fn try_export(&self, prefix: &str) -> Result<PathBuf, ExportError> {
        if self.results.is_empty() {
            return Err(ExportError::NoResults);
        }

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}_{}.csv", prefix, timestamp);

        fs::create_dir_all(&self.results_dir)?;
        let path = self.results_dir.join(filename);

        let mut writer = csv::Writer::from_path(&path)?;
        for record in &self.results {
            writer.serialize(CsvRow::from(record))?;
        }
        writer.flush()?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::generator::{MockModel, VALID_FILL_BLANK, VALID_MCQ};

    fn manager_with(questions: Vec<Question>) -> QuizManager {
        let mut manager = QuizManager::default();
        manager.questions = questions;
        manager.state = SessionState::Generated;
        manager
    }

    fn fill_blank(answer: &str) -> Question {
        Question::FillInBlank {
            question: "The capital of France is ___.".to_string(),
            correct_answer: answer.to_string(),
        }
    }

    fn mcq() -> Question {
        Question::MultipleChoice {
            question: "What is the capital of India?".to_string(),
            options: vec![
                "Delhi".to_string(),
                "New Delhi".to_string(),
                "Mumbai".to_string(),
                "Kolkata".to_string(),
            ],
            correct_answer: "New Delhi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_questions_replaces_session() {
        let generator = QuestionGenerator::new(MockModel::always(VALID_FILL_BLANK));
        let mut manager = manager_with(vec![mcq()]);
        manager.collect_answers(|_, _| "New Delhi".to_string());
        manager.grade().unwrap();

        manager
            .generate_questions(
                &generator,
                QuestionKind::FillInBlank,
                "Geography",
                Difficulty::Easy,
                2,
            )
            .await
            .unwrap();

        assert_eq!(manager.questions().len(), 2);
        assert!(manager.user_answers().is_empty());
        assert!(manager.results().is_empty());
        assert_eq!(manager.state(), SessionState::Generated);
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_prior_session() {
        let model = MockModel::new(vec![
            Ok(VALID_MCQ.to_string()),
            Err("boom".to_string()),
        ]);
        let generator = QuestionGenerator::with_max_retry(model, 2);
        let mut manager = manager_with(vec![fill_blank("Paris")]);

        let err = manager
            .generate_questions(
                &generator,
                QuestionKind::MultipleChoice,
                "Geography",
                Difficulty::Easy,
                3,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, QuizError::Generation { attempts: 2, .. }));
        assert_eq!(manager.questions(), &[fill_blank("Paris")]);
        assert_eq!(manager.state(), SessionState::Generated);
    }

    #[test]
    fn test_collect_answers_does_not_accumulate() {
        let mut manager = manager_with(vec![mcq(), mcq()]);
        manager.collect_answers(|_, _| "Delhi".to_string());
        manager.collect_answers(|i, q| q.options()[i].clone());

        assert_eq!(manager.user_answers(), ["Delhi", "New Delhi"]);
        assert_eq!(manager.state(), SessionState::Answered);
    }

    #[test]
    fn test_grade_requires_answers() {
        let mut manager = manager_with(vec![mcq()]);
        assert!(matches!(manager.grade(), Err(QuizError::NothingToGrade)));
        assert!(manager.summarize().is_empty());
    }

    #[test]
    fn test_grading_asymmetry() {
        let mut manager = manager_with(vec![mcq(), fill_blank("paris")]);
        manager
            .collect_answers(|i, _| (if i == 0 { "Delhi" } else { " Paris " }).to_string());

        let results = manager.grade().unwrap();
        assert!(!results[0].is_correct);
        assert!(results[1].is_correct);
        assert_eq!(results[0].options.len(), 4);
        assert!(results[1].options.is_empty());
        assert_eq!(results[1].question_type, QuestionKind::FillInBlank);
    }

    #[test]
    fn test_grade_is_idempotent() {
        let mut manager = manager_with(vec![mcq(), fill_blank("Paris"), mcq()]);
        manager.collect_answers(|_, _| "New Delhi".to_string());

        let first = manager.grade().unwrap().to_vec();
        let second = manager.grade().unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|r| r.question_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_summary_score() {
        let mut manager = manager_with(vec![mcq(), mcq(), mcq(), fill_blank("Paris")]);
        manager
            .collect_answers(|i, _| (if i < 3 { "New Delhi" } else { "Lyon" }).to_string());
        manager.grade().unwrap();

        let table = manager.summarize();
        assert_eq!(table.total(), 4);
        assert_eq!(table.correct(), 3);
        assert_eq!(table.percentage(), 75.0);
        assert_eq!(manager.state(), SessionState::Graded);
    }

    #[test]
    fn test_export_without_results_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let results_dir = dir.path().join("results");
        let manager = QuizManager::new(&results_dir);

        assert!(manager.export(DEFAULT_EXPORT_PREFIX).is_none());
        assert!(matches!(
            manager.try_export(DEFAULT_EXPORT_PREFIX),
            Err(ExportError::NoResults)
        ));
        assert!(!results_dir.exists());
    }

    #[test]
    fn test_export_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = QuizManager::new(dir.path().join("results"));
        manager.questions = vec![mcq(), fill_blank("Paris")];
        manager
            .collect_answers(|i, _| (if i == 0 { "New Delhi" } else { "paris" }).to_string());
        manager.grade().unwrap();

        let path = manager.export("quiz_results").unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("quiz_results_"));
        assert!(name.ends_with(".csv"));
        // quiz_results_YYYYMMDD_HHMMSS.csv
        assert_eq!(name.len(), "quiz_results_".len() + 15 + ".csv".len());

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec![
                "question_number",
                "question_type",
                "question",
                "user_answer",
                "correct_answer",
                "is_correct",
                "options"
            ]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "MCQ");
        assert_eq!(&rows[0][5], "true");
        assert_eq!(&rows[0][6], "Delhi | New Delhi | Mumbai | Kolkata");
        assert_eq!(&rows[1][1], "Fill in the blank");
        assert_eq!(&rows[1][6], "");
    }

    #[test]
    fn test_export_into_unwritable_dir_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let results_dir = dir.path().join("results");
        std::fs::write(&results_dir, "x").unwrap();

        let mut manager = QuizManager::new(&results_dir);
        manager.questions = vec![fill_blank("Paris")];
        manager.collect_answers(|_, _| "Paris".to_string());
        manager.grade().unwrap();

        assert!(matches!(
            manager.try_export(DEFAULT_EXPORT_PREFIX),
            Err(ExportError::Io(_))
        ));
        assert!(manager.export(DEFAULT_EXPORT_PREFIX).is_none());
        assert!(results_dir.is_file());
    }
}
