use crate::ai::{LanguageModel, QuestionGenerator};
use crate::error::QuizError;
use crate::logger;
use crate::models::{AppState, Question, QuizSettings};
use crate::quiz::{DEFAULT_EXPORT_PREFIX, QuizManager};
use crate::utils::digit_to_index;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    QuestionType,
    Topic,
    Difficulty,
    Count,
}

impl SettingsField {
    pub const ALL: [SettingsField; 4] = [
        SettingsField::QuestionType,
        SettingsField::Topic,
        SettingsField::Difficulty,
        SettingsField::Count,
    ];

    fn next(self) -> Self {
        match self {
            SettingsField::QuestionType => SettingsField::Topic,
            SettingsField::Topic => SettingsField::Difficulty,
            SettingsField::Difficulty => SettingsField::Count,
            SettingsField::Count => SettingsField::QuestionType,
        }
    }

    fn previous(self) -> Self {
        match self {
            SettingsField::QuestionType => SettingsField::Count,
            SettingsField::Topic => SettingsField::QuestionType,
            SettingsField::Difficulty => SettingsField::Topic,
            SettingsField::Count => SettingsField::Difficulty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// What the main loop has to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Generate,
    Quit,
}

/// Per-question widget state of the answer form.
#[derive(Debug, Default)]
pub struct AnswerForm {
    pub current_index: usize,
    pub selections: Vec<usize>,
    pub inputs: Vec<String>,
}

impl AnswerForm {
    pub fn new(question_count: usize) -> Self {
        Self {
            current_index: 0,
            selections: vec![0; question_count],
            inputs: vec![String::new(); question_count],
        }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.len()
    }

    /// The answer the form currently holds for question `index`.
    pub fn answer_for(&self, index: usize, question: &Question) -> String {
        match question {
            Question::MultipleChoice { options, .. } => self
                .selections
                .get(index)
                .and_then(|&i| options.get(i))
                .cloned()
                .unwrap_or_default(),
            Question::FillInBlank { .. } => self.inputs.get(index).cloned().unwrap_or_default(),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub settings: QuizSettings,
    pub focused_field: SettingsField,
    pub manager: QuizManager,
    pub form: AnswerForm,
    pub status: Option<StatusMessage>,
    pub results_scroll: u16,
}

impl App {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            state: AppState::Settings,
            settings: QuizSettings::default(),
            focused_field: SettingsField::QuestionType,
            manager: QuizManager::new(results_dir),
            form: AnswerForm::default(),
            status: None,
            results_scroll: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.state {
            AppState::Settings => self.handle_settings_key(key),
            AppState::Generating => Action::None,
            AppState::Quiz => {
                self.handle_quiz_key(key);
                Action::None
            }
            AppState::Results => self.handle_results_key(key),
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Tab | KeyCode::Down => self.focused_field = self.focused_field.next(),
            KeyCode::BackTab | KeyCode::Up => self.focused_field = self.focused_field.previous(),
            KeyCode::Enter => {
                if self.settings.topic.trim().is_empty() {
                    self.status = Some(StatusMessage::new(
                        StatusKind::Warning,
                        "Please enter a topic first",
                    ));
                    self.focused_field = SettingsField::Topic;
                    return Action::None;
                }
                return Action::Generate;
            }
            KeyCode::Left => self.adjust_setting(-1),
            KeyCode::Right => self.adjust_setting(1),
            KeyCode::Backspace if self.focused_field == SettingsField::Topic => {
                self.settings.topic.pop();
            }
            KeyCode::Char(c) if self.focused_field == SettingsField::Topic => {
                self.settings.topic.push(c);
            }
            _ => {}
        }
        Action::None
    }

    fn adjust_setting(&mut self, delta: i32) {
        match self.focused_field {
            SettingsField::QuestionType => self.settings.kind = self.settings.kind.next(),
            SettingsField::Difficulty => {
                self.settings.difficulty = if delta > 0 {
                    self.settings.difficulty.next()
                } else {
                    self.settings.difficulty.previous()
                };
            }
            SettingsField::Count => self.settings.set_count(self.settings.count as i32 + delta),
            SettingsField::Topic => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) {
        let index = self.form.current_index;
        let Some(question) = self.manager.questions().get(index) else {
            return;
        };
        let option_count = question.options().len();
        let is_mcq = option_count > 0;

        match key.code {
            KeyCode::Esc => {
                self.state = AppState::Settings;
            }
            KeyCode::Down | KeyCode::Tab => {
                if !self.form.is_last() {
                    self.form.current_index += 1;
                }
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.form.current_index = self.form.current_index.saturating_sub(1);
            }
            KeyCode::Enter => {
                if self.form.is_last() {
                    self.submit_quiz();
                } else {
                    self.form.current_index += 1;
                }
            }
            KeyCode::Left if is_mcq => {
                let selected = &mut self.form.selections[index];
                *selected = (*selected + option_count - 1) % option_count;
            }
            KeyCode::Right if is_mcq => {
                let selected = &mut self.form.selections[index];
                *selected = (*selected + 1) % option_count;
            }
            KeyCode::Char(c) if is_mcq => {
                if let Some(i) = digit_to_index(c)
                    && i < option_count
                {
                    self.form.selections[index] = i;
                }
            }
            KeyCode::Char(c) => {
                self.form.inputs[index].push(c);
            }
            KeyCode::Backspace if !is_mcq => {
                self.form.inputs[index].pop();
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('s') => self.save_results(),
            KeyCode::Char('n') => {
                self.state = AppState::Settings;
                self.status = None;
                self.results_scroll = 0;
            }
            KeyCode::Down => self.results_scroll = self.results_scroll.saturating_add(1),
            KeyCode::Up => self.results_scroll = self.results_scroll.saturating_sub(1),
            _ => {}
        }
        Action::None
    }

    pub fn begin_generation(&mut self) {
        self.state = AppState::Generating;
        self.status = None;
    }

    /// Runs the batch with the current settings.
    pub async fn generate<M: LanguageModel>(
        &mut self,
        generator: &QuestionGenerator<M>,
    ) -> Result<(), QuizError> {
        let settings = self.settings.clone();
        self.manager
            .generate_questions(
                generator,
                settings.kind,
                settings.topic.trim(),
                settings.difficulty,
                settings.count as usize,
            )
            .await
    }

    pub fn finish_generation(&mut self, result: Result<(), QuizError>) {
        match result {
            Ok(()) => {
                self.form = AnswerForm::new(self.manager.questions().len());
                self.results_scroll = 0;
                self.state = AppState::Quiz;
            }
            Err(e) => {
                self.status = Some(StatusMessage::new(
                    StatusKind::Error,
                    format!("Error generating questions: {}", e),
                ));
                self.state = AppState::Settings;
            }
        }
    }

    pub fn submit_quiz(&mut self) {
        let form = &self.form;
        self.manager.collect_answers(|i, q| form.answer_for(i, q));

        match self.manager.grade() {
            Ok(results) => {
                logger::info(&format!("Quiz submitted with {} answers", results.len()));
                self.results_scroll = 0;
                self.status = None;
                self.state = AppState::Results;
            }
            Err(e) => {
                self.status = Some(StatusMessage::new(StatusKind::Warning, e.to_string()));
            }
        }
    }

    pub fn save_results(&mut self) {
        self.status = Some(match self.manager.export(DEFAULT_EXPORT_PREFIX) {
            Some(path) => StatusMessage::new(
                StatusKind::Success,
                format!("Results saved to {}", path.display()),
            ),
            None => StatusMessage::new(StatusKind::Warning, "No results available"),
        });
    }
}
