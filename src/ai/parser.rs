use crate::error::ParseError;
use crate::models::{Question, QuestionKind};
use serde::Deserialize;
use serde_json::Value;

fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && start < end
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

#[derive(Debug, Deserialize)]
struct QuestionRaw {
    #[serde(default)]
    question: Value,
    #[serde(default)]
    options: Value,
    #[serde(default)]
    correct_answer: Value,
}

/// Models sometimes echo the schema and send `{"description": "..."}` where a
/// string belongs; take the description in that case.
fn text_field(value: &Value, field: &'static str) -> Result<String, ParseError> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => match map.get("description") {
            Some(Value::String(s)) => s.trim().to_string(),
            _ => value.to_string(),
        },
        Value::Null => return Err(ParseError::MissingField(field)),
        Value::Array(_) => {
            return Err(ParseError::WrongType {
                field,
                expected: "string",
            });
        }
    };

    if text.is_empty() {
        return Err(ParseError::MissingField(field));
    }
    Ok(text)
}

fn options_field(value: &Value) -> Result<Vec<String>, ParseError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| text_field(item, "options"))
            .collect(),
        Value::Null => Err(ParseError::MissingField("options")),
        _ => Err(ParseError::WrongType {
            field: "options",
            expected: "array of strings",
        }),
    }
}

/// Parses raw model output into a question of the requested kind.
///
/// Only the shape is checked here; the structural rules of each kind are
/// enforced separately by [`Question::validate`].
pub fn parse_question(kind: QuestionKind, response: &str) -> Result<Question, ParseError> {
    let cleaned = clean_json_response(response);
    if !cleaned.starts_with('{') {
        return Err(ParseError::NoJson);
    }

    let raw: QuestionRaw = serde_json::from_str(&cleaned)?;
    let question = text_field(&raw.question, "question")?;
    let correct_answer = text_field(&raw.correct_answer, "correct_answer")?;

    Ok(match kind {
        QuestionKind::MultipleChoice => Question::MultipleChoice {
            question,
            options: options_field(&raw.options)?,
            correct_answer,
        },
        QuestionKind::FillInBlank => Question::FillInBlank {
            question,
            correct_answer,
        },
    })
}
