use crate::models::{Difficulty, QuestionKind};

pub fn mcq_prompt(topic: &str, difficulty: Difficulty) -> String {
    format!(
        r#"Generate a {difficulty} multiple-choice question about {topic}.

IMPORTANT:

- Respond ONLY with this exact JSON structure (no markdown, no extra text):
{{
    "question": "a clear, specific question",
    "options": ["option 1", "option 2", "option 3", "option 4"],
    "correct_answer": "the correct option, copied exactly from options"
}}
- Provide exactly 4 distinct options, only one of them correct.
- correct_answer must be character-for-character identical to one of the options.
"#,
        difficulty = difficulty.label().to_lowercase(),
        topic = topic,
    )
}

pub fn fill_blank_prompt(topic: &str, difficulty: Difficulty) -> String {
    format!(
        r#"Generate a {difficulty} fill-in-the-blank question about {topic}.

IMPORTANT:

- Respond ONLY with this exact JSON structure (no markdown, no extra text):
{{
    "question": "a sentence with ___ marking the missing word or phrase",
    "correct_answer": "the word or phrase that fills the blank"
}}
- The question MUST contain exactly one blank written as three underscores: ___
- The answer should be a single word or a short phrase.
"#,
        difficulty = difficulty.label().to_lowercase(),
        topic = topic,
    )
}

pub fn prompt_for(kind: QuestionKind, topic: &str, difficulty: Difficulty) -> String {
    match kind {
        QuestionKind::MultipleChoice => mcq_prompt(topic, difficulty),
        QuestionKind::FillInBlank => fill_blank_prompt(topic, difficulty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_topic_and_difficulty() {
        let prompt = prompt_for(QuestionKind::MultipleChoice, "Indian History", Difficulty::Hard);
        assert!(prompt.contains("Indian History"));
        assert!(prompt.contains("hard multiple-choice"));
        assert!(prompt.contains("\"options\""));

        let prompt = prompt_for(QuestionKind::FillInBlank, "Geography", Difficulty::Easy);
        assert!(prompt.contains("Geography"));
        assert!(prompt.contains("easy fill-in-the-blank"));
        assert!(prompt.contains("___"));
        assert!(!prompt.contains("\"options\""));
    }
}
