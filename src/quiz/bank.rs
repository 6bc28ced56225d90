use std::collections::HashSet;

use log::{debug, info};

use crate::error::BankError;
use crate::quiz::Question;

const EMBEDDED_BANK: &str = include_str!("../../data/questions.json");

/// The read-only list of questions a quiz session is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Loads the bank that ships with the binary.
    pub fn embedded() -> Result<Self, BankError> {
        Self::from_json(EMBEDDED_BANK)
    }

    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    /// Builds a bank, refusing data that would make scoring ambiguous.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        validate(&questions)?;
        info!("Loaded {} questions", questions.len());
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn validate(questions: &[Question]) -> Result<(), BankError> {
    if questions.is_empty() {
        return Err(BankError::Empty);
    }

    let mut ids = HashSet::new();
    for question in questions {
        if !ids.insert(question.id) {
            return Err(BankError::DuplicateId { id: question.id });
        }

        if question.options.len() < 2 {
            return Err(BankError::TooFewOptions {
                id: question.id,
                count: question.options.len(),
            });
        }

        if question.correct_index >= question.options.len() {
            return Err(BankError::CorrectIndexOutOfRange {
                id: question.id,
                index: question.correct_index,
                count: question.options.len(),
            });
        }

        let mut seen = HashSet::new();
        for option in &question.options {
            if !seen.insert(option.trim()) {
                return Err(BankError::DuplicateOption {
                    id: question.id,
                    text: option.clone(),
                });
            }
        }
        debug!("Question {} looks fine", question.id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_bank_is_valid() {
        let bank = QuestionBank::embedded().unwrap();
        assert_eq!(bank.len(), 12);
        assert!(bank
            .questions()
            .iter()
            .all(|q| q.correct_index < q.options.len()));
    }

    #[test]
    fn optional_fields_may_be_missing() {
        let bank = QuestionBank::from_json(
            r#"[{"id": 1, "question": "Pick", "options": ["x", "y"], "correctAnswer": 1}]"#,
        )
        .unwrap();
        let q = &bank.questions()[0];
        assert_eq!(q.options[q.correct_index], "y");
        assert_eq!(q.celebration_asset, None);
        assert_eq!(q.explanation, "");
    }

    #[test]
    fn rejects_duplicate_option_text() {
        let err = QuestionBank::from_json(
            r#"[{"id": 4, "question": "Pick", "options": ["Yes", "No", "Yes "], "correctAnswer": 0}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, BankError::DuplicateOption { id: 4, .. }));
        assert!(err.to_string().contains("question 4"));
    }

    #[test]
    fn rejects_out_of_range_answers_and_short_questions() {
        let err = QuestionBank::from_json(
            r#"[{"id": 2, "question": "Pick", "options": ["a", "b"], "correctAnswer": 2}]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BankError::CorrectIndexOutOfRange {
                id: 2,
                index: 2,
                count: 2
            }
        ));

        let err = QuestionBank::from_json(
            r#"[{"id": 3, "question": "Pick", "options": ["a"], "correctAnswer": 0}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, BankError::TooFewOptions { id: 3, count: 1 }));
    }

    #[test]
    fn rejects_empty_banks_repeated_ids_and_bad_json() {
        assert!(matches!(QuestionBank::from_json("[]"), Err(BankError::Empty)));
        assert!(matches!(
            QuestionBank::from_json("{not json"),
            Err(BankError::Parse(_))
        ));

        let err = QuestionBank::from_json(
            r#"[
                {"id": 1, "question": "A", "options": ["a", "b"], "correctAnswer": 0},
                {"id": 1, "question": "B", "options": ["c", "d"], "correctAnswer": 1}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(err, BankError::DuplicateId { id: 1 }));
    }
}
