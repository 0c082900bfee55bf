//! Study-guide types produced by the AI layer.
//!
//! Field names follow the external JSON contract the generative model is
//! prompted to emit (`quizQuestions`, `correctAnswer`), so these types
//! deserialize the model output directly and serialize back out to API
//! clients unchanged.

use serde::{Deserialize, Serialize};

/// A single flashcard: prompt on the front, answer on the back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
}

/// AI-generated study bundle for a topic: overview, flashcards, and quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyGuide {
    pub summary: String,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(rename = "quizQuestions", default)]
    pub quiz_questions: Vec<QuizQuestion>,
}

impl StudyGuide {
    /// Check the guide against the expected shape.
    ///
    /// Model output that parses as JSON but is missing the substance of a
    /// study guide is rejected here rather than passed downstream.
    pub fn validate(&self) -> Result<(), StudyGuideError> {
        if self.summary.trim().is_empty() {
            return Err(StudyGuideError::EmptySummary);
        }
        if self.flashcards.is_empty() {
            return Err(StudyGuideError::NoFlashcards);
        }
        if self.quiz_questions.is_empty() {
            return Err(StudyGuideError::NoQuizQuestions);
        }
        Ok(())
    }
}

/// Shape violations in a parsed study guide.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudyGuideError {
    #[error("study guide summary is empty")]
    EmptySummary,

    #[error("study guide has no flashcards")]
    NoFlashcards,

    #[error("study guide has no quiz questions")]
    NoQuizQuestions,
}
