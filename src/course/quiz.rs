//! Chapter quizzes: questions, grading and the answer/submit/retry cycle

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::QuizError;
use super::model::Chapter;

/// Minimum percentage needed to pass a quiz
pub const PASS_THRESHOLD: u8 = 70;

/// One selectable answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
}

impl QuizOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// A multiple-choice question with exactly one correct option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub question: String,
    pub options: Vec<QuizOption>,
    pub correct_answer: String,
}

impl Question {
    /// Look up an option by its ID
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// The option marked correct
    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.option(&self.correct_answer)
    }
}

/// Selected option per question ID
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(BTreeMap<u32, String>);

impl Answers {
    pub fn select(&mut self, question_id: u32, option_id: impl Into<String>) {
        self.0.insert(question_id, option_id.into());
    }

    pub fn get(&self, question_id: u32) -> Option<&str> {
        self.0.get(&question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether every question has a recorded answer
    pub fn covers(&self, questions: &[Question]) -> bool {
        questions.iter().all(|q| self.0.contains_key(&q.id))
    }

    /// Whether the answer recorded for `question` is the correct one
    pub fn is_correct(&self, question: &Question) -> bool {
        self.get(question.id) == Some(question.correct_answer.as_str())
    }
}

impl<K: Into<u32>, V: Into<String>> FromIterator<(K, V)> for Answers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Outcome of grading a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    /// Percentage score (0-100)
    pub score: u8,
    /// Number of correct answers
    pub correct: usize,
    /// Number of questions graded
    pub total: usize,
    pub passed: bool,
}

/// Grade `answers` against `questions`.
///
/// The percentage is rounded half up. An empty question set scores 0 and does
/// not pass.
pub fn score(questions: &[Question], answers: &Answers) -> QuizResult {
    let total = questions.len();
    let correct = questions.iter().filter(|q| answers.is_correct(q)).count();

    let score = if total == 0 { 0 } else { ((200 * correct + total) / (2 * total)) as u8 };

    QuizResult { score, correct, total, passed: score >= PASS_THRESHOLD }
}

/// Where a quiz is in its answer/submit/retry cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuizPhase {
    #[default]
    Answering,
    Submitted(QuizResult),
}

/// Local quiz state for the chapter being viewed
#[derive(Debug, Clone, Default)]
pub struct Quiz {
    questions: Vec<Question>,
    answers: Answers,
    phase: QuizPhase,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions, answers: Answers::default(), phase: QuizPhase::Answering }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// The result of the last submission, if submitted
    pub fn result(&self) -> Option<QuizResult> {
        match self.phase {
            QuizPhase::Submitted(result) => Some(result),
            QuizPhase::Answering => None,
        }
    }

    /// Record an answer; only allowed while answering
    pub fn select(&mut self, question_id: u32, option_id: &str) -> Result<(), QuizError> {
        if self.phase != QuizPhase::Answering {
            return Err(QuizError::NotAnswering);
        }
        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or(QuizError::UnknownQuestion(question_id))?;
        if question.option(option_id).is_none() {
            return Err(QuizError::UnknownOption {
                question_id,
                option_id: option_id.to_string(),
            });
        }
        self.answers.select(question_id, option_id);
        Ok(())
    }

    /// Whether every question has been answered
    pub fn can_submit(&self) -> bool {
        self.phase == QuizPhase::Answering && self.answers.covers(&self.questions)
    }

    /// Number of questions still without an answer
    pub fn unanswered(&self) -> usize {
        self.questions.iter().filter(|q| self.answers.get(q.id).is_none()).count()
    }

    /// Grade the quiz and move to the submitted phase
    pub fn submit(&mut self) -> Result<QuizResult, QuizError> {
        if self.phase != QuizPhase::Answering {
            return Err(QuizError::NotAnswering);
        }
        if !self.answers.covers(&self.questions) {
            return Err(QuizError::Incomplete { unanswered: self.unanswered() });
        }
        let result = score(&self.questions, &self.answers);
        self.phase = QuizPhase::Submitted(result);
        Ok(result)
    }

    /// Clear all answers and return to answering
    pub fn reset(&mut self) {
        self.answers.clear();
        self.phase = QuizPhase::Answering;
    }
}

/// Supplies the questions for a chapter
pub trait QuizSource {
    fn questions_for(&self, chapter: &Chapter) -> Vec<Question>;
}

/// Uses questions embedded in the chapter, or the sample set when there are none
#[derive(Debug, Clone, Copy, Default)]
pub struct ChapterQuizSource;

impl QuizSource for ChapterQuizSource {
    fn questions_for(&self, chapter: &Chapter) -> Vec<Question> {
        if chapter.quiz.is_empty() {
            SampleQuizSource.questions_for(chapter)
        } else {
            chapter.quiz.clone()
        }
    }
}

/// Placeholder questions used until a course ships its own
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleQuizSource;

impl QuizSource for SampleQuizSource {
    fn questions_for(&self, chapter: &Chapter) -> Vec<Question> {
        let options = |texts: [&str; 4]| -> Vec<QuizOption> {
            ["a", "b", "c", "d"]
                .into_iter()
                .zip(texts)
                .map(|(id, t)| QuizOption::new(id, t))
                .collect()
        };

        vec![
            Question {
                id: 1,
                question: format!("What is the main topic of \"{}\"?", chapter.title),
                options: options([
                    "User Interface Design",
                    "User Experience Design",
                    "Interaction Design",
                    "Visual Design",
                ]),
                correct_answer: "b".into(),
            },
            Question {
                id: 2,
                question: "Which of these is NOT typically a UX design deliverable?".into(),
                options: options([
                    "Wireframes",
                    "User Personas",
                    "Source Code",
                    "User Journey Maps",
                ]),
                correct_answer: "c".into(),
            },
            Question {
                id: 3,
                question: "What is a key principle discussed in this chapter?".into(),
                options: options(["Consistency", "Complexity", "Customization", "Creativity"]),
                correct_answer: "a".into(),
            },
        ]
    }
}
