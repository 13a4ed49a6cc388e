use serde::{Deserialize, Serialize};

/// Which kind of question a session asks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionMode {
    Squares,
    Roots,
}

/// A single prompt/answer pair, immutable once created.
///
/// Answers are compared as text: the submitted input is trimmed and must then
/// match the expected form exactly, so "144.0" or "+144" never count for 144.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    expected: String,
}

impl Question {
    /// Build the question asked about `n` under the given mode.
    ///
    /// Squares ask for `n^2`; roots display `n^2` and expect `n` back.
    #[must_use]
    pub fn for_number(mode: QuestionMode, n: u32) -> Self {
        let square = u64::from(n) * u64::from(n);
        match mode {
            QuestionMode::Squares => Self {
                prompt: format!("What is {n}^2?"),
                expected: square.to_string(),
            },
            QuestionMode::Roots => Self {
                prompt: format!("What is square root of {square}?"),
                expected: n.to_string(),
            },
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn expected_answer(&self) -> &str {
        &self.expected
    }

    /// Whether `raw` answers this question.
    #[must_use]
    pub fn is_correct(&self, raw: &str) -> bool {
        raw.trim() == self.expected
    }
}

/// Ordered questions for one run.
///
/// Built fresh when a session starts and discarded when it ends; a set is
/// never replayed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
