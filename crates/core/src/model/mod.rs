mod question;
mod range;

pub use question::{Question, QuestionMode, QuestionSet};
pub use range::{InvalidRangeError, MAX_NUMBER, RangeConfig, RangeDraft};
