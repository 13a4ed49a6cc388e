use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionSet, RangeConfig};

/// Expand a validated range into a shuffled question set.
///
/// Every integer in `[min, max]` is asked exactly once. The number sequence
/// is shuffled uniformly once before expansion; question order is a uniform
/// permutation.
#[must_use]
pub fn generate(config: &RangeConfig) -> QuestionSet {
    let mut rng = rng();
    generate_with(config, &mut rng)
}

/// `generate` with a caller-supplied source of randomness.
#[must_use]
pub fn generate_with<R: Rng + ?Sized>(config: &RangeConfig, rng: &mut R) -> QuestionSet {
    let mut numbers: Vec<u32> = (config.min()..=config.max()).collect();
    numbers.as_mut_slice().shuffle(rng);

    let questions = numbers
        .into_iter()
        .map(|n| Question::for_number(config.mode(), n))
        .collect();
    QuestionSet::new(questions)
}
