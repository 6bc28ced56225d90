use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::{Question, ShuffledQuestion};

/// Reorders the options of `question` uniformly at random.
///
/// The permutation is applied to option indices, so the correct answer is
/// tracked by its original position and never by its text.
pub fn shuffle<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> ShuffledQuestion {
    let mut order: Vec<usize> = (0..question.options.len()).collect();
    // Fisher-Yates
    order.shuffle(rng);

    let shuffled_options = order
        .iter()
        .map(|&original| question.options[original].clone())
        .collect::<Vec<_>>();

    // `order` is a permutation of 0..len and the bank guarantees correct_index < len
    let shuffled_correct_index = order
        .iter()
        .position(|&original| original == question.correct_index)
        .unwrap_or(0);

    ShuffledQuestion {
        question: question.clone(),
        shuffled_options,
        shuffled_correct_index,
    }
}

pub fn shuffle_all<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<ShuffledQuestion> {
    questions.iter().map(|q| shuffle(q, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn question(options: &[&str], correct_index: usize) -> Question {
        Question {
            id: 1,
            prompt: "Which one?".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_index,
            explanation: String::new(),
            celebration_asset: None,
            pose_preset: None,
        }
    }

    #[test]
    fn keeps_every_option_and_tracks_the_correct_one() {
        let q = question(&["tea", "coffee", "cocoa", "water"], 2);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let shuffled = shuffle(&q, &mut rng);

            let mut expected = q.options.clone();
            let mut actual = shuffled.shuffled_options.clone();
            expected.sort();
            actual.sort();
            assert_eq!(expected, actual);

            assert_eq!(
                shuffled.shuffled_options[shuffled.shuffled_correct_index],
                "cocoa"
            );
            assert!(shuffled.is_correct(shuffled.shuffled_correct_index));
        }
    }

    #[test]
    fn every_arrangement_shows_up() {
        let q = question(&["a", "b", "c"], 0);
        let mut rng = StdRng::seed_from_u64(99);

        let seen: HashSet<Vec<String>> = (0..600)
            .map(|_| shuffle(&q, &mut rng).shuffled_options)
            .collect();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn identical_text_does_not_move_the_correct_answer() {
        // two options share a label, only the original position decides
        let q = question(&["same", "same"], 1);
        let mut rng = StdRng::seed_from_u64(3);

        let mut positions = HashSet::new();
        for _ in 0..100 {
            let shuffled = shuffle(&q, &mut rng);
            positions.insert(shuffled.shuffled_correct_index);
        }
        // the correct answer lands in both slots across runs
        assert_eq!(positions.len(), 2);
    }
}
