//! Quiz randomization and grading.
//!
//! Shuffling never mutates its input and never changes which option is
//! correct: the answer is tracked by value, not by position.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Question;

/// Return a uniformly random permutation of `items` (Fisher-Yates on a copy).
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// [`shuffle`] with a caller-supplied RNG, for reproducible orders.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}

/// Shuffle question order only; question contents are untouched.
pub fn shuffle_questions(questions: &[Question]) -> Vec<Question> {
    shuffle(questions)
}

pub fn shuffle_questions_with<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<Question> {
    shuffle_with(questions, rng)
}

/// Shuffle one question's options, keeping the same answer flagged correct.
pub fn shuffle_options(question: &Question) -> Question {
    shuffle_options_with(question, &mut rand::thread_rng())
}

pub fn shuffle_options_with<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Question {
    if question.options.is_empty() {
        return question.clone();
    }

    let options = shuffle_with(&question.options, rng);
    // A malformed question whose answer is not among its options keeps the
    // original value unresolved.
    let correct_answer = options
        .iter()
        .find(|o| **o == question.correct_answer)
        .cloned()
        .unwrap_or_else(|| question.correct_answer.clone());

    Question {
        content: question.content.clone(),
        options,
        correct_answer,
        explanation: question.explanation.clone(),
    }
}

/// Shuffle the options of every question independently.
pub fn shuffle_all_options(questions: &[Question]) -> Vec<Question> {
    shuffle_all_options_with(questions, &mut rand::thread_rng())
}

pub fn shuffle_all_options_with<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<Question> {
    questions
        .iter()
        .map(|q| shuffle_options_with(q, rng))
        .collect()
}

/// Outcome of grading a set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    /// Truncated percentage in `[0, 100]`.
    pub percent: u32,
}

/// Grade answers by value. `answers[i]` is the option chosen for
/// `questions[i]`; `None` or a missing entry counts as wrong.
pub fn score_answers(questions: &[Question], answers: &[Option<String>]) -> QuizScore {
    let total = questions.len();
    let correct = questions
        .iter()
        .zip(answers.iter().chain(std::iter::repeat(&None)))
        .filter(|(q, a)| a.as_deref() == Some(q.correct_answer.as_str()))
        .count();
    let percent = if total == 0 {
        0
    } else {
        (correct * 100 / total) as u32
    };

    QuizScore {
        correct,
        total,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(content: &str, options: &[&str], answer: &str) -> Question {
        Question {
            content: content.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: answer.into(),
            explanation: None,
        }
    }

    fn sample_set() -> Vec<Question> {
        (0..20)
            .map(|i| {
                question(
                    &format!("Câu hỏi {i}"),
                    &["Hàng hóa", "Tiền tệ", "Tư bản", "Lao động"],
                    "Tư bản",
                )
            })
            .collect()
    }

    #[test]
    fn shuffle_is_permutation_and_leaves_input_alone() {
        let input: Vec<u32> = (0..50).collect();
        let before = input.clone();
        let mut out = shuffle(&input);
        assert_eq!(input, before);
        assert_eq!(out.len(), input.len());
        out.sort_unstable();
        assert_eq!(out, input);
    }

    #[test]
    fn shuffle_empty() {
        let empty: Vec<String> = Vec::new();
        assert!(shuffle(&empty).is_empty());
        assert!(shuffle_questions(&[]).is_empty());
        assert!(shuffle_all_options(&[]).is_empty());
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let input: Vec<u32> = (0..30).collect();
        let a = shuffle_with(&input, &mut StdRng::seed_from_u64(7));
        let b = shuffle_with(&input, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_questions_keeps_contents() {
        let set = sample_set();
        let shuffled = shuffle_questions_with(&set, &mut StdRng::seed_from_u64(3));
        assert_eq!(shuffled.len(), set.len());
        for q in &set {
            assert_eq!(shuffled.iter().filter(|s| *s == q).count(), 1);
        }
    }

    #[test]
    fn shuffle_options_keeps_correct_answer() {
        let mut rng = StdRng::seed_from_u64(11);
        for q in sample_set() {
            let out = shuffle_options_with(&q, &mut rng);
            assert_eq!(out.correct_answer, q.correct_answer);
            assert!(out.options.contains(&out.correct_answer));
            let mut sorted_in = q.options.clone();
            let mut sorted_out = out.options.clone();
            sorted_in.sort();
            sorted_out.sort();
            assert_eq!(sorted_in, sorted_out);
            assert_eq!(out.content, q.content);
        }
    }

    #[test]
    fn shuffle_options_empty_is_identity() {
        let q = question("Trống", &[], "x");
        assert_eq!(shuffle_options(&q), q);
    }

    #[test]
    fn shuffle_options_unresolvable_answer_kept() {
        let q = question("Sai dữ liệu", &["a", "b", "c"], "d");
        let out = shuffle_options(&q);
        assert_eq!(out.correct_answer, "d");
        assert_eq!(out.options.len(), 3);
    }

    #[test]
    fn shuffle_all_options_touches_every_question() {
        let set = sample_set();
        let out = shuffle_all_options_with(&set, &mut StdRng::seed_from_u64(5));
        assert_eq!(out.len(), set.len());
        for (before, after) in set.iter().zip(&out) {
            assert_eq!(before.content, after.content);
            assert!(after.options.contains(&before.correct_answer));
        }
        // With 20 questions of 4 options, at least one order must change.
        assert!(set.iter().zip(&out).any(|(b, a)| b.options != a.options));
    }

    #[test]
    fn scoring() {
        let set = vec![
            question("1", &["a", "b"], "a"),
            question("2", &["a", "b"], "b"),
            question("3", &["a", "b"], "a"),
        ];
        let score = score_answers(&set, &[Some("a".into()), Some("a".into())]);
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 3);
        assert_eq!(score.percent, 33);

        let perfect = score_answers(
            &set,
            &[Some("a".into()), Some("b".into()), Some("a".into())],
        );
        assert_eq!(perfect.percent, 100);
        assert_eq!(score_answers(&[], &[]).percent, 0);
    }
}
