//! The `hoctap quiz` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use hoctap_core::parser::parse_quiz_set;
use hoctap_core::quiz::{score_answers, shuffle_all_options_with, shuffle_questions_with};

pub fn execute(
    file: PathBuf,
    seed: Option<u64>,
    answers: Option<String>,
    reveal: bool,
) -> Result<()> {
    let set = parse_quiz_set(&file)?;
    anyhow::ensure!(!set.questions.is_empty(), "quiz set has no questions");

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let questions = shuffle_questions_with(&set.questions, &mut rng);
    let questions = shuffle_all_options_with(&questions, &mut rng);

    println!("{} ({} câu)\n", set.name, questions.len());
    for (i, q) in questions.iter().enumerate() {
        println!("Câu {}: {}", i + 1, q.content);
        for (j, option) in q.options.iter().enumerate() {
            println!("  {}. {option}", j + 1);
        }
        if reveal {
            println!("  => {}", q.correct_answer);
            if let Some(explanation) = &q.explanation {
                println!("     {explanation}");
            }
        }
        println!();
    }

    if let Some(answers) = answers {
        let chosen = parse_answers(&answers, &questions)?;
        let score = score_answers(&questions, &chosen);
        println!(
            "Kết quả: {}/{} câu đúng ({}%)",
            score.correct, score.total, score.percent
        );
    }
    Ok(())
}

/// Map "2,1,,3" onto the displayed options. Blank entries are unanswered.
fn parse_answers(
    raw: &str,
    questions: &[hoctap_core::model::Question],
) -> Result<Vec<Option<String>>> {
    let parts: Vec<&str> = raw.split(',').collect();
    anyhow::ensure!(
        parts.len() <= questions.len(),
        "{} answers given for {} questions",
        parts.len(),
        questions.len()
    );
    parts
        .into_iter()
        .zip(questions)
        .enumerate()
        .map(|(i, (part, q))| {
            let part = part.trim();
            if part.is_empty() {
                return Ok(None);
            }
            let n: usize = part
                .parse()
                .with_context(|| format!("answer {} is not a number: {part}", i + 1))?;
            let option = n
                .checked_sub(1)
                .and_then(|idx| q.options.get(idx))
                .with_context(|| format!("answer {} is out of range: {n}", i + 1))?;
            Ok(Some(option.clone()))
        })
        .collect()
}
