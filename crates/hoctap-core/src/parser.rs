//! TOML quiz-set parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuizSet};

/// Intermediate TOML structure for parsing quiz-set files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz_set: TomlQuizSetHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    content: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: String,
    #[serde(default)]
    explanation: Option<String>,
}

/// Parse a single TOML file into a `QuizSet`.
pub fn parse_quiz_set(path: &Path) -> Result<QuizSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz set file: {}", path.display()))?;

    parse_quiz_set_str(&content, path)
}

/// Parse a TOML string into a `QuizSet`.
pub fn parse_quiz_set_str(content: &str, source_path: &Path) -> Result<QuizSet> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            content: q.content.trim().to_string(),
            options: q.options,
            correct_answer: q.correct_answer,
            explanation: q.explanation,
        })
        .collect();

    Ok(QuizSet {
        id: parsed.quiz_set.id,
        name: parsed.quiz_set.name,
        description: parsed.quiz_set.description,
        questions,
    })
}

/// Recursively load all `.toml` quiz-set files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();

        if path.is_dir() {
            sets.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    sets.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(sets)
}

/// A warning from quiz-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    pub message: String,
}

/// Check a quiz set for questions that would render or grade wrongly.
pub fn validate_quiz_set(set: &QuizSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "quiz set has no questions".into(),
        });
    }

    for (i, q) in set.questions.iter().enumerate() {
        let number = Some(i + 1);

        if q.content.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "content is empty".into(),
            });
        }

        if q.options.is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "no options".into(),
            });
            continue;
        }

        let mut seen = HashSet::new();
        for option in &q.options {
            if option.trim().is_empty() {
                warnings.push(ValidationWarning {
                    question: number,
                    message: "empty option".into(),
                });
            } else if !seen.insert(option.as_str()) {
                warnings.push(ValidationWarning {
                    question: number,
                    message: format!("duplicate option: {option}"),
                });
            }
        }

        if !q.options.contains(&q.correct_answer) {
            warnings.push(ValidationWarning {
                question: number,
                message: format!("correct answer '{}' is not among the options", q.correct_answer),
            });
        }
    }

    warnings
}
