//! The `hoctap validate` command.

use std::path::PathBuf;

use anyhow::Result;

use hoctap_core::parser;

pub fn execute(path: PathBuf) -> Result<()> {
    let sets = if path.is_dir() {
        parser::load_quiz_directory(&path)?
    } else {
        vec![parser::parse_quiz_set(&path)?]
    };

    let mut total_warnings = 0;

    for set in &sets {
        println!("Quiz set: {} ({} questions)", set.name, set.questions.len());

        let warnings = parser::validate_quiz_set(set);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [Q{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quiz sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
