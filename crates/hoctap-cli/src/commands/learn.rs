//! `hoctap path` and `hoctap lesson`.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use hoctap_core::model::PathStatus;

use super::{connect, Friendly};

pub async fn path(config: Option<PathBuf>) -> Result<()> {
    let ctx = connect(config)?;
    let path = ctx.api.learning_path().await.friendly()?;

    if path.items.is_empty() {
        println!("Lộ trình trống. Hãy chọn chủ đề và trình độ trước.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Bài học", "Trạng thái", "Mã"]);
    for (i, item) in path.items.iter().enumerate() {
        let status = match item.status {
            PathStatus::Completed => "đã hoàn thành",
            PathStatus::Active => "đang học",
            PathStatus::Locked => "đã khóa",
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&item.title),
            Cell::new(status),
            Cell::new(&item.lesson_id),
        ]);
    }
    println!("{table}");
    println!(
        "Hoàn thành {}/{} bài.",
        path.completed_count(),
        path.items.len()
    );
    if let Some(next) = path.next_lesson() {
        println!("Bài tiếp theo: hoctap lesson {}", next.lesson_id);
    }
    Ok(())
}

pub async fn lesson(config: Option<PathBuf>, id: String, flashcards: bool) -> Result<()> {
    let ctx = connect(config)?;
    let lesson = ctx.api.lesson(&id).await.friendly()?;

    println!("# {}\n", lesson.title);
    println!("{}\n", lesson.content.trim());
    println!("{} câu hỏi trắc nghiệm.", lesson.questions.len());

    if flashcards {
        let cards = if lesson.flashcards.is_empty() {
            ctx.api.flashcards(&id).await.friendly()?
        } else {
            lesson.flashcards
        };
        let mut table = Table::new();
        table.set_header(vec!["Mặt trước", "Mặt sau"]);
        for card in &cards {
            table.add_row(vec![Cell::new(&card.front), Cell::new(&card.back)]);
        }
        println!("{table}");
    }
    Ok(())
}
