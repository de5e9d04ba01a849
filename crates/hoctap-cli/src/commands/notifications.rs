//! The `hoctap notifications` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};

use hoctap_client::NotificationCenter;
use hoctap_core::model::Notification;

use super::{connect, Friendly};

pub async fn execute(
    config: Option<PathBuf>,
    watch: bool,
    read: Option<String>,
    read_all: bool,
) -> Result<()> {
    let ctx = connect(config)?;
    anyhow::ensure!(
        ctx.api.session().is_authenticated(),
        "Chưa đăng nhập. Chạy `hoctap login`."
    );
    let center = Arc::new(NotificationCenter::new(ctx.api.clone()));

    if watch {
        return watch_loop(center, ctx.config.poll_interval()).await;
    }

    let unread = if let Some(id) = read {
        center.mark_read(&id).await.friendly()?
    } else if read_all {
        center.mark_all_read().await.friendly()?
    } else {
        center.refresh().await.friendly()?
    };

    print_table(&center.items());
    println!("{unread} chưa đọc");
    Ok(())
}

async fn watch_loop(center: Arc<NotificationCenter>, every: std::time::Duration) -> Result<()> {
    let mut updates = center.subscribe();
    let poller = center.start_polling(every);
    eprintln!("Đang theo dõi thông báo (Ctrl+C để dừng)...");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let unread = *updates.borrow_and_update();
                print_table(&center.items());
                println!("{unread} chưa đọc\n");
            }
        }
    }

    poller.stop().await;
    Ok(())
}

fn print_table(items: &[Notification]) {
    if items.is_empty() {
        println!("Không có thông báo.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["", "Mã", "Tiêu đề", "Thời gian"]);
    for n in items {
        table.add_row(vec![
            Cell::new(if n.is_read { " " } else { "*" }),
            Cell::new(&n.id),
            Cell::new(&n.title),
            Cell::new(
                n.created_at
                    .map(|t| t.format("%d/%m/%Y %H:%M").to_string())
                    .unwrap_or_default(),
            ),
        ]);
    }
    println!("{table}");
}
