//! The `hoctap checkin` command.

use std::path::PathBuf;

use anyhow::Result;

use hoctap_client::AppState;
use hoctap_client::app::ToastKind;
use hoctap_core::progress::StreakTier;

use super::{connect, Friendly};

pub async fn execute(config: Option<PathBuf>, status_only: bool) -> Result<()> {
    let ctx = connect(config)?;

    if status_only {
        let status = ctx.api.check_in_status().await.friendly()?;
        let tier = StreakTier::from_streak(status.streak);
        if status.checked_in_today {
            println!("Hôm nay bạn đã điểm danh.");
        } else {
            println!("Hôm nay bạn chưa điểm danh.");
        }
        println!("Chuỗi: {} ngày ({})", status.streak, tier.color_name());
        if let Some(last) = status.last_check_in {
            println!("Lần gần nhất: {}", last.format("%d/%m/%Y %H:%M"));
        }
        return Ok(());
    }

    let mut app = AppState::new(ctx.api);
    app.load_profile().await;
    // A level gained since the last run, e.g. from a finished lesson.
    if let Some(level) = app.take_celebration() {
        println!("Chúc mừng! Bạn đã lên cấp {level}!");
    }
    for toast in app.take_toasts() {
        tracing::warn!("profile: {}", toast.message);
    }
    app.check_in().await;

    let mut failed = false;
    for toast in app.take_toasts() {
        match toast.kind {
            ToastKind::Success => println!("{}", toast.message),
            ToastKind::Error => {
                failed = true;
                eprintln!("{}", toast.message);
            }
        }
    }
    if let Some(level) = app.take_celebration() {
        println!("Chúc mừng! Bạn đã lên cấp {level}!");
    }
    if let Some(status) = app.check_in.get() {
        println!("Chuỗi hiện tại: {} ngày", status.streak);
    }
    anyhow::ensure!(!failed, "điểm danh không thành công");
    Ok(())
}
