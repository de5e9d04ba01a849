//! `hoctap login`, `register`, `logout` and `me`.

use std::path::PathBuf;

use anyhow::Result;

use hoctap_core::forms::{LoginForm, RegisterForm};
use hoctap_core::progress::{calculate_level_progress, StreakTier};

use super::{connect, Friendly};

pub async fn login(config: Option<PathBuf>, email: String, password: String) -> Result<()> {
    let ctx = connect(config)?;
    let outcome = ctx
        .api
        .login(&LoginForm { email, password })
        .await
        .friendly()?;

    let name = if outcome.user.full_name.is_empty() {
        &outcome.user.email
    } else {
        &outcome.user.full_name
    };
    println!("Xin chào, {name}!");
    println!("Tiếp theo: {}", outcome.destination.path());
    if !outcome.user.is_privileged() && !outcome.user.is_verified {
        println!("Email chưa được xác minh. Vui lòng kiểm tra hộp thư.");
    }
    Ok(())
}

pub async fn register(
    config: Option<PathBuf>,
    full_name: String,
    email: String,
    password: String,
    captcha_token: Option<String>,
) -> Result<()> {
    let ctx = connect(config)?;
    let form = RegisterForm {
        full_name,
        email,
        confirm_password: password.clone(),
        password,
        captcha_token,
    };
    let message = ctx.api.register(&form).await.friendly()?;
    println!(
        "{}",
        message.unwrap_or_else(|| "Đăng ký thành công. Vui lòng kiểm tra email để xác minh tài khoản.".into())
    );
    Ok(())
}

pub async fn logout(config: Option<PathBuf>) -> Result<()> {
    let ctx = connect(config)?;
    ctx.api.logout().await.friendly()?;
    println!("Đã đăng xuất.");
    Ok(())
}

pub async fn me(config: Option<PathBuf>) -> Result<()> {
    let ctx = connect(config)?;
    anyhow::ensure!(
        ctx.api.session().is_authenticated(),
        "Chưa đăng nhập. Chạy `hoctap login`."
    );
    let user = ctx.api.me().await.friendly()?;

    let progress = calculate_level_progress(user.user_level, user.xp);
    let tier = StreakTier::from_streak(user.streak);

    println!("{} <{}>", user.full_name, user.email);
    println!("Vai trò: {}", user.role());
    println!(
        "Cấp {}: {}/{} XP ({}%)",
        progress.level, progress.current_level_xp, progress.xp_for_current_level, progress.progress
    );
    println!("Chuỗi ngày học: {} ({})", user.streak, tier.color_name());
    if let Some(level) = &user.level {
        println!("Trình độ: {level}");
    }
    if !user.has_completed_onboarding() && !user.is_privileged() {
        println!("Chưa hoàn tất chọn chủ đề / trình độ / kỹ năng.");
    }
    Ok(())
}
