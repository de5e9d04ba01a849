//! The `hoctap progress` command.

use anyhow::Result;

use hoctap_core::progress::{calculate_level_progress, StreakTier};

const BAR_WIDTH: usize = 20;

pub fn execute(level: u32, xp: f64, streak: u32) -> Result<()> {
    anyhow::ensure!(xp.is_finite() && xp >= 0.0, "xp must be a non-negative number");

    let progress = calculate_level_progress(Some(level), Some(xp));
    let filled = progress.progress as usize * BAR_WIDTH / 100;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));

    println!("Level {}", progress.level);
    println!(
        "[{bar}] {}% ({}/{} XP)",
        progress.progress, progress.current_level_xp, progress.xp_for_current_level
    );

    let tier = StreakTier::from_streak(streak);
    println!("Streak {streak}: {} {}", tier.color_name(), tier.hex());
    Ok(())
}
