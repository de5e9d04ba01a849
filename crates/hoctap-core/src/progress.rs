//! Level/XP progress and streak tiers.
//!
//! The leveling curve is exponential: level `n` needs
//! `floor(100 × 1.3^(n-1))` XP. Progress is truncated, then clamped, so a
//! stale XP value above the threshold still renders as a full bar.

use serde::{Deserialize, Serialize};

use crate::session::LAST_SHOWN_LEVEL_KEY;
use crate::traits::TokenStore;

pub const BASE_LEVEL_XP: f64 = 100.0;
pub const LEVEL_GROWTH: f64 = 1.3;

/// XP needed to complete `level`. Levels below 1 are treated as 1.
pub fn required_xp(level: u32) -> u64 {
    let exponent = f64::from(level.max(1) - 1);
    (BASE_LEVEL_XP * LEVEL_GROWTH.powf(exponent)).floor() as u64
}

/// Display data for the level bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    /// Percentage in `[0, 100]`.
    pub progress: u32,
    /// XP accumulated toward the current level.
    pub current_level_xp: f64,
    /// XP the current level requires.
    pub xp_for_current_level: u64,
}

/// Compute the level bar from the raw server values.
pub fn calculate_level_progress(user_level: Option<u32>, xp: Option<f64>) -> LevelProgress {
    let level = user_level.unwrap_or(1).max(1);
    let xp = match xp {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    };
    let needed = required_xp(level);
    let progress = ((xp / needed as f64 * 100.0).floor() as u32).min(100);

    LevelProgress {
        level,
        progress,
        current_level_xp: xp,
        xp_for_current_level: needed,
    }
}

/// Color bucket for the streak badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakTier {
    /// 0–1 days.
    None,
    /// 2–4 days.
    Spark,
    /// 5–7 days.
    Warm,
    /// 8–14 days.
    Hot,
    /// 15–24 days.
    Blazing,
    /// 25 days and up.
    Legendary,
}

impl StreakTier {
    pub fn from_streak(streak: u32) -> Self {
        match streak {
            0..=1 => StreakTier::None,
            2..=4 => StreakTier::Spark,
            5..=7 => StreakTier::Warm,
            8..=14 => StreakTier::Hot,
            15..=24 => StreakTier::Blazing,
            _ => StreakTier::Legendary,
        }
    }

    pub fn color_name(&self) -> &'static str {
        match self {
            StreakTier::None => "gray",
            StreakTier::Spark => "blue",
            StreakTier::Warm => "green",
            StreakTier::Hot => "orange",
            StreakTier::Blazing => "red",
            StreakTier::Legendary => "purple",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            StreakTier::None => "#9ca3af",
            StreakTier::Spark => "#3b82f6",
            StreakTier::Warm => "#22c55e",
            StreakTier::Hot => "#f97316",
            StreakTier::Blazing => "#ef4444",
            StreakTier::Legendary => "#a855f7",
        }
    }
}

/// Suppresses repeated level-up celebrations across sessions.
///
/// The last celebrated level lives in durable storage under
/// [`LAST_SHOWN_LEVEL_KEY`].
pub struct LevelUpTracker<'a> {
    store: &'a dyn TokenStore,
}

impl<'a> LevelUpTracker<'a> {
    pub fn new(store: &'a dyn TokenStore) -> Self {
        Self { store }
    }

    /// True exactly once per level gained. The first level ever seen is
    /// recorded without celebrating.
    pub fn should_celebrate(&self, current_level: u32) -> anyhow::Result<bool> {
        let last = self
            .store
            .get(LAST_SHOWN_LEVEL_KEY)?
            .and_then(|v| v.parse::<u32>().ok());

        let celebrate = match last {
            Some(last) => current_level > last,
            None => false,
        };
        if last.map_or(true, |last| current_level > last) {
            self.store
                .set(LAST_SHOWN_LEVEL_KEY, &current_level.to_string())?;
        }
        Ok(celebrate)
    }
}
