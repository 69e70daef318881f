//! NEXUS Idle game state definitions.

use std::collections::BTreeMap;

use super::catalog::{self, UpgradeKind, CATALOG, PRICE_SCALING};
use super::logic;

/// A floating text particle ("+N" rising from the core after a click).
#[derive(Clone, Debug)]
pub struct Particle {
    pub text: String,
    /// Column offset from the center of the core display.
    pub col_offset: i16,
    /// Remaining lifetime in ticks.
    pub life: u32,
    /// Maximum lifetime (for computing vertical position).
    pub max_life: u32,
}

/// Message log entry.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Authoritative game state. A single instance, mutated only through the
/// operations in [`logic`](super::logic); the presentation layer reads it
/// and never writes.
pub struct NexusState {
    /// Spendable credits. Never negative.
    pub credits: f64,
    /// Lifetime credits earned. Never decreases, even on purchase.
    pub total_earned: f64,
    /// Manual click count.
    pub click_count: u64,
    /// Owned units per upgrade id. Absent means zero.
    pub owned: BTreeMap<String, u32>,
    /// Epoch ms of the last save; basis for offline catch-up on reload.
    pub last_saved_ms: u64,

    // ── Presentation transients (not persisted) ──
    /// Message log, bounded to the most recent 50 entries.
    pub log: Vec<LogEntry>,
    /// Whether the stats view is shown instead of the upgrade list.
    pub show_stats: bool,
    /// Animation frame counter (incremented every tick).
    pub anim_frame: u32,
    /// Click feedback flash (ticks remaining).
    pub click_flash: u32,
    /// Purchase feedback flash (ticks remaining).
    pub purchase_flash: u32,
    /// Active floating particles.
    pub particles: Vec<Particle>,
    /// xorshift32 state for particle spread.
    pub rng_state: u32,
}

impl NexusState {
    pub fn new(now_ms: u64) -> Self {
        let mut state = Self {
            credits: 0.0,
            total_earned: 0.0,
            click_count: 0,
            owned: BTreeMap::new(),
            last_saved_ms: now_ms,
            log: Vec::new(),
            show_stats: false,
            anim_frame: 0,
            click_flash: 0,
            purchase_flash: 0,
            particles: Vec::new(),
            rng_state: 0x4e58_5553,
        };
        state.add_log("NEXUS コア起動。タップしてクレジットを生成しよう。", true);
        state
    }

    /// Owned units of the given upgrade (0 when never purchased).
    pub fn owned_count(&self, id: &str) -> u32 {
        self.owned.get(id).copied().unwrap_or(0)
    }

    /// Credits generated per second by all passive upgrades. Recomputed
    /// from live ownership on every call; nothing is cached.
    pub fn passive_income_rate(&self) -> f64 {
        CATALOG
            .iter()
            .filter(|u| u.kind == UpgradeKind::Passive)
            .map(|u| self.owned_count(u.id) as f64 * u.base_value)
            .sum()
    }

    /// Credits earned per manual click. Base 1, plus click upgrades.
    pub fn click_power(&self) -> f64 {
        let bonus: f64 = CATALOG
            .iter()
            .filter(|u| u.kind == UpgradeKind::Click)
            .map(|u| self.owned_count(u.id) as f64 * u.base_value)
            .sum();
        1.0 + bonus
    }

    /// Cost of the next unit of the given upgrade.
    ///
    /// Panics on an id that is not in the catalog: ids are always supplied
    /// from the catalog itself, so a miss is a caller bug.
    pub fn price_of(&self, id: &str) -> f64 {
        let def = catalog::find(id).unwrap_or_else(|| panic!("unknown upgrade id: {id}"));
        logic::price(def.base_price, self.owned_count(id), PRICE_SCALING)
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > 50 {
            self.log.remove(0);
        }
    }

    /// xorshift32. Cheap deterministic randomness for particle spread.
    pub fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_empty() {
        let state = NexusState::new(1_000);
        assert_eq!(state.credits, 0.0);
        assert_eq!(state.total_earned, 0.0);
        assert_eq!(state.click_count, 0);
        assert_eq!(state.last_saved_ms, 1_000);
        assert_eq!(state.owned_count("data_shard"), 0);
    }

    #[test]
    fn passive_rate_sums_passive_upgrades_only() {
        let mut state = NexusState::new(0);
        state.owned.insert("data_shard".into(), 4); // 4 × 0.5
        state.owned.insert("node_basic".into(), 3); // 3 × 2
        state.owned.insert("click_module".into(), 10); // click kind, no CPS
        assert!((state.passive_income_rate() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn click_power_is_at_least_one() {
        let state = NexusState::new(0);
        assert!((state.click_power() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn click_power_counts_click_upgrades() {
        let mut state = NexusState::new(0);
        state.owned.insert("click_module".into(), 5);
        state.owned.insert("data_shard".into(), 5); // passive, no click bonus
        assert!((state.click_power() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn accessors_are_pure() {
        let mut state = NexusState::new(0);
        state.owned.insert("data_shard".into(), 7);
        state.owned.insert("click_module".into(), 2);
        assert_eq!(
            state.passive_income_rate().to_bits(),
            state.passive_income_rate().to_bits()
        );
        assert_eq!(state.click_power().to_bits(), state.click_power().to_bits());
        assert_eq!(
            state.price_of("data_shard").to_bits(),
            state.price_of("data_shard").to_bits()
        );
    }

    #[test]
    fn price_of_follows_ownership() {
        let mut state = NexusState::new(0);
        assert_eq!(state.price_of("click_module"), 15.0);
        state.owned.insert("click_module".into(), 1);
        assert_eq!(state.price_of("click_module"), 17.0);
        state.owned.insert("click_module".into(), 2);
        assert_eq!(state.price_of("click_module"), 19.0);
    }

    #[test]
    #[should_panic(expected = "unknown upgrade id")]
    fn price_of_unknown_id_panics() {
        let state = NexusState::new(0);
        let _ = state.price_of("warp_drive");
    }

    #[test]
    fn log_is_bounded() {
        let mut state = NexusState::new(0);
        for i in 0..80 {
            state.add_log(&format!("msg {i}"), false);
        }
        assert!(state.log.len() <= 50);
    }

    #[test]
    fn next_random_varies() {
        let mut state = NexusState::new(0);
        let a = state.next_random();
        let b = state.next_random();
        assert_ne!(a, b);
    }
}
