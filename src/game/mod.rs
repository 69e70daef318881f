//! NEXUS Idle — タップと自動生産でクレジットを増やすインクリメンタルゲーム。

pub mod actions;
pub mod catalog;
pub mod logic;
pub mod render;
pub mod save;
pub mod simulator;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::time::TICKS_PER_SEC;

use state::NexusState;

/// Game façade: owns the authoritative state and drives it from host
/// events. All mutation goes through here, one event at a time.
pub struct NexusGame {
    pub state: NexusState,
    /// Ticks until the next autosave.
    autosave_in: u32,
}

impl NexusGame {
    pub fn new(now_ms: u64) -> Self {
        Self {
            state: NexusState::new(now_ms),
            autosave_in: save::AUTOSAVE_INTERVAL,
        }
    }

    /// Restore the previous session if a save exists, crediting offline
    /// production before the first tick runs.
    pub fn load_or_new() -> Self {
        let now_ms = js_sys::Date::now() as u64;
        let mut game = Self::new(now_ms);
        game.restore(now_ms);
        game
    }

    #[cfg(target_arch = "wasm32")]
    fn restore(&mut self, now_ms: u64) {
        if save::load_game(&mut self.state) {
            let gained = logic::offline_progress(&mut self.state, now_ms);
            if gained > 0.0 {
                self.state.add_log(
                    &format!("オフライン収益 +{} クレジット", logic::format_number(gained)),
                    true,
                );
            } else {
                self.state.add_log("セーブデータを読み込みました。", false);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn restore(&mut self, _now_ms: u64) {}

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(action) => self.handle_action(*action),
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'c' | ' ' => {
                logic::click(&mut self.state);
                true
            }
            's' => {
                self.state.show_stats = !self.state.show_stats;
                true
            }
            '1'..='9' => {
                let idx = key as usize - '1' as usize;
                match catalog::CATALOG.get(idx) {
                    Some(def) => {
                        logic::purchase(&mut self.state, def.id);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn handle_action(&mut self, action: u16) -> bool {
        match action {
            actions::CLICK_CORE => {
                logic::click(&mut self.state);
                true
            }
            actions::TAB_UPGRADES => {
                self.state.show_stats = false;
                true
            }
            actions::TAB_STATS => {
                self.state.show_stats = true;
                true
            }
            a if a >= actions::BUY_UPGRADE_BASE => {
                let idx = (a - actions::BUY_UPGRADE_BASE) as usize;
                match catalog::CATALOG.get(idx) {
                    Some(def) => {
                        logic::purchase(&mut self.state, def.id);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Advance the game by `delta_ticks` fixed ticks.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        logic::tick(&mut self.state, delta_ticks as f64 / TICKS_PER_SEC as f64);
        logic::decay_effects(&mut self.state, delta_ticks);

        // Autosave on a fixed cadence, independent of user activity
        self.autosave_in = self.autosave_in.saturating_sub(delta_ticks);
        if self.autosave_in == 0 {
            self.autosave_in = save::AUTOSAVE_INTERVAL;
            self.persist();
        }
    }

    fn persist(&self) {
        #[cfg(target_arch = "wasm32")]
        save::save_game(&self.state);
    }

    /// Render the game into the given area.
    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_c_clicks() {
        let mut game = NexusGame::new(0);
        assert!(game.handle_input(&InputEvent::Key('c')));
        assert!((game.state.credits - 1.0).abs() < 1e-9);
        assert_eq!(game.state.click_count, 1);
    }

    #[test]
    fn space_also_clicks() {
        let mut game = NexusGame::new(0);
        assert!(game.handle_input(&InputEvent::Key(' ')));
        assert_eq!(game.state.click_count, 1);
    }

    #[test]
    fn digit_keys_buy_by_catalog_index() {
        let mut game = NexusGame::new(0);
        game.state.credits = 100.0;
        game.state.total_earned = 100.0;
        assert!(game.handle_input(&InputEvent::Key('2'))); // data_shard, 50
        assert_eq!(game.state.owned_count("data_shard"), 1);
        assert!((game.state.credits - 50.0).abs() < 1e-9);
    }

    #[test]
    fn digit_beyond_catalog_is_ignored() {
        let mut game = NexusGame::new(0);
        game.state.credits = 1e9;
        assert!(!game.handle_input(&InputEvent::Key('9')));
        assert!((game.state.credits - 1e9).abs() < 1e-9);
    }

    #[test]
    fn s_toggles_stats_view() {
        let mut game = NexusGame::new(0);
        assert!(!game.state.show_stats);
        game.handle_input(&InputEvent::Key('s'));
        assert!(game.state.show_stats);
        game.handle_input(&InputEvent::Key('s'));
        assert!(!game.state.show_stats);
    }

    #[test]
    fn unknown_key_is_not_consumed() {
        let mut game = NexusGame::new(0);
        assert!(!game.handle_input(&InputEvent::Key('z')));
    }

    #[test]
    fn click_action_clicks() {
        let mut game = NexusGame::new(0);
        assert!(game.handle_input(&InputEvent::Click(actions::CLICK_CORE)));
        assert_eq!(game.state.click_count, 1);
    }

    #[test]
    fn tab_actions_switch_views() {
        let mut game = NexusGame::new(0);
        game.handle_input(&InputEvent::Click(actions::TAB_STATS));
        assert!(game.state.show_stats);
        game.handle_input(&InputEvent::Click(actions::TAB_UPGRADES));
        assert!(!game.state.show_stats);
    }

    #[test]
    fn buy_action_uses_catalog_index() {
        let mut game = NexusGame::new(0);
        game.state.credits = 200.0;
        assert!(game.handle_input(&InputEvent::Click(actions::BUY_UPGRADE_BASE + 2)));
        assert_eq!(game.state.owned_count("node_basic"), 1);
    }

    #[test]
    fn buy_action_out_of_range_is_ignored() {
        let mut game = NexusGame::new(0);
        game.state.credits = 1e9;
        assert!(!game.handle_input(&InputEvent::Click(actions::BUY_UPGRADE_BASE + 99)));
    }

    #[test]
    fn tick_accrues_at_tick_rate() {
        let mut game = NexusGame::new(0);
        game.state.owned.insert("data_shard".into(), 2); // 1 credit/sec
        game.tick(TICKS_PER_SEC); // one second
        assert!((game.state.credits - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tick_zero_is_a_noop() {
        let mut game = NexusGame::new(0);
        game.state.owned.insert("data_shard".into(), 2);
        game.tick(0);
        assert_eq!(game.state.credits, 0.0);
    }

    #[test]
    fn autosave_countdown_wraps() {
        let mut game = NexusGame::new(0);
        game.tick(save::AUTOSAVE_INTERVAL - 1);
        assert_eq!(game.autosave_in, 1);
        game.tick(1); // persist fires (no-op off-wasm), countdown resets
        assert_eq!(game.autosave_in, save::AUTOSAVE_INTERVAL);
    }

    #[test]
    fn tick_frequency_does_not_change_income() {
        let mut coarse = NexusGame::new(0);
        coarse.state.owned.insert("array_quantum".into(), 1);
        coarse.tick(10);

        let mut fine = NexusGame::new(0);
        fine.state.owned.insert("array_quantum".into(), 1);
        for _ in 0..10 {
            fine.tick(1);
        }

        assert!((coarse.state.credits - fine.state.credits).abs() < 1e-9);
    }
}
