//! Core economy operations — pure functions over [`NexusState`], fully
//! testable without a browser.

use super::catalog::{self, PRICE_SCALING};
use super::state::{NexusState, Particle};

/// Cost of the next unit: `floor(base * scaling^owned)`.
pub fn price(base: f64, owned: u32, scaling: f64) -> f64 {
    (base * scaling.powi(owned as i32)).floor()
}

/// Manual click: add click power to credits and spawn a feedback particle.
pub fn click(state: &mut NexusState) {
    let power = state.click_power();
    state.credits += power;
    state.total_earned += power;
    state.click_count += 1;
    state.click_flash = 3;

    let col_offset = (state.next_random() % 13) as i16 - 6;
    let life = 8 + (state.next_random() % 5); // 8-12 ticks ≈ 0.8-1.2s
    state.particles.push(Particle {
        text: format!("+{}", format_number(power)),
        col_offset,
        life,
        max_life: life,
    });
    // Keep only a trailing window of particles
    if state.particles.len() > 20 {
        state.particles.remove(0);
    }
}

/// Try to buy one unit of the given upgrade. Returns `false` when credits
/// fall short of the current price — an expected outcome, not an error.
///
/// Panics on an id that is not in the catalog (caller bug: the
/// presentation layer only ever passes catalog ids).
pub fn purchase(state: &mut NexusState, id: &str) -> bool {
    let def = catalog::find(id).unwrap_or_else(|| panic!("unknown upgrade id: {id}"));
    let cost = price(def.base_price, state.owned_count(id), PRICE_SCALING);
    if state.credits < cost {
        return false;
    }

    state.credits -= cost;
    *state.owned.entry(def.id.to_string()).or_insert(0) += 1;
    state.purchase_flash = 5;

    let count = state.owned_count(id);
    state.add_log(&format!("{} を購入！ ({}基)", def.name, count), false);
    true
}

/// Accrue passive income for `delta_seconds` of wall-clock time.
/// Linear in the interval: two half-second ticks equal one full second,
/// so tick frequency never changes the income rate.
pub fn tick(state: &mut NexusState, delta_seconds: f64) {
    if delta_seconds <= 0.0 {
        return;
    }
    let rate = state.passive_income_rate();
    if rate > 0.0 {
        let gain = rate * delta_seconds;
        state.credits += gain;
        state.total_earned += gain;
    }
}

/// Advance presentation transients by `delta_ticks`: animation frame,
/// feedback flashes, particle lifetimes. No effect on the economy.
pub fn decay_effects(state: &mut NexusState, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }
    state.anim_frame = state.anim_frame.wrapping_add(delta_ticks);
    if state.click_flash > 0 {
        state.click_flash = state.click_flash.saturating_sub(delta_ticks);
    }
    if state.purchase_flash > 0 {
        state.purchase_flash = state.purchase_flash.saturating_sub(delta_ticks);
    }
    for p in &mut state.particles {
        p.life = p.life.saturating_sub(delta_ticks);
    }
    state.particles.retain(|p| p.life > 0);
}

/// Credit production that happened while the game was not running.
///
/// Elapsed time is whole seconds since `last_saved_ms`, saturating at zero
/// so clock skew (a save stamped in the future) can never go negative.
/// Returns the amount credited. Call once, right after loading a snapshot.
pub fn offline_progress(state: &mut NexusState, now_ms: u64) -> f64 {
    let elapsed_secs = now_ms.saturating_sub(state.last_saved_ms) / 1_000;
    if elapsed_secs == 0 {
        return 0.0;
    }
    let gain = state.passive_income_rate() * elapsed_secs as f64;
    if gain > 0.0 {
        state.credits += gain;
        state.total_earned += gain;
    }
    gain
}

/// Format a number compactly: `999 → "999"`, `1500 → "1.5K"`,
/// `2_000_000 → "2M"`. Suffix ladder matches thousands steps.
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    if n < 1_000.0 {
        let s = format!("{:.1}", n);
        return match s.strip_suffix(".0") {
            Some(trimmed) => trimmed.to_string(),
            None => s,
        };
    }

    const SUFFIXES: &[&str] = &["", "K", "M", "B", "T", "Q", "Qi", "Sx", "Sp"];
    let mut value = n;
    let mut idx = 0;
    while value >= 1_000.0 && idx < SUFFIXES.len() - 1 {
        value /= 1_000.0;
        idx += 1;
    }

    let s = if value >= 100.0 {
        format!("{:.0}", value)
    } else if value >= 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    };
    // Trim trailing decimal zeros ("2.50" → "2.5", "45.0" → "45"), but
    // never the zeros of a whole number ("250" stays "250")
    let s = match s.find('.') {
        Some(_) => s.trim_end_matches('0').trim_end_matches('.'),
        None => s.as_str(),
    };
    format!("{}{}", s, SUFFIXES[idx])
}
