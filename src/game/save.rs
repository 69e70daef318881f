//! セーブ/ロード機能。
//!
//! ## バージョニング方針
//!
//! - ストレージキー自体を世代付きにする (`nexus_idle_save_v1`)。
//!   互換性のないフォーマット変更時は新しいキーへ移行する。
//! - ペイロードにも `version` を持ち、フィールド追加時にインクリメントする。
//!   `MIN_COMPATIBLE_VERSION` 以上のセーブデータは、不足フィールドに
//!   デフォルト値を補完して読み込む（前方互換の浅いマージ）。
//! - パース不能なデータは破棄して新規ゲーム扱い。起動を止めない。

#[cfg(any(target_arch = "wasm32", test))]
use std::collections::BTreeMap;

#[cfg(any(target_arch = "wasm32", test))]
use serde::{Deserialize, Serialize};

#[cfg(any(target_arch = "wasm32", test))]
use super::catalog;
#[cfg(any(target_arch = "wasm32", test))]
use super::state::NexusState;

#[cfg(any(target_arch = "wasm32", test))]
const SAVE_VERSION: u32 = 1;

#[cfg(any(target_arch = "wasm32", test))]
const MIN_COMPATIBLE_VERSION: u32 = 1;

/// localStorage のキー。フォーマット世代をキー名で分ける。
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "nexus_idle_save_v1";

/// オートセーブの間隔 (tick数)。10 ticks/sec × 5秒 = 50 ticks。
pub const AUTOSAVE_INTERVAL: u32 = 50;

/// シリアライズ用のセーブデータ。UI の一時状態（パーティクル、
/// フラッシュ、ログ等）は含まない。
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct GameSave {
    credits: f64,
    total_earned: f64,
    click_count: u64,
    /// アップグレードID → 所持数。
    ownership: BTreeMap<String, u32>,
    /// セーブ時刻 (epoch ms)。0 は「不明」扱いでオフライン進行なし。
    last_saved_ms: u64,
}

/// `NexusState` からセーブ用データを抽出する。`now_ms` がスナップショットの
/// セーブ時刻として刻印される。
#[cfg(any(target_arch = "wasm32", test))]
fn extract_save(state: &NexusState, now_ms: u64) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            credits: state.credits,
            total_earned: state.total_earned,
            click_count: state.click_count,
            ownership: state.owned.clone(),
            last_saved_ms: now_ms,
        },
    }
}

/// セーブデータを `NexusState` に復元する。
/// カタログに存在しないIDの所持数は無視する。
#[cfg(any(target_arch = "wasm32", test))]
fn apply_save(state: &mut NexusState, save: &GameSave) {
    state.credits = save.credits;
    state.total_earned = save.total_earned;
    state.click_count = save.click_count;

    state.owned = save
        .ownership
        .iter()
        .filter(|(id, _)| catalog::find(id).is_some())
        .map(|(id, count)| (id.clone(), *count))
        .collect();

    // 0 (旧データ・欠損) の場合は state 側の「現在時刻」を維持し、
    // オフライン進行を発生させない。
    if save.last_saved_ms > 0 {
        state.last_saved_ms = save.last_saved_ms;
    }
}

/// localStorage にアクセスする。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// ゲーム状態を localStorage に保存する。
/// 失敗時はサイレントに無視（コンソールに警告を出力）。
#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &NexusState) {
    let now_ms = js_sys::Date::now() as u64;
    let save_data = extract_save(state, now_ms);
    let json = match serde_json::to_string(&save_data) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(&format!("NEXUS Idle: セーブのシリアライズに失敗: {e}").into());
            return;
        }
    };

    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            web_sys::console::warn_1(
                &format!("NEXUS Idle: localStorage への保存に失敗: {e:?}").into(),
            );
        }
    }
}

/// localStorage からゲーム状態を復元する。
/// データが無い・壊れている・バージョンが古すぎる場合は false を返す
/// （新規ゲームになる）。
#[cfg(target_arch = "wasm32")]
pub fn load_game(state: &mut NexusState) -> bool {
    let storage = match get_storage() {
        Some(s) => s,
        None => return false,
    };

    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return false,
    };

    let save_data: SaveData = match serde_json::from_str(&json) {
        Ok(d) => d,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("NEXUS Idle: セーブデータのパースに失敗（破棄します）: {e}").into(),
            );
            let _ = storage.remove_item(STORAGE_KEY);
            return false;
        }
    };

    if save_data.version < MIN_COMPATIBLE_VERSION {
        web_sys::console::log_1(
            &format!(
                "NEXUS Idle: セーブバージョンが古すぎます (saved={}, min_compatible={})。新規ゲームを開始します。",
                save_data.version, MIN_COMPATIBLE_VERSION
            )
            .into(),
        );
        let _ = storage.remove_item(STORAGE_KEY);
        return false;
    }

    apply_save(state, &save_data.game);
    true
}

/// セーブデータを削除する。
#[cfg(target_arch = "wasm32")]
#[allow(dead_code)]
pub fn delete_save() {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}
