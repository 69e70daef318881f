//! Static upgrade catalog.
//!
//! Fixed data in display order, defined once and never mutated at runtime.
//! Ownership counts live in [`NexusState`](super::state::NexusState),
//! keyed by upgrade id.

/// What a purchased unit contributes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeKind {
    /// Each owned unit adds `base_value` to manual click power.
    Click,
    /// Each owned unit adds `base_value` credits per second.
    Passive,
}

/// A single purchasable upgrade definition.
#[derive(Clone, Copy, Debug)]
pub struct UpgradeDef {
    /// Stable identifier; also the ownership / save key.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Cost of the first unit.
    pub base_price: f64,
    /// Contribution per owned unit (click power or credits/sec).
    pub base_value: f64,
    pub kind: UpgradeKind,
    pub icon: &'static str,
}

/// Geometric price growth per owned unit.
pub const PRICE_SCALING: f64 = 1.15;

/// All upgrades in display order.
pub const CATALOG: &[UpgradeDef] = &[
    UpgradeDef {
        id: "click_module",
        name: "Neural Link",
        description: "クリック +1",
        base_price: 15.0,
        base_value: 1.0,
        kind: UpgradeKind::Click,
        icon: "⚡",
    },
    UpgradeDef {
        id: "data_shard",
        name: "Data Shard",
        description: "毎秒 0.5 クレジット生成",
        base_price: 50.0,
        base_value: 0.5,
        kind: UpgradeKind::Passive,
        icon: "💎",
    },
    UpgradeDef {
        id: "node_basic",
        name: "Compute Node",
        description: "毎秒 2 クレジット生成",
        base_price: 150.0,
        base_value: 2.0,
        kind: UpgradeKind::Passive,
        icon: "🖥",
    },
    UpgradeDef {
        id: "array_quantum",
        name: "Quantum Array",
        description: "毎秒 12 クレジット生成",
        base_price: 1_200.0,
        base_value: 12.0,
        kind: UpgradeKind::Passive,
        icon: "🌀",
    },
    UpgradeDef {
        id: "ai_core",
        name: "Sentinel AI",
        description: "毎秒 55 クレジット生成",
        base_price: 8_500.0,
        base_value: 55.0,
        kind: UpgradeKind::Passive,
        icon: "🧠",
    },
    UpgradeDef {
        id: "nexus_relay",
        name: "Nexus Relay",
        description: "毎秒 280 クレジット生成",
        base_price: 45_000.0,
        base_value: 280.0,
        kind: UpgradeKind::Passive,
        icon: "📡",
    },
    UpgradeDef {
        id: "singularity",
        name: "The Singularity",
        description: "毎秒 1,500 クレジット生成",
        base_price: 250_000.0,
        base_value: 1_500.0,
        kind: UpgradeKind::Passive,
        icon: "⚛",
    },
];

/// Look up an upgrade definition by id.
pub fn find(id: &str) -> Option<&'static UpgradeDef> {
    CATALOG.iter().find(|u| u.id == id)
}
