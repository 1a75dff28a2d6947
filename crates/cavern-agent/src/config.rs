//! Agent tuning knobs.

/// How the explorer orders the neighbors it tries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchOrder {
    /// In the order the game state lists them (plain depth-first search).
    Neighbors,
    /// Closest to the orb first.
    #[default]
    Heuristic,
}

/// Configuration for [`Explorer`](crate::Explorer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExploreConfig {
    pub order: SearchOrder,
}

/// What the fleeing agent tries to do before heading out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FleePlan {
    /// Straight to the exit.
    Direct,
    /// Detour through the richest tile once, if affordable.
    Single,
    /// Keep detouring through the richest remaining tile while affordable.
    #[default]
    Greedy,
}

/// Configuration for [`Flee`](crate::Flee).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleeConfig {
    pub plan: FleePlan,
    /// Steps that must still be left on arrival at the exit after a detour.
    pub reserve: u64,
    /// When a detour is unaffordable, try poorer tiles instead of heading
    /// straight out.
    pub skip_unaffordable: bool,
}
