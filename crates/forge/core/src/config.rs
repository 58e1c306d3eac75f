/// Fixed odds expressed as `numerator` in `denominator`.
///
/// Used for the secondary "lucky" rolls whose balance is tuned outside the
/// protocol code (durability escape, quality bonus, drill upgrade).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Odds {
    pub numerator: u32,
    pub denominator: u32,
}

impl Odds {
    pub const NEVER: Self = Self::new(0, 1);

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Returns true when the odds can never succeed.
    pub const fn is_never(&self) -> bool {
        self.numerator == 0 || self.denominator == 0
    }

    /// Returns true when the odds always succeed.
    pub const fn is_certain(&self) -> bool {
        self.denominator != 0 && self.numerator >= self.denominator
    }
}

/// Enhancement balance configuration and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForgeConfig {
    /// Escape roll that suppresses the durability penalty after a failed
    /// level or quality upgrade.
    pub durability_escape: Odds,

    /// Bonus roll that forces success of an under-supplied quality upgrade
    /// before the main roll.
    pub quality_bonus: Odds,

    /// Sub-roll that converts tough drills into a star drill while sealing a
    /// second socket, aborting the socket operation.
    pub drill_upgrade: Odds,

    /// Composition tier from which a world announcement is broadcast.
    pub milestone_tier: u8,
}

impl ForgeConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of consumable ids accepted in a single request.
    pub const MAX_CONSUMABLES: usize = 40;
    /// Tier ceiling for every item class except wings.
    pub const MAX_TIER: u8 = 12;
    /// Tier ceiling for wing-class items.
    pub const MAX_WING_TIER: u8 = 15;
    /// Number of socket slots on an item.
    pub const SOCKET_SLOTS: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DURABILITY_ESCAPE: Odds = Odds::new(10, 2000);
    pub const DEFAULT_QUALITY_BONUS: Odds = Odds::new(2, 100);
    pub const DEFAULT_DRILL_UPGRADE: Odds = Odds::new(1, 100);
    pub const DEFAULT_MILESTONE_TIER: u8 = 9;

    pub fn new() -> Self {
        Self {
            durability_escape: Self::DEFAULT_DURABILITY_ESCAPE,
            quality_bonus: Self::DEFAULT_QUALITY_BONUS,
            drill_upgrade: Self::DEFAULT_DRILL_UPGRADE,
            milestone_tier: Self::DEFAULT_MILESTONE_TIER,
        }
    }

    pub fn with_milestone_tier(milestone_tier: u8) -> Self {
        Self {
            milestone_tier,
            ..Self::new()
        }
    }
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self::new()
    }
}
