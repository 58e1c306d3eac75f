//! Closed balance tables shared by the protocols.
use crate::state::{GemGrade, ItemTypeId, Quality};

// ============================================================================
// Composition
// ============================================================================

/// Progress contributed by a composition source of the given tier.
pub const COMPOSITION_POINTS: [u32; 13] = [
    0, 10, 40, 120, 360, 1080, 3240, 9720, 29160, 87480, 262440, 787320, 2361960,
];

/// Progress needed to leave each tier.
pub const TIER_THRESHOLDS: [u32; 15] = [
    20, 20, 80, 240, 720, 2160, 6480, 19440, 58320, 2700, 5500, 9000, 12000, 14000, 16000,
];

pub fn composition_points(tier: u8) -> u32 {
    COMPOSITION_POINTS
        .get(usize::from(tier))
        .copied()
        .unwrap_or(COMPOSITION_POINTS[COMPOSITION_POINTS.len() - 1])
}

/// Threshold of the given tier, `None` past the last refinable tier.
pub fn threshold(tier: u8) -> Option<u32> {
    TIER_THRESHOLDS.get(usize::from(tier)).copied()
}

/// Percentage derived from a progress ratio, clamped to 100.
pub fn progress_rate(progress: u32, threshold: u32) -> u32 {
    if threshold == 0 {
        return 0;
    }
    let rate = u64::from(progress) * 100 / u64::from(threshold);
    rate.min(100) as u32
}

// ============================================================================
// Level and quality upgrades
// ============================================================================

/// Meteor units needed to raise an item of the given level.
pub fn meteors_required(level: u8) -> u32 {
    (u32::from(level) / 15).max(2)
}

/// Base success percentage of a quality upgrade from the given grade.
pub fn quality_base_percent(quality: Quality) -> Option<u32> {
    match quality {
        Quality::Normal => Some(50),
        Quality::Refined => Some(34),
        Quality::Unique => Some(20),
        Quality::Elite => Some(10),
        Quality::Fixed | Quality::Super => None,
    }
}

/// Dragon-ball units guaranteeing a quality upgrade at the given base.
pub fn quality_required(base_percent: u32) -> u32 {
    100u32.div_ceil(base_percent.max(1))
}

/// Supply-proportional percentage of the insufficient policy, clamped to [1, 100].
pub fn scaled_percent(base_percent: u32, total: u32, required: u32) -> u32 {
    if required == 0 {
        return 100;
    }
    let scaled = u64::from(base_percent) * u64::from(total) / u64::from(required);
    scaled.clamp(1, 100) as u32
}

// ============================================================================
// Enchant
// ============================================================================

/// Enchantment range drawn from a gem.
pub fn enchant_range(gem: ItemTypeId, grade: GemGrade) -> (u8, u8) {
    const DRAGON_FAMILY: u32 = 1;
    match grade {
        GemGrade::Normal => (1, 59),
        GemGrade::Refined => (60, 109),
        GemGrade::Super if gem.gem_family() == DRAGON_FAMILY => (200, 255),
        GemGrade::Super => (110, 199),
    }
}

// ============================================================================
// Talisman charge
// ============================================================================

/// Charge needed to open the first socket.
pub const SOCKET_ONE_CHARGE: u32 = 8_000;
/// Additional charge needed to open the second socket.
pub const SOCKET_TWO_CHARGE: u32 = 20_000;

const TALISMAN_TIER_POINTS: [u32; 13] = [
    0, 90, 200, 450, 1500, 3700, 9000, 29000, 80000, 150000, 270000, 480000, 1000000,
];

pub fn talisman_quality_points(quality: Quality) -> u32 {
    match quality {
        Quality::Refined => 5,
        Quality::Unique => 10,
        Quality::Elite => 40,
        Quality::Super => 1000,
        Quality::Fixed | Quality::Normal => 0,
    }
}

pub fn talisman_tier_points(tier: u8) -> u32 {
    TALISMAN_TIER_POINTS
        .get(usize::from(tier))
        .copied()
        .unwrap_or(TALISMAN_TIER_POINTS[TALISMAN_TIER_POINTS.len() - 1])
}

pub fn talisman_socket_points(sockets: usize) -> u32 {
    match sockets {
        0 => 0,
        1 => 160,
        _ => 960,
    }
}

// ============================================================================
// Socket embed
// ============================================================================

/// Dragon-ball units opening a weapon socket (index 0 or 1).
pub fn weapon_socket_units(socket: usize) -> u32 {
    if socket == 0 { 1 } else { 5 }
}

/// Dragon-ball units opening the first socket of gear.
pub const GEAR_SOCKET_ONE_UNITS: u32 = 12;

/// Tough drills opening the second socket of gear.
pub fn tough_drills_required(quality_digit: u8) -> u32 {
    match quality_digit {
        0..=6 => 3,
        7 => 5,
        8 => 7,
        _ => 9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_tables_match_examples() {
        assert_eq!(composition_points(3), 120);
        assert_eq!(composition_points(7), 9720);
        assert_eq!(threshold(2), Some(80));
        assert_eq!(threshold(14), Some(16000));
        assert_eq!(threshold(15), None);
    }

    #[test]
    fn quality_requirements() {
        assert_eq!(quality_required(50), 2);
        assert_eq!(quality_required(34), 3);
        assert_eq!(quality_required(20), 5);
        assert_eq!(quality_required(10), 10);
        assert_eq!(scaled_percent(10, 2, 10), 2);
        assert_eq!(scaled_percent(10, 0, 10), 1);
    }

    #[test]
    fn meteor_requirement_has_floor() {
        assert_eq!(meteors_required(15), 2);
        assert_eq!(meteors_required(90), 6);
    }

    #[test]
    fn super_dragon_gem_has_own_range() {
        assert_eq!(enchant_range(ItemTypeId(700_013), GemGrade::Super), (200, 255));
        assert_eq!(enchant_range(ItemTypeId(700_003), GemGrade::Super), (110, 199));
        assert_eq!(enchant_range(ItemTypeId(700_012), GemGrade::Refined), (60, 109));
    }

    #[test]
    fn rate_is_clamped() {
        assert_eq!(progress_rate(40, 80), 50);
        assert_eq!(progress_rate(500, 80), 100);
    }
}
