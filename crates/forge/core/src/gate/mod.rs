//! Eligibility gate: decides whether an item may be touched at all.
//!
//! Pure predicates over the item, its sort and its definition. Every check
//! runs before the ledger opens, so an ineligible request spends nothing.
mod ceilings;

pub use ceilings::{level_ceiling, meteor_ceiling};

use crate::config::ForgeConfig;
use crate::enhance::EligibilityError;
use crate::env::ItemTypeDefinition;
use crate::state::{Item, ItemSort, Quality};

/// Cost family of a level upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum UpgradeFamily {
    /// Paid with meteors, probabilistic when under-supplied.
    Meteor,
    /// Paid with one dragon ball, always succeeds.
    DragonBall,
}

/// Highest tier the item can reach.
pub fn tier_ceiling(sort: ItemSort, definition: &ItemTypeDefinition) -> u8 {
    let class = if matches!(sort, ItemSort::Wing) {
        ForgeConfig::MAX_WING_TIER
    } else {
        ForgeConfig::MAX_TIER
    };
    definition.max_tier.map_or(class, |cap| cap.min(class))
}

fn ensure_below_ceiling(item: &Item, ceiling: u8) -> Result<(), EligibilityError> {
    if item.tier >= ceiling {
        return Err(EligibilityError::TierCeiling {
            tier: item.tier,
            ceiling,
        });
    }
    Ok(())
}

/// Composition target: any tierable item except mounts.
pub fn check_composition(
    item: &Item,
    definition: &ItemTypeDefinition,
) -> Result<u8, EligibilityError> {
    let sort = item.item_type.sort();
    if sort.is_stock() || matches!(sort, ItemSort::Mount) {
        return Err(EligibilityError::WrongClass(sort));
    }
    let ceiling = tier_ceiling(sort, definition);
    ensure_below_ceiling(item, ceiling)?;
    Ok(ceiling)
}

/// Mount refine target: a mount below its tier ceiling.
pub fn check_mount_refine(
    item: &Item,
    definition: &ItemTypeDefinition,
) -> Result<u8, EligibilityError> {
    let sort = item.item_type.sort();
    if !matches!(sort, ItemSort::Mount) {
        return Err(EligibilityError::WrongClass(sort));
    }
    let ceiling = tier_ceiling(sort, definition);
    ensure_below_ceiling(item, ceiling)?;
    Ok(ceiling)
}

/// Quick refine target: any tierable item holding progress.
pub fn check_quick_refine(
    item: &Item,
    definition: &ItemTypeDefinition,
) -> Result<u8, EligibilityError> {
    let sort = item.item_type.sort();
    if sort.is_stock() {
        return Err(EligibilityError::WrongClass(sort));
    }
    let ceiling = tier_ceiling(sort, definition);
    ensure_below_ceiling(item, ceiling)?;
    if item.progress == 0 {
        return Err(EligibilityError::NoProgress);
    }
    Ok(ceiling)
}

/// Level upgrade: selects the cost family from the ceiling tables.
pub fn check_level_upgrade(
    item: &Item,
    definition: &ItemTypeDefinition,
) -> Result<UpgradeFamily, EligibilityError> {
    let sort = item.item_type.sort();
    let ceiling = level_ceiling(sort).ok_or(EligibilityError::WrongClass(sort))?;
    if definition.level >= ceiling {
        return Err(EligibilityError::LevelCeiling {
            level: definition.level,
            ceiling,
        });
    }
    if definition.level_successor.is_none() {
        return Err(EligibilityError::NoLevelSuccessor);
    }
    match meteor_ceiling(sort) {
        Some(bracket) if definition.level < bracket => Ok(UpgradeFamily::Meteor),
        _ => Ok(UpgradeFamily::DragonBall),
    }
}

/// Quality upgrade: equipment with a changeable grade and a successor.
pub fn check_quality_upgrade(
    item: &Item,
    definition: &ItemTypeDefinition,
) -> Result<Quality, EligibilityError> {
    let sort = item.item_type.sort();
    if !sort.is_equipment() {
        return Err(EligibilityError::WrongClass(sort));
    }
    let quality = item.item_type.quality();
    if matches!(quality, Quality::Fixed) {
        return Err(EligibilityError::FixedQuality);
    }
    if matches!(quality, Quality::Super) || definition.quality_successor.is_none() {
        return Err(EligibilityError::NoQualitySuccessor);
    }
    Ok(quality)
}

/// Enchant target: weapons and gear only.
pub fn check_enchant(item: &Item) -> Result<(), EligibilityError> {
    let sort = item.item_type.sort();
    if !sort.is_equipment() {
        return Err(EligibilityError::WrongClass(sort));
    }
    Ok(())
}

/// Talisman charge target: a talisman whose second socket is still absent.
pub fn check_talisman(item: &Item) -> Result<(), EligibilityError> {
    let sort = item.item_type.sort();
    if !matches!(sort, ItemSort::Talisman) {
        return Err(EligibilityError::WrongClass(sort));
    }
    if item.sockets_maxed() {
        return Err(EligibilityError::SocketsMaxed);
    }
    Ok(())
}

/// Socket target: a weapon or socketable gear with a socket left to open.
pub fn check_socket(item: &Item) -> Result<(), EligibilityError> {
    let sort = item.item_type.sort();
    if !sort.is_equipment() {
        return Err(EligibilityError::WrongClass(sort));
    }
    if item.sockets_maxed() {
        return Err(EligibilityError::SocketsMaxed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemId, ItemTypeId, OwnerId, Socket};

    fn item(type_id: u32) -> Item {
        Item::new(ItemId(1), OwnerId(1), ItemTypeId(type_id), 3000)
    }

    fn definition(type_id: u32, level: u8) -> ItemTypeDefinition {
        ItemTypeDefinition::new(ItemTypeId(type_id), "test", level, 3000)
            .with_level_successor(ItemTypeId(type_id + 10))
            .with_quality_successor(ItemTypeId(type_id + 1))
    }

    #[test]
    fn tier_ceiling_depends_on_wing_class_and_definition() {
        let blade = definition(410_335, 70);
        assert_eq!(tier_ceiling(ItemSort::OneHanded, &blade), 12);
        assert_eq!(tier_ceiling(ItemSort::Wing, &definition(203_005, 1)), 15);
        assert_eq!(
            tier_ceiling(ItemSort::OneHanded, &blade.clone().with_max_tier(9)),
            9
        );
    }

    #[test]
    fn composition_denies_at_ceiling_and_mounts() {
        let def = definition(410_335, 70);
        assert_eq!(
            check_composition(&item(410_335).with_tier(12), &def),
            Err(EligibilityError::TierCeiling {
                tier: 12,
                ceiling: 12
            })
        );
        assert!(check_composition(&item(410_335).with_tier(11), &def).is_ok());
        assert_eq!(
            check_composition(&item(300_000), &definition(300_000, 1)),
            Err(EligibilityError::WrongClass(ItemSort::Mount))
        );
        assert!(check_composition(&item(203_005).with_tier(13), &definition(203_005, 1)).is_ok());
    }

    #[test]
    fn level_family_splits_on_meteor_bracket() {
        let blade = item(410_335);
        assert_eq!(
            check_level_upgrade(&blade, &definition(410_335, 90)),
            Ok(UpgradeFamily::Meteor)
        );
        assert_eq!(
            check_level_upgrade(&blade, &definition(410_335, 110)),
            Ok(UpgradeFamily::DragonBall)
        );
        assert_eq!(
            check_level_upgrade(&blade, &definition(410_335, 130)),
            Err(EligibilityError::LevelCeiling {
                level: 130,
                ceiling: 130
            })
        );
        // other ranged weapons leave the meteor bracket at 100
        assert_eq!(
            check_level_upgrade(&item(501_335), &definition(501_335, 100)),
            Ok(UpgradeFamily::DragonBall)
        );
        assert_eq!(
            check_level_upgrade(&item(300_000), &definition(300_000, 1)),
            Err(EligibilityError::WrongClass(ItemSort::Mount))
        );
    }

    #[test]
    fn level_upgrade_requires_successor() {
        let def = ItemTypeDefinition::new(ItemTypeId(410_335), "top", 100, 3000);
        assert_eq!(
            check_level_upgrade(&item(410_335), &def),
            Err(EligibilityError::NoLevelSuccessor)
        );
    }

    #[test]
    fn quality_rejects_fixed_and_super() {
        assert_eq!(
            check_quality_upgrade(&item(410_331), &definition(410_331, 70)),
            Err(EligibilityError::FixedQuality)
        );
        assert_eq!(
            check_quality_upgrade(&item(410_339), &definition(410_339, 70)),
            Err(EligibilityError::NoQualitySuccessor)
        );
        assert_eq!(
            check_quality_upgrade(&item(410_337), &definition(410_337, 70)),
            Ok(Quality::Unique)
        );
    }

    #[test]
    fn sockets_and_talismans() {
        let mut talisman = item(201_009);
        assert!(check_talisman(&talisman).is_ok());
        talisman.sockets = [Socket::Empty, Socket::Empty];
        assert_eq!(check_talisman(&talisman), Err(EligibilityError::SocketsMaxed));
        assert_eq!(
            check_socket(&item(201_009)),
            Err(EligibilityError::WrongClass(ItemSort::Talisman))
        );
        assert!(check_socket(&item(130_305)).is_ok());
        assert_eq!(
            check_enchant(&item(700_012)),
            Err(EligibilityError::WrongClass(ItemSort::Gem))
        );
    }
}
