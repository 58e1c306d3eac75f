use crate::state::ItemSort;

/// Level from which a sort can no longer be upgraded; `None` for sorts that
/// have no level upgrade.
pub const fn level_ceiling(sort: ItemSort) -> Option<u8> {
    match sort {
        ItemSort::Headgear => Some(120),
        ItemSort::Necklace => Some(130),
        ItemSort::Ring | ItemSort::Bangle => Some(127),
        ItemSort::OneHanded | ItemSort::TwoHanded | ItemSort::Bow => Some(130),
        ItemSort::Ranged => Some(120),
        ItemSort::Shield => Some(120),
        ItemSort::Pistol => Some(130),
        ItemSort::Armor => Some(120),
        ItemSort::Boots => Some(129),
        _ => None,
    }
}

/// Level from which the dragon-ball family replaces meteors.
pub const fn meteor_ceiling(sort: ItemSort) -> Option<u8> {
    match sort {
        ItemSort::Ranged => Some(100),
        sort if sort.is_equipment() => Some(110),
        _ => None,
    }
}
