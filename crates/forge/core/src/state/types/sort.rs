//! Item type identifiers and the classification derived from them.
//!
//! Item types are six or seven digit numbers whose digits carry meaning:
//!
//! ```text
//!   410 33 9
//!   ─┬─ ─┬ ┬
//!    │   │ └─ quality digit (0-2 fixed, 3-5 normal, 6 refined, 7 unique, 8 elite, 9 super)
//!    │   └─── level code
//!    └─────── category (drives the equipment sort)
//! ```

use std::fmt;

/// Reference to an item type definition stored outside the core (lookup via Env).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTypeId(pub u32);

impl ItemTypeId {
    /// Category part of the identifier (`id / 1000`).
    #[inline]
    pub const fn category(self) -> u32 {
        self.0 / 1000
    }

    /// Level code part of the identifier.
    #[inline]
    pub const fn level_code(self) -> u32 {
        (self.0 / 10) % 100
    }

    /// Raw quality digit (`id % 10`).
    #[inline]
    pub const fn quality_digit(self) -> u8 {
        (self.0 % 10) as u8
    }

    /// Quality grade encoded by the last digit.
    pub const fn quality(self) -> Quality {
        Quality::from_digit(self.quality_digit())
    }

    /// Equipment sort derived from the category.
    pub const fn sort(self) -> ItemSort {
        ItemSort::from_category(self.category())
    }

    /// Tier carried by a composition stone, `None` for every other type.
    pub const fn stone_tier(self) -> Option<u8> {
        if self.0 > 730_000 && self.0 <= 730_012 {
            Some((self.0 - 730_000) as u8)
        } else {
            None
        }
    }

    /// Grade of a gem, `None` for non-gems and unknown grades.
    pub const fn gem_grade(self) -> Option<GemGrade> {
        if !matches!(self.sort(), ItemSort::Gem) {
            return None;
        }
        match self.0 % 10 {
            1 => Some(GemGrade::Normal),
            2 => Some(GemGrade::Refined),
            3 => Some(GemGrade::Super),
            _ => None,
        }
    }

    /// Gem family digit (phoenix 0, dragon 1, fury 2, ...).
    #[inline]
    pub const fn gem_family(self) -> u32 {
        (self.0 % 100) / 10
    }
}

impl fmt::Display for ItemTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Equipment sort, the slot-level classification used by every gate table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemSort {
    Headgear,
    Necklace,
    Ring,
    /// Heavy bangle worn in the ring slot.
    Bangle,
    Armor,
    Boots,
    OneHanded,
    TwoHanded,
    Bow,
    /// Ranged weapons other than bows.
    Ranged,
    Shield,
    /// Off-hand pistol sharing the shield slot.
    Pistol,
    Talisman,
    Wing,
    Mount,
    Gem,
    Material,
    Other,
}

impl ItemSort {
    pub const fn from_category(category: u32) -> Self {
        match category {
            111..=118 => Self::Headgear,
            120 | 121 => Self::Necklace,
            150 | 151 => Self::Ring,
            152 => Self::Bangle,
            130..=136 => Self::Armor,
            160 => Self::Boots,
            201 | 202 => Self::Talisman,
            203 => Self::Wing,
            300 => Self::Mount,
            410..=499 | 601 => Self::OneHanded,
            500 => Self::Bow,
            501..=509 => Self::Ranged,
            510..=599 => Self::TwoHanded,
            610..=619 => Self::Pistol,
            900 => Self::Shield,
            700 => Self::Gem,
            720 | 730 | 1088 | 1200 => Self::Material,
            _ => Self::Other,
        }
    }

    /// Weapon-hand items (including the off-hand pistol).
    pub const fn is_weapon(self) -> bool {
        matches!(
            self,
            Self::OneHanded | Self::TwoHanded | Self::Bow | Self::Ranged | Self::Pistol
        )
    }

    /// Worn equipment other than weapons.
    pub const fn is_gear(self) -> bool {
        matches!(
            self,
            Self::Headgear
                | Self::Necklace
                | Self::Ring
                | Self::Bangle
                | Self::Armor
                | Self::Boots
                | Self::Shield
        )
    }

    /// Weapons and gear: the items carrying level, quality, sockets and enchantment.
    pub const fn is_equipment(self) -> bool {
        self.is_weapon() || self.is_gear()
    }

    pub const fn is_ring_class(self) -> bool {
        matches!(self, Self::Ring | Self::Bangle)
    }

    /// Items that can never be the target of an enhancement.
    pub const fn is_stock(self) -> bool {
        matches!(self, Self::Gem | Self::Material | Self::Other)
    }
}

/// Quality grade decoded from the last digit of an item type.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Quality {
    /// Digits 0-2: quality cannot be changed.
    Fixed,
    /// Digits 3-5.
    Normal,
    Refined,
    Unique,
    Elite,
    Super,
}

impl Quality {
    pub const fn from_digit(digit: u8) -> Self {
        match digit {
            0..=2 => Self::Fixed,
            3..=5 => Self::Normal,
            6 => Self::Refined,
            7 => Self::Unique,
            8 => Self::Elite,
            _ => Self::Super,
        }
    }
}

/// Gem grade, selecting the enchantment range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GemGrade {
    Normal,
    Refined,
    Super,
}
