use crate::state::ItemTypeId;

/// Consumables with a fixed unit value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Material {
    Meteor,
    MeteorScroll,
    DragonBall,
    DragonBallScroll,
    ToughDrill,
    StarDrill,
}

/// Families of interchangeable units; a scroll is worth ten singles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum UnitFamily {
    Meteor,
    DragonBall,
}

impl Material {
    pub const METEOR: ItemTypeId = ItemTypeId(1_088_001);
    pub const METEOR_SCROLL: ItemTypeId = ItemTypeId(720_027);
    pub const DRAGON_BALL: ItemTypeId = ItemTypeId(1_088_000);
    pub const DRAGON_BALL_SCROLL: ItemTypeId = ItemTypeId(720_028);
    pub const TOUGH_DRILL: ItemTypeId = ItemTypeId(1_200_005);
    pub const STAR_DRILL: ItemTypeId = ItemTypeId(1_200_006);

    pub const fn from_type(item_type: ItemTypeId) -> Option<Self> {
        match item_type.0 {
            1_088_001 => Some(Self::Meteor),
            720_027 => Some(Self::MeteorScroll),
            1_088_000 => Some(Self::DragonBall),
            720_028 => Some(Self::DragonBallScroll),
            1_200_005 => Some(Self::ToughDrill),
            1_200_006 => Some(Self::StarDrill),
            _ => None,
        }
    }

    pub const fn item_type(self) -> ItemTypeId {
        match self {
            Self::Meteor => Self::METEOR,
            Self::MeteorScroll => Self::METEOR_SCROLL,
            Self::DragonBall => Self::DRAGON_BALL,
            Self::DragonBallScroll => Self::DRAGON_BALL_SCROLL,
            Self::ToughDrill => Self::TOUGH_DRILL,
            Self::StarDrill => Self::STAR_DRILL,
        }
    }

    pub const fn family(self) -> Option<UnitFamily> {
        match self {
            Self::Meteor | Self::MeteorScroll => Some(UnitFamily::Meteor),
            Self::DragonBall | Self::DragonBallScroll => Some(UnitFamily::DragonBall),
            Self::ToughDrill | Self::StarDrill => None,
        }
    }

    pub const fn units(self) -> u32 {
        match self {
            Self::MeteorScroll | Self::DragonBallScroll => 10,
            _ => 1,
        }
    }
}

impl UnitFamily {
    /// Units of this family carried by an item type, `None` for other types.
    pub fn units_of(self, item_type: ItemTypeId) -> Option<u32> {
        let material = Material::from_type(item_type)?;
        (material.family() == Some(self)).then(|| material.units())
    }

    /// Single-unit material minted as rebate.
    pub const fn single(self) -> Material {
        match self {
            Self::Meteor => Material::Meteor,
            Self::DragonBall => Material::DragonBall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_is_worth_ten_singles() {
        assert_eq!(UnitFamily::Meteor.units_of(Material::METEOR), Some(1));
        assert_eq!(UnitFamily::Meteor.units_of(Material::METEOR_SCROLL), Some(10));
        assert_eq!(UnitFamily::Meteor.units_of(Material::DRAGON_BALL), None);
        assert_eq!(
            UnitFamily::DragonBall.units_of(Material::DRAGON_BALL_SCROLL),
            Some(10)
        );
    }
}
