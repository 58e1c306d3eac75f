use bitflags::bitflags;

/// Enhancement kinds, one per protocol.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnhanceKind {
    /// Tier refine fed by composition stones and refined equipment.
    Composition,
    /// Tier refine of a mount fed by other mounts.
    MountRefine,
    /// Converts composition progress into a single tier roll.
    QuickRefine,
    /// Raises the item level (meteor or dragon-ball family).
    LevelUpgrade,
    /// Raises the quality grade.
    QualityUpgrade,
    /// Draws a new enchantment from a gem.
    Enchant,
    /// Charges a talisman towards its sockets.
    TalismanCharge,
    /// Opens the next socket.
    SocketEmbed,
}

bitflags! {
    /// Auxiliary request switches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EnhanceFlags: u8 {
        /// Blend mount colour channels while refining.
        const NEW_MOUNT_MODE = 1 << 0;
        /// Pay a gear second socket with one star drill.
        const USE_STAR_DRILL = 1 << 1;
    }
}
