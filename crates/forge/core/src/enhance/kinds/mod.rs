//! One [`EnhanceProtocol`] per enhancement kind.
mod composition;
mod enchant;
mod level;
mod mount;
mod quality;
mod quick;
mod refine;
mod socket;
mod talisman;

pub use composition::CompositionProtocol;
pub use enchant::EnchantProtocol;
pub use level::LevelUpgradeProtocol;
pub use mount::{MountRefineProtocol, blend_colour};
pub use quality::QualityUpgradeProtocol;
pub use quick::QuickRefineProtocol;
pub use socket::SocketEmbedProtocol;
pub use talisman::TalismanChargeProtocol;

use super::{EnhanceKind, EnhanceProtocol};

pub(crate) fn protocol(kind: EnhanceKind) -> &'static dyn EnhanceProtocol {
    match kind {
        EnhanceKind::Composition => &CompositionProtocol,
        EnhanceKind::MountRefine => &MountRefineProtocol,
        EnhanceKind::QuickRefine => &QuickRefineProtocol,
        EnhanceKind::LevelUpgrade => &LevelUpgradeProtocol,
        EnhanceKind::QualityUpgrade => &QualityUpgradeProtocol,
        EnhanceKind::Enchant => &EnchantProtocol,
        EnhanceKind::TalismanCharge => &TalismanChargeProtocol,
        EnhanceKind::SocketEmbed => &SocketEmbedProtocol,
    }
}
