use super::refine;
use crate::enhance::{
    EligibilityError, EnhanceContext, EnhanceError, EnhanceFlags, EnhanceKind, EnhanceProtocol,
    ResourceError, ResultCode, tables,
};
use crate::env::ItemTypeDefinition;
use crate::gate;
use crate::state::{Item, ItemSort};

/// Tier refine of a mount fed by refined mounts and composition stones.
///
/// With [`EnhanceFlags::NEW_MOUNT_MODE`] every consumed mount also blends its
/// colour into the target.
#[derive(Clone, Copy, Debug, Default)]
pub struct MountRefineProtocol;

fn source_points(item: &Item) -> Option<u32> {
    if let Some(tier) = item.item_type.stone_tier() {
        return Some(tables::composition_points(tier));
    }
    if item.item_type.sort() != ItemSort::Mount || item.tier == 0 {
        return None;
    }
    Some(tables::composition_points(item.tier))
}

/// Blends packed `R << 16 | G << 8 | B` colours at 90/10, floored per channel.
pub fn blend_colour(target: u32, source: u32) -> u32 {
    [16u32, 8, 0].iter().fold(0, |packed, &shift| {
        let t = (target >> shift) & 0xFF;
        let s = (source >> shift) & 0xFF;
        packed | (((9 * t + s) / 10) << shift)
    })
}

impl EnhanceProtocol for MountRefineProtocol {
    fn kind(&self) -> EnhanceKind {
        EnhanceKind::MountRefine
    }

    fn check(
        &self,
        target: &Item,
        definition: &ItemTypeDefinition,
    ) -> Result<(), EligibilityError> {
        gate::check_mount_refine(target, definition).map(|_| ())
    }

    fn apply(&self, ctx: &mut EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let ceiling = gate::tier_ceiling(ItemSort::Mount, &ctx.definition);
        let blend = ctx.request.flags.contains(EnhanceFlags::NEW_MOUNT_MODE);
        let sources = ctx.ledger.select(source_points);
        if sources.is_empty() {
            return Err(ResourceError::NothingQualifies.into());
        }

        let start = ctx.target.tier;
        for source in sources.iter() {
            if ctx.target.tier >= ceiling {
                break;
            }
            let spent = ctx.ledger.spend(source.id)?;
            if blend && spent.item_type.sort() == ItemSort::Mount {
                ctx.target.socket_progress =
                    blend_colour(ctx.target.socket_progress, spent.socket_progress);
            }
            ctx.discarded_progress += refine::accumulate(&mut ctx.target, source.units, ceiling);
        }

        ctx.result = ResultCode::Success;
        refine::announce_milestone(ctx, start)?;
        Ok(())
    }

    fn post_validate(&self, before: &Item, ctx: &EnhanceContext<'_>) -> Result<(), EnhanceError> {
        refine::check_progress(before, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::blend_colour;
    use crate::enhance::testing::*;
    use crate::enhance::{
        EligibilityError, EnhanceError, EnhanceFlags, EnhanceKind, EnhanceRequest,
    };
    use crate::state::{ItemId, ItemSort};

    fn mount(fx: &mut Fixture, id: u32, tier: u8, colour: u32) -> ItemId {
        let id = fx.give(id, MOUNT);
        let item = fx.item_mut(id);
        item.tier = tier;
        item.socket_progress = colour;
        id
    }

    #[test]
    fn blend_floors_each_channel() {
        assert_eq!(blend_colour(0x64_64_64, 0xC8_00_0A), 0x6E_5A_5B);
        assert_eq!(blend_colour(0xFF_FF_FF, 0xFF_FF_FF), 0xFF_FF_FF);
    }

    #[test]
    fn new_mode_blends_colour_of_consumed_mounts() {
        let mut fx = Fixture::new();
        let target = mount(&mut fx, 1, 1, 0x64_64_64);
        let source = mount(&mut fx, 2, 2, 0xC8_00_0A);

        let request = EnhanceRequest::new(target, EnhanceKind::MountRefine)
            .with_consumables([source])
            .with_flags(EnhanceFlags::NEW_MOUNT_MODE);
        fx.apply(&request).expect("mount refine");

        let refined = fx.item(target);
        assert_eq!(refined.socket_progress, 0x6E_5A_5B);
        // 40 progress: 20 leaves tier 1, 20 remains towards tier 2
        assert_eq!(refined.tier, 2);
        assert_eq!(refined.progress, 20);
    }

    #[test]
    fn classic_mode_keeps_colour() {
        let mut fx = Fixture::new();
        let target = mount(&mut fx, 1, 1, 0x64_64_64);
        let source = mount(&mut fx, 2, 2, 0xC8_00_0A);

        let request =
            EnhanceRequest::new(target, EnhanceKind::MountRefine).with_consumables([source]);
        fx.apply(&request).expect("mount refine");
        assert_eq!(fx.item(target).socket_progress, 0x64_64_64);
    }

    #[test]
    fn only_mounts_can_be_refined() {
        let mut fx = Fixture::new();
        let target = fx.give(1, BLADE);
        let source = mount(&mut fx, 2, 2, 0);

        let request =
            EnhanceRequest::new(target, EnhanceKind::MountRefine).with_consumables([source]);
        assert_eq!(
            fx.run(&request).unwrap_err(),
            EnhanceError::Eligibility(EligibilityError::WrongClass(ItemSort::OneHanded))
        );
    }
}
