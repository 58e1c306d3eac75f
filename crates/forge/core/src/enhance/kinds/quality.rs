use crate::enhance::{
    Announcement, EligibilityError, EnhanceContext, EnhanceError, EnhanceKind, EnhanceProtocol,
    Payment, ResourceError, ResultCode, tables,
};
use crate::env::ItemTypeDefinition;
use crate::gate;
use crate::ledger::UnitFamily;
use crate::state::{Item, Quality};

/// Raises the quality grade, paid in dragon-ball units.
///
/// The requirement is the number of units that makes the base percentage
/// certain. A short supply scales the percentage; ring-class items of normal
/// quality succeed with any supply.
#[derive(Clone, Copy, Debug, Default)]
pub struct QualityUpgradeProtocol;

impl EnhanceProtocol for QualityUpgradeProtocol {
    fn kind(&self) -> EnhanceKind {
        EnhanceKind::QualityUpgrade
    }

    fn check(
        &self,
        target: &Item,
        definition: &ItemTypeDefinition,
    ) -> Result<(), EligibilityError> {
        gate::check_quality_upgrade(target, definition).map(|_| ())
    }

    fn apply(&self, ctx: &mut EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let quality = gate::check_quality_upgrade(&ctx.target, &ctx.definition)?;
        let base = tables::quality_base_percent(quality)
            .ok_or(EligibilityError::NoQualitySuccessor)?;
        let required = tables::quality_required(base);
        let successor = ctx
            .definition
            .quality_successor
            .ok_or(EligibilityError::NoQualitySuccessor)?;
        let successor = ctx.definition_of(successor)?;

        let supply = ctx
            .ledger
            .select(|item| UnitFamily::DragonBall.units_of(item.item_type));
        if supply.is_empty() {
            return Err(ResourceError::NothingQualifies.into());
        }

        let success = match ctx.pay(&supply, required, UnitFamily::DragonBall)? {
            Payment::Paid { .. } => true,
            Payment::Short { total } => {
                let forced =
                    ctx.target.item_type.sort().is_ring_class() && quality == Quality::Normal;
                let percent = if forced {
                    100
                } else {
                    tables::scaled_percent(base, total, required)
                };
                let bonus = ctx.env().config()?.quality_bonus();
                (percent < 100 && ctx.roll_odds(bonus)?) || ctx.roll(percent)?
            }
        };

        if success {
            ctx.target.item_type = successor.id;
            if successor.id.quality() == Quality::Super {
                ctx.announce(Announcement::SuperQuality {
                    item: ctx.target.id,
                    item_type: successor.id,
                });
            }
        } else {
            ctx.penalize_durability()?;
        }
        ctx.result = ResultCode::from_bool(success);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::enhance::testing::*;
    use crate::enhance::{Announcement, EnhanceKind, EnhanceRequest, ResultCode};
    use crate::ledger::Material;
    use crate::state::ItemId;

    fn upgrade(target: ItemId, consumables: &[ItemId]) -> EnhanceRequest {
        EnhanceRequest::new(target, EnhanceKind::QualityUpgrade)
            .with_consumables(consumables.to_vec())
    }

    #[test]
    fn scroll_alone_covers_elite_requirement() {
        let mut fx = Fixture::new();
        let target = fx.give(1, ELITE_ARMOR);
        let singles: Vec<ItemId> = (2..=4).map(|id| fx.give(id, Material::DRAGON_BALL)).collect();
        let scroll = fx.give(5, Material::DRAGON_BALL_SCROLL);
        let mut supplied = singles.clone();
        supplied.push(scroll);

        let outcome = fx.apply(&upgrade(target, &supplied)).expect("upgrade");

        assert_eq!(outcome.response.result, ResultCode::Success);
        assert_eq!(outcome.rolls, 0);
        assert_eq!(outcome.delta.removed, vec![scroll]);
        assert!(outcome.delta.created.is_empty());
        // Keeping the three singles leaves the same inventory as spending
        // all thirteen units and rebating three balls: three loose balls.
        assert!(singles.iter().all(|id| fx.state.contains(*id)));
        let balls = fx
            .state
            .items_of(OWNER)
            .filter(|item| item.item_type == Material::DRAGON_BALL)
            .count();
        assert_eq!(balls, 3);
        assert_eq!(fx.item(target).item_type, SUPER_ARMOR);
        assert!(matches!(
            outcome.announcements.as_slice(),
            [Announcement::SuperQuality { .. }]
        ));
    }

    #[test]
    fn short_supply_scales_the_percentage() {
        let mut fx = Fixture::new();
        let target = fx.give(1, ELITE_ARMOR);
        let balls: Vec<ItemId> = (2..=3).map(|id| fx.give(id, Material::DRAGON_BALL)).collect();
        // bonus misses, main roll 3 misses the 2% chance, escape misses
        fx.script([MISS, 2, MISS]);

        let outcome = fx.apply(&upgrade(target, &balls)).expect("upgrade");

        assert_eq!(outcome.response.result, ResultCode::Failed);
        assert_eq!(outcome.delta.removed, balls);
        assert_eq!(fx.item(target).item_type, ELITE_ARMOR);
        assert_eq!(fx.item(target).durability, 1000);
    }

    #[test]
    fn short_supply_roll_at_the_edge_succeeds() {
        let mut fx = Fixture::new();
        let target = fx.give(1, ELITE_ARMOR);
        let balls: Vec<ItemId> = (2..=3).map(|id| fx.give(id, Material::DRAGON_BALL)).collect();
        // main roll 2 hits the 2% chance
        fx.script([MISS, 1]);

        let outcome = fx.apply(&upgrade(target, &balls)).expect("upgrade");
        assert_eq!(outcome.response.result, ResultCode::Success);
    }

    #[test]
    fn bonus_roll_forces_success() {
        let mut fx = Fixture::new();
        let target = fx.give(1, ELITE_ARMOR);
        let ball = fx.give(2, Material::DRAGON_BALL);
        fx.script([HIT]);

        let outcome = fx.apply(&upgrade(target, &[ball])).expect("upgrade");
        assert_eq!(outcome.response.result, ResultCode::Success);
        assert_eq!(outcome.rolls, 1);
    }

    #[test]
    fn normal_ring_succeeds_with_any_supply() {
        let mut fx = Fixture::new();
        let target = fx.give(1, RING);
        let ball = fx.give(2, Material::DRAGON_BALL);

        let outcome = fx.apply(&upgrade(target, &[ball])).expect("upgrade");
        assert_eq!(outcome.response.result, ResultCode::Success);
        assert_eq!(fx.item(target).item_type, RING_REFINED);
    }
}
