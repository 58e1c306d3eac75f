use crate::enhance::{
    EligibilityError, EnhanceContext, EnhanceError, EnhanceKind, EnhanceProtocol, Payment,
    ResourceError, ResultCode, tables,
};
use crate::env::ItemTypeDefinition;
use crate::error::ErrorContext;
use crate::gate::{self, UpgradeFamily};
use crate::ledger::{Selection, UnitFamily};
use crate::state::Item;

/// Raises the item to its level successor.
///
/// Inside the meteor bracket the cost is `max(2, level / 15)` meteor units
/// through the dual policy; above it one dragon ball guarantees success.
#[derive(Clone, Copy, Debug, Default)]
pub struct LevelUpgradeProtocol;

impl LevelUpgradeProtocol {
    fn pay_meteors(ctx: &mut EnhanceContext<'_>) -> Result<bool, EnhanceError> {
        let required = tables::meteors_required(ctx.definition.level);
        let supply = ctx
            .ledger
            .select(|item| UnitFamily::Meteor.units_of(item.item_type));
        if supply.is_empty() {
            return Err(ResourceError::NothingQualifies.into());
        }

        match ctx.pay(&supply, required, UnitFamily::Meteor)? {
            Payment::Paid { .. } => Ok(true),
            Payment::Short { total } => {
                let percent = tables::scaled_percent(100, total, required);
                Ok(ctx.roll(percent)?)
            }
        }
    }

    fn pay_dragon_ball(ctx: &mut EnhanceContext<'_>) -> Result<bool, EnhanceError> {
        let supply = ctx
            .ledger
            .select(|item| UnitFamily::DragonBall.units_of(item.item_type));
        // a loose ball is used before breaking a scroll
        let pick = supply
            .iter()
            .find(|candidate| candidate.units == 1)
            .or_else(|| supply.first())
            .copied()
            .ok_or(ResourceError::Insufficient {
                required: 1,
                supplied: 0,
            })?;

        let single: Selection = std::iter::once(pick).collect();
        ctx.pay(&single, 1, UnitFamily::DragonBall)?;
        Ok(true)
    }
}

impl EnhanceProtocol for LevelUpgradeProtocol {
    fn kind(&self) -> EnhanceKind {
        EnhanceKind::LevelUpgrade
    }

    fn check(
        &self,
        target: &Item,
        definition: &ItemTypeDefinition,
    ) -> Result<(), EligibilityError> {
        gate::check_level_upgrade(target, definition).map(|_| ())
    }

    fn apply(&self, ctx: &mut EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let family = gate::check_level_upgrade(&ctx.target, &ctx.definition)?;
        let successor = ctx
            .definition
            .level_successor
            .ok_or(EligibilityError::NoLevelSuccessor)?;
        let successor = ctx.definition_of(successor)?;

        let success = match family {
            UpgradeFamily::Meteor => Self::pay_meteors(ctx)?,
            UpgradeFamily::DragonBall => Self::pay_dragon_ball(ctx)?,
        };

        if success {
            ctx.target.item_type = successor.id;
            ctx.target.durability = successor.durability;
            ctx.target.max_durability = successor.durability;
        } else {
            ctx.penalize_durability()?;
        }
        ctx.result = ResultCode::from_bool(success);
        Ok(())
    }

    fn post_validate(&self, before: &Item, ctx: &EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let after = &ctx.target;
        let unchanged = after.item_type == before.item_type;
        if (ctx.result == ResultCode::Success) == unchanged || after.tier != before.tier {
            return Err(EnhanceError::invariant(
                "level upgrade changed the wrong fields",
                ErrorContext::default()
                    .with_owner(after.owner)
                    .with_item(after.id),
            ));
        }
        Ok(())
    }
}
