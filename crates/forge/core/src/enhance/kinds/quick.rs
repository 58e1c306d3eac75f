use super::refine;
use crate::enhance::{
    EligibilityError, EnhanceContext, EnhanceError, EnhanceKind, EnhanceProtocol, ResultCode,
    tables,
};
use crate::env::ItemTypeDefinition;
use crate::gate;
use crate::state::Item;

/// Converts stored composition progress into one tier roll.
///
/// The success percentage is the progress ratio of the current threshold.
/// Progress is reset whatever the outcome; no consumable is spent.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuickRefineProtocol;

impl EnhanceProtocol for QuickRefineProtocol {
    fn kind(&self) -> EnhanceKind {
        EnhanceKind::QuickRefine
    }

    fn check(
        &self,
        target: &Item,
        definition: &ItemTypeDefinition,
    ) -> Result<(), EligibilityError> {
        gate::check_quick_refine(target, definition).map(|_| ())
    }

    fn apply(&self, ctx: &mut EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let start = ctx.target.tier;
        let threshold = tables::threshold(start).ok_or(EligibilityError::TierCeiling {
            tier: start,
            ceiling: start,
        })?;
        let percent = tables::progress_rate(ctx.target.progress, threshold);

        let success = ctx.roll(percent)?;
        if success {
            ctx.target.tier += 1;
        }
        ctx.target.progress = 0;
        ctx.result = ResultCode::from_bool(success);

        refine::announce_milestone(ctx, start)?;
        Ok(())
    }

    fn post_validate(&self, before: &Item, ctx: &EnhanceContext<'_>) -> Result<(), EnhanceError> {
        refine::check_progress(before, ctx)
    }
}

#[cfg(test)]
mod tests {
    use crate::enhance::testing::*;
    use crate::enhance::{EligibilityError, EnhanceError, EnhanceKind, EnhanceRequest, ResultCode};
    use crate::state::ItemId;

    fn half_way(fx: &mut Fixture) -> ItemId {
        let id = fx.give(1, BLADE);
        let item = fx.item_mut(id);
        item.tier = 2;
        item.progress = 40;
        id
    }

    #[test]
    fn half_progress_rolls_fifty_percent() {
        let mut fx = Fixture::new();
        let target = half_way(&mut fx);
        // raw 49 rolls 50: the last winning value at 50%
        fx.script([49]);

        let outcome = fx
            .apply(&EnhanceRequest::new(target, EnhanceKind::QuickRefine))
            .expect("quick refine");

        assert_eq!(outcome.response.result, ResultCode::Success);
        assert_eq!(fx.item(target).tier, 3);
        assert_eq!(fx.item(target).progress, 0);
    }

    #[test]
    fn failure_still_resets_progress() {
        let mut fx = Fixture::new();
        let target = half_way(&mut fx);
        fx.script([50]);

        let outcome = fx
            .apply(&EnhanceRequest::new(target, EnhanceKind::QuickRefine))
            .expect("quick refine");

        assert_eq!(outcome.response.result, ResultCode::Failed);
        assert_eq!(fx.item(target).tier, 2);
        assert_eq!(fx.item(target).progress, 0);
    }

    #[test]
    fn empty_progress_is_rejected() {
        let mut fx = Fixture::new();
        let target = fx.give(1, BLADE);
        assert_eq!(
            fx.run(&EnhanceRequest::new(target, EnhanceKind::QuickRefine))
                .unwrap_err(),
            EnhanceError::Eligibility(EligibilityError::NoProgress)
        );
    }
}
