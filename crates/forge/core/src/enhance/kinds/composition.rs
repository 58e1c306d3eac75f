use super::refine;
use crate::enhance::{
    EligibilityError, EnhanceContext, EnhanceError, EnhanceKind, EnhanceProtocol, ResourceError,
    ResultCode, tables,
};
use crate::env::ItemTypeDefinition;
use crate::gate;
use crate::state::{Item, ItemSort};

/// Tier refine fed by composition stones and refined equipment.
///
/// Sources are consumed in request order; once the ceiling is reached the
/// remaining sources stay unspent.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompositionProtocol;

fn source_points(item: &Item) -> Option<u32> {
    if let Some(tier) = item.item_type.stone_tier() {
        return Some(tables::composition_points(tier));
    }
    let sort = item.item_type.sort();
    if sort.is_stock() || sort == ItemSort::Mount || item.tier == 0 {
        return None;
    }
    Some(tables::composition_points(item.tier))
}

impl EnhanceProtocol for CompositionProtocol {
    fn kind(&self) -> EnhanceKind {
        EnhanceKind::Composition
    }

    fn check(
        &self,
        target: &Item,
        definition: &ItemTypeDefinition,
    ) -> Result<(), EligibilityError> {
        gate::check_composition(target, definition).map(|_| ())
    }

    fn apply(&self, ctx: &mut EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let ceiling = gate::tier_ceiling(ctx.target.item_type.sort(), &ctx.definition);
        let sources = ctx.ledger.select(source_points);
        if sources.is_empty() {
            return Err(ResourceError::NothingQualifies.into());
        }

        let start = ctx.target.tier;
        for source in sources.iter() {
            if ctx.target.tier >= ceiling {
                break;
            }
            ctx.ledger.spend(source.id)?;
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
