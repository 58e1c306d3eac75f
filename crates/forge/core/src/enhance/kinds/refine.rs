//! Tier progress loop shared by composition, mount refine and quick refine.
use crate::enhance::{Announcement, EnhanceContext, EnhanceError, tables};
use crate::env::OracleError;
use crate::error::ErrorContext;
use crate::gate;
use crate::state::Item;

/// Adds progress and advances tiers while the threshold is crossed.
///
/// At the ceiling the remaining progress is discarded; the discarded amount is
/// returned.
pub(super) fn accumulate(target: &mut Item, points: u32, ceiling: u8) -> u32 {
    target.progress = target.progress.saturating_add(points);
    while target.tier < ceiling {
        let Some(threshold) = tables::threshold(target.tier) else {
            break;
        };
        if target.progress < threshold {
            break;
        }
        target.progress -= threshold;
        target.tier += 1;
    }
    if target.tier >= ceiling {
        return std::mem::take(&mut target.progress);
    }
    0
}

/// Queues the world announcement when the tier crossed the milestone.
pub(super) fn announce_milestone(
    ctx: &mut EnhanceContext<'_>,
    start_tier: u8,
) -> Result<(), OracleError> {
    let milestone = ctx.env().config()?.milestone_tier();
    if ctx.target.tier > start_tier && ctx.target.tier >= milestone {
        ctx.announce(Announcement::TierReached {
            item: ctx.target.id,
            item_type: ctx.target.item_type,
            tier: ctx.target.tier,
        });
    }
    Ok(())
}

/// Tier never decreases and progress stays below the current threshold.
pub(super) fn check_progress(before: &Item, ctx: &EnhanceContext<'_>) -> Result<(), EnhanceError> {
    let after = &ctx.target;
    let context = ErrorContext::default()
        .with_owner(after.owner)
        .with_item(after.id);
    if after.tier < before.tier {
        return Err(EnhanceError::invariant("tier decreased", context));
    }
    let ceiling = gate::tier_ceiling(after.item_type.sort(), &ctx.definition);
    let within = match tables::threshold(after.tier) {
        Some(threshold) if after.tier < ceiling => after.progress < threshold,
        _ => after.progress == 0,
    };
    if !within {
        return Err(EnhanceError::invariant(
            "progress above tier threshold",
            context,
        ));
    }
    Ok(())
}
