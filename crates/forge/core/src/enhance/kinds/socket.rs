use crate::enhance::{
    Announcement, EligibilityError, EnhanceContext, EnhanceError, EnhanceFlags, EnhanceKind,
    EnhanceProtocol, ResourceError, ResultCode, tables,
};
use crate::env::ItemTypeDefinition;
use crate::error::ErrorContext;
use crate::gate;
use crate::ledger::{Material, UnitFamily};
use crate::state::{Item, Socket};

/// Opens the next socket of a weapon or piece of gear.
///
/// | target | socket one          | socket two                         |
/// |--------|---------------------|------------------------------------|
/// | weapon | 1 dragon-ball unit  | 5 dragon-ball units                |
/// | gear   | 12 dragon-ball units| tough drills by quality, or a star drill |
///
/// Spending tough drills may instead convert them into a star drill, which
/// aborts the call without opening the socket.
#[derive(Clone, Copy, Debug, Default)]
pub struct SocketEmbedProtocol;

impl SocketEmbedProtocol {
    fn pay_dragon_balls(ctx: &mut EnhanceContext<'_>, required: u32) -> Result<(), EnhanceError> {
        let supply = ctx
            .ledger
            .select(|item| UnitFamily::DragonBall.units_of(item.item_type));
        if supply.total() < required {
            return Err(ResourceError::Insufficient {
                required,
                supplied: supply.total(),
            }
            .into());
        }
        ctx.pay(&supply, required, UnitFamily::DragonBall)?;
        Ok(())
    }

    fn pay_star_drill(ctx: &mut EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let drill = ctx
            .ledger
            .select(|item| (item.item_type == Material::STAR_DRILL).then_some(1))
            .first()
            .copied()
            .ok_or(ResourceError::Insufficient {
                required: 1,
                supplied: 0,
            })?;
        ctx.ledger.spend(drill.id)?;
        Ok(())
    }

    /// Spends tough drills; returns false when they turned into a star drill.
    fn pay_tough_drills(ctx: &mut EnhanceContext<'_>) -> Result<bool, EnhanceError> {
        let required = tables::tough_drills_required(ctx.target.item_type.quality_digit());
        let drills = ctx
            .ledger
            .select(|item| (item.item_type == Material::TOUGH_DRILL).then_some(1));
        if drills.total() < required {
            return Err(ResourceError::Insufficient {
                required,
                supplied: drills.total(),
            }
            .into());
        }

        let used = drills.take(required as usize);
        ctx.ledger.spend_all(&used)?;

        let upgrade = ctx.env().config()?.drill_upgrade();
        if !ctx.roll_odds(upgrade)? {
            return Ok(true);
        }

        ctx.mint(Material::StarDrill, 1, used.any_bound())?;
        if let Some(drill) = ctx.ledger.minted().last().map(|item| item.id) {
            ctx.announce(Announcement::StarDrill { drill });
        }
        Ok(false)
    }
}

impl EnhanceProtocol for SocketEmbedProtocol {
    fn kind(&self) -> EnhanceKind {
        EnhanceKind::SocketEmbed
    }

    fn check(
        &self,
        target: &Item,
        _definition: &ItemTypeDefinition,
    ) -> Result<(), EligibilityError> {
        gate::check_socket(target)
    }

    fn apply(&self, ctx: &mut EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let slot = if ctx.target.sockets[0].is_absent() { 0 } else { 1 };
        let weapon = ctx.target.item_type.sort().is_weapon();

        let opened = match (weapon, slot) {
            (true, _) => {
                Self::pay_dragon_balls(ctx, tables::weapon_socket_units(slot))?;
                true
            }
            (false, 0) => {
                Self::pay_dragon_balls(ctx, tables::GEAR_SOCKET_ONE_UNITS)?;
                true
            }
            _ if ctx.request.flags.contains(EnhanceFlags::USE_STAR_DRILL) => {
                Self::pay_star_drill(ctx)?;
                true
            }
            _ => Self::pay_tough_drills(ctx)?,
        };

        if opened {
            ctx.target.sockets[slot] = Socket::Empty;
        }
        ctx.result = ResultCode::from_bool(opened);
        Ok(())
    }

    fn post_validate(&self, before: &Item, ctx: &EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let after = &ctx.target;
        let opened = after.socket_count().saturating_sub(before.socket_count());
        let ordered = !(after.sockets[0].is_absent() && !after.sockets[1].is_absent());
        if opened > 1 || !ordered {
            return Err(EnhanceError::invariant(
                "sockets must open one at a time, first then second",
                ErrorContext::default()
                    .with_owner(after.owner)
                    .with_item(after.id),
            ));
        }
        Ok(())
    }
}
