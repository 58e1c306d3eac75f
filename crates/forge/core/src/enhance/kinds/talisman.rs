use crate::enhance::{
    EligibilityError, EnhanceContext, EnhanceError, EnhanceKind, EnhanceProtocol, ResourceError,
    ResultCode, tables,
};
use crate::env::ItemTypeDefinition;
use crate::gate;
use crate::state::{Item, ItemSort, Quality, Socket};

/// Charges a talisman with equipment of refined quality or better.
///
/// Each source adds quality, tier and socket points. 8000 charge opens the
/// first socket, a further 20000 the second; sources after that stay unspent.
#[derive(Clone, Copy, Debug, Default)]
pub struct TalismanChargeProtocol;

fn source_points(item: &Item) -> Option<u32> {
    let sort = item.item_type.sort();
    if sort.is_stock() || matches!(sort, ItemSort::Talisman | ItemSort::Mount) {
        return None;
    }
    let quality = item.item_type.quality();
    if quality < Quality::Refined {
        return None;
    }
    Some(
        tables::talisman_quality_points(quality)
            + tables::talisman_tier_points(item.tier)
            + tables::talisman_socket_points(item.socket_count()),
    )
}

/// Opens every socket the current charge pays for. Returns true if one opened.
fn open_sockets(target: &mut Item) -> bool {
    let mut opened = false;
    if target.sockets[0].is_absent() && target.socket_progress >= tables::SOCKET_ONE_CHARGE {
        target.socket_progress -= tables::SOCKET_ONE_CHARGE;
        target.sockets[0] = Socket::Empty;
        opened = true;
    }
    if !target.sockets[0].is_absent()
        && target.sockets[1].is_absent()
        && target.socket_progress >= tables::SOCKET_TWO_CHARGE
    {
        target.socket_progress = 0;
        target.sockets[1] = Socket::Empty;
        opened = true;
    }
    opened
}

impl EnhanceProtocol for TalismanChargeProtocol {
    fn kind(&self) -> EnhanceKind {
        EnhanceKind::TalismanCharge
    }

    fn check(
        &self,
        target: &Item,
        _definition: &ItemTypeDefinition,
    ) -> Result<(), EligibilityError> {
        gate::check_talisman(target)
    }

    fn apply(&self, ctx: &mut EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let sources = ctx.ledger.select(source_points);
        if sources.is_empty() {
            return Err(ResourceError::NothingQualifies.into());
        }

        let mut opened = false;
        for source in sources.iter() {
            if ctx.target.sockets_maxed() {
                break;
            }
            ctx.ledger.spend(source.id)?;
            ctx.target.socket_progress = ctx.target.socket_progress.saturating_add(source.units);
            opened |= open_sockets(&mut ctx.target);
        }

        ctx.result = ResultCode::from_bool(opened);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::enhance::testing::*;
    use crate::enhance::{EnhanceError, EnhanceKind, EnhanceRequest, ResourceError, ResultCode};
    use crate::state::{ItemId, ItemTypeId, Socket};

    const SUPER_BLADE: ItemTypeId = ItemTypeId(410_339);

    fn charge(target: ItemId, sources: &[ItemId]) -> EnhanceRequest {
        EnhanceRequest::new(target, EnhanceKind::TalismanCharge).with_consumables(sources.to_vec())
    }

    #[test]
    fn refined_sources_accumulate_charge() {
        let mut fx = Fixture::new();
        let talisman = fx.give(1, TALISMAN);
        let source = fx.give(2, BLADE_REFINED);
        fx.item_mut(source).tier = 3;

        let outcome = fx.apply(&charge(talisman, &[source])).expect("charge");

        // refined 5 + tier 450
        assert_eq!(outcome.response.result, ResultCode::Failed);
        assert_eq!(fx.item(talisman).socket_progress, 455);
        assert_eq!(fx.item(talisman).sockets, [Socket::Absent; 2]);
    }

    #[test]
    fn large_source_opens_both_sockets_and_stops() {
        let mut fx = Fixture::new();
        let talisman = fx.give(1, TALISMAN);
        let big = fx.give(2, SUPER_BLADE);
        fx.item_mut(big).tier = 8;
        let spare = fx.give(3, BLADE_REFINED);

        let outcome = fx.apply(&charge(talisman, &[big, spare])).expect("charge");

        assert_eq!(outcome.response.result, ResultCode::Success);
        assert_eq!(outcome.delta.removed, vec![big]);
        assert!(fx.state.contains(spare));
        let charged = fx.item(talisman);
        assert_eq!(charged.sockets, [Socket::Empty; 2]);
        assert_eq!(charged.socket_progress, 0);
    }

    #[test]
    fn first_socket_opens_at_eight_thousand() {
        let mut fx = Fixture::new();
        let talisman = fx.give(1, TALISMAN);
        fx.item_mut(talisman).socket_progress = 7_900;
        let source = fx.give(2, BLADE_REFINED);
        fx.item_mut(source).tier = 2;

        fx.apply(&charge(talisman, &[source])).expect("charge");

        let charged = fx.item(talisman);
        assert_eq!(charged.sockets, [Socket::Empty, Socket::Absent]);
        assert_eq!(charged.socket_progress, 105);
    }

    #[test]
    fn normal_quality_sources_do_not_qualify() {
        let mut fx = Fixture::new();
        let talisman = fx.give(1, TALISMAN);
        let plain = fx.give(2, BLADE);

        assert_eq!(
            fx.run(&charge(talisman, &[plain])).unwrap_err(),
            EnhanceError::Resource(ResourceError::NothingQualifies)
        );
    }
}
