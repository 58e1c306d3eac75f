use crate::enhance::{
    EligibilityError, EnhanceContext, EnhanceError, EnhanceKind, EnhanceProtocol, ResourceError,
    ResultCode, tables,
};
use crate::env::ItemTypeDefinition;
use crate::error::ErrorContext;
use crate::gate;
use crate::state::Item;

/// Draws a new enchantment from one gem.
///
/// The gem is always spent; the draw replaces the current value only when it
/// is strictly greater.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnchantProtocol;

impl EnhanceProtocol for EnchantProtocol {
    fn kind(&self) -> EnhanceKind {
        EnhanceKind::Enchant
    }

    fn check(
        &self,
        target: &Item,
        _definition: &ItemTypeDefinition,
    ) -> Result<(), EligibilityError> {
        gate::check_enchant(target)
    }

    fn apply(&self, ctx: &mut EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let gem = ctx
            .ledger
            .select(|item| item.item_type.gem_grade().map(|_| 1))
            .first()
            .copied()
            .ok_or(ResourceError::NothingQualifies)?;
        let gem = ctx.ledger.spend(gem.id)?;
        let grade = gem
            .item_type
            .gem_grade()
            .ok_or(ResourceError::NothingQualifies)?;

        let (min, max) = tables::enchant_range(gem.item_type, grade);
        let draw = ctx.draw(u32::from(min), u32::from(max))?;
        let draw = u8::try_from(draw).unwrap_or(max);

        let improved = draw > ctx.target.enchantment;
        if improved {
            ctx.target.enchantment = draw;
        }
        ctx.result = ResultCode::from_bool(improved);
        Ok(())
    }

    fn post_validate(&self, before: &Item, ctx: &EnhanceContext<'_>) -> Result<(), EnhanceError> {
        if ctx.target.enchantment < before.enchantment {
            return Err(EnhanceError::invariant(
                "enchantment decreased",
                ErrorContext::default()
                    .with_owner(before.owner)
                    .with_item(before.id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::enhance::testing::*;
    use crate::enhance::{EnhanceError, EnhanceKind, EnhanceRequest, ResourceError, ResultCode};
    use crate::ledger::Material;
    use crate::state::ItemId;

    fn enchant(target: ItemId, gem: ItemId) -> EnhanceRequest {
        EnhanceRequest::new(target, EnhanceKind::Enchant).with_consumables([gem])
    }

    #[test]
    fn lower_draw_spends_the_gem_and_keeps_value() {
        let mut fx = Fixture::new();
        let target = fx.give(1, BLADE);
        fx.item_mut(target).enchantment = 80;
        let gem = fx.give(2, REFINED_GEM);
        // 60 + 15 = 75
        fx.script([15]);

        let outcome = fx.apply(&enchant(target, gem)).expect("enchant");

        assert_eq!(outcome.response.result, ResultCode::Failed);
        assert_eq!(outcome.delta.removed, vec![gem]);
        assert_eq!(fx.item(target).enchantment, 80);
    }

    #[test]
    fn higher_draw_replaces_value() {
        let mut fx = Fixture::new();
        let target = fx.give(1, BLADE);
        fx.item_mut(target).enchantment = 80;
        let gem = fx.give(2, REFINED_GEM);
        fx.script([30]);

        fx.apply(&enchant(target, gem)).expect("enchant");
        assert_eq!(fx.item(target).enchantment, 90);
    }

    #[test]
    fn gem_grade_selects_range() {
        let mut fx = Fixture::new();
        let target = fx.give(1, BLADE);
        let normal = fx.give(2, NORMAL_GEM);
        let dragon = fx.give(3, SUPER_DRAGON_GEM);
        fx.script([44, 0]);

        fx.apply(&enchant(target, normal)).expect("normal gem");
        assert_eq!(fx.item(target).enchantment, 45);

        fx.apply(&enchant(target, dragon)).expect("dragon gem");
        assert_eq!(fx.item(target).enchantment, 200);
    }

    #[test]
    fn requires_a_gem() {
        let mut fx = Fixture::new();
        let target = fx.give(1, BLADE);
        let ball = fx.give(2, Material::DRAGON_BALL);

        assert_eq!(
            fx.run(&enchant(target, ball)).unwrap_err(),
            EnhanceError::Resource(ResourceError::NothingQualifies)
        );
    }
}
