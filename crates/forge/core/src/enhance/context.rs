use super::{Announcement, EnhanceError, EnhanceRequest, ResultCode};
use crate::config::Odds;
use crate::env::{ForgeEnv, ItemTypeDefinition, OracleError, compute_seed};
use crate::ledger::{Ledger, Material, Selection, SpendPlan, UnitFamily};
use crate::state::{Item, ItemTypeId};

/// Outcome of paying a requirement through the dual policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payment {
    /// Requirement met; excess already rebated.
    Paid { rebate: u32 },
    /// Every candidate spent, `total` units short of a guaranteed success.
    Short { total: u32 },
}

/// Working state of one request.
///
/// Protocols mutate the working copy of the target and spend through the
/// ledger. Nothing reaches the canonical state until the engine turns the
/// context into a delta, so returning an error discards every change.
pub struct EnhanceContext<'a> {
    env: ForgeEnv<'a>,
    pub request: &'a EnhanceRequest,
    pub target: Item,
    pub definition: ItemTypeDefinition,
    pub ledger: Ledger<'a>,
    pub result: ResultCode,
    pub announcements: Vec<Announcement>,
    /// Composition progress thrown away at the tier ceiling.
    pub discarded_progress: u32,
    seed: u64,
    nonce: u64,
    rolls: u32,
}

impl<'a> EnhanceContext<'a> {
    pub fn new(
        env: ForgeEnv<'a>,
        request: &'a EnhanceRequest,
        target: Item,
        definition: ItemTypeDefinition,
        ledger: Ledger<'a>,
        seed: u64,
        nonce: u64,
    ) -> Self {
        Self {
            env,
            request,
            target,
            definition,
            ledger,
            result: ResultCode::Failed,
            announcements: Vec::new(),
            discarded_progress: 0,
            seed,
            nonce,
            rolls: 0,
        }
    }

    pub fn env(&self) -> ForgeEnv<'a> {
        self.env
    }

    /// Number of chance rolls consumed so far.
    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, self.target.id.0, self.rolls);
        self.rolls += 1;
        seed
    }

    /// Main percentage roll.
    pub fn roll(&mut self, percent: u32) -> Result<bool, OracleError> {
        let chance = self.env.chance()?;
        let seed = self.next_seed();
        Ok(chance.chance(seed, percent))
    }

    /// Secondary fixed-odds roll.
    pub fn roll_odds(&mut self, odds: Odds) -> Result<bool, OracleError> {
        let chance = self.env.chance()?;
        let seed = self.next_seed();
        Ok(chance.odds(seed, odds))
    }

    /// Uniform draw in `[min, max]`.
    pub fn draw(&mut self, min: u32, max: u32) -> Result<u32, OracleError> {
        let chance = self.env.chance()?;
        let seed = self.next_seed();
        Ok(chance.range(seed, min, max))
    }

    pub fn definition_of(&self, item_type: ItemTypeId) -> Result<ItemTypeDefinition, OracleError> {
        self.env
            .item_types()?
            .definition(item_type)
            .ok_or(OracleError::ItemTypeNotFound(item_type))
    }

    /// Failed-roll penalty: halves durability unless the escape roll succeeds.
    ///
    /// Returns true when the penalty was applied.
    pub fn penalize_durability(&mut self) -> Result<bool, OracleError> {
        let escape = self.env.config()?.durability_escape();
        if self.roll_odds(escape)? {
            return Ok(false);
        }
        self.target.penalize_durability();
        Ok(true)
    }

    /// Mints `count` fresh items of a material for the requester.
    pub fn mint(&mut self, material: Material, count: u32, bound: bool) -> Result<(), OracleError> {
        if count == 0 {
            return Ok(());
        }
        let item_type = material.item_type();
        let durability = self
            .env
            .item_types()?
            .definition(item_type)
            .map_or(0, |definition| definition.durability);
        let ids = self.env.ids()?;
        for _ in 0..count {
            let mut item = Item::new(ids.allocate(), self.ledger.owner(), item_type, durability);
            if bound {
                item.flags.insert(crate::state::ItemFlags::BOUND);
            }
            self.ledger.mint(item);
        }
        Ok(())
    }

    /// Pays `required` units of a family through the dual policy.
    ///
    /// Sufficient supply spends the highest-unit walk and rebates the excess
    /// as singles; short supply spends every candidate.
    pub fn pay(
        &mut self,
        selection: &Selection,
        required: u32,
        family: UnitFamily,
    ) -> Result<Payment, EnhanceError> {
        match selection.plan(required) {
            SpendPlan::Sufficient { walk, excess } => {
                self.ledger.spend_all(&walk)?;
                self.mint(family.single(), excess, walk.any_bound())?;
                Ok(Payment::Paid { rebate: excess })
            }
            SpendPlan::Insufficient { total } => {
                self.ledger.spend_all(selection)?;
                Ok(Payment::Short { total })
            }
        }
    }

    pub fn announce(&mut self, announcement: Announcement) {
        self.announcements.push(announcement);
    }
}
