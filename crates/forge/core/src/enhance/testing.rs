//! Shared fixtures for protocol tests.
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use super::{EnhanceError, EnhanceRequest, Requester};
use crate::config::ForgeConfig;
use crate::engine::{EnhanceOutcome, ForgeEngine};
use crate::env::{
    ChanceOracle, Env, ForgeEnv, IdAllocator, ItemTypeDefinition, ItemTypeOracle, SuspicionOracle,
};
use crate::ledger::Material;
use crate::state::{ForgeState, Item, ItemId, ItemTypeId, OwnerId, RegionId};

pub(crate) const OWNER: OwnerId = OwnerId(1);

/// Raw value making every percentage and odds roll succeed.
pub(crate) const HIT: u32 = 0;
/// Raw value making every roll below certainty fail.
pub(crate) const MISS: u32 = 99;

/// Chance oracle replaying scripted raw values, then `fallback`.
pub(crate) struct ScriptedChance {
    values: Mutex<VecDeque<u32>>,
    fallback: u32,
}

impl ScriptedChance {
    pub(crate) fn new(values: impl IntoIterator<Item = u32>, fallback: u32) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            fallback,
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }
}

impl ChanceOracle for ScriptedChance {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.values
            .lock()
            .ok()
            .and_then(|mut values| values.pop_front())
            .unwrap_or(self.fallback)
    }
}

#[derive(Default)]
pub(crate) struct TestCatalog(HashMap<ItemTypeId, ItemTypeDefinition>);

impl TestCatalog {
    pub(crate) fn add(&mut self, definition: ItemTypeDefinition) {
        self.0.insert(definition.id, definition);
    }
}

impl ItemTypeOracle for TestCatalog {
    fn definition(&self, id: ItemTypeId) -> Option<ItemTypeDefinition> {
        self.0.get(&id).cloned()
    }

    fn all_definitions(&self) -> Vec<ItemTypeDefinition> {
        self.0.values().cloned().collect()
    }
}

#[derive(Default)]
pub(crate) struct FlaggedItems(pub(crate) Vec<ItemId>);

impl SuspicionOracle for FlaggedItems {
    fn is_flagged(&self, item: ItemId) -> bool {
        self.0.contains(&item)
    }
}

pub(crate) struct CountingIds(AtomicU32);

impl IdAllocator for CountingIds {
    fn allocate(&self) -> ItemId {
        ItemId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

// well-known test types
pub(crate) const BLADE: ItemTypeId = ItemTypeId(410_335); // normal one-hander, level 90
pub(crate) const BLADE_NEXT: ItemTypeId = ItemTypeId(410_345); // level 95
pub(crate) const BLADE_REFINED: ItemTypeId = ItemTypeId(410_336);
pub(crate) const HIGH_BLADE: ItemTypeId = ItemTypeId(410_505); // level 115
pub(crate) const HIGH_BLADE_NEXT: ItemTypeId = ItemTypeId(410_515);
pub(crate) const ELITE_ARMOR: ItemTypeId = ItemTypeId(130_308);
pub(crate) const SUPER_ARMOR: ItemTypeId = ItemTypeId(130_309);
pub(crate) const RING: ItemTypeId = ItemTypeId(150_205);
pub(crate) const RING_REFINED: ItemTypeId = ItemTypeId(150_206);
pub(crate) const WING: ItemTypeId = ItemTypeId(203_005);
pub(crate) const MOUNT: ItemTypeId = ItemTypeId(300_000);
pub(crate) const TALISMAN: ItemTypeId = ItemTypeId(201_009);
pub(crate) const NORMAL_GEM: ItemTypeId = ItemTypeId(700_001);
pub(crate) const REFINED_GEM: ItemTypeId = ItemTypeId(700_012);
pub(crate) const SUPER_DRAGON_GEM: ItemTypeId = ItemTypeId(700_013);

pub(crate) fn stone(tier: u32) -> ItemTypeId {
    ItemTypeId(730_000 + tier)
}

/// Region state, oracles and a request runner.
pub(crate) struct Fixture {
    pub state: ForgeState,
    pub catalog: TestCatalog,
    pub config: ForgeConfig,
    pub chance: ScriptedChance,
    pub suspicion: FlaggedItems,
    pub ids: CountingIds,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let mut catalog = TestCatalog::default();
        let def = ItemTypeDefinition::new;
        catalog.add(
            def(BLADE, "Blade", 90, 3000)
                .with_level_successor(BLADE_NEXT)
                .with_quality_successor(BLADE_REFINED),
        );
        catalog.add(def(BLADE_NEXT, "Blade", 95, 3200));
        catalog.add(def(BLADE_REFINED, "Blade", 90, 3000));
        catalog.add(def(HIGH_BLADE, "Blade", 115, 4000).with_level_successor(HIGH_BLADE_NEXT));
        catalog.add(def(HIGH_BLADE_NEXT, "Blade", 120, 4200));
        catalog.add(def(ELITE_ARMOR, "Armor", 30, 2000).with_quality_successor(SUPER_ARMOR));
        catalog.add(def(SUPER_ARMOR, "Armor", 30, 2000));
        catalog.add(def(RING, "Ring", 20, 1000).with_quality_successor(RING_REFINED));
        catalog.add(def(RING_REFINED, "Ring", 20, 1000));
        catalog.add(def(WING, "Wing", 1, 1000));
        catalog.add(def(MOUNT, "Steed", 1, 0));
        catalog.add(def(TALISMAN, "Fan", 1, 0));
        for gem in [NORMAL_GEM, REFINED_GEM, SUPER_DRAGON_GEM] {
            catalog.add(def(gem, "Gem", 1, 1));
        }
        for material in [
            Material::METEOR,
            Material::METEOR_SCROLL,
            Material::DRAGON_BALL,
            Material::DRAGON_BALL_SCROLL,
            Material::TOUGH_DRILL,
            Material::STAR_DRILL,
        ] {
            catalog.add(def(material, "Material", 1, 1));
        }

        Self {
            state: ForgeState::new(7),
            catalog,
            config: ForgeConfig::default(),
            chance: ScriptedChance::new([], MISS),
            suspicion: FlaggedItems::default(),
            ids: CountingIds(AtomicU32::new(10_000)),
        }
    }

    /// Replaces the scripted chance values; unscripted rolls fail.
    pub(crate) fn script(&mut self, values: impl IntoIterator<Item = u32>) {
        self.chance = ScriptedChance::new(values, MISS);
    }

    /// Gives the owner an inventory item of the given type.
    pub(crate) fn give(&mut self, id: u32, item_type: ItemTypeId) -> ItemId {
        let durability = self
            .catalog
            .definition(item_type)
            .map_or(0, |definition| definition.durability);
        self.put(Item::new(ItemId(id), OWNER, item_type, durability))
    }

    pub(crate) fn put(&mut self, item: Item) -> ItemId {
        let id = item.id;
        self.state.insert(item);
        id
    }

    pub(crate) fn item(&self, id: ItemId) -> &Item {
        self.state.item(id).expect("item present")
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> &mut Item {
        self.state.item_mut(id).expect("item present")
    }

    pub(crate) fn env(&self) -> ForgeEnv<'_> {
        Env::with_all(
            &self.catalog,
            &self.config,
            &self.chance,
            &self.suspicion,
            &self.ids,
        )
        .into_forge_env()
    }

    pub(crate) fn run(&self, request: &EnhanceRequest) -> Result<EnhanceOutcome, EnhanceError> {
        ForgeEngine::new(&self.state).execute(
            self.env(),
            Requester::new(OWNER, RegionId(0)),
            request,
        )
    }

    /// Runs a request and commits its delta.
    pub(crate) fn apply(&mut self, request: &EnhanceRequest) -> Result<EnhanceOutcome, EnhanceError> {
        let outcome = self.run(request)?;
        self.state.commit(&outcome.delta);
        Ok(outcome)
    }

    pub(crate) fn minted_of(&self, outcome: &EnhanceOutcome, item_type: ItemTypeId) -> usize {
        outcome
            .delta
            .created
            .iter()
            .filter(|item| item.item_type == item_type)
            .count()
    }
}
