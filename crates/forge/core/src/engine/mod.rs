//! Enhancement engine: the envelope shared by every protocol.
//!
//! [`ForgeEngine::execute`] evaluates one request against an immutable view of
//! the region state and returns the resulting [`ItemDelta`]. It never mutates
//! the state; the caller persists the delta, then commits it.
//!
//! # Envelope
//!
//! 1. target validation (exists, owned, unlocked, not suspicious, undamaged)
//! 2. definition lookup and eligibility gate
//! 3. ledger opening (every consumable validated before any spend)
//! 4. protocol `apply` on a working copy, then `post_validate`
//! 5. bind propagation and delta assembly
use crate::enhance::{
    Announcement, EnhanceContext, EnhanceError, EnhanceRequest, EnhanceResponse, Requester,
    ValidationError,
};
use crate::env::{ForgeEnv, OracleError};
use crate::ledger::Ledger;
use crate::state::{ForgeState, Item, ItemDelta, ItemFlags, ItemId};

/// Everything a committed request produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnhanceOutcome {
    pub response: EnhanceResponse,
    pub delta: ItemDelta,
    pub announcements: Vec<Announcement>,
    /// Chance rolls consumed by the request.
    pub rolls: u32,
    /// Composition progress discarded at the tier ceiling.
    pub discarded_progress: u32,
}

/// Stateless evaluator bound to one region state.
#[derive(Clone, Copy, Debug)]
pub struct ForgeEngine<'s> {
    state: &'s ForgeState,
}

impl<'s> ForgeEngine<'s> {
    pub fn new(state: &'s ForgeState) -> Self {
        Self { state }
    }

    /// Evaluates one request.
    ///
    /// # Errors
    ///
    /// Every error is a rejection raised before the delta exists; the state
    /// is unchanged and nothing is spent.
    pub fn execute(
        &self,
        env: ForgeEnv<'_>,
        requester: Requester,
        request: &EnhanceRequest,
    ) -> Result<EnhanceOutcome, EnhanceError> {
        let target = self.validate_target(env, requester, request.target)?;
        let definition = env
            .item_types()?
            .definition(target.item_type)
            .ok_or(OracleError::ItemTypeNotFound(target.item_type))?;

        let protocol = request.kind.protocol();
        protocol.check(target, &definition)?;

        let ledger = Ledger::open(
            self.state,
            requester.owner,
            target.id,
            &request.consumables,
            env.suspicion()?,
        )?;

        let mut ctx = EnhanceContext::new(
            env,
            request,
            target.clone(),
            definition,
            ledger,
            self.state.seed,
            self.state.nonce,
        );
        protocol.apply(&mut ctx)?;
        protocol.post_validate(target, &ctx)?;

        Ok(Self::finish(requester, ctx))
    }

    fn validate_target(
        &self,
        env: ForgeEnv<'_>,
        requester: Requester,
        id: ItemId,
    ) -> Result<&'s Item, EnhanceError> {
        let target = self
            .state
            .item(id)
            .ok_or(ValidationError::TargetNotFound(id))?;
        if target.owner != requester.owner {
            return Err(ValidationError::TargetNotOwned(id).into());
        }
        if target.is_locked() {
            return Err(ValidationError::TargetLocked(id).into());
        }
        if target.is_suspicious() || env.suspicion()?.is_flagged(id) {
            return Err(ValidationError::TargetSuspicious(id).into());
        }
        if !target.is_undamaged() {
            return Err(ValidationError::TargetDamaged(id).into());
        }
        Ok(target)
    }

    fn finish(requester: Requester, ctx: EnhanceContext<'_>) -> EnhanceOutcome {
        let rolls = ctx.rolls();
        let EnhanceContext {
            mut target,
            ledger,
            result,
            announcements,
            discarded_progress,
            ..
        } = ctx;

        if ledger.spent_bound() {
            target.flags.insert(ItemFlags::BOUND);
        }

        let (spent, minted) = ledger.into_parts();
        let response = EnhanceResponse {
            target: target.id,
            result,
            item: target.clone(),
        };
        let delta = ItemDelta {
            owner: requester.owner,
            updated: vec![target],
            created: minted,
            removed: spent.to_vec(),
        };

        EnhanceOutcome {
            response,
            delta,
            announcements,
            rolls,
            discarded_progress,
        }
    }
}
