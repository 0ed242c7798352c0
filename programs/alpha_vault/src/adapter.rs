use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::math::SafeMath;

/// The kind of external system a cascade stage stakes into
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StageKind {
    /// LP-staking farm (Onsen)
    #[default]
    LpFarm,
    /// Yield-bearing wrapper (SushiBar)
    YieldWrapper,
    /// Secondary farm for the wrapped token (Onx farm)
    SecondaryFarm,
    /// Final staking pool, the cascade's reward source (Onx staking)
    StakingPool,
}

/// Static description of one cascade stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageDescriptor {
    pub stage: u8,
    pub kind: StageKind,
    pub name: &'static str,
}

/// The staking waterfall, in stake order
pub const STAGES: [StageDescriptor; STAGE_COUNT] = [
    StageDescriptor { stage: 1, kind: StageKind::LpFarm, name: "onsen_farm" },
    StageDescriptor { stage: 2, kind: StageKind::YieldWrapper, name: "sushi_bar" },
    StageDescriptor { stage: 3, kind: StageKind::SecondaryFarm, name: "onx_farm" },
    StageDescriptor { stage: 4, kind: StageKind::StakingPool, name: "onx_staking_pool" },
];

pub fn stage_index(stage: u8) -> VaultResult<usize> {
    if !(FIRST_STAGE..=FINAL_STAGE).contains(&stage) {
        return Err(VaultError::InvalidStage);
    }
    Ok((stage - 1) as usize)
}

pub fn stage_descriptor(stage: u8) -> VaultResult<&'static StageDescriptor> {
    Ok(&STAGES[stage_index(stage)?])
}

/// Capability set of an external staking destination. The strategy is the
/// only position holder, so balances are the strategy's own.
///
/// A method that returns an error must leave the adapter unchanged, and the
/// read-only previews must agree with what the mutating call then does. The
/// strategy validates every step against the previews before it mutates.
pub trait StakingAdapter {
    fn kind(&self) -> StageKind;

    /// Principal currently staked
    fn balance_of(&self) -> u64;

    /// Reward accrued and not yet claimed
    fn earned(&self) -> u64;

    fn is_paused(&self) -> bool;

    /// What `withdraw(amount)` would release right now; 0 if it would refuse
    fn releasable(&self, amount: u64) -> u64;

    fn stake(&mut self, amount: u64) -> VaultResult<()>;

    /// Returns the amount actually released
    fn withdraw(&mut self, amount: u64) -> VaultResult<u64>;

    /// Pay out `amount` of the accrued reward; refuses more than `earned`
    fn claim_rewards(&mut self, amount: u64) -> VaultResult<()>;

    /// Bring reward accounting up to `slot`
    fn sync(&mut self, _slot: u64) -> VaultResult<()> {
        Ok(())
    }
}

/// The four adapters of one strategy, indexed by stage
pub struct Cascade<'a> {
    adapters: [&'a mut dyn StakingAdapter; STAGE_COUNT],
}

impl<'a> Cascade<'a> {
    pub fn new(adapters: [&'a mut dyn StakingAdapter; STAGE_COUNT]) -> Self {
        Self { adapters }
    }

    /// Every adapter must sit at the stage its kind belongs to
    pub fn verify_layout(&self) -> VaultResult<()> {
        for (descriptor, adapter) in STAGES.iter().zip(self.adapters.iter()) {
            if adapter.kind() != descriptor.kind {
                msg!(
                    "Stage {} expects {:?}, got {:?}",
                    descriptor.stage,
                    descriptor.kind,
                    adapter.kind()
                );
                return Err(VaultError::InvalidStage);
            }
        }
        Ok(())
    }

    pub fn sync(&mut self, slot: u64) -> VaultResult<()> {
        for adapter in self.adapters.iter_mut() {
            adapter.sync(slot)?;
        }
        Ok(())
    }

    pub fn adapter(&self, stage: u8) -> VaultResult<&(dyn StakingAdapter + 'a)> {
        Ok(&*self.adapters[stage_index(stage)?])
    }

    pub fn adapter_mut(&mut self, stage: u8) -> VaultResult<&mut (dyn StakingAdapter + 'a)> {
        Ok(&mut *self.adapters[stage_index(stage)?])
    }

    pub fn balance_of(&self, stage: u8) -> VaultResult<u64> {
        Ok(self.adapter(stage)?.balance_of())
    }

    /// Principal across all stages
    pub fn total_balance(&self) -> VaultResult<u64> {
        self.adapters
            .iter()
            .try_fold(0u64, |total, adapter| total.safe_add(adapter.balance_of()))
    }

    /// Principal that can be recalled right now (paused stages excluded)
    pub fn withdrawable_balance(&self) -> VaultResult<u64> {
        self.adapters
            .iter()
            .filter(|adapter| !adapter.is_paused())
            .try_fold(0u64, |total, adapter| total.safe_add(adapter.balance_of()))
    }

    pub fn stage_balances(&self) -> [u64; STAGE_COUNT] {
        let mut balances = [0u64; STAGE_COUNT];
        for (balance, adapter) in balances.iter_mut().zip(self.adapters.iter()) {
            *balance = adapter.balance_of();
        }
        balances
    }
}
