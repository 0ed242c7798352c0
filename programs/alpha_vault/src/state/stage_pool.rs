use anchor_lang::prelude::*;
use crate::adapter::*;
use crate::constants::*;
use crate::error::*;
use crate::math::{vault_math, SafeMath};
use crate::state::AccessContext;

/// On-chain ledger standing in for one external staking destination.
/// The strategy is its single staker. Only the final stage pays reward, out of
/// a funded reserve held in the strategy's reward custody account.
#[account]
#[derive(Default)]
pub struct StagePool {
    /// Strategy owning the position
    pub strategy: Pubkey,
    /// Cascade stage (1..=4)
    pub stage: u8,
    pub kind: StageKind,
    /// Principal staked by the strategy
    pub staked: u64,
    /// Reward per staked unit per slot, parts per billion
    pub reward_rate_ppb: u64,
    /// Funded reward not yet accrued
    pub reward_reserve: u64,
    /// Accrued and unclaimed reward
    pub accrued_rewards: u64,
    pub last_update_slot: u64,
    pub total_rewards_paid: u64,
    /// A paused pool refuses stake/withdraw/claim
    pub paused: bool,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u8; 16],
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct InitializeStagePoolParams {
    pub reward_rate_ppb: Option<u64>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdateStagePoolParams {
    pub reward_rate_ppb: Option<u64>,
    pub paused: Option<bool>,
}

impl StagePool {
    pub const LEN: usize = 8 + // discriminator
        32 + // strategy
        1 + // stage
        1 + // kind
        8 + // staked
        8 + // reward_rate_ppb
        8 + // reward_reserve
        8 + // accrued_rewards
        8 + // last_update_slot
        8 + // total_rewards_paid
        1 + // paused
        1 + // bump
        16; // _reserved

    pub fn initialize(
        &mut self,
        strategy: Pubkey,
        stage: u8,
        params: InitializeStagePoolParams,
        slot: u64,
        bump: u8,
    ) -> VaultResult<()> {
        if self.strategy != Pubkey::default() {
            return Err(VaultError::AlreadyInitialized);
        }
        let descriptor = stage_descriptor(stage)?;
        let reward_rate_ppb = params.reward_rate_ppb.unwrap_or(0);
        validate_reward_rate(stage, reward_rate_ppb)?;

        self.strategy = strategy;
        self.stage = stage;
        self.kind = descriptor.kind;
        self.staked = 0;
        self.reward_rate_ppb = reward_rate_ppb;
        self.reward_reserve = 0;
        self.accrued_rewards = 0;
        self.last_update_slot = slot;
        self.total_rewards_paid = 0;
        self.paused = false;
        self.bump = bump;

        Ok(())
    }

    /// Add reward tokens that the pool may pay out over time
    pub fn fund_rewards(&mut self, amount: u64) -> VaultResult<()> {
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }
        if self.stage != FINAL_STAGE {
            msg!("Stage {} pays no reward and takes no funding", self.stage);
            return Err(VaultError::InvalidStagePoolConfig);
        }
        self.reward_reserve = self.reward_reserve.safe_add(amount)?;
        Ok(())
    }

    pub fn update_config(&mut self, access: &AccessContext, params: UpdateStagePoolParams) -> VaultResult<()> {
        access.require_governance()?;

        let reward_rate_ppb = params.reward_rate_ppb.unwrap_or(self.reward_rate_ppb);
        validate_reward_rate(self.stage, reward_rate_ppb)?;

        self.reward_rate_ppb = reward_rate_ppb;
        if let Some(paused) = params.paused {
            self.paused = paused;
        }

        Ok(())
    }

    /// Accrue reward up to `slot`, capped by the funded reserve
    pub fn accrue(&mut self, slot: u64) -> VaultResult<()> {
        if slot <= self.last_update_slot {
            return Ok(());
        }

        let elapsed = slot.safe_sub(self.last_update_slot)?;
        let accrued = vault_math::calculate_accrued_reward(self.staked, self.reward_rate_ppb, elapsed)?
            .min(self.reward_reserve);

        self.reward_reserve = self.reward_reserve.safe_sub(accrued)?;
        self.accrued_rewards = self.accrued_rewards.safe_add(accrued)?;
        self.last_update_slot = slot;

        Ok(())
    }

    fn require_active(&self) -> VaultResult<()> {
        if self.paused {
            msg!("Stage {} pool is paused", self.stage);
            return Err(VaultError::AdapterFailure);
        }
        Ok(())
    }
}

/// Reward flows out of the final stage only
fn validate_reward_rate(stage: u8, reward_rate_ppb: u64) -> VaultResult<()> {
    if reward_rate_ppb > MAX_REWARD_RATE_PPB {
        return Err(VaultError::InvalidStagePoolConfig);
    }
    if reward_rate_ppb > 0 && stage != FINAL_STAGE {
        msg!("Stage {} cannot carry a reward rate", stage);
        return Err(VaultError::InvalidStagePoolConfig);
    }
    Ok(())
}

impl StakingAdapter for StagePool {
    fn kind(&self) -> StageKind {
        self.kind
    }

    fn balance_of(&self) -> u64 {
        self.staked
    }

    fn earned(&self) -> u64 {
        self.accrued_rewards
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn stake(&mut self, amount: u64) -> VaultResult<()> {
        self.require_active()?;
        self.staked = self.staked.safe_add(amount)?;
        Ok(())
    }

    fn releasable(&self, amount: u64) -> u64 {
        if self.paused || amount > self.staked {
            return 0;
        }
        amount
    }

    fn withdraw(&mut self, amount: u64) -> VaultResult<u64> {
        self.require_active()?;
        if amount > self.staked {
            return Err(VaultError::AdapterFailure);
        }
        self.staked = self.staked.safe_sub(amount)?;
        Ok(amount)
    }

    fn claim_rewards(&mut self, amount: u64) -> VaultResult<()> {
        self.require_active()?;
        if amount > self.accrued_rewards {
            return Err(VaultError::AdapterFailure);
        }
        let total_rewards_paid = self.total_rewards_paid.safe_add(amount)?;

        self.accrued_rewards = self.accrued_rewards.safe_sub(amount)?;
        self.total_rewards_paid = total_rewards_paid;
        Ok(())
    }

    fn sync(&mut self, slot: u64) -> VaultResult<()> {
        self.accrue(slot)
    }
}
