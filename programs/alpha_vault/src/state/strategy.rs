use anchor_lang::prelude::*;
use crate::adapter::*;
use crate::constants::*;
use crate::error::*;
use crate::math::{vault_math, RewardSplit, SafeMath};
use crate::state::{AccessContext, Lifecycle, Vault};

/// Earmarked reward balances awaiting a governance sweep
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardBucket {
    TeamFund,
    TreasuryFund,
    StrategicWallet,
}

/// Owns the staking waterfall for one vault and routes realized rewards
#[account]
#[derive(Default)]
pub struct Strategy {
    /// The strategy's pubkey
    pub pubkey: Pubkey,
    /// Access registry
    pub storage: Pubkey,
    /// The vault this strategy compounds for
    pub vault: Pubkey,
    /// Mint rewards are realized in
    pub reward_mint: Pubkey,
    /// Custody token account for reward tokens (reserves, buckets, depositor rewards)
    pub reward_token_account: Pubkey,
    /// Rewards are paid in the underlying and restaked; otherwise distributed per share
    pub compound_rewards: bool,
    /// Compounded reward parked while stage 1 refused it, restaked by the next stage-1 stake
    pub idle_balance: u64,
    /// Reward split (basis points of each realized reward)
    pub team_fund_bps: u64,
    pub treasury_fund_bps: u64,
    pub strategic_wallet_bps: u64,
    /// Fixed sweep destinations
    pub team_fund_wallet: Pubkey,
    pub treasury_wallet: Pubkey,
    pub strategic_wallet: Pubkey,
    /// Pending buckets
    pub pending_team_fund: u64,
    pub pending_treasury_fund: u64,
    pub pending_strategic_wallet: u64,
    /// Lifetime statistics
    pub total_rewards_realized: u64,
    pub total_compounded: u64,
    pub total_distributed: u64,
    pub total_team_fund_swept: u64,
    pub total_treasury_fund_swept: u64,
    pub total_strategic_wallet_swept: u64,
    pub last_harvest_slot: u64,
    pub lifecycle: Lifecycle,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u8; 32],
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeStrategyParams {
    pub team_fund_wallet: Pubkey,
    pub treasury_wallet: Pubkey,
    pub strategic_wallet: Pubkey,
    pub team_fund_bps: Option<u64>,
    pub treasury_fund_bps: Option<u64>,
    pub strategic_wallet_bps: Option<u64>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdateStrategyConfigParams {
    pub team_fund_bps: Option<u64>,
    pub treasury_fund_bps: Option<u64>,
    pub strategic_wallet_bps: Option<u64>,
    pub team_fund_wallet: Option<Pubkey>,
    pub treasury_wallet: Option<Pubkey>,
    pub strategic_wallet: Option<Pubkey>,
}

impl Strategy {
    pub const LEN: usize = 8 + // discriminator
        32 + // pubkey
        32 + // storage
        32 + // vault
        32 + // reward_mint
        32 + // reward_token_account
        1 + // compound_rewards
        8 + // idle_balance
        8 + // team_fund_bps
        8 + // treasury_fund_bps
        8 + // strategic_wallet_bps
        32 + // team_fund_wallet
        32 + // treasury_wallet
        32 + // strategic_wallet
        8 + // pending_team_fund
        8 + // pending_treasury_fund
        8 + // pending_strategic_wallet
        8 + // total_rewards_realized
        8 + // total_compounded
        8 + // total_distributed
        8 + // total_team_fund_swept
        8 + // total_treasury_fund_swept
        8 + // total_strategic_wallet_swept
        8 + // last_harvest_slot
        Lifecycle::LEN + // lifecycle
        1 + // bump
        32; // _reserved

    /// One-time setup binding the strategy to its vault. Rewards realized in
    /// the underlying compound; any other mint is distributed to depositors.
    pub fn initialize(
        &mut self,
        pubkey: Pubkey,
        vault: &Vault,
        reward_mint: Pubkey,
        reward_token_account: Pubkey,
        params: InitializeStrategyParams,
        bump: u8,
    ) -> VaultResult<()> {
        self.lifecycle.require_uninitialized()?;
        vault.lifecycle.require_initialized()?;

        let team_fund_bps = params.team_fund_bps.unwrap_or(DEFAULT_TEAM_FUND_BPS);
        let treasury_fund_bps = params.treasury_fund_bps.unwrap_or(DEFAULT_TREASURY_FUND_BPS);
        let strategic_wallet_bps = params.strategic_wallet_bps.unwrap_or(DEFAULT_STRATEGIC_WALLET_BPS);
        vault_math::validate_reward_split(team_fund_bps, treasury_fund_bps, strategic_wallet_bps)?;

        *self = Strategy {
            pubkey,
            storage: vault.storage,
            vault: vault.pubkey,
            reward_mint,
            reward_token_account,
            compound_rewards: reward_mint == vault.underlying_mint,
            team_fund_bps,
            treasury_fund_bps,
            strategic_wallet_bps,
            team_fund_wallet: params.team_fund_wallet,
            treasury_wallet: params.treasury_wallet,
            strategic_wallet: params.strategic_wallet,
            lifecycle: Lifecycle::Initialized,
            bump,
            ..Strategy::default()
        };

        Ok(())
    }

    pub fn update_config(&mut self, access: &AccessContext, params: UpdateStrategyConfigParams) -> VaultResult<()> {
        self.lifecycle.require_initialized()?;
        access.require_governance()?;

        let team_fund_bps = params.team_fund_bps.unwrap_or(self.team_fund_bps);
        let treasury_fund_bps = params.treasury_fund_bps.unwrap_or(self.treasury_fund_bps);
        let strategic_wallet_bps = params.strategic_wallet_bps.unwrap_or(self.strategic_wallet_bps);
        vault_math::validate_reward_split(team_fund_bps, treasury_fund_bps, strategic_wallet_bps)?;

        self.team_fund_bps = team_fund_bps;
        self.treasury_fund_bps = treasury_fund_bps;
        self.strategic_wallet_bps = strategic_wallet_bps;

        if let Some(team_fund_wallet) = params.team_fund_wallet {
            self.team_fund_wallet = team_fund_wallet;
        }
        if let Some(treasury_wallet) = params.treasury_wallet {
            self.treasury_wallet = treasury_wallet;
        }
        if let Some(strategic_wallet) = params.strategic_wallet {
            self.strategic_wallet = strategic_wallet;
        }

        Ok(())
    }

    /// Principal held by the strategy: idle buffer plus every stage
    pub fn total_staged(&self, cascade: &Cascade) -> VaultResult<u64> {
        self.idle_balance.safe_add(cascade.total_balance()?)
    }

    /// Principal recallable right now
    pub fn withdrawable(&self, cascade: &Cascade) -> VaultResult<u64> {
        self.idle_balance.safe_add(cascade.withdrawable_balance()?)
    }

    /// Move everything sitting at stage `stage - 1` into stage `stage`.
    /// Stage 1 draws the vault's idle principal plus the strategy buffer.
    /// An empty source is a no-op, so the cascade can be driven on a fixed schedule.
    pub fn stake_stage(
        &mut self,
        access: &AccessContext,
        stage: u8,
        vault: &mut Vault,
        cascade: &mut Cascade,
    ) -> VaultResult<u64> {
        self.lifecycle.require_initialized()?;
        access.require_governance_or_controller()?;
        stage_index(stage)?;
        if vault.pubkey != self.vault {
            return Err(VaultError::StrategyMismatch);
        }

        let available = if stage == FIRST_STAGE {
            vault.idle_balance.safe_add(self.idle_balance)?
        } else {
            cascade.balance_of(stage - 1)?
        };

        if available == 0 {
            msg!("Stage {} has nothing to stake", stage);
            return Ok(0);
        }

        if cascade.adapter(stage)?.is_paused() {
            msg!("Stage {} adapter refused stake", stage);
            return Err(VaultError::AdapterFailure);
        }
        cascade.balance_of(stage)?.safe_add(available)?;
        if stage > FIRST_STAGE && cascade.adapter(stage - 1)?.releasable(available) != available {
            msg!("Stage {} adapter refused to release {}", stage - 1, available);
            return Err(VaultError::AdapterFailure);
        }

        if stage == FIRST_STAGE {
            vault.idle_balance = 0;
            self.idle_balance = 0;
        } else {
            let released = cascade.adapter_mut(stage - 1)?.withdraw(available)?;
            if released != available {
                return Err(VaultError::AdapterFailure);
            }
        }
        cascade.adapter_mut(stage)?.stake(available)?;

        Ok(available)
    }

    /// The split harvesting would realize right now
    pub fn preview_harvest(&self, cascade: &Cascade) -> VaultResult<RewardSplit> {
        self.lifecycle.require_initialized()?;

        let final_stage = cascade.adapter(FINAL_STAGE)?;
        let reward = final_stage.earned();
        if reward == 0 {
            return Ok(RewardSplit::default());
        }
        if final_stage.is_paused() {
            msg!("Stage {} adapter refused claim", FINAL_STAGE);
            return Err(VaultError::AdapterFailure);
        }

        vault_math::split_reward(
            reward,
            self.team_fund_bps,
            self.treasury_fund_bps,
            self.strategic_wallet_bps,
        )
    }

    /// Realize the final stage's accrued reward and split it. When compounding,
    /// the depositor remainder is restaked into stage 1, or parked in the idle
    /// buffer while stage 1 is paused. Otherwise it is returned for the vault
    /// to distribute per share.
    pub fn harvest(&mut self, cascade: &mut Cascade, slot: u64) -> VaultResult<RewardSplit> {
        let split = self.preview_harvest(cascade)?;
        if split.reward == 0 {
            self.last_harvest_slot = slot;
            return Ok(split);
        }

        let pending_team_fund = self.pending_team_fund.safe_add(split.team_fund)?;
        let pending_treasury_fund = self.pending_treasury_fund.safe_add(split.treasury_fund)?;
        let pending_strategic_wallet = self.pending_strategic_wallet.safe_add(split.strategic_wallet)?;
        let total_rewards_realized = self.total_rewards_realized.safe_add(split.reward)?;

        let mut total_compounded = self.total_compounded;
        let mut total_distributed = self.total_distributed;
        let mut idle_balance = self.idle_balance;
        let mut restake = false;
        if self.compound_rewards {
            total_compounded = total_compounded.safe_add(split.compounded)?;
            if split.compounded > 0 && !cascade.adapter(FIRST_STAGE)?.is_paused() {
                cascade.balance_of(FIRST_STAGE)?.safe_add(split.compounded)?;
                restake = true;
            } else {
                idle_balance = idle_balance.safe_add(split.compounded)?;
            }
        } else {
            total_distributed = total_distributed.safe_add(split.compounded)?;
        }

        cascade.adapter_mut(FINAL_STAGE)?.claim_rewards(split.reward)?;
        if restake {
            cascade.adapter_mut(FIRST_STAGE)?.stake(split.compounded)?;
        }

        self.pending_team_fund = pending_team_fund;
        self.pending_treasury_fund = pending_treasury_fund;
        self.pending_strategic_wallet = pending_strategic_wallet;
        self.total_rewards_realized = total_rewards_realized;
        self.total_compounded = total_compounded;
        self.total_distributed = total_distributed;
        self.idle_balance = idle_balance;
        self.last_harvest_slot = slot;

        Ok(split)
    }

    /// Recall exactly `amount` of principal: idle buffer first, then from the
    /// highest non-empty stage downward, skipping paused stages. The whole
    /// plan is checked against each adapter's `releasable` before anything
    /// moves, so a shortfall fails with nothing touched.
    pub fn unwind(&mut self, amount: u64, cascade: &mut Cascade) -> VaultResult<u64> {
        self.lifecycle.require_initialized()?;

        let from_idle = amount.min(self.idle_balance);
        let mut planned = from_idle;
        // (request, expected release) per stage
        let mut plan = [(0u64, 0u64); STAGE_COUNT];

        for stage in (FIRST_STAGE..=FINAL_STAGE).rev() {
            if planned >= amount {
                break;
            }
            let adapter = cascade.adapter(stage)?;
            let balance = adapter.balance_of();
            if balance == 0 || adapter.is_paused() {
                continue;
            }
            let request = amount.safe_sub(planned)?.min(balance);
            let release = adapter.releasable(request);
            plan[stage_index(stage)?] = (request, release);
            planned = planned.safe_add(release)?;
        }

        if planned < amount {
            msg!("Cascade can release {} of the {} requested", planned, amount);
            return Err(VaultError::InsufficientLiquidity);
        }

        for stage in (FIRST_STAGE..=FINAL_STAGE).rev() {
            let (request, release) = plan[stage_index(stage)?];
            if request == 0 {
                continue;
            }
            if cascade.adapter_mut(stage)?.withdraw(request)? != release {
                return Err(VaultError::AdapterFailure);
            }
        }
        self.idle_balance = self.idle_balance.safe_sub(from_idle)?;

        Ok(planned)
    }

    /// Transfer-out amount for a bucket; zeroes it. Zero means nothing to sweep.
    pub fn sweep(&mut self, access: &AccessContext, bucket: RewardBucket) -> VaultResult<u64> {
        self.lifecycle.require_initialized()?;
        access.require_governance()?;

        let (pending, swept) = match bucket {
            RewardBucket::TeamFund => (&mut self.pending_team_fund, &mut self.total_team_fund_swept),
            RewardBucket::TreasuryFund => (&mut self.pending_treasury_fund, &mut self.total_treasury_fund_swept),
            RewardBucket::StrategicWallet => {
                (&mut self.pending_strategic_wallet, &mut self.total_strategic_wallet_swept)
            }
        };

        let amount = *pending;
        if amount == 0 {
            return Ok(0);
        }
        *swept = swept.safe_add(amount)?;
        *pending = 0;

        Ok(amount)
    }

    pub fn withdraw_pending_team_fund(&mut self, access: &AccessContext) -> VaultResult<u64> {
        self.sweep(access, RewardBucket::TeamFund)
    }

    pub fn withdraw_pending_treasury_fund(&mut self, access: &AccessContext) -> VaultResult<u64> {
        self.sweep(access, RewardBucket::TreasuryFund)
    }

    pub fn withdraw_x_sushi_to_strategic_wallet(&mut self, access: &AccessContext) -> VaultResult<u64> {
        self.sweep(access, RewardBucket::StrategicWallet)
    }

    pub fn pending(&self, bucket: RewardBucket) -> u64 {
        match bucket {
            RewardBucket::TeamFund => self.pending_team_fund,
            RewardBucket::TreasuryFund => self.pending_treasury_fund,
            RewardBucket::StrategicWallet => self.pending_strategic_wallet,
        }
    }

    pub fn destination(&self, bucket: RewardBucket) -> Pubkey {
        match bucket {
            RewardBucket::TeamFund => self.team_fund_wallet,
            RewardBucket::TreasuryFund => self.treasury_wallet,
            RewardBucket::StrategicWallet => self.strategic_wallet,
        }
    }

    pub fn total_pending(&self) -> VaultResult<u64> {
        self.pending_team_fund
            .safe_add(self.pending_treasury_fund)?
            .safe_add(self.pending_strategic_wallet)
    }

    pub fn verify_invariants(&self) -> VaultResult<()> {
        if vault_math::validate_reward_split(
            self.team_fund_bps,
            self.treasury_fund_bps,
            self.strategic_wallet_bps,
        )
        .is_err()
        {
            msg!(
                "INVARIANT VIOLATION: reward split {}+{}+{} bps exceeds {}",
                self.team_fund_bps,
                self.treasury_fund_bps,
                self.strategic_wallet_bps,
                BASIS_POINTS_PRECISION
            );
            return Err(VaultError::InvariantViolation);
        }

        // Only compounded reward is ever parked
        if !self.compound_rewards && self.idle_balance > 0 {
            msg!(
                "INVARIANT VIOLATION: idle buffer {} on a distributing strategy",
                self.idle_balance
            );
            return Err(VaultError::InvariantViolation);
        }
        Ok(())
    }
}
