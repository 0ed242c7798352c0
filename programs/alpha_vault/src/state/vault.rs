use anchor_lang::prelude::*;
use crate::adapter::Cascade;
use crate::error::*;
use crate::math::{vault_math, RewardSplit, SafeMath};
use crate::state::{AccessContext, Lifecycle, Strategy, VaultDepositor};

/// What a withdrawal pays out of custody
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Withdrawal {
    /// Underlying
    pub amount: u64,
    /// Distributed reward tokens
    pub reward: u64,
}

#[account]
#[derive(Default)]
pub struct Vault {
    /// The vault's pubkey
    pub pubkey: Pubkey,
    /// Access registry
    pub storage: Pubkey,
    /// The underlying (LP) token mint
    pub underlying_mint: Pubkey,
    /// Custody token account for every underlying unit the protocol manages
    pub vault_token_account: Pubkey,
    /// Strategy compounding this vault's principal; unset until `set_strategy`
    pub strategy: Pubkey,
    /// Total supply of shares
    pub total_shares: u64,
    /// Deposited principal not yet handed to the strategy
    pub idle_balance: u64,
    /// Total underlying ever deposited
    pub total_deposited: u64,
    /// Total underlying ever withdrawn
    pub total_withdrawn: u64,
    /// Distributed reward per share (scaled by REWARD_PER_SHARE_PRECISION)
    pub reward_per_share: u128,
    /// Distributed reward tokens held for depositors, including rounding dust
    pub depositor_rewards: u64,
    /// Distributed reward that arrived while no shares were outstanding
    pub undistributed_rewards: u64,
    pub lifecycle: Lifecycle,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl Vault {
    pub const LEN: usize = 8 + // discriminator
        32 + // pubkey
        32 + // storage
        32 + // underlying_mint
        32 + // vault_token_account
        32 + // strategy
        8 + // total_shares
        8 + // idle_balance
        8 + // total_deposited
        8 + // total_withdrawn
        16 + // reward_per_share
        8 + // depositor_rewards
        8 + // undistributed_rewards
        Lifecycle::LEN + // lifecycle
        1 + // bump
        32; // _reserved

    pub fn initialize(
        &mut self,
        pubkey: Pubkey,
        storage: Pubkey,
        underlying_mint: Pubkey,
        vault_token_account: Pubkey,
        bump: u8,
    ) -> VaultResult<()> {
        self.lifecycle.require_uninitialized()?;

        *self = Vault {
            pubkey,
            storage,
            underlying_mint,
            vault_token_account,
            lifecycle: Lifecycle::Initialized,
            bump,
            ..Vault::default()
        };

        Ok(())
    }

    pub fn set_strategy(&mut self, access: &AccessContext, strategy: &Strategy) -> VaultResult<()> {
        self.lifecycle.require_initialized()?;
        access.require_governance()?;
        strategy.lifecycle.require_initialized()?;

        if strategy.vault != self.pubkey {
            return Err(VaultError::StrategyMismatch);
        }

        self.strategy = strategy.pubkey;

        Ok(())
    }

    pub fn has_strategy(&self) -> bool {
        self.strategy != Pubkey::default()
    }

    fn require_strategy(&self, strategy: &Strategy) -> VaultResult<()> {
        if !self.has_strategy() {
            return Err(VaultError::StrategyNotSet);
        }
        if strategy.pubkey != self.strategy {
            return Err(VaultError::StrategyMismatch);
        }
        Ok(())
    }

    /// Idle principal plus everything the strategy holds across the cascade.
    /// Pending reward buckets are earmarked and excluded.
    pub fn total_underlying_managed(&self, strategy: &Strategy, cascade: &Cascade) -> VaultResult<u64> {
        self.idle_balance.safe_add(strategy.total_staged(cascade)?)
    }

    /// Price per share scaled by PRICE_PRECISION (1:1 on an empty ledger)
    pub fn share_price(&self, strategy: &Strategy, cascade: &Cascade) -> VaultResult<u128> {
        let total_managed = self.total_underlying_managed(strategy, cascade)?;
        vault_math::calculate_share_price(self.total_shares, total_managed)
    }

    /// Underlying `shares` currently redeem for
    pub fn preview_withdraw(&self, shares: u64, strategy: &Strategy, cascade: &Cascade) -> VaultResult<u64> {
        let total_managed = self.total_underlying_managed(strategy, cascade)?;
        vault_math::calculate_assets(shares, self.total_shares, total_managed)
    }

    /// Mint shares for `amount` of underlying already pulled into custody
    pub fn deposit(
        &mut self,
        depositor: &mut VaultDepositor,
        amount: u64,
        strategy: &Strategy,
        cascade: &Cascade,
    ) -> VaultResult<u64> {
        self.lifecycle.require_initialized()?;
        self.require_strategy(strategy)?;
        if depositor.vault != self.pubkey {
            return Err(VaultError::Unauthorized);
        }
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }

        let total_managed = self.total_underlying_managed(strategy, cascade)?;
        let shares = vault_math::calculate_shares(amount, self.total_shares, total_managed)?;
        if shares == 0 {
            return Err(VaultError::InvalidAmount);
        }

        let total_shares = self.total_shares.safe_add(shares)?;
        let idle_balance = self.idle_balance.safe_add(amount)?;
        let total_deposited = self.total_deposited.safe_add(amount)?;
        depositor.credit(shares, amount, self.reward_per_share)?;

        self.total_shares = total_shares;
        self.idle_balance = idle_balance;
        self.total_deposited = total_deposited;

        self.verify_invariants(strategy, cascade)?;

        Ok(shares)
    }

    /// Burn `shares` and recall the proportional underlying: idle first, then
    /// the strategy unwinds the cascade last-staked-first. Any distributed
    /// reward the burned shares carry is paid alongside. Fails with the vault,
    /// the depositor and the cascade untouched.
    pub fn withdraw(
        &mut self,
        depositor: &mut VaultDepositor,
        shares: u64,
        strategy: &mut Strategy,
        cascade: &mut Cascade,
    ) -> VaultResult<Withdrawal> {
        self.lifecycle.require_initialized()?;
        self.require_strategy(strategy)?;
        if depositor.vault != self.pubkey {
            return Err(VaultError::Unauthorized);
        }
        if shares == 0 {
            return Err(VaultError::InvalidAmount);
        }
        if shares > depositor.shares || shares > self.total_shares {
            return Err(VaultError::InsufficientBalance);
        }

        let total_managed = self.total_underlying_managed(strategy, cascade)?;
        let owed = vault_math::calculate_assets(shares, self.total_shares, total_managed)?;

        let from_idle = owed.min(self.idle_balance);
        let from_strategy = owed.safe_sub(from_idle)?;
        let recallable = strategy.withdrawable(cascade)?;
        if from_strategy > recallable {
            msg!(
                "Withdrawal of {} needs {} from the cascade, only {} recallable",
                owed,
                from_strategy,
                recallable
            );
            return Err(VaultError::InsufficientLiquidity);
        }

        let total_shares = self.total_shares.safe_sub(shares)?;
        let total_withdrawn = self.total_withdrawn.safe_add(owed)?;
        let idle_balance = self.idle_balance.safe_sub(from_idle)?;

        let mut settled = depositor.clone();
        // Rounding can leave the last claimant a unit beyond what is held
        let reward = settled
            .debit(shares, owed, self.reward_per_share)?
            .min(self.depositor_rewards);
        let depositor_rewards = self.depositor_rewards.safe_sub(reward)?;

        if from_strategy > 0 {
            strategy.unwind(from_strategy, cascade)?;
        }

        *depositor = settled;
        self.idle_balance = idle_balance;
        self.total_shares = total_shares;
        self.total_withdrawn = total_withdrawn;
        self.depositor_rewards = depositor_rewards;

        self.verify_invariants(strategy, cascade)?;

        Ok(Withdrawal { amount: owed, reward })
    }

    /// Permissionless: realize the strategy's reward. Shares are untouched.
    /// A compounding strategy moves the price through the managed total; a
    /// distributing one raises `reward_per_share` instead.
    pub fn harvest(&mut self, strategy: &mut Strategy, cascade: &mut Cascade, slot: u64) -> VaultResult<RewardSplit> {
        self.lifecycle.require_initialized()?;
        self.require_strategy(strategy)?;

        let preview = strategy.preview_harvest(cascade)?;
        let distribution = if !strategy.compound_rewards && preview.compounded > 0 {
            Some(self.plan_distribution(preview.compounded)?)
        } else {
            None
        };

        let split = strategy.harvest(cascade, slot)?;
        if let Some((reward_per_share, undistributed_rewards, depositor_rewards)) = distribution {
            self.reward_per_share = reward_per_share;
            self.undistributed_rewards = undistributed_rewards;
            self.depositor_rewards = depositor_rewards;
        }

        self.verify_invariants(strategy, cascade)?;

        Ok(split)
    }

    /// (reward_per_share, undistributed_rewards, depositor_rewards) after
    /// distributing `amount` over the outstanding shares
    fn plan_distribution(&self, amount: u64) -> VaultResult<(u128, u64, u64)> {
        let depositor_rewards = self.depositor_rewards.safe_add(amount)?;
        let distributable = self.undistributed_rewards.safe_add(amount)?;
        if self.total_shares == 0 {
            return Ok((self.reward_per_share, distributable, depositor_rewards));
        }

        let reward_per_share = self
            .reward_per_share
            .safe_add(vault_math::calculate_reward_per_share(distributable, self.total_shares)?)?;

        Ok((reward_per_share, 0, depositor_rewards))
    }

    pub fn verify_invariants(&self, strategy: &Strategy, cascade: &Cascade) -> VaultResult<()> {
        let total_managed = self.total_underlying_managed(strategy, cascade)?;

        // Outstanding shares must always be backed
        if self.total_shares > 0 && total_managed == 0 {
            msg!(
                "INVARIANT VIOLATION: total_shares ({}) with no managed underlying",
                self.total_shares
            );
            return Err(VaultError::InvariantViolation);
        }

        if self.undistributed_rewards > self.depositor_rewards {
            msg!(
                "INVARIANT VIOLATION: undistributed reward {} exceeds held {}",
                self.undistributed_rewards,
                self.depositor_rewards
            );
            return Err(VaultError::InvariantViolation);
        }

        strategy.verify_invariants()
    }
}
