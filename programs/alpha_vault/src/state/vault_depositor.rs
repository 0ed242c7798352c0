use anchor_lang::prelude::*;
use crate::error::*;
use crate::math::{vault_math, SafeCast, SafeMath};

/// One holder's line in a vault's share ledger
#[account]
#[derive(Default)]
pub struct VaultDepositor {
    /// The vault this depositor belongs to
    pub vault: Pubkey,
    /// The depositor's authority
    pub authority: Pubkey,
    /// The depositor's shares
    pub shares: u64,
    /// Total underlying deposited
    pub total_deposited: u64,
    /// Total underlying withdrawn
    pub total_withdrawn: u64,
    /// Distributed reward already accounted for at the current shares
    pub reward_debt: u128,
    /// Settled reward not yet paid out
    pub unclaimed_rewards: u64,
    pub total_rewards_claimed: u64,
    /// Slot the depositor was created at
    pub created_slot: u64,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future use
    pub _reserved: [u64; 4],
}

impl VaultDepositor {
    pub const LEN: usize = 8 + // discriminator
        32 + // vault
        32 + // authority
        8 + // shares
        8 + // total_deposited
        8 + // total_withdrawn
        16 + // reward_debt
        8 + // unclaimed_rewards
        8 + // total_rewards_claimed
        8 + // created_slot
        1 + // bump
        32; // _reserved

    pub fn initialize(&mut self, vault: Pubkey, authority: Pubkey, slot: u64, bump: u8) -> VaultResult<()> {
        if self.authority != Pubkey::default() {
            return Err(VaultError::AlreadyInitialized);
        }

        self.vault = vault;
        self.authority = authority;
        self.shares = 0;
        self.total_deposited = 0;
        self.total_withdrawn = 0;
        self.reward_debt = 0;
        self.unclaimed_rewards = 0;
        self.total_rewards_claimed = 0;
        self.created_slot = slot;
        self.bump = bump;

        Ok(())
    }

    /// Distributed reward accumulated since the last settlement
    pub fn pending_rewards(&self, reward_per_share: u128) -> VaultResult<u64> {
        vault_math::calculate_accumulated_reward(self.shares, reward_per_share)?
            .safe_sub(self.reward_debt)?
            .safe_cast()
    }

    /// Settled plus pending reward
    pub fn claimable_rewards(&self, reward_per_share: u128) -> VaultResult<u64> {
        self.unclaimed_rewards.safe_add(self.pending_rewards(reward_per_share)?)
    }

    pub fn credit(&mut self, shares: u64, amount: u64, reward_per_share: u128) -> VaultResult<()> {
        let unclaimed_rewards = self.claimable_rewards(reward_per_share)?;
        let new_shares = self.shares.safe_add(shares)?;
        let new_deposited = self.total_deposited.safe_add(amount)?;
        let reward_debt = vault_math::calculate_accumulated_reward(new_shares, reward_per_share)?;

        self.shares = new_shares;
        self.total_deposited = new_deposited;
        self.unclaimed_rewards = unclaimed_rewards;
        self.reward_debt = reward_debt;

        Ok(())
    }

    /// Burn `shares` for `amount` of underlying. Pays out the burned shares'
    /// pro-rata part of the claimable reward and returns it.
    pub fn debit(&mut self, shares: u64, amount: u64, reward_per_share: u128) -> VaultResult<u64> {
        if shares > self.shares {
            return Err(VaultError::InsufficientBalance);
        }
        let claimable = self.claimable_rewards(reward_per_share)?;
        let reward: u64 = (claimable as u128)
            .safe_mul(shares as u128)?
            .safe_div(self.shares as u128)?
            .safe_cast()?;
        let remaining_shares = self.shares.safe_sub(shares)?;
        let new_withdrawn = self.total_withdrawn.safe_add(amount)?;
        let total_rewards_claimed = self.total_rewards_claimed.safe_add(reward)?;
        let reward_debt = vault_math::calculate_accumulated_reward(remaining_shares, reward_per_share)?;

        self.shares = remaining_shares;
        self.total_withdrawn = new_withdrawn;
        self.unclaimed_rewards = claimable.safe_sub(reward)?;
        self.total_rewards_claimed = total_rewards_claimed;
        self.reward_debt = reward_debt;

        Ok(reward)
    }

    pub fn balance_of(&self) -> u64 {
        self.shares
    }
}
