use crate::error::*;

/// Checked arithmetic returning the vault's error type
pub trait SafeMath<T> {
    fn safe_add(&self, other: T) -> VaultResult<T>;
    fn safe_sub(&self, other: T) -> VaultResult<T>;
    fn safe_mul(&self, other: T) -> VaultResult<T>;
    fn safe_div(&self, other: T) -> VaultResult<T>;
}

macro_rules! impl_safe_math {
    ($($t:ty),*) => {$(
        impl SafeMath<$t> for $t {
            fn safe_add(&self, other: $t) -> VaultResult<$t> {
                self.checked_add(other).ok_or(VaultError::MathOverflow)
            }

            fn safe_sub(&self, other: $t) -> VaultResult<$t> {
                self.checked_sub(other).ok_or(VaultError::MathOverflow)
            }

            fn safe_mul(&self, other: $t) -> VaultResult<$t> {
                self.checked_mul(other).ok_or(VaultError::MathOverflow)
            }

            fn safe_div(&self, other: $t) -> VaultResult<$t> {
                if other == 0 {
                    return Err(VaultError::DivisionByZero);
                }
                Ok(self / other)
            }
        }
    )*};
}

impl_safe_math!(u64, u128);

/// Safe casting operations
pub trait SafeCast<T> {
    fn safe_cast(&self) -> VaultResult<T>;
}

impl SafeCast<u64> for u128 {
    fn safe_cast(&self) -> VaultResult<u64> {
        if *self > u64::MAX as u128 {
            return Err(VaultError::MathOverflow);
        }
        Ok(*self as u64)
    }
}

impl SafeCast<u128> for u64 {
    fn safe_cast(&self) -> VaultResult<u128> {
        Ok(*self as u128)
    }
}

/// How one realized reward is divided between the funds and the depositors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardSplit {
    pub reward: u64,
    pub team_fund: u64,
    pub treasury_fund: u64,
    pub strategic_wallet: u64,
    /// Depositors' remainder: restaked into stage 1 when rewards are paid in
    /// the underlying, otherwise distributed per share
    pub compounded: u64,
}

/// Vault-specific math functions
pub mod vault_math {
    use super::*;
    use crate::constants::*;

    /// Shares to mint for `amount` of underlying. 1:1 on an empty ledger.
    pub fn calculate_shares(amount: u64, total_shares: u64, total_managed: u64) -> VaultResult<u64> {
        if total_shares == 0 {
            return Ok(amount);
        }

        if total_managed == 0 {
            return Err(VaultError::DivisionByZero);
        }

        (amount as u128)
            .safe_mul(total_shares as u128)?
            .safe_div(total_managed as u128)?
            .safe_cast()
    }

    /// Underlying owed for `shares`. Rounds down, in favour of the remaining holders.
    pub fn calculate_assets(shares: u64, total_shares: u64, total_managed: u64) -> VaultResult<u64> {
        if total_shares == 0 {
            return Ok(0);
        }

        (shares as u128)
            .safe_mul(total_managed as u128)?
            .safe_div(total_shares as u128)?
            .safe_cast()
    }

    /// Share price scaled by PRICE_PRECISION
    pub fn calculate_share_price(total_shares: u64, total_managed: u64) -> VaultResult<u128> {
        if total_shares == 0 {
            return Ok(PRICE_PRECISION as u128);
        }

        (total_managed as u128)
            .safe_mul(PRICE_PRECISION as u128)?
            .safe_div(total_shares as u128)
    }

    pub fn validate_reward_split(
        team_fund_bps: u64,
        treasury_fund_bps: u64,
        strategic_wallet_bps: u64,
    ) -> VaultResult<()> {
        let total = team_fund_bps
            .safe_add(treasury_fund_bps)?
            .safe_add(strategic_wallet_bps)?;
        if total > BASIS_POINTS_PRECISION {
            return Err(VaultError::InvalidRewardSplit);
        }
        Ok(())
    }

    fn bps_of(amount: u64, bps: u64) -> VaultResult<u64> {
        (amount as u128)
            .safe_mul(bps as u128)?
            .safe_div(BASIS_POINTS_PRECISION as u128)?
            .safe_cast()
    }

    /// Split a realized reward. Rounding dust always lands in `compounded`.
    pub fn split_reward(
        reward: u64,
        team_fund_bps: u64,
        treasury_fund_bps: u64,
        strategic_wallet_bps: u64,
    ) -> VaultResult<RewardSplit> {
        validate_reward_split(team_fund_bps, treasury_fund_bps, strategic_wallet_bps)?;

        let team_fund = bps_of(reward, team_fund_bps)?;
        let treasury_fund = bps_of(reward, treasury_fund_bps)?;
        let strategic_wallet = bps_of(reward, strategic_wallet_bps)?;
        let compounded = reward
            .safe_sub(team_fund)?
            .safe_sub(treasury_fund)?
            .safe_sub(strategic_wallet)?;

        Ok(RewardSplit {
            reward,
            team_fund,
            treasury_fund,
            strategic_wallet,
            compounded,
        })
    }

    /// Per-share increment for distributing `amount` over `total_shares`,
    /// scaled by REWARD_PER_SHARE_PRECISION. Rounds down.
    pub fn calculate_reward_per_share(amount: u64, total_shares: u64) -> VaultResult<u128> {
        if total_shares == 0 {
            return Err(VaultError::DivisionByZero);
        }

        (amount as u128)
            .safe_mul(REWARD_PER_SHARE_PRECISION)?
            .safe_div(total_shares as u128)
    }

    /// Reward `shares` have accumulated at `reward_per_share`
    pub fn calculate_accumulated_reward(shares: u64, reward_per_share: u128) -> VaultResult<u128> {
        (shares as u128)
            .safe_mul(reward_per_share)?
            .safe_div(REWARD_PER_SHARE_PRECISION)
    }

    /// Reward accrued by `staked` over `elapsed_slots` at `rate_ppb` per slot
    pub fn calculate_accrued_reward(
        staked: u64,
        rate_ppb: u64,
        elapsed_slots: u64,
    ) -> VaultResult<u64> {
        if staked == 0 || rate_ppb == 0 || elapsed_slots == 0 {
            return Ok(0);
        }

        (staked as u128)
            .safe_mul(rate_ppb as u128)?
            .safe_mul(elapsed_slots as u128)?
            .safe_div(REWARD_RATE_PRECISION as u128)?
            .safe_cast()
    }
}
