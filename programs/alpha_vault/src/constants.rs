use static_assertions::const_assert;

/// Precision constants
pub const PRICE_PRECISION: u64 = 1_000_000_000_000; // 1e12
pub const REWARD_RATE_PRECISION: u64 = 1_000_000_000; // rates are parts-per-billion per slot
pub const BASIS_POINTS_PRECISION: u64 = 10_000;
pub const REWARD_PER_SHARE_PRECISION: u128 = 1_000_000_000_000_000_000; // 1e18

/// Cascade layout
pub const STAGE_COUNT: usize = 4;
pub const FIRST_STAGE: u8 = 1;
pub const FINAL_STAGE: u8 = STAGE_COUNT as u8;

/// Default reward split (in basis points of each realized reward)
pub const DEFAULT_TEAM_FUND_BPS: u64 = 1_000; // 10%
pub const DEFAULT_TREASURY_FUND_BPS: u64 = 1_000; // 10%
pub const DEFAULT_STRATEGIC_WALLET_BPS: u64 = 500; // 5%

/// Stage pool limits
pub const MAX_REWARD_RATE_PPB: u64 = REWARD_RATE_PRECISION; // 100% of stake per slot

/// Controller registry capacity
pub const MAX_REGISTERED_VAULTS: usize = 16;

/// PDA seeds
pub const STORAGE_SEED: &[u8] = b"storage";
pub const CONTROLLER_SEED: &[u8] = b"controller";
pub const VAULT_SEED: &[u8] = b"vault";
pub const VAULT_TOKEN_ACCOUNT_SEED: &[u8] = b"vault_token_account";
pub const VAULT_DEPOSITOR_SEED: &[u8] = b"vault_depositor";
pub const STRATEGY_SEED: &[u8] = b"strategy";
pub const STRATEGY_REWARD_TOKEN_ACCOUNT_SEED: &[u8] = b"strategy_reward_token_account";
pub const STAGE_POOL_SEED: &[u8] = b"stage_pool";

const_assert!(
    DEFAULT_TEAM_FUND_BPS + DEFAULT_TREASURY_FUND_BPS + DEFAULT_STRATEGIC_WALLET_BPS
        <= BASIS_POINTS_PRECISION
);
const_assert!(STAGE_COUNT == 4);
const_assert!(MAX_REGISTERED_VAULTS > 0);
