use anchor_lang::prelude::*;

#[event]
pub struct DepositEvent {
    pub vault: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub shares_minted: u64,
    pub total_shares: u64,
}

#[event]
pub struct WithdrawEvent {
    pub vault: Pubkey,
    pub depositor: Pubkey,
    pub shares_burned: u64,
    pub amount: u64,
    pub reward: u64,
    pub total_shares: u64,
}

#[event]
pub struct StageStakeEvent {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub stage: u8,
    pub amount: u64,
    pub stage_balances: [u64; 4],
}

#[event]
pub struct HarvestEvent {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub reward: u64,
    pub team_fund: u64,
    pub treasury_fund: u64,
    pub strategic_wallet: u64,
    pub compounded: u64,
    pub compound_rewards: bool,
    pub reward_per_share: u128,
}

#[event]
pub struct SweepEvent {
    pub strategy: Pubkey,
    pub destination: Pubkey,
    pub bucket: u8,
    pub amount: u64,
}

#[event]
pub struct VaultRegisteredEvent {
    pub controller: Pubkey,
    pub vault: Pubkey,
    pub strategy: Pubkey,
}
