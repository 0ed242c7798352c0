use anchor_lang::prelude::*;
use instructions::*;
use state::*;

pub mod adapter;
pub mod constants;
pub mod error;
pub mod events;
mod instructions;
pub mod math;
pub mod state;
mod utils;

declare_id!("6mZqfQXVonBPYef23uDvHzuMnEYofdR2bWsrr6g9YrEq");

#[program]
pub mod alpha_vault {
    use super::*;

    /// Create the access registry and record governance
    pub fn initialize_storage(ctx: Context<InitializeStorage>) -> Result<()> {
        instructions::initialize_storage(ctx)
    }

    /// Record the controller (one-time, governance only)
    pub fn set_controller(ctx: Context<SetController>) -> Result<()> {
        instructions::set_controller(ctx)
    }

    /// Create the vault/strategy registry
    pub fn initialize_controller(ctx: Context<InitializeController>) -> Result<()> {
        instructions::initialize_controller(ctx)
    }

    /// Create a vault and its custody token account
    pub fn initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
        instructions::initialize_vault(ctx)
    }

    /// Initialize a vault depositor
    pub fn initialize_vault_depositor(ctx: Context<InitializeVaultDepositor>) -> Result<()> {
        instructions::initialize_vault_depositor(ctx)
    }

    /// Create the strategy compounding a vault
    pub fn initialize_strategy(
        ctx: Context<InitializeStrategy>,
        params: InitializeStrategyParams,
    ) -> Result<()> {
        instructions::initialize_strategy(ctx, params)
    }

    /// Update reward split and sweep destinations (governance only)
    pub fn update_strategy_config(
        ctx: Context<UpdateStrategyConfig>,
        params: UpdateStrategyConfigParams,
    ) -> Result<()> {
        instructions::update_strategy_config(ctx, params)
    }

    /// Bind a vault to its strategy (governance only)
    pub fn set_strategy(ctx: Context<SetStrategy>) -> Result<()> {
        instructions::set_strategy(ctx)
    }

    /// Create one stage pool of a strategy's cascade
    pub fn initialize_stage_pool(
        ctx: Context<InitializeStagePool>,
        stage: u8,
        params: InitializeStagePoolParams,
    ) -> Result<()> {
        instructions::initialize_stage_pool(ctx, stage, params)
    }

    /// Change a stage pool's reward rate or paused flag (governance only)
    pub fn update_stage_pool(
        ctx: Context<UpdateStagePool>,
        params: UpdateStagePoolParams,
    ) -> Result<()> {
        instructions::update_stage_pool(ctx, params)
    }

    /// Top up a stage pool's reward reserve
    pub fn fund_stage_rewards(ctx: Context<FundStageRewards>, amount: u64) -> Result<()> {
        instructions::fund_stage_rewards(ctx, amount)
    }

    /// Deposit underlying tokens for vault shares
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    /// Burn shares for the proportional underlying
    pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
        instructions::withdraw(ctx, shares)
    }

    /// Realize and compound the cascade's reward (permissionless)
    pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
        instructions::harvest(ctx)
    }

    /// Move the previous stage's balance into `stage` (governance or controller)
    pub fn stake_stage(ctx: Context<StakeStage>, stage: u8) -> Result<()> {
        instructions::stake_stage(ctx, stage)
    }

    pub fn withdraw_pending_team_fund(ctx: Context<WithdrawPendingFund>) -> Result<()> {
        instructions::withdraw_pending_fund(ctx, RewardBucket::TeamFund)
    }

    pub fn withdraw_pending_treasury_fund(ctx: Context<WithdrawPendingFund>) -> Result<()> {
        instructions::withdraw_pending_fund(ctx, RewardBucket::TreasuryFund)
    }

    pub fn withdraw_x_sushi_to_strategic_wallet(ctx: Context<WithdrawPendingFund>) -> Result<()> {
        instructions::withdraw_pending_fund(ctx, RewardBucket::StrategicWallet)
    }

    /// Register a vault/strategy pair with the controller (governance only)
    pub fn add_vault_and_strategy(ctx: Context<AddVaultAndStrategy>) -> Result<()> {
        instructions::add_vault_and_strategy(ctx)
    }

    /// Point a registered vault at a different strategy (governance only)
    pub fn repoint_strategy(ctx: Context<RepointStrategy>) -> Result<()> {
        instructions::repoint_strategy(ctx)
    }

    pub fn stake_onsen_farm(ctx: Context<ControllerStake>) -> Result<()> {
        instructions::controller_stake(ctx, 1)
    }

    pub fn stake_sushi_bar(ctx: Context<ControllerStake>) -> Result<()> {
        instructions::controller_stake(ctx, 2)
    }

    pub fn stake_onx_farm(ctx: Context<ControllerStake>) -> Result<()> {
        instructions::controller_stake(ctx, 3)
    }

    pub fn stake_x_sushi_farm(ctx: Context<ControllerStake>) -> Result<()> {
        instructions::controller_stake(ctx, 3)
    }

    pub fn stake_onx(ctx: Context<ControllerStake>) -> Result<()> {
        instructions::controller_stake(ctx, 4)
    }
}
