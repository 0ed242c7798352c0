use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::error::*;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeStrategy<'info> {
    #[account(
        init_if_needed,
        payer = governance,
        space = Strategy::LEN,
        seeds = [STRATEGY_SEED, vault.key().as_ref()],
        bump
    )]
    pub strategy: Account<'info, Strategy>,

    #[account(constraint = storage.governance == governance.key() @ VaultError::Unauthorized)]
    pub storage: Account<'info, Storage>,

    #[account(constraint = vault.storage == storage.key() @ VaultError::Unauthorized)]
    pub vault: Account<'info, Vault>,

    pub reward_mint: Account<'info, Mint>,

    /// Holds stage reserves, pending buckets and distributed reward, all in the reward mint
    #[account(
        init_if_needed,
        payer = governance,
        token::mint = reward_mint,
        token::authority = vault,
        seeds = [STRATEGY_REWARD_TOKEN_ACCOUNT_SEED, strategy.key().as_ref()],
        bump
    )]
    pub reward_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub governance: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn initialize_strategy(ctx: Context<InitializeStrategy>, params: InitializeStrategyParams) -> Result<()> {
    let strategy = &mut ctx.accounts.strategy;
    let strategy_key = strategy.key();

    strategy.initialize(
        strategy_key,
        &ctx.accounts.vault,
        ctx.accounts.reward_mint.key(),
        ctx.accounts.reward_token_account.key(),
        params,
        ctx.bumps.strategy,
    )?;

    msg!(
        "Strategy initialized: {} for vault {}, compounding={}, split team={} treasury={} strategic={} bps",
        strategy_key,
        strategy.vault,
        strategy.compound_rewards,
        strategy.team_fund_bps,
        strategy.treasury_fund_bps,
        strategy.strategic_wallet_bps
    );

    Ok(())
}
