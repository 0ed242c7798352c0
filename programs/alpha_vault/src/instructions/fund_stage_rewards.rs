use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::error::*;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
pub struct FundStageRewards<'info> {
    #[account(has_one = reward_token_account @ VaultError::InvalidTokenAccount)]
    pub strategy: Account<'info, Strategy>,

    #[account(
        mut,
        constraint = stage_pool.strategy == strategy.key() @ VaultError::StrategyMismatch
    )]
    pub stage_pool: Account<'info, StagePool>,

    #[account(mut)]
    pub reward_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = funder_token_account.mint == strategy.reward_mint @ VaultError::InvalidTokenMint,
        constraint = funder_token_account.owner == funder.key() @ VaultError::Unauthorized,
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    pub funder: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn fund_stage_rewards(ctx: Context<FundStageRewards>, amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(VaultError::InvalidAmount.into());
    }
    if ctx.accounts.funder_token_account.amount < amount {
        return Err(VaultError::InsufficientBalance.into());
    }
    let slot = get_current_slot()?;

    // Non-final stages are refused before any tokens move
    let stage_pool = &mut ctx.accounts.stage_pool;
    stage_pool.accrue(slot)?;
    stage_pool.fund_rewards(amount)?;

    let cpi_accounts = Transfer {
        from: ctx.accounts.funder_token_account.to_account_info(),
        to: ctx.accounts.reward_token_account.to_account_info(),
        authority: ctx.accounts.funder.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

    let stage_pool = &ctx.accounts.stage_pool;

    msg!(
        "Funded stage {} pool with {} reward, reserve now {}",
        stage_pool.stage,
        amount,
        stage_pool.reward_reserve
    );

    Ok(())
}
