use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::error::*;
use crate::events::DepositEvent;
use crate::instructions::stage_pools::*;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut, has_one = vault_token_account @ VaultError::InvalidTokenAccount)]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [VAULT_DEPOSITOR_SEED, vault.key().as_ref(), authority.key().as_ref()],
        bump = vault_depositor.bump,
        constraint = vault_depositor.authority == authority.key() @ VaultError::Unauthorized,
        constraint = vault_depositor.vault == vault.key() @ VaultError::Unauthorized,
    )]
    pub vault_depositor: Account<'info, VaultDepositor>,

    #[account(constraint = strategy.key() == vault.strategy @ VaultError::StrategyNotSet)]
    pub strategy: Account<'info, Strategy>,

    pub stage_pools: StagePools<'info>,

    #[account(mut)]
    pub vault_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = user_token_account.mint == vault.underlying_mint @ VaultError::InvalidTokenMint,
        constraint = user_token_account.owner == authority.key() @ VaultError::Unauthorized,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(VaultError::InvalidAmount.into());
    }
    if ctx.accounts.user_token_account.amount < amount {
        return Err(VaultError::InsufficientBalance.into());
    }
    ctx.accounts.stage_pools.verify(&ctx.accounts.strategy.key())?;
    let slot = get_current_slot()?;

    // Transfer tokens from user to custody FIRST
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.vault_token_account.to_account_info(),
        authority: ctx.accounts.authority.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

    // Mint shares AFTER successful token transfer, valued against the synced cascade
    let mut cascade = ctx.accounts.stage_pools.cascade()?;
    cascade.sync(slot)?;
    let shares = ctx.accounts.vault.deposit(
        &mut ctx.accounts.vault_depositor,
        amount,
        &ctx.accounts.strategy,
        &cascade,
    )?;

    emit!(DepositEvent {
        vault: ctx.accounts.vault.key(),
        depositor: ctx.accounts.authority.key(),
        amount,
        shares_minted: shares,
        total_shares: ctx.accounts.vault.total_shares,
    });

    msg!("Deposited {} tokens, received {} shares", amount, shares);

    Ok(())
}
