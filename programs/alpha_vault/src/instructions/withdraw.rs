use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::error::*;
use crate::events::WithdrawEvent;
use crate::instructions::stage_pools::*;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
pub struct Withdraw<'info> {
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

    #[account(
        mut,
        constraint = strategy.key() == vault.strategy @ VaultError::StrategyNotSet,
        has_one = reward_token_account @ VaultError::InvalidTokenAccount,
    )]
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
    pub reward_token_account: Account<'info, TokenAccount>,

    /// Receives distributed reward; may be omitted while nothing is owed
    #[account(
        mut,
        constraint = user_reward_token_account.mint == strategy.reward_mint @ VaultError::InvalidTokenMint,
        constraint = user_reward_token_account.owner == authority.key() @ VaultError::Unauthorized,
    )]
    pub user_reward_token_account: Option<Account<'info, TokenAccount>>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    ctx.accounts.stage_pools.verify(&ctx.accounts.strategy.key())?;
    let slot = get_current_slot()?;

    let mut cascade = ctx.accounts.stage_pools.cascade()?;
    cascade.sync(slot)?;
    let Withdrawal { amount, reward } = ctx.accounts.vault.withdraw(
        &mut ctx.accounts.vault_depositor,
        shares,
        &mut ctx.accounts.strategy,
        &mut cascade,
    )?;

    if ctx.accounts.vault_token_account.amount < amount {
        return Err(VaultError::InsufficientLiquidity.into());
    }
    if ctx.accounts.reward_token_account.amount < reward {
        return Err(VaultError::InsufficientBalance.into());
    }

    let vault = &ctx.accounts.vault;
    let bump = [vault.bump];
    let signer_seeds = get_vault_signer_seeds(&vault.storage, &vault.underlying_mint, &bump);
    transfer_from_custody(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault_token_account.to_account_info(),
        ctx.accounts.user_token_account.to_account_info(),
        vault.to_account_info(),
        &signer_seeds,
        amount,
    )?;

    if reward > 0 {
        let user_reward_token_account = ctx
            .accounts
            .user_reward_token_account
            .as_ref()
            .ok_or(VaultError::InvalidTokenAccount)?;
        transfer_from_custody(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.reward_token_account.to_account_info(),
            user_reward_token_account.to_account_info(),
            vault.to_account_info(),
            &signer_seeds,
            reward,
        )?;
    }

    emit!(WithdrawEvent {
        vault: vault.key(),
        depositor: ctx.accounts.authority.key(),
        shares_burned: shares,
        amount,
        reward,
        total_shares: vault.total_shares,
    });

    msg!("Withdrew {} shares, received {} tokens and {} reward", shares, amount, reward);

    Ok(())
}
