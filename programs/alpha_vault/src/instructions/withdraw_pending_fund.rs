use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::error::*;
use crate::events::SweepEvent;
use crate::state::*;
use crate::utils::*;

#[derive(Accounts)]
pub struct WithdrawPendingFund<'info> {
    pub storage: Account<'info, Storage>,

    #[account(constraint = vault.storage == storage.key() @ VaultError::Unauthorized)]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        constraint = strategy.key() == vault.strategy @ VaultError::StrategyNotSet,
        has_one = reward_token_account @ VaultError::InvalidTokenAccount,
    )]
    pub strategy: Account<'info, Strategy>,

    #[account(mut)]
    pub reward_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination_token_account.mint == strategy.reward_mint @ VaultError::InvalidTokenMint,
    )]
    pub destination_token_account: Account<'info, TokenAccount>,

    pub governance: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Sweep one pending bucket to its fixed destination. An empty bucket is a no-op.
pub fn withdraw_pending_fund(ctx: Context<WithdrawPendingFund>, bucket: RewardBucket) -> Result<()> {
    let access = ctx.accounts.storage.access(ctx.accounts.governance.key());
    let destination = ctx.accounts.strategy.destination(bucket);
    if ctx.accounts.destination_token_account.owner != destination {
        return Err(VaultError::InvalidTokenAccount.into());
    }

    let amount = ctx.accounts.strategy.sweep(&access, bucket)?;
    if amount == 0 {
        msg!("Pending {:?} bucket is empty", bucket);
        return Ok(());
    }

    let vault = &ctx.accounts.vault;
    let bump = [vault.bump];
    let signer_seeds = get_vault_signer_seeds(&vault.storage, &vault.underlying_mint, &bump);
    transfer_from_custody(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.reward_token_account.to_account_info(),
        ctx.accounts.destination_token_account.to_account_info(),
        vault.to_account_info(),
        &signer_seeds,
        amount,
    )?;

    emit!(SweepEvent {
        strategy: ctx.accounts.strategy.key(),
        destination,
        bucket: bucket as u8,
        amount,
    });

    msg!("Swept {} from pending {:?} bucket to {}", amount, bucket, destination);

    Ok(())
}
